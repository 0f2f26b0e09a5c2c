//! Room broadcast chat server library.
//!
//! Participants connect over WebSocket with a room key and a numeric id,
//! and every message they send is fanned out to everyone in the same room.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
