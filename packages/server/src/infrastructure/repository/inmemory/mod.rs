//! In-memory implementations.

pub mod room_registry;

pub use room_registry::InMemoryRoomRegistry;
