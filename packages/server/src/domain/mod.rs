//! Domain layer
//!
//! ルーム、参加者セッション、値オブジェクト、およびドメイン層が必要とする
//! インターフェース（`RoomRegistry`）を定義します。

pub mod entity;
pub mod error;
pub mod repository;
pub mod room;
pub mod session;
pub mod value_object;

pub use entity::{ChatMessage, OutboundEvent, ParticipantSnapshot};
pub use error::{InboxError, RoomError, ValueObjectError};
pub use repository::RoomRegistry;
pub use room::{BroadcastReport, Room};
pub use session::{Inbox, Outbox, ParticipantSession, SessionHandle, outbox_channel};
pub use value_object::{ParticipantId, RoomKey, Timestamp};
