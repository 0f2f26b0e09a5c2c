//! UseCase layer
//!
//! 接続ハンドラや HTTP ハンドラから呼ばれるアプリケーションロジック。
//! ドメイン層（`Room`, `RoomRegistry`）にのみ依存します。

mod connect_participant;
mod disconnect_participant;
mod error;
mod get_room_detail;
mod get_rooms;
mod send_message;
mod update_name;

pub use connect_participant::{ConnectParticipantUseCase, JoinedSession};
pub use disconnect_participant::DisconnectParticipantUseCase;
pub use error::{ConnectError, GetRoomDetailError, SendMessageError, UpdateNameError};
pub use get_room_detail::GetRoomDetailUseCase;
pub use get_rooms::GetRoomsUseCase;
pub use send_message::SendMessageUseCase;
pub use update_name::UpdateNameUseCase;
