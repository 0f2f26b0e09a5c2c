//! Server state shared by every handler.

use std::sync::Arc;

use crate::{
    domain::RoomRegistry,
    usecase::{
        ConnectParticipantUseCase, DisconnectParticipantUseCase, GetRoomDetailUseCase,
        GetRoomsUseCase, SendMessageUseCase, UpdateNameUseCase,
    },
};

/// Shared application state
pub struct AppState {
    /// ConnectParticipantUseCase（参加者接続のユースケース）
    pub connect_participant_usecase: Arc<ConnectParticipantUseCase>,
    /// DisconnectParticipantUseCase（参加者切断のユースケース）
    pub disconnect_participant_usecase: Arc<DisconnectParticipantUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// UpdateNameUseCase（表示名更新のユースケース）
    pub update_name_usecase: Arc<UpdateNameUseCase>,
    /// GetRoomsUseCase（ルーム一覧取得のユースケース）
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// GetRoomDetailUseCase（ルーム詳細取得のユースケース）
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
    /// 各接続の送信キューの容量
    pub outbound_queue_capacity: usize,
}

impl AppState {
    /// Wire every use case to one registry
    pub fn from_registry(registry: Arc<dyn RoomRegistry>, outbound_queue_capacity: usize) -> Self {
        Self {
            connect_participant_usecase: Arc::new(ConnectParticipantUseCase::new(registry.clone())),
            disconnect_participant_usecase: Arc::new(DisconnectParticipantUseCase::new()),
            send_message_usecase: Arc::new(SendMessageUseCase::new()),
            update_name_usecase: Arc::new(UpdateNameUseCase::new()),
            get_rooms_usecase: Arc::new(GetRoomsUseCase::new(registry.clone())),
            get_room_detail_usecase: Arc::new(GetRoomDetailUseCase::new(registry)),
            outbound_queue_capacity,
        }
    }
}
