//! UseCase: ルーム一覧取得

use std::sync::Arc;

use crate::domain::{Room, RoomRegistry};

/// ルーム一覧取得のユースケース
pub struct GetRoomsUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl GetRoomsUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// 現在存在する Room をキー順で返す
    pub async fn execute(&self) -> Vec<Arc<Room>> {
        self.registry.rooms().await
    }
}
