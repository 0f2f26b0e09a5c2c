//! UseCase: ルーム詳細取得

use std::sync::Arc;

use crate::domain::{Room, RoomKey, RoomRegistry};

use super::error::GetRoomDetailError;

/// ルーム詳細取得のユースケース
///
/// 存在しない Room を作成しないよう `find` のみを使います。
pub struct GetRoomDetailUseCase {
    registry: Arc<dyn RoomRegistry>,
}

impl GetRoomDetailUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    pub async fn execute(&self, key: &RoomKey) -> Result<Arc<Room>, GetRoomDetailError> {
        self.registry
            .find(key)
            .await
            .ok_or_else(|| GetRoomDetailError::RoomNotFound(key.to_string()))
    }
}
