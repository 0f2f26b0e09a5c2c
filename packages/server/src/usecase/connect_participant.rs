//! UseCase: 参加者接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::execute() メソッド
//! - Registry からの Room 取得と join
//!
//! ### なぜこのテストが必要か
//! - 回収済み（retired）の Room に join した場合、Registry から取得し直す必要がある
//! - 取得し直しが無限に続かないことを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規参加者の接続（your_name が最初に届く）
//! - 競合：取得した Room が join 前に回収された
//! - 異常系：回収が繰り返され、接続を諦める

use std::sync::Arc;

use crate::domain::{Outbox, ParticipantId, Room, RoomError, RoomKey, RoomRegistry, SessionHandle};

use super::error::ConnectError;

/// Upper bound on registry lookups for one join
const MAX_JOIN_ATTEMPTS: usize = 3;

/// A session that has joined a room
#[derive(Debug, Clone)]
pub struct JoinedSession {
    pub room: Arc<Room>,
    pub handle: SessionHandle,
    pub id: ParticipantId,
}

/// 参加者接続のユースケース
pub struct ConnectParticipantUseCase {
    /// Registry（Room 対応表の抽象化）
    registry: Arc<dyn RoomRegistry>,
}

impl ConnectParticipantUseCase {
    /// 新しい ConnectParticipantUseCase を作成
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// 参加者接続を実行
    ///
    /// # Arguments
    ///
    /// * `key` - 検証済みのルームキー
    /// * `id` - 検証済みの参加者 ID
    /// * `outbox` - このセッションへの送信キュー
    ///
    /// # Returns
    ///
    /// * `Ok(JoinedSession)` - 接続成功（your_name は既に送信キューに入っている）
    /// * `Err(ConnectError)` - 接続失敗
    pub async fn execute(
        &self,
        key: RoomKey,
        id: ParticipantId,
        outbox: Outbox,
    ) -> Result<JoinedSession, ConnectError> {
        for attempt in 1..=MAX_JOIN_ATTEMPTS {
            let room = self.registry.get_or_create(&key).await;
            match room.join(id, outbox.clone()).await {
                Ok(handle) => return Ok(JoinedSession { room, handle, id }),
                Err(RoomError::Retired(_)) => {
                    tracing::debug!(room = %key, attempt, "Room retired before join, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(ConnectError::RoomUnavailable {
            key: key.into_string(),
            attempts: MAX_JOIN_ATTEMPTS,
        })
    }
}
