//! UseCase: 参加者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 切断したセッションが Room に残らないことを保証する
//! - 最後の参加者が切断した場合に Room が回収されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加者の切断（他の参加者は残る）
//! - エッジケース：最後の参加者の切断（Room の回収）
//! - 異常系：既に切断済みのセッションの再切断

use super::connect_participant::JoinedSession;

/// 参加者切断のユースケース
#[derive(Debug, Default)]
pub struct DisconnectParticipantUseCase;

impl DisconnectParticipantUseCase {
    /// 新しい DisconnectParticipantUseCase を作成
    pub fn new() -> Self {
        Self
    }

    /// 参加者切断を実行
    ///
    /// # Returns
    ///
    /// Room から削除された場合は `true`、既に削除済みだった場合は `false`
    pub async fn execute(&self, session: &JoinedSession) -> bool {
        let removed = session.room.leave(session.handle).await;
        if removed {
            let remaining = session.room.participant_count().await;
            tracing::info!(
                room = %session.room.key(),
                user_id = %session.id,
                remaining,
                "Participant disconnected"
            );
        } else {
            tracing::warn!(
                room = %session.room.key(),
                user_id = %session.id,
                "Participant was already removed"
            );
        }
        removed
    }
}
