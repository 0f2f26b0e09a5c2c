//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 送信者を含む同じ Room の全員にだけ届くことを保証する
//! - 他の Room には届かないことを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：同じ Room の 2 人に届く
//! - エッジケース：送信者しかいない Room（自分にだけ届く）
//! - 異常系：既に退出したセッションからの送信

use crate::domain::BroadcastReport;

use super::{connect_participant::JoinedSession, error::SendMessageError};

/// メッセージ送信のユースケース
#[derive(Debug, Default)]
pub struct SendMessageUseCase;

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new() -> Self {
        Self
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `session` - 送信者のセッション
    /// * `content` - メッセージ本文（検証なし）
    ///
    /// # Returns
    ///
    /// * `Ok(BroadcastReport)` - 配信結果
    /// * `Err(SendMessageError)` - 送信者が Room にいない
    pub async fn execute(
        &self,
        session: &JoinedSession,
        content: String,
    ) -> Result<BroadcastReport, SendMessageError> {
        let report = session.room.broadcast(session.handle, content).await?;
        tracing::debug!(
            room = %session.room.key(),
            user_id = %session.id,
            delivered = report.delivered,
            overflowed = report.overflowed,
            "Broadcast message"
        );
        Ok(report)
    }
}
