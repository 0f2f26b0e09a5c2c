//! UseCase: 表示名の更新

use super::{connect_participant::JoinedSession, error::UpdateNameError};

/// 表示名更新のユースケース
///
/// 更新は誰にも通知されず、以降の送信メッセージにだけ反映されます。
#[derive(Debug, Default)]
pub struct UpdateNameUseCase;

impl UpdateNameUseCase {
    pub fn new() -> Self {
        Self
    }

    pub async fn execute(
        &self,
        session: &JoinedSession,
        new_name: String,
    ) -> Result<(), UpdateNameError> {
        session.room.rename(session.handle, new_name).await?;
        Ok(())
    }
}
