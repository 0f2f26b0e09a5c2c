//! Room: membership and broadcast
//!
//! ## 並行性
//!
//! Room の全ての操作（join / leave / broadcast / rename）は 1 つの `Mutex` を
//! 通して直列化されます。ロックを保持している間に行う配信は `try_send` のみで、
//! 他のセッションの送信ループを待つことはありません。
//!
//! 空になった Room は `RoomRegistry::notify_empty` で回収されます。
//! 回収された Room は `retired` となり、以降の join は `RoomError::Retired` で
//! 失敗します（呼び出し側はレジストリから新しい Room を取得し直します）。

use std::{collections::HashMap, sync::Weak};

use tokio::sync::Mutex;

use super::{
    entity::{ChatMessage, OutboundEvent, ParticipantSnapshot},
    error::RoomError,
    repository::RoomRegistry,
    session::{DeliveryOutcome, Outbox, ParticipantSession, SessionHandle},
    value_object::{ParticipantId, RoomKey, Timestamp},
};

/// Result of fanning out one chat message
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Sessions the message was queued for
    pub delivered: usize,
    /// Sessions whose queue was full; they are being force-closed
    pub overflowed: usize,
}

#[derive(Debug, Default)]
struct RoomState {
    sessions: HashMap<SessionHandle, ParticipantSession>,
    retired: bool,
}

/// A named room and the sessions currently joined to it
pub struct Room {
    key: RoomKey,
    created_at: Timestamp,
    state: Mutex<RoomState>,
    registry: Option<Weak<dyn RoomRegistry>>,
}

impl std::fmt::Debug for Room {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Room")
            .field("key", &self.key)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

impl Room {
    /// Create a room that is not tracked by any registry
    pub fn new(key: RoomKey, created_at: Timestamp) -> Self {
        Self {
            key,
            created_at,
            state: Mutex::new(RoomState::default()),
            registry: None,
        }
    }

    /// Create a room that reports to `registry` when its last session leaves
    pub fn with_registry(
        key: RoomKey,
        created_at: Timestamp,
        registry: Weak<dyn RoomRegistry>,
    ) -> Self {
        Self {
            registry: Some(registry),
            ..Self::new(key, created_at)
        }
    }

    pub fn key(&self) -> &RoomKey {
        &self.key
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Add a new session and queue its `your_name` event
    ///
    /// The `your_name` event is queued before the session becomes visible to
    /// broadcasts, so it is always the first event the session receives.
    pub async fn join(
        &self,
        id: ParticipantId,
        outbox: Outbox,
    ) -> Result<SessionHandle, RoomError> {
        let mut state = self.state.lock().await;
        if state.retired {
            return Err(RoomError::Retired(self.key.to_string()));
        }

        let session = ParticipantSession::new(id, outbox);
        let handle = session.handle;
        if session.deliver(OutboundEvent::YourName(session.display_name.clone()))
            == DeliveryOutcome::Overflowed
        {
            tracing::warn!(room = %self.key, user_id = %id, "Outbound queue full on join");
        }
        state.sessions.insert(handle, session);

        tracing::debug!(
            room = %self.key,
            user_id = %id,
            session = %handle,
            participants = state.sessions.len(),
            "Session joined"
        );
        Ok(handle)
    }

    /// Remove a session, reporting an emptied room to the registry
    ///
    /// Returns `false` if the handle was not a member.
    pub async fn leave(&self, handle: SessionHandle) -> bool {
        let now_empty = {
            let mut state = self.state.lock().await;
            let Some(session) = state.sessions.remove(&handle) else {
                return false;
            };
            tracing::debug!(
                room = %self.key,
                user_id = %session.id,
                session = %handle,
                participants = state.sessions.len(),
                "Session left"
            );
            state.sessions.is_empty()
        };

        // The room guard is released before the registry takes its own guard.
        if now_empty && let Some(registry) = self.registry.as_ref().and_then(Weak::upgrade) {
            registry.notify_empty(self).await;
        }
        true
    }

    /// Fan a chat message out to every session, the sender included
    pub async fn broadcast(
        &self,
        sender: SessionHandle,
        content: String,
    ) -> Result<BroadcastReport, RoomError> {
        let state = self.state.lock().await;
        let session = state
            .sessions
            .get(&sender)
            .ok_or_else(|| RoomError::SessionNotFound(self.key.to_string()))?;
        let message = ChatMessage::new(session.id, session.display_name.clone(), content);

        let mut report = BroadcastReport::default();
        for (handle, recipient) in &state.sessions {
            match recipient.deliver(OutboundEvent::NewMessage(message.clone())) {
                DeliveryOutcome::Delivered => report.delivered += 1,
                DeliveryOutcome::Overflowed => {
                    report.overflowed += 1;
                    tracing::warn!(
                        room = %self.key,
                        user_id = %recipient.id,
                        session = %handle,
                        "Outbound queue full, closing slow session"
                    );
                }
                DeliveryOutcome::Closed => {
                    tracing::debug!(room = %self.key, session = %handle, "Skipping closed session");
                }
            }
        }
        Ok(report)
    }

    /// Replace a session's display name; nobody is notified
    pub async fn rename(&self, handle: SessionHandle, new_name: String) -> Result<(), RoomError> {
        let mut state = self.state.lock().await;
        let session = state
            .sessions
            .get_mut(&handle)
            .ok_or_else(|| RoomError::SessionNotFound(self.key.to_string()))?;
        tracing::debug!(
            room = %self.key,
            user_id = %session.id,
            name = %new_name,
            "Session renamed"
        );
        session.display_name = Some(new_name);
        Ok(())
    }

    /// Mark the room retired if it has no sessions
    ///
    /// Called by the registry while it holds its own guard. Returns `true`
    /// if the room is (now) retired and may be dropped from the registry.
    pub async fn retire_if_empty(&self) -> bool {
        let mut state = self.state.lock().await;
        if state.sessions.is_empty() {
            state.retired = true;
        }
        state.retired
    }

    pub async fn participant_count(&self) -> usize {
        self.state.lock().await.sessions.len()
    }

    /// Snapshot of the joined sessions, sorted by participant id
    pub async fn participants(&self) -> Vec<ParticipantSnapshot> {
        let state = self.state.lock().await;
        let mut participants: Vec<_> = state
            .sessions
            .values()
            .map(|session| ParticipantSnapshot {
                id: session.id,
                display_name: session.display_name.clone(),
            })
            .collect();
        participants.sort_by_key(|p| p.id);
        participants
    }
}
