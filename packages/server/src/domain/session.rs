//! Participant session and its outbound delivery queue
//!
//! ## 設計ノート
//!
//! 各セッションは容量制限付きの `mpsc` チャネルを 1 本持ちます。
//!
//! - `Outbox`: Room が保持する送信側。`try_send` のみを使い、決して待機しない
//! - `Inbox`: 接続ハンドラの送信ループが保持する受信側
//!
//! キューが満杯の場合、そのメッセージは破棄され、`Inbox` 側に強制切断の
//! シグナル（`Notify`）が送られます。

use std::sync::Arc;

use tokio::sync::{Notify, mpsc};
use uuid::Uuid;

use super::{entity::OutboundEvent, error::InboxError, value_object::ParticipantId};

/// Opaque handle identifying one session inside its room
///
/// Participant ids may repeat, handles never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionHandle(Uuid);

impl SessionHandle {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

}

impl std::fmt::Display for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Result of a single non-blocking delivery attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The event was queued
    Delivered,
    /// The queue was full; the event was dropped and the session flagged for closure
    Overflowed,
    /// The receiving side is gone (connection already tearing down)
    Closed,
}

/// Sending half of a session's outbound queue
#[derive(Debug, Clone)]
pub struct Outbox {
    sender: mpsc::Sender<OutboundEvent>,
    evict: Arc<Notify>,
}

/// Receiving half of a session's outbound queue
#[derive(Debug)]
pub struct Inbox {
    receiver: mpsc::Receiver<OutboundEvent>,
    evict: Arc<Notify>,
}

/// Create a bounded outbound queue holding at most `capacity` events
///
/// # Panics
///
/// Panics if `capacity` is zero.
pub fn outbox_channel(capacity: usize) -> (Outbox, Inbox) {
    let (sender, receiver) = mpsc::channel(capacity);
    let evict = Arc::new(Notify::new());
    (
        Outbox {
            sender,
            evict: evict.clone(),
        },
        Inbox { receiver, evict },
    )
}

impl Outbox {
    /// Queue an event without waiting
    pub fn deliver(&self, event: OutboundEvent) -> DeliveryOutcome {
        match self.sender.try_send(event) {
            Ok(()) => DeliveryOutcome::Delivered,
            Err(mpsc::error::TrySendError::Full(_)) => {
                // notify_one keeps a permit even if the outbound loop is not waiting yet
                self.evict.notify_one();
                DeliveryOutcome::Overflowed
            }
            Err(mpsc::error::TrySendError::Closed(_)) => DeliveryOutcome::Closed,
        }
    }
}

impl Inbox {
    /// Wait for the next queued event
    ///
    /// An overflow signal wins over pending events: once a delivery was
    /// dropped the connection is closed without draining the rest.
    pub async fn recv(&mut self) -> Result<OutboundEvent, InboxError> {
        tokio::select! {
            biased;
            _ = self.evict.notified() => Err(InboxError::Overflowed),
            event = self.receiver.recv() => event.ok_or(InboxError::Closed),
        }
    }

    /// Resolves once a delivery to this session has overflowed
    ///
    /// Used to abandon a write that is stuck on a client that stopped reading.
    pub async fn evicted(&self) {
        self.evict.notified().await
    }

    /// Number of events waiting in the queue
    pub fn pending(&self) -> usize {
        self.receiver.len()
    }
}

/// One connection's membership record within a room
#[derive(Debug)]
pub struct ParticipantSession {
    pub handle: SessionHandle,
    pub id: ParticipantId,
    pub display_name: Option<String>,
    outbox: Outbox,
}

impl ParticipantSession {
    /// New session with no display name
    pub fn new(id: ParticipantId, outbox: Outbox) -> Self {
        Self {
            handle: SessionHandle::generate(),
            id,
            display_name: None,
            outbox,
        }
    }

    pub fn deliver(&self, event: OutboundEvent) -> DeliveryOutcome {
        self.outbox.deliver(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_handles_are_unique() {
        // テスト項目: 同じ参加者 ID でもセッションハンドルは一意
        // given (前提条件):
        let (outbox, _inbox) = outbox_channel(1);

        // when (操作):
        let first = ParticipantSession::new(ParticipantId::new(42), outbox.clone());
        let second = ParticipantSession::new(ParticipantId::new(42), outbox);

        // then (期待する結果):
        assert_eq!(first.id, second.id);
        assert_ne!(first.handle, second.handle);
        assert_eq!(first.display_name, None);
    }

    #[tokio::test]
    async fn test_deliver_and_receive_in_order() {
        // テスト項目: キューに入れたイベントが順番通りに受信される
        // given (前提条件):
        let (outbox, mut inbox) = outbox_channel(4);

        // when (操作):
        let first = outbox.deliver(OutboundEvent::YourName(None));
        let second = outbox.deliver(OutboundEvent::YourName(Some("Bob".to_string())));

        // then (期待する結果):
        assert_eq!(first, DeliveryOutcome::Delivered);
        assert_eq!(second, DeliveryOutcome::Delivered);
        assert_eq!(inbox.recv().await, Ok(OutboundEvent::YourName(None)));
        assert_eq!(
            inbox.recv().await,
            Ok(OutboundEvent::YourName(Some("Bob".to_string())))
        );
    }

    #[tokio::test]
    async fn test_full_queue_drops_event_and_signals_overflow() {
        // テスト項目: キューが満杯の場合、イベントは破棄され強制切断が通知される
        // given (前提条件):
        let (outbox, mut inbox) = outbox_channel(1);
        assert_eq!(
            outbox.deliver(OutboundEvent::YourName(None)),
            DeliveryOutcome::Delivered
        );

        // when (操作):
        let outcome = outbox.deliver(OutboundEvent::YourName(Some("dropped".to_string())));

        // then (期待する結果):
        assert_eq!(outcome, DeliveryOutcome::Overflowed);
        assert_eq!(inbox.recv().await, Err(InboxError::Overflowed));
    }

    #[tokio::test]
    async fn test_evicted_resolves_after_overflow_without_draining() {
        // テスト項目: 受信ループが待機していない間の溢れも evicted で検知できる
        // given (前提条件):
        let (outbox, inbox) = outbox_channel(1);
        outbox.deliver(OutboundEvent::YourName(None));

        // when (操作):
        let outcome = outbox.deliver(OutboundEvent::YourName(None));

        // then (期待する結果):
        assert_eq!(outcome, DeliveryOutcome::Overflowed);
        let evicted =
            tokio::time::timeout(std::time::Duration::from_secs(1), inbox.evicted()).await;
        assert!(evicted.is_ok());
    }

    #[tokio::test]
    async fn test_evicted_pending_while_queue_has_room() {
        // テスト項目: 溢れていなければ evicted は完了しない
        // given (前提条件):
        let (outbox, inbox) = outbox_channel(2);

        // when (操作):
        outbox.deliver(OutboundEvent::YourName(None));

        // then (期待する結果):
        let evicted =
            tokio::time::timeout(std::time::Duration::from_millis(50), inbox.evicted()).await;
        assert!(evicted.is_err());
    }

    #[tokio::test]
    async fn test_deliver_after_inbox_dropped_reports_closed() {
        // テスト項目: 受信側が破棄された後の送信は Closed になる
        // given (前提条件):
        let (outbox, inbox) = outbox_channel(1);
        drop(inbox);

        // when (操作):
        let outcome = outbox.deliver(OutboundEvent::YourName(None));

        // then (期待する結果):
        assert_eq!(outcome, DeliveryOutcome::Closed);
    }

    #[tokio::test]
    async fn test_inbox_reports_closed_when_all_outboxes_dropped() {
        // テスト項目: 送信側が全て破棄されると受信側は Closed を返す
        // given (前提条件):
        let (outbox, mut inbox) = outbox_channel(1);

        // when (操作):
        drop(outbox);

        // then (期待する結果):
        assert_eq!(inbox.recv().await, Err(InboxError::Closed));
    }
}
