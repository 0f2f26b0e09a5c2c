//! Per-connection lifecycle
//!
//! `Handshaking → Joined → Closing → Closed`
//!
//! 不正なハンドシェイクは `Handshaking → Closed` に直接遷移します。
//! `begin_closing` は参加中のセッションを 1 度だけ返すため、
//! `Room::leave` が 2 回呼ばれることはありません。

use crate::usecase::JoinedSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionPhase {
    Handshaking,
    Joined,
    Closing,
    Closed,
}

/// State of one WebSocket connection
#[derive(Debug)]
pub struct Connection {
    phase: ConnectionPhase,
    session: Option<JoinedSession>,
}

impl Default for Connection {
    fn default() -> Self {
        Self::new()
    }
}

impl Connection {
    pub fn new() -> Self {
        Self {
            phase: ConnectionPhase::Handshaking,
            session: None,
        }
    }

    pub fn phase(&self) -> ConnectionPhase {
        self.phase
    }

    pub fn session(&self) -> Option<&JoinedSession> {
        self.session.as_ref()
    }

    /// `Handshaking → Closed`; no room was touched
    pub fn reject(&mut self) {
        if self.phase == ConnectionPhase::Handshaking {
            self.phase = ConnectionPhase::Closed;
        }
    }

    /// `Handshaking → Joined`
    ///
    /// Returns `false` (and keeps the current phase) if called in any other phase.
    pub fn join(&mut self, session: JoinedSession) -> bool {
        if self.phase != ConnectionPhase::Handshaking {
            return false;
        }
        self.session = Some(session);
        self.phase = ConnectionPhase::Joined;
        true
    }

    /// `Joined → Closing`, handing out the session to leave exactly once
    pub fn begin_closing(&mut self) -> Option<JoinedSession> {
        if self.phase != ConnectionPhase::Joined {
            return None;
        }
        self.phase = ConnectionPhase::Closing;
        self.session.take()
    }

    /// `→ Closed` (terminal)
    pub fn close(&mut self) {
        self.phase = ConnectionPhase::Closed;
        self.session = None;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::{ParticipantId, Room, RoomKey, SessionHandle, Timestamp};

    fn session() -> JoinedSession {
        JoinedSession {
            room: Arc::new(Room::new(
                RoomKey::new("abcde".to_string()).unwrap(),
                Timestamp::new(0),
            )),
            handle: SessionHandle::generate(),
            id: ParticipantId::new(42),
        }
    }

    #[test]
    fn test_full_lifecycle() {
        // テスト項目: Handshaking → Joined → Closing → Closed の順に遷移する
        // given (前提条件):
        let mut connection = Connection::new();
        assert_eq!(connection.phase(), ConnectionPhase::Handshaking);

        // when (操作) / then (期待する結果):
        assert!(connection.join(session()));
        assert_eq!(connection.phase(), ConnectionPhase::Joined);
        assert!(connection.session().is_some());

        assert!(connection.begin_closing().is_some());
        assert_eq!(connection.phase(), ConnectionPhase::Closing);

        connection.close();
        assert_eq!(connection.phase(), ConnectionPhase::Closed);
        assert!(connection.session().is_none());
    }

    #[test]
    fn test_begin_closing_hands_out_session_once() {
        // テスト項目: begin_closing は 1 度だけセッションを返す
        // given (前提条件):
        let mut connection = Connection::new();
        connection.join(session());

        // when (操作):
        let first = connection.begin_closing();
        let second = connection.begin_closing();

        // then (期待する結果):
        assert!(first.is_some());
        assert!(second.is_none());
    }

    #[test]
    fn test_rejected_handshake_is_terminal() {
        // テスト項目: 拒否されたハンドシェイクは Closed になり、以降 join できない
        // given (前提条件):
        let mut connection = Connection::new();

        // when (操作):
        connection.reject();
        let joined = connection.join(session());

        // then (期待する結果):
        assert!(!joined);
        assert_eq!(connection.phase(), ConnectionPhase::Closed);
        assert!(connection.begin_closing().is_none());
    }
}
