//! InMemory Room Registry 実装
//!
//! ドメイン層が定義する `RoomRegistry` trait の具体的な実装。
//! `HashMap` を 1 つの `Mutex` で保護し、Room ごとのロックとは独立させています。
//!
//! ## 回収の競合
//!
//! 最後のセッションが抜けた Room から `notify_empty` が届くまでの間に、
//! 別の接続が同じ Room を `get_or_create` で取得している可能性があります。
//!
//! - 通知時点で Room が空でなければ何もしない
//! - 空であれば Room を `retired` にしてから対応表から削除する
//! - `retired` の Room への join は失敗し、呼び出し側は新しい Room を取得し直す

use std::{
    collections::HashMap,
    sync::{Arc, Weak},
};

use async_trait::async_trait;
use huddle_shared::time::{Clock, SystemClock};
use tokio::sync::Mutex;

use crate::domain::{Room, RoomKey, RoomRegistry, Timestamp};

/// インメモリ Room Registry 実装
pub struct InMemoryRoomRegistry {
    /// ルームキー → Room
    rooms: Mutex<HashMap<RoomKey, Arc<Room>>>,
    /// 作成時刻の取得元
    clock: Arc<dyn Clock>,
    /// 作成した Room に渡す自分自身への弱参照
    this: Weak<InMemoryRoomRegistry>,
}

impl InMemoryRoomRegistry {
    /// 新しい InMemoryRoomRegistry を作成
    pub fn new() -> Arc<Self> {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// 時刻の取得元を指定して作成
    pub fn with_clock(clock: Arc<dyn Clock>) -> Arc<Self> {
        Arc::new_cyclic(|this| Self {
            rooms: Mutex::new(HashMap::new()),
            clock,
            this: this.clone(),
        })
    }

    /// 現在登録されている Room の数
    #[cfg(test)]
    pub async fn room_count(&self) -> usize {
        self.rooms.lock().await.len()
    }
}

#[async_trait]
impl RoomRegistry for InMemoryRoomRegistry {
    async fn get_or_create(&self, key: &RoomKey) -> Arc<Room> {
        let mut rooms = self.rooms.lock().await;
        rooms
            .entry(key.clone())
            .or_insert_with(|| {
                tracing::info!(room = %key, "Room created");
                let registry: Weak<dyn RoomRegistry> = self.this.clone();
                Arc::new(Room::with_registry(
                    key.clone(),
                    Timestamp::new(self.clock.now_millis()),
                    registry,
                ))
            })
            .clone()
    }

    async fn notify_empty(&self, room: &Room) {
        let mut rooms = self.rooms.lock().await;

        // A stale notification from an already replaced room must not evict its successor.
        let is_registered = rooms
            .get(room.key())
            .is_some_and(|current| std::ptr::eq(Arc::as_ptr(current), room));
        if !is_registered {
            return;
        }

        if room.retire_if_empty().await {
            rooms.remove(room.key());
            tracing::info!(room = %room.key(), "Room reclaimed");
        } else {
            tracing::debug!(room = %room.key(), "Room refilled before reclaim, keeping it");
        }
    }

    async fn find(&self, key: &RoomKey) -> Option<Arc<Room>> {
        self.rooms.lock().await.get(key).cloned()
    }

    async fn rooms(&self) -> Vec<Arc<Room>> {
        let rooms = self.rooms.lock().await;
        let mut rooms: Vec<_> = rooms.values().cloned().collect();
        rooms.sort_by(|a, b| a.key().cmp(b.key()));
        rooms
    }
}
