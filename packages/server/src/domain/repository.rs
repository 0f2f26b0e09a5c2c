//! RoomRegistry trait 定義
//!
//! ドメイン層が必要とする「ルームキー → Room」の対応表へのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use std::sync::Arc;

use async_trait::async_trait;

use super::{room::Room, value_object::RoomKey};

/// Room Registry trait
///
/// プロセス全体で共有される Room の対応表。
/// UseCase 層と Room はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。
///
/// ## ロック順序
///
/// 実装は自身のロックを lookup-or-create / 回収 / 一覧取得の間だけ保持します。
/// 回収時に Room のロックを取得することはあっても、その逆（Room のロックを
/// 保持したまま Registry のロックを取得する）は起こりません。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRegistry: Send + Sync {
    /// 指定したキーの Room を返す。存在しなければ空の Room を作成する
    ///
    /// 同じキーで同時に呼ばれても、異なる Room が返されることはない。
    async fn get_or_create(&self, key: &RoomKey) -> Arc<Room>;

    /// Room が空になったことを通知する
    ///
    /// 呼び出し時点でまだ空であり、かつ登録中のインスタンスと同一であれば回収する。
    async fn notify_empty(&self, room: &Room);

    /// 指定したキーの Room を作成せずに取得
    async fn find(&self, key: &RoomKey) -> Option<Arc<Room>>;

    /// 現在存在する全ての Room をキー順で取得
    async fn rooms(&self) -> Vec<Arc<Room>>;
}
