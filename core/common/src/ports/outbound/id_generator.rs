//! ID 生成 Outbound ポート
//!
//! セッション ID の初回生成に使う。テストでは固定 ID を返す実装を渡せる。

/// 不透明な ID 文字列を生成する抽象（Outbound ポート）
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}
