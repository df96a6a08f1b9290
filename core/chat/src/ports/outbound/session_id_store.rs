//! セッション ID の保存先 Outbound ポート

use crate::domain::SessionId;
use common::error::Error;

/// クライアントローカルのセッション ID 保存先
///
/// 初回に作って保存し、以降は同じ値を返す。期限切れはない。
pub trait SessionIdStore: Send + Sync {
    fn load_or_create(&self) -> Result<SessionId, Error>;
}
