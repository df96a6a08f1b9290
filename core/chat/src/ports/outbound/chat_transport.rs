//! バックエンドとの通信 Outbound ポート
//!
//! send / history / reset の 3 操作。失敗（接続不可・非 2xx）は Error::Http で返し、
//! ここでは握りつぶさない。

use crate::domain::{SendRequest, SessionId, Turn};
use common::error::Error;

/// send 応答本文のテキスト断片列
///
/// 断片の区切りは読み取り単位で、JSON の区切りとは一致しない。読み取り失敗は Err を 1 回返して終わる。
pub type TextFragments = Box<dyn Iterator<Item = Result<String, Error>> + Send>;

/// chat バックエンドへの送信・履歴取得・リセット
pub trait ChatTransport: Send + Sync {
    /// メッセージを送り、応答本文をテキスト断片として返す（返信への分解は呼び出し側）
    fn send(&self, request: &SendRequest) -> Result<TextFragments, Error>;

    /// セッションの履歴（時系列順）
    fn history(&self, session_id: &SessionId) -> Result<Vec<Turn>, Error>;

    /// セッションの履歴をサーバ側で消す
    fn reset(&self, session_id: &SessionId) -> Result<(), Error>;
}
