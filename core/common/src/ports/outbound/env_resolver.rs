//! 環境変数解決 Outbound ポート
//!
//! ホームディレクトリや接続先の上書き値を環境変数から解決する。
//! usecase / wiring はこの trait 経由でのみ環境変数にアクセスする。

use crate::domain::HomeDir;
use crate::error::Error;

/// 環境変数解決抽象（Outbound ポート）
///
/// 実装は `common::adapter::StdEnvResolver` やテスト用のモックなど。
pub trait EnvResolver: Send + Sync {
    /// ホームディレクトリを環境変数から解決する
    ///
    /// 優先順位:
    /// 1. CHAT_HOME（設定されていれば）
    /// 2. $XDG_CONFIG_HOME/newschat（XDG_CONFIG_HOME が設定されていれば）
    /// 3. $HOME/.config/newschat
    fn resolve_home_dir(&self) -> Result<HomeDir, Error>;

    /// バックエンドのベース URL の上書き（CHAT_BASE_URL）。空文字は未設定扱い。
    fn base_url_override(&self) -> Option<String>;
}
