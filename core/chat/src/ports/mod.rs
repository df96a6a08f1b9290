//! Ports & Adapters のポート定義
//!
//! - inbound: ドライバ（CLI）がアプリを呼び出すインターフェース
//! - outbound: バックエンド通信・セッション ID 保存・画面表示の trait（common の FileSystem / Log 等も利用）

pub mod inbound;
pub mod outbound;
