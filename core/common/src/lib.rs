//! newschat 共通ライブラリ
//!
//! `chat` コマンドが使うエラー型・ドメイン型・Outbound ポートとその標準実装を提供します。

/// エラーハンドリング
pub mod error;

/// ドメイン型（Newtype）
pub mod domain;

/// Ports & Adapters のポート定義
pub mod ports;

/// ポートの標準実装
pub mod adapter;
