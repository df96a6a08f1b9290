//! Outbound ポート: アプリが外界（バックエンド・端末・セッション ID の保存先）を使うための trait

pub mod chat_transport;
pub mod chat_view;
pub mod session_id_store;

pub use chat_transport::{ChatTransport, TextFragments};
pub use chat_view::ChatView;
pub use session_id_store::SessionIdStore;
