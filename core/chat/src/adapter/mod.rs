//! chat のアダプター（Outbound ポートの標準実装）

pub mod config;
pub mod file_session_store;
pub mod http_transport;
pub mod terminal_view;
pub mod utf8_decoder;

pub use config::{load_config_file, ConfigFile};
pub use file_session_store::FileSessionIdStore;
pub use http_transport::HttpChatTransport;
pub use terminal_view::TerminalView;
