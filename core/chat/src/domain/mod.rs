//! chat のドメイン型

pub mod command;
pub mod conversation;
pub mod message;
pub mod reply_decoder;
pub mod send_request;
pub mod session_id;
pub mod settings;
pub mod turn;

pub use command::{ChatCommand, InteractiveInput};
pub use conversation::{AssistantSlot, Conversation};
pub use message::UserMessage;
pub use reply_decoder::{DecodeStep, ReplyDecoder};
pub use send_request::SendRequest;
pub use session_id::SessionId;
pub use settings::{ChatSettings, Framing};
pub use turn::{Role, Turn};
