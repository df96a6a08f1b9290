//! ユースケース層

pub mod app;
pub mod reply_stream;

pub use app::ChatUseCase;
