//! 送信するユーザーメッセージのドメイン型
//!
//! 空白だけの入力は送らない。本文は入力されたまま（trim しない）保持する。

use common::error::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserMessage(String);

impl UserMessage {
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();
        if s.trim().is_empty() {
            return Err(Error::invalid_argument("Message is empty."));
        }
        Ok(Self(s))
    }
}

impl std::ops::Deref for UserMessage {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for UserMessage {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
