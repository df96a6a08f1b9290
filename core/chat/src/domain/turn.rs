//! 会話の 1 発言（Turn）

use serde::{Deserialize, Serialize};

/// 発言者
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// 画面に出す表示名
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "You",
            Role::Assistant => "AI Assistant",
        }
    }
}

/// 1 発言。バックエンドの history 応答 `{role, content}` と同じ形。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}
