//! /send に POST するリクエストボディ

use crate::domain::{SessionId, UserMessage};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendRequest {
    pub session_id: String,
    pub message: String,
    pub top_k: u32,
}

impl SendRequest {
    pub fn new(session_id: &SessionId, message: &UserMessage, top_k: u32) -> Self {
        Self {
            session_id: session_id.to_string(),
            message: message.to_string(),
            top_k,
        }
    }
}
