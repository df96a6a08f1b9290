//! 会話状態（Turn の時系列）のドメイン型
//!
//! 追加順＝時系列。確定した Turn は変更しない。例外は送信 1 回につき高々 1 つの
//! 「生成中」assistant Turn で、返信を受けるたびに内容を置き換える。

use crate::domain::turn::{Role, Turn};

/// 生成中の assistant Turn の位置。begin_assistant でしか作れない。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssistantSlot(usize);

/// 会話（Turn の列）
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// ユーザー発言を末尾に追加する
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.turns.push(Turn::user(content));
    }

    /// 最初の返信で assistant Turn を作り、その位置を返す
    pub fn begin_assistant(&mut self, content: impl Into<String>) -> AssistantSlot {
        let slot = AssistantSlot(self.turns.len());
        self.turns.push(Turn::assistant(content));
        slot
    }

    /// 生成中の assistant Turn の内容を置き換える（連結ではない）。
    /// reset 等で slot が無効になっていれば false を返し、何も変えない。
    pub fn replace_assistant(&mut self, slot: AssistantSlot, content: impl Into<String>) -> bool {
        match self.turns.get_mut(slot.0) {
            Some(turn) if turn.role == Role::Assistant => {
                turn.content = content.into();
                true
            }
            _ => false,
        }
    }

    /// 履歴で丸ごと置き換える
    pub fn replace_all(&mut self, turns: Vec<Turn>) {
        self.turns = turns;
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_user_keeps_order() {
        let mut c = Conversation::new();
        c.push_user("a");
        c.push_user("b");
        assert_eq!(c.turns(), &[Turn::user("a"), Turn::user("b")]);
    }

    #[test]
    fn test_assistant_content_is_replaced_not_appended() {
        let mut c = Conversation::new();
        c.push_user("hello");
        let slot = c.begin_assistant("Hi");
        assert!(c.replace_assistant(slot, "Hi there"));
        assert_eq!(c.len(), 2);
        assert_eq!(c.turns()[1], Turn::assistant("Hi there"));
    }

    #[test]
    fn test_stale_slot_after_clear_is_ignored() {
        let mut c = Conversation::new();
        let slot = c.begin_assistant("x");
        c.clear();
        assert!(!c.replace_assistant(slot, "y"));
        assert!(c.is_empty());
    }

    #[test]
    fn test_slot_never_overwrites_user_turn() {
        let mut c = Conversation::new();
        let slot = c.begin_assistant("x");
        c.replace_all(vec![Turn::user("u")]);
        assert!(!c.replace_assistant(slot, "y"));
        assert_eq!(c.turns(), &[Turn::user("u")]);
    }
}
