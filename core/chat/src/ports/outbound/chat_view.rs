//! 画面表示 Outbound ポート
//!
//! usecase は会話の変化をこの trait で通知するだけで、描画方法は知らない。

use crate::domain::Turn;
use common::error::Error;

pub trait ChatView {
    /// 対話モード開始時の見出し
    fn welcome(&mut self);

    /// 確定した Turn を 1 つ表示する（ユーザー発言・履歴）
    fn show_turn(&mut self, turn: &Turn);

    /// 生成中の assistant 返信を表示する。content は毎回全文（差分ではない）。
    fn show_assistant_progress(&mut self, content: &str);

    /// 生成中の返信が終わった
    fn finish_assistant(&mut self);

    /// 会話が空になった（reset 後）
    fn cleared(&mut self);

    fn show_error(&mut self, error: &Error);

    /// 案内文を表示する（ヘルプ・空入力のヒント等）
    fn show_notice(&mut self, text: &str);

    /// 1 行読む。入力が尽きたら None。
    fn prompt(&mut self) -> Option<String>;
}
