//! chat コマンドの enum（Command Pattern）
//!
//! 対話モード・1 回送信・リセット等の分岐を enum で明示する。
//! ヘルプは配線前に main が処理するため、ここには含めない。

/// chat の実行モード
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    /// セッション ID を表示して終了
    ShowSession,
    /// 履歴を表示して終了
    History,
    /// セッションをリセットして終了
    Reset,
    /// 1 メッセージ送信して返信を表示し終了
    Send { message: String },
    /// 対話モード（履歴表示の後、入力ループ）
    Interactive,
}

/// 対話モードで読んだ 1 行の解釈
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractiveInput<'a> {
    /// 空白だけの行（送らない）
    Blank,
    Quit,
    Help,
    Reset,
    History,
    /// それ以外は入力のまま送信する
    Message(&'a str),
}

impl<'a> InteractiveInput<'a> {
    pub fn parse(line: &'a str) -> Self {
        match line.trim() {
            "" => InteractiveInput::Blank,
            "/quit" | "/exit" => InteractiveInput::Quit,
            "/help" => InteractiveInput::Help,
            "/reset" => InteractiveInput::Reset,
            "/history" => InteractiveInput::History,
            _ => InteractiveInput::Message(line),
        }
    }
}
