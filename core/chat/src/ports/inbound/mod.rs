//! Inbound ポート: ドライバ（CLI）がアプリを呼び出すインターフェース

use crate::domain::ChatCommand;
use common::error::Error;

/// chat アプリケーションを実行する Inbound ポート
///
/// main は ChatCommand を組み立て、この trait を実装した Runner の run を呼び出す。
/// 送信中は会話状態を書き換えるため &mut self を取る（同時に 2 つの送信は走らない）。
pub trait UseCaseRunner {
    fn run(&mut self, command: ChatCommand) -> Result<i32, Error>;
}
