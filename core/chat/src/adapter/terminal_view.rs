//! 端末向けの ChatView 実装（行単位）
//!
//! 発言は「表示名: 本文」で出す。生成中の返信は全文で届くので、前回の全文を延長しているときは
//! 増えた部分だけを書き足し、そうでなければ改行して全文を出し直す。

use crate::domain::{Role, Turn};
use crate::ports::outbound::ChatView;
use common::error::Error;
use std::io::{BufRead, Stderr, Stdin, StdinLock, Stdout, Write};

pub const HEADER: &str = "Verifast News Chat";
const PROMPT: &str = "> ";

pub struct TerminalView<R, W, E> {
    input: R,
    out: W,
    err: E,
    /// 生成中の返信としてこれまでに表示した全文
    progress: Option<String>,
}

impl TerminalView<StdinLock<'static>, Stdout, Stderr> {
    pub fn stdio() -> Self {
        let stdin: Stdin = std::io::stdin();
        Self::new(stdin.lock(), std::io::stdout(), std::io::stderr())
    }
}

impl<R: BufRead, W: Write, E: Write> TerminalView<R, W, E> {
    pub fn new(input: R, out: W, err: E) -> Self {
        Self {
            input,
            out,
            err,
            progress: None,
        }
    }

    #[cfg(test)]
    pub(crate) fn into_parts(self) -> (W, E) {
        (self.out, self.err)
    }
}

impl<R: BufRead, W: Write, E: Write> ChatView for TerminalView<R, W, E> {
    fn welcome(&mut self) {
        let _ = writeln!(self.out, "{}", HEADER);
        let _ = writeln!(self.out, "{}", "=".repeat(HEADER.len()));
        let _ = writeln!(self.out, "Type a message and press Enter. /help for commands.");
        let _ = self.out.flush();
    }

    fn show_turn(&mut self, turn: &Turn) {
        self.finish_assistant();
        let _ = writeln!(self.out, "{}: {}", turn.role.label(), turn.content);
        let _ = self.out.flush();
    }

    fn show_assistant_progress(&mut self, content: &str) {
        match self.progress.as_deref() {
            Some(prev) if content.starts_with(prev) => {
                let _ = write!(self.out, "{}", &content[prev.len()..]);
            }
            Some(_) => {
                let _ = write!(self.out, "\n{}: {}", Role::Assistant.label(), content);
            }
            None => {
                let _ = write!(self.out, "{}: {}", Role::Assistant.label(), content);
            }
        }
        let _ = self.out.flush();
        self.progress = Some(content.to_string());
    }

    fn finish_assistant(&mut self) {
        if self.progress.take().is_some() {
            let _ = writeln!(self.out);
            let _ = self.out.flush();
        }
    }

    fn cleared(&mut self) {
        self.progress = None;
        let _ = writeln!(self.out, "(conversation cleared)");
        let _ = self.out.flush();
    }

    fn show_error(&mut self, error: &Error) {
        self.finish_assistant();
        let _ = writeln!(self.err, "Error: {}", error);
        let _ = self.err.flush();
    }

    fn show_notice(&mut self, text: &str) {
        let _ = writeln!(self.out, "{}", text);
        let _ = self.out.flush();
    }

    fn prompt(&mut self) -> Option<String> {
        let _ = write!(self.out, "{}", PROMPT);
        let _ = self.out.flush();
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => {
                // EOF 後のプロンプトの行を閉じる
                let _ = writeln!(self.out);
                None
            }
            Ok(_) => {
                let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
                line.truncate(trimmed_len);
                Some(line)
            }
        }
    }
}
