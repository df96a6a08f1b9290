//! chat のユースケース: 履歴の読み込み・送信・リセット・対話ループ
//!
//! 会話状態（Conversation）はこの型だけが持つ。変化はすべて ChatView に通知する。
//! 送信は &mut self を取るので、返信ストリームを読み終えるまで次の送信は始まらない。

use crate::domain::{
    AssistantSlot, ChatSettings, Conversation, Framing, InteractiveInput, SendRequest, SessionId,
    UserMessage,
};
use crate::ports::outbound::{ChatTransport, ChatView};
use crate::usecase::reply_stream::ReplyStream;
use common::error::Error;
use common::ports::outbound::{Log, LogLevel, LogRecord};
use std::sync::Arc;

pub const INTERACTIVE_HELP: &str = "\
Commands:
  /reset     Clear this session's history (here and on the server)
  /history   Fetch and show the history again
  /help      Show this help
  /quit      Exit (Ctrl+D also exits)
Anything else is sent as a message.";

const BLANK_INPUT_HINT: &str = "(type a message, or /help)";

/// 1 回の送信の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// 受け取った返信の数（0 なら assistant Turn は作られていない）
    pub replies: usize,
}

pub struct ChatUseCase {
    transport: Arc<dyn ChatTransport>,
    view: Box<dyn ChatView>,
    log: Arc<dyn Log>,
    session_id: SessionId,
    top_k: u32,
    framing: Framing,
    conversation: Conversation,
}

impl ChatUseCase {
    pub fn new(
        transport: Arc<dyn ChatTransport>,
        view: Box<dyn ChatView>,
        log: Arc<dyn Log>,
        session_id: SessionId,
        settings: &ChatSettings,
    ) -> Self {
        Self {
            transport,
            view,
            log,
            session_id,
            top_k: settings.top_k,
            framing: settings.framing,
            conversation: Conversation::new(),
        }
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    #[cfg(test)]
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// サーバの履歴で会話を置き換え、全 Turn を表示する。Turn 数を返す。
    pub fn load_history(&mut self) -> Result<usize, Error> {
        let turns = self.transport.history(&self.session_id)?;
        self.conversation.replace_all(turns);
        for turn in self.conversation.turns() {
            self.view.show_turn(turn);
        }
        self.log_info(
            LogRecord::new(LogLevel::Info, "history loaded").field("turns", self.conversation.len()),
        );
        Ok(self.conversation.len())
    }

    /// メッセージを送り、返信を受けるたびに assistant Turn を更新する
    ///
    /// 空白だけの入力は Error::InvalidArgument で、リクエストは出さない。
    /// ユーザー Turn は送信前に追加し、送信が失敗しても残す。
    pub fn submit(&mut self, input: &str) -> Result<SubmitOutcome, Error> {
        let message = UserMessage::new(input)?;
        self.conversation.push_user(&*message);
        if let Some(turn) = self.conversation.turns().last() {
            self.view.show_turn(turn);
        }

        let request = SendRequest::new(&self.session_id, &message, self.top_k);
        self.log_info(
            LogRecord::new(LogLevel::Info, "message submitted")
                .field("chars", message.chars().count())
                .field("top_k", self.top_k),
        );
        let fragments = self.transport.send(&request)?;

        let mut slot: Option<AssistantSlot> = None;
        let mut replies = 0;
        for reply in ReplyStream::new(fragments, self.framing, Arc::clone(&self.log)) {
            let reply = match reply {
                Ok(r) => r,
                Err(e) => {
                    self.view.finish_assistant();
                    return Err(e);
                }
            };
            replies += 1;
            match slot {
                None => slot = Some(self.conversation.begin_assistant(reply.as_str())),
                Some(s) => {
                    self.conversation.replace_assistant(s, reply.as_str());
                }
            }
            self.view.show_assistant_progress(&reply);
        }
        self.view.finish_assistant();

        self.log_info(LogRecord::new(LogLevel::Info, "reply finished").field("replies", replies));
        Ok(SubmitOutcome { replies })
    }

    /// サーバ側の履歴を消してから、手元の会話も空にする
    pub fn reset(&mut self) -> Result<(), Error> {
        self.transport.reset(&self.session_id)?;
        self.conversation.clear();
        self.view.cleared();
        self.log_info(LogRecord::new(LogLevel::Info, "session reset"));
        Ok(())
    }

    /// 対話ループ。/quit か入力の終わりで 0 を返す。個々の操作の失敗は表示して続ける。
    pub fn run_interactive(&mut self) -> Result<i32, Error> {
        self.view.welcome();
        if let Err(e) = self.load_history() {
            self.report(&e);
        }

        while let Some(line) = self.view.prompt() {
            let result = match InteractiveInput::parse(&line) {
                InteractiveInput::Quit => break,
                InteractiveInput::Blank => {
                    self.view.show_notice(BLANK_INPUT_HINT);
                    Ok(())
                }
                InteractiveInput::Help => {
                    self.view.show_notice(INTERACTIVE_HELP);
                    Ok(())
                }
                InteractiveInput::Reset => self.reset(),
                InteractiveInput::History => self.load_history().map(|n| {
                    if n == 0 {
                        self.view.show_notice("(no history)");
                    }
                }),
                InteractiveInput::Message(text) => self.submit(text).map(|_| ()),
            };
            if let Err(e) = result {
                self.report(&e);
            }
        }
        Ok(0)
    }

    /// 失敗を画面とログの両方に出す
    fn report(&mut self, e: &Error) {
        self.view.show_error(e);
        let _ = self.log.log(
            &LogRecord::new(LogLevel::Error, e.to_string())
                .layer("usecase")
                .kind("error"),
        );
    }

    fn log_info(&self, record: LogRecord) {
        let _ = self
            .log
            .log(&record.field("session_id", &*self.session_id).layer("usecase").kind("chat"));
    }
}
