//! テスト用のフェイク: 記録する View とメモリ上のバックエンド
//!
//! View とバックエンドは同じ Journal に書くので、「ユーザー Turn の表示が送信より先か」
//! のような順序を 1 本の列で確かめられる。

use crate::domain::{ChatSettings, SendRequest, SessionId, Turn};
use crate::ports::outbound::{ChatTransport, ChatView, TextFragments};
use crate::usecase::ChatUseCase;
use common::adapter::MemoryLog;
use common::error::Error;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

pub const SESSION: &str = "session-1";

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Welcome,
    Turn(Turn),
    Progress(String),
    Finish,
    Cleared,
    Error(String),
    Notice(String),
    Send(SendRequest),
    History(String),
    Reset(String),
}

#[derive(Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<Event>>>);

impl Journal {
    pub fn push(&self, e: Event) {
        self.0.lock().unwrap().push(e);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.lock().unwrap().clone()
    }

    pub fn sends(&self) -> Vec<SendRequest> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Send(r) => Some(r),
                _ => None,
            })
            .collect()
    }

    pub fn resets(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Reset(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    pub fn position(&self, pred: impl Fn(&Event) -> bool) -> Option<usize> {
        self.events().iter().position(pred)
    }
}

/// 表示内容を Journal に記録し、入力は用意した行を順に返す View
pub struct RecordingView {
    journal: Journal,
    input: VecDeque<String>,
}

impl RecordingView {
    pub fn new(journal: Journal, input: &[&str]) -> Self {
        Self {
            journal,
            input: input.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ChatView for RecordingView {
    fn welcome(&mut self) {
        self.journal.push(Event::Welcome);
    }

    fn show_turn(&mut self, turn: &Turn) {
        self.journal.push(Event::Turn(turn.clone()));
    }

    fn show_assistant_progress(&mut self, content: &str) {
        self.journal.push(Event::Progress(content.to_string()));
    }

    fn finish_assistant(&mut self) {
        self.journal.push(Event::Finish);
    }

    fn cleared(&mut self) {
        self.journal.push(Event::Cleared);
    }

    fn show_error(&mut self, error: &Error) {
        self.journal.push(Event::Error(error.to_string()));
    }

    fn show_notice(&mut self, text: &str) {
        self.journal.push(Event::Notice(text.to_string()));
    }

    fn prompt(&mut self) -> Option<String> {
        self.input.pop_front()
    }
}

/// 1 回の send で返す応答
pub struct Script {
    fragments: Vec<Result<String, Error>>,
    /// サーバ側の履歴に assistant として残る返信
    final_reply: Option<String>,
}

impl Script {
    /// `{"reply": ...}` を 1 つずつ断片にして返す
    pub fn replies(replies: &[&str]) -> Self {
        Self {
            fragments: replies
                .iter()
                .map(|r| Ok(serde_json::json!({ "reply": r }).to_string()))
                .collect(),
            final_reply: replies.last().map(|r| r.to_string()),
        }
    }

    pub fn raw(fragments: Vec<Result<String, Error>>) -> Self {
        Self {
            fragments,
            final_reply: None,
        }
    }
}

#[derive(Default)]
struct BackendState {
    scripts: VecDeque<Script>,
    fail_next_send: Option<Error>,
    fail_next_reset: Option<Error>,
    history: HashMap<String, Vec<Turn>>,
}

/// セッションごとの履歴をメモリに持つバックエンド
///
/// 送信のたびにユーザー発言と最後の返信を履歴に積む。台本が無ければ "echo: <message>" を返す。
pub struct FakeBackend {
    journal: Journal,
    state: Mutex<BackendState>,
}

impl FakeBackend {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            state: Mutex::new(BackendState::default()),
        }
    }

    pub fn script(&self, script: Script) {
        self.state.lock().unwrap().scripts.push_back(script);
    }

    pub fn fail_next_send(&self, e: Error) {
        self.state.lock().unwrap().fail_next_send = Some(e);
    }

    pub fn fail_next_reset(&self, e: Error) {
        self.state.lock().unwrap().fail_next_reset = Some(e);
    }
}

impl ChatTransport for FakeBackend {
    fn send(&self, request: &SendRequest) -> Result<TextFragments, Error> {
        self.journal.push(Event::Send(request.clone()));
        let mut state = self.state.lock().unwrap();
        if let Some(e) = state.fail_next_send.take() {
            return Err(e);
        }
        let script = state
            .scripts
            .pop_front()
            .unwrap_or_else(|| {
                let echo = format!("echo: {}", request.message);
                Script::replies(&[echo.as_str()])
            });
        let history = state.history.entry(request.session_id.clone()).or_default();
        history.push(Turn::user(request.message.clone()));
        if let Some(reply) = script.final_reply {
            history.push(Turn::assistant(reply));
        }
        Ok(Box::new(script.fragments.into_iter()))
    }

    fn history(&self, session_id: &SessionId) -> Result<Vec<Turn>, Error> {
        self.journal.push(Event::History(session_id.to_string()));
        let state = self.state.lock().unwrap();
        Ok(state.history.get(&**session_id).cloned().unwrap_or_default())
    }

    fn reset(&self, session_id: &SessionId) -> Result<(), Error> {
        self.journal.push(Event::Reset(session_id.to_string()));
        let mut state = self.state.lock().unwrap();
        if let Some(e) = state.fail_next_reset.take() {
            return Err(e);
        }
        state.history.remove(&**session_id);
        Ok(())
    }
}

/// フェイク一式で組んだ ChatUseCase
pub struct Harness {
    pub chat: ChatUseCase,
    pub backend: Arc<FakeBackend>,
    pub journal: Journal,
    pub log: Arc<MemoryLog>,
}

impl Harness {
    pub fn new(input: &[&str]) -> Self {
        let journal = Journal::default();
        let backend = Arc::new(FakeBackend::new(journal.clone()));
        Self::with_backend(backend, journal, input)
    }

    /// 同じバックエンドにつなぎ直す（クライアントの再起動）
    pub fn with_backend(backend: Arc<FakeBackend>, journal: Journal, input: &[&str]) -> Self {
        let log = Arc::new(MemoryLog::new());
        let chat = ChatUseCase::new(
            backend.clone(),
            Box::new(RecordingView::new(journal.clone(), input)),
            log.clone(),
            SessionId::parse(SESSION).unwrap(),
            &ChatSettings::default(),
        );
        Self {
            chat,
            backend,
            journal,
            log,
        }
    }
}
