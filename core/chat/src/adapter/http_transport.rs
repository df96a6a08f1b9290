//! HTTP で chat バックエンドに接続する ChatTransport 実装（reqwest blocking）
//!
//! - POST {base}/send: JSON を送り、応答本文を読み取り単位のテキスト断片で返す
//! - GET {base}/history?session_id=...: `[{role, content}]`
//! - POST {base}/reset?session_id=...: 応答本文は見ない

use crate::adapter::utf8_decoder::Utf8ChunkDecoder;
use crate::domain::{SendRequest, SessionId, Turn};
use crate::ports::outbound::{ChatTransport, TextFragments};
use common::error::Error;
use common::ports::outbound::{Log, LogLevel, LogRecord};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde_json::Value;
use std::io::{ErrorKind, Read};
use std::sync::Arc;
use std::time::Duration;

const CONNECT_TIMEOUT_SECS: u64 = 10;
const READ_BUF_SIZE: usize = 8 * 1024;

pub struct HttpChatTransport {
    client: Client,
    base_url: String,
    log: Arc<dyn Log>,
}

impl HttpChatTransport {
    /// * `base_url` - 例: http://localhost:8000/chat（末尾の / は無視）
    /// * `timeout_secs` - リクエスト全体のタイムアウト。None（または 0）のとき返信ストリームは終わるまで待つ。
    pub fn new(base_url: &str, timeout_secs: Option<u64>, log: Arc<dyn Log>) -> Result<Self, Error> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(timeout_secs.filter(|s| *s > 0).map(Duration::from_secs))
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            log,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn execute(&self, op: &str, builder: RequestBuilder) -> Result<Response, Error> {
        let response = builder.send().map_err(|e| {
            self.log_call(op, None);
            Error::http(format!("HTTP request failed ({}): {}", op, e))
        })?;
        let status = response.status();
        self.log_call(op, Some(status));
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().unwrap_or_default();
        Err(Error::http(format!(
            "{} failed: {}",
            op,
            describe_error_body(status, &body)
        )))
    }

    fn log_call(&self, op: &str, status: Option<StatusCode>) {
        let (level, status) = match status {
            Some(s) if s.is_success() => (LogLevel::Info, Value::from(s.as_u16())),
            Some(s) => (LogLevel::Warn, Value::from(s.as_u16())),
            None => (LogLevel::Warn, Value::Null),
        };
        let _ = self.log.log(
            &LogRecord::new(level, format!("{} request", op))
                .layer("adapter")
                .kind("transport")
                .field("url", self.url(op))
                .field("status", status),
        );
    }
}

impl ChatTransport for HttpChatTransport {
    fn send(&self, request: &SendRequest) -> Result<TextFragments, Error> {
        let builder = self.client.post(self.url("send")).json(request);
        let response = self.execute("send", builder)?;
        if response.status() == StatusCode::NO_CONTENT || response.content_length() == Some(0) {
            return Err(Error::http("No body in response"));
        }
        Ok(Box::new(BodyFragments::new(response)))
    }

    fn history(&self, session_id: &SessionId) -> Result<Vec<Turn>, Error> {
        let builder = self
            .client
            .get(self.url("history"))
            .query(&[("session_id", &**session_id)]);
        let response = self.execute("history", builder)?;
        let text = response
            .text()
            .map_err(|e| Error::http(format!("Failed to read history: {}", e)))?;
        serde_json::from_str(&text)
            .map_err(|e| Error::json(format!("Failed to parse history: {}", e)))
    }

    fn reset(&self, session_id: &SessionId) -> Result<(), Error> {
        let builder = self
            .client
            .post(self.url("reset"))
            .query(&[("session_id", &**session_id)])
            .header(CONTENT_TYPE, "application/json");
        self.execute("reset", builder)?;
        Ok(())
    }
}

/// 非 2xx 応答の本文からメッセージを取り出す（FastAPI の {"detail": ...} を優先）
fn describe_error_body(status: StatusCode, body: &str) -> String {
    let detail = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| match v.get("detail") {
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
            None => None,
        });
    match detail {
        Some(d) => format!("HTTP {}: {}", status, d),
        None if body.trim().is_empty() => format!("HTTP {}", status),
        None => format!("HTTP {}: {}", status, body.trim()),
    }
}

/// 応答本文を読み取り単位で UTF-8 テキストにして返すイテレータ
///
/// 読み取り失敗は Err を 1 回返し、その後は None。
pub(crate) struct BodyFragments<R> {
    reader: R,
    decoder: Option<Utf8ChunkDecoder>,
    buf: Vec<u8>,
}

impl<R: Read> BodyFragments<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self {
            reader,
            decoder: Some(Utf8ChunkDecoder::new()),
            buf: vec![0; READ_BUF_SIZE],
        }
    }
}

impl<R: Read> Iterator for BodyFragments<R> {
    type Item = Result<String, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let decoder = self.decoder.as_mut()?;
            match self.reader.read(&mut self.buf) {
                Ok(0) => return self.decoder.take()?.finish().map(Ok),
                Ok(n) => {
                    let text = decoder.decode(&self.buf[..n]);
                    if !text.is_empty() {
                        return Some(Ok(text));
                    }
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => {
                    self.decoder = None;
                    return Some(Err(Error::http(format!(
                        "Failed to read response body: {}",
                        e
                    ))));
                }
            }
        }
    }
}
