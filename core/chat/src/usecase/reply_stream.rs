//! 返信ストリーム: テキスト断片列を ReplyDecoder に通し、返信を 1 つずつ返すイテレータ
//!
//! デコーダの途中経過（未完成のバッファ・パース失敗・終端での破棄）は debug でログに出す。
//! バッファ本体は記録せず、長さと先頭 PREVIEW_CHARS 文字だけを残す。
//! 1 回の送信ごとに作り直す（バッファは持ち越さない）。

use crate::domain::{DecodeStep, Framing, ReplyDecoder};
use crate::ports::outbound::TextFragments;
use common::error::Error;
use common::ports::outbound::{Log, LogLevel, LogRecord};
use std::collections::VecDeque;
use std::sync::Arc;

/// ログに残すバッファ先頭の文字数
const PREVIEW_CHARS: usize = 64;

pub struct ReplyStream {
    source: Option<TextFragments>,
    decoder: Option<ReplyDecoder>,
    ready: VecDeque<String>,
    log: Arc<dyn Log>,
}

impl ReplyStream {
    pub fn new(source: TextFragments, framing: Framing, log: Arc<dyn Log>) -> Self {
        Self {
            source: Some(source),
            decoder: Some(ReplyDecoder::new(framing)),
            ready: VecDeque::new(),
            log,
        }
    }

    fn push(&mut self, fragment: &str) {
        let Some(decoder) = self.decoder.as_mut() else {
            return;
        };
        for step in decoder.push(fragment) {
            match step {
                DecodeStep::Reply(reply) => self.ready.push_back(reply),
                DecodeStep::Pending => debug(
                    &self.log,
                    LogRecord::new(LogLevel::Debug, "partial reply buffer")
                        .field("buffered_len", decoder.buffered().len())
                        .field("head", preview(decoder.buffered())),
                ),
                DecodeStep::Rejected { error, retained } => debug(
                    &self.log,
                    LogRecord::new(LogLevel::Debug, "reply parse failed")
                        .field("error", error)
                        .field("retained", retained),
                ),
            }
        }
    }

    /// 入力を閉じ、残ったバッファを捨てる
    fn close(&mut self) {
        self.source = None;
        if let Some(rest) = self.decoder.take().and_then(ReplyDecoder::finish) {
            debug(
                &self.log,
                LogRecord::new(LogLevel::Debug, "dropped trailing reply data")
                    .field("buffered_len", rest.len())
                    .field("head", preview(&rest)),
            );
        }
    }
}

fn preview(buffer: &str) -> String {
    buffer.chars().take(PREVIEW_CHARS).collect()
}

fn debug(log: &Arc<dyn Log>, record: LogRecord) {
    let _ = log.log(&record.layer("usecase").kind("decoder"));
}

impl Iterator for ReplyStream {
    type Item = Result<String, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(reply) = self.ready.pop_front() {
                return Some(Ok(reply));
            }
            match self.source.as_mut()?.next() {
                Some(Ok(fragment)) => self.push(&fragment),
                Some(Err(e)) => {
                    self.close();
                    return Some(Err(e));
                }
                None => self.close(),
            }
        }
    }
}
