//! 返信ストリームのデコーダ（純粋な状態機械）
//!
//! 任意の位置で分割されて届くテキスト断片を溜め、`{"reply": "..."}` が 1 つ揃うたびに
//! reply を取り出す。I/O もログも持たず、何が起きたかは DecodeStep で呼び出し側に返す。
//!
//! Framing::Heuristic はバックエンドの現行出力に合わせた判定で、`{` で始まり `}` で
//! 終わった時点でパースを試みる。入れ子のオブジェクトや文字列中の `}` で早すぎる
//! パースが起き、失敗してもバッファは保持したまま次の断片を待つ。
//! Framing::BraceDepth は文字列とエスケープを追いながら深さを数え、最上位の `}` で
//! 閉じたときだけパースする。

use crate::domain::settings::Framing;
use serde::Deserialize;

/// 1 返信分のオブジェクト（reply 以外のキーは無視する）
#[derive(Deserialize)]
struct ReplyChunk {
    reply: String,
}

/// 断片 1 つを処理した結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeStep {
    /// 返信 1 つ分をパースできた（バッファは空になる）
    Reply(String),
    /// まだオブジェクトが揃っていない
    Pending,
    /// 境界は揃ったがパースできなかった。retained はバッファを保持したか。
    Rejected { error: String, retained: bool },
}

#[derive(Debug, Default)]
struct BraceScan {
    depth: usize,
    in_string: bool,
    escaped: bool,
}

/// 返信デコーダ。1 回の送信につき 1 つ作り、使い回さない。
#[derive(Debug)]
pub struct ReplyDecoder {
    framing: Framing,
    buffer: String,
    scan: BraceScan,
}

impl ReplyDecoder {
    pub fn new(framing: Framing) -> Self {
        Self {
            framing,
            buffer: String::new(),
            scan: BraceScan::default(),
        }
    }

    /// 未パースのバッファ
    pub fn buffered(&self) -> &str {
        &self.buffer
    }

    /// 断片を 1 つ追加し、その結果を返す（空にはならない）
    pub fn push(&mut self, fragment: &str) -> Vec<DecodeStep> {
        match self.framing {
            Framing::Heuristic => vec![self.push_heuristic(fragment)],
            Framing::BraceDepth => self.push_brace_depth(fragment),
        }
    }

    /// ストリーム終端。残ったバッファを返す（呼び出し側で捨てる）。
    pub fn finish(self) -> Option<String> {
        if self.buffer.is_empty() {
            None
        } else {
            Some(self.buffer)
        }
    }

    fn push_heuristic(&mut self, fragment: &str) -> DecodeStep {
        self.buffer.push_str(fragment);
        if !(self.buffer.starts_with('{') && self.buffer.ends_with('}')) {
            return DecodeStep::Pending;
        }
        match parse_reply(&self.buffer) {
            Ok(reply) => {
                self.buffer.clear();
                DecodeStep::Reply(reply)
            }
            Err(error) => DecodeStep::Rejected {
                error,
                retained: true,
            },
        }
    }

    fn push_brace_depth(&mut self, fragment: &str) -> Vec<DecodeStep> {
        let mut steps = Vec::new();
        for c in fragment.chars() {
            if self.scan.depth == 0 {
                // オブジェクトの外側の文字（改行・区切り等）は読み捨てる
                if c == '{' {
                    self.buffer.clear();
                    self.buffer.push(c);
                    self.scan = BraceScan {
                        depth: 1,
                        ..BraceScan::default()
                    };
                }
                continue;
            }

            self.buffer.push(c);

            if self.scan.in_string {
                if self.scan.escaped {
                    self.scan.escaped = false;
                } else if c == '\\' {
                    self.scan.escaped = true;
                } else if c == '"' {
                    self.scan.in_string = false;
                }
                continue;
            }

            match c {
                '"' => self.scan.in_string = true,
                '{' => self.scan.depth += 1,
                '}' => {
                    self.scan.depth -= 1;
                    if self.scan.depth == 0 {
                        // 閉じたオブジェクトは追記しても直らないので、失敗しても捨てる
                        let object = std::mem::take(&mut self.buffer);
                        steps.push(match parse_reply(&object) {
                            Ok(reply) => DecodeStep::Reply(reply),
                            Err(error) => DecodeStep::Rejected {
                                error,
                                retained: false,
                            },
                        });
                    }
                }
                _ => {}
            }
        }
        if steps.is_empty() {
            steps.push(DecodeStep::Pending);
        }
        steps
    }
}

fn parse_reply(s: &str) -> Result<String, String> {
    serde_json::from_str::<ReplyChunk>(s)
        .map(|chunk| chunk.reply)
        .map_err(|e| e.to_string())
}
