//! バイト列を読み取り単位ごとに UTF-8 テキストへ変換する
//!
//! マルチバイト文字が読み取りの境界で割れても壊さないよう、末尾の不完全なバイト列は
//! 次の読み取りに持ち越す。不正なバイト列は U+FFFD に置き換える（ブラウザの TextDecoder と同じ）。

#[derive(Debug, Default)]
pub struct Utf8ChunkDecoder {
    pending: Vec<u8>,
}

impl Utf8ChunkDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 読み取った 1 塊を変換する。持ち越し分だけで文字が揃わなければ空文字列を返す。
    pub fn decode(&mut self, bytes: &[u8]) -> String {
        self.pending.extend_from_slice(bytes);
        let buf = std::mem::take(&mut self.pending);
        let mut out = String::with_capacity(buf.len());
        let mut rest = buf.as_slice();
        loop {
            match std::str::from_utf8(rest) {
                Ok(s) => {
                    out.push_str(s);
                    break;
                }
                Err(e) => {
                    let valid = e.valid_up_to();
                    out.push_str(&String::from_utf8_lossy(&rest[..valid]));
                    match e.error_len() {
                        Some(len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            rest = &rest[valid + len..];
                        }
                        None => {
                            // 末尾が文字の途中
                            self.pending = rest[valid..].to_vec();
                            break;
                        }
                    }
                }
            }
        }
        out
    }

    /// ストリーム終端。途中で切れた文字が残っていれば U+FFFD 1 つにする。
    pub fn finish(self) -> Option<String> {
        if self.pending.is_empty() {
            None
        } else {
            Some(char::REPLACEMENT_CHARACTER.to_string())
        }
    }
}
