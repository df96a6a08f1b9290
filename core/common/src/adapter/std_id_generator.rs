//! IdGenerator の標準実装（UUID v4）

use crate::ports::outbound::IdGenerator;

/// ランダムな UUID v4 をハイフン付き文字列で返す
#[derive(Debug, Clone, Default)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}
