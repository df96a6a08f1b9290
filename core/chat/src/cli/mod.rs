//! CLI 境界: 引数の解析と ChatCommand への変換

mod args;

pub use args::{config_to_command, parse_args, print_completion, Config, ParseOutcome};
