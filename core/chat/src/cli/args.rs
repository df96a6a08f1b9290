use crate::domain::{ChatCommand, Framing};
use clap::builder::ArgAction;
use clap::value_parser;
use clap_complete::Shell;
use common::error::Error;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
    pub help: bool,
    /// -v / --verbose: 構造化ログを stderr にも出す
    pub verbose: bool,
    /// --reset: セッションをリセットして終了
    pub reset: bool,
    /// --history: 履歴を表示して終了
    pub history: bool,
    /// --session: セッション ID を表示して終了
    pub show_session: bool,
    /// -u / --base-url（CHAT_BASE_URL・config.json より優先）
    pub base_url: Option<String>,
    /// -k / --top-k
    pub top_k: Option<u32>,
    pub framing: Option<Framing>,
    /// 位置引数（指定があれば 1 回だけ送信して終了）
    pub message_args: Vec<String>,
}

/// 解析結果: 通常の Config または補完スクリプト生成
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Config(Config),
    GenerateCompletion(Shell),
}

fn build_clap_command() -> clap::Command {
    clap::Command::new("chat")
        .about("Terminal client for the news chat backend")
        .disable_help_flag(true)
        .arg(
            clap::Arg::new("help")
                .short('h')
                .long("help")
                .help("Print help")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Also write structured logs to stderr (for troubleshooting)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("base-url")
                .short('u')
                .long("base-url")
                .value_name("url")
                .help("Backend chat endpoint (default: http://localhost:8000/chat)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("top-k")
                .short('k')
                .long("top-k")
                .value_name("n")
                .help("Number of documents the backend retrieves per message")
                .value_parser(value_parser!(u32).range(1..))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("framing")
                .long("framing")
                .value_name("mode")
                .help("How the reply stream is split into replies: heuristic or brace_depth")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("reset")
                .long("reset")
                .help("Reset the session and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("history")
                .long("history")
                .help("Print the session history and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("session")
                .long("session")
                .help("Print the session id and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("generate")
                .long("generate")
                .value_name("shell")
                .help("Generate shell completion script")
                .value_parser(value_parser!(Shell))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("message")
                .help("Message to send (omit to start the interactive chat)")
                .num_args(0..)
                .trailing_var_arg(true),
        )
}

fn matches_to_config(matches: &clap::ArgMatches) -> Result<Config, Error> {
    let framing = matches
        .get_one::<String>("framing")
        .map(|s| s.parse::<Framing>())
        .transpose()?;
    Ok(Config {
        help: matches.get_flag("help"),
        verbose: matches.get_flag("verbose"),
        reset: matches.get_flag("reset"),
        history: matches.get_flag("history"),
        show_session: matches.get_flag("session"),
        base_url: matches.get_one::<String>("base-url").cloned(),
        top_k: matches.get_one::<u32>("top-k").copied(),
        framing,
        message_args: matches
            .get_many::<String>("message")
            .map(|i| i.cloned().collect())
            .unwrap_or_default(),
    })
}

/// コマンドラインを解析する。補完生成が要求された場合は ParseOutcome::GenerateCompletion を返す。
pub fn parse_args() -> Result<ParseOutcome, Error> {
    let matches = build_clap_command()
        .try_get_matches()
        .map_err(|e| Error::invalid_argument(e.to_string()))?;

    if let Some(&shell) = matches.get_one::<Shell>("generate") {
        return Ok(ParseOutcome::GenerateCompletion(shell));
    }

    Ok(ParseOutcome::Config(matches_to_config(&matches)?))
}

/// テスト用: 引数スライスから解析する
#[cfg(test)]
pub fn parse_args_from(args: &[String]) -> Result<Config, Error> {
    let matches = build_clap_command()
        .try_get_matches_from(args)
        .map_err(|e| Error::invalid_argument(e.to_string()))?;
    matches_to_config(&matches)
}

/// 補完スクリプトを標準出力に出力する。
pub fn print_completion(shell: Shell) {
    let mut cmd = build_clap_command();
    clap_complete::generate(shell, &mut cmd, "chat", &mut std::io::stdout());
}

/// Config を ChatCommand に変換する
///
/// 優先順位: session > reset > history > メッセージ送信 > 対話モード（help は呼び出し側が先に見る）
pub fn config_to_command(config: &Config) -> ChatCommand {
    if config.show_session {
        return ChatCommand::ShowSession;
    }
    if config.reset {
        return ChatCommand::Reset;
    }
    if config.history {
        return ChatCommand::History;
    }
    if !config.message_args.is_empty() {
        return ChatCommand::Send {
            message: config.message_args.join(" "),
        };
    }
    ChatCommand::Interactive
}
