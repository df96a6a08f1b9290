mod adapter;
mod cli;
mod domain;
mod ports;
mod usecase;
mod wiring;

#[cfg(test)]
mod tests;

use std::process;
use common::error::Error;
use common::ports::outbound::{LogLevel, LogRecord};
use cli::{config_to_command, parse_args, print_completion, ParseOutcome};
use domain::ChatCommand;
use ports::inbound::UseCaseRunner;
use wiring::{wire_chat, App};

/// ChatCommand をディスパッチする Runner（match は main レイヤーに集約）
struct Runner {
    app: App,
}

impl UseCaseRunner for Runner {
    fn run(&mut self, command: ChatCommand) -> Result<i32, Error> {
        let command_name = cmd_name_for_log(&command);
        let _ = self.app.logger.log(
            &LogRecord::new(LogLevel::Info, "command started")
                .layer("cli")
                .kind("lifecycle")
                .field("command", command_name),
        );

        let result = match command {
            ChatCommand::ShowSession => {
                println!("{}", self.app.chat.session_id());
                Ok(0)
            }
            ChatCommand::History => self.app.chat.load_history().map(|n| {
                if n == 0 {
                    println!("(no history)");
                }
                0
            }),
            ChatCommand::Reset => self.app.chat.reset().map(|_| 0),
            ChatCommand::Send { message } => self.app.chat.submit(&message).map(|outcome| {
                if outcome.replies == 0 {
                    eprintln!("chat: no reply received");
                }
                0
            }),
            ChatCommand::Interactive => self.app.chat.run_interactive(),
        };

        let code = result.as_ref().copied().unwrap_or(0);
        let _ = self.app.logger.log(
            &LogRecord::new(LogLevel::Info, "command finished")
                .layer("cli")
                .kind("lifecycle")
                .field("command", command_name)
                .field("exit_code", code),
        );
        if let Err(ref e) = result {
            let _ = self.app.logger.log(
                &LogRecord::new(LogLevel::Error, e.to_string())
                    .layer("cli")
                    .kind("error")
                    .field("exit_code", e.exit_code()),
            );
        }
        result
    }
}

fn cmd_name_for_log(command: &ChatCommand) -> &'static str {
    match command {
        ChatCommand::ShowSession => "session",
        ChatCommand::History => "history",
        ChatCommand::Reset => "reset",
        ChatCommand::Send { .. } => "send",
        ChatCommand::Interactive => "interactive",
    }
}

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            if e.is_usage() {
                print_usage();
            }
            eprintln!("chat: {}", e);
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

fn print_usage() {
    eprintln!("Usage: chat [-h] [-v] [-u url] [-k n] [--framing mode] [--reset | --history | --session] [message...]");
}

fn print_help() {
    println!("Usage: chat [-h] [-v] [-u url] [-k n] [--framing mode] [--reset | --history | --session] [message...]");
    println!("  -h, --help            Display this help message.");
    println!("  -v, --verbose         Also write structured logs to stderr (for troubleshooting).");
    println!("  -u, --base-url <url>  Backend chat endpoint. Default: http://localhost:8000/chat");
    println!("  -k, --top-k <n>       Number of documents the backend retrieves per message. Default: 3");
    println!("  --framing <mode>      How the reply stream is split: heuristic (default) or brace_depth.");
    println!("  --reset               Reset this session's history and exit.");
    println!("  --history             Print this session's history and exit.");
    println!("  --session             Print the session id and exit.");
    println!("  --generate <shell>    Generate shell completion script (bash, zsh, fish).");
    println!("  [message...]          Send one message, print the reply and exit. Omit to start the interactive chat.");
    println!();
    println!("Environment:");
    println!("  CHAT_HOME        Home directory (config.json, session_id, logs/). Default: $XDG_CONFIG_HOME/newschat or ~/.config/newschat.");
    println!("  CHAT_BASE_URL    Backend chat endpoint (overridden by -u).");
    println!();
    println!("Interactive commands:");
    println!("  /reset  /history  /help  /quit");
}

pub fn run() -> Result<i32, Error> {
    let config = match parse_args()? {
        ParseOutcome::Config(c) => c,
        ParseOutcome::GenerateCompletion(shell) => {
            print_completion(shell);
            return Ok(0);
        }
    };
    // ヘルプはホームディレクトリや接続先の解決を待たずに出す
    if config.help {
        print_help();
        return Ok(0);
    }
    let command = config_to_command(&config);
    let app = wire_chat(&config)?;
    let mut runner = Runner { app };
    runner.run(command)
}
