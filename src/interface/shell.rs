//! # Interactive Shell
//!
//! Line-oriented REPL started when `gendev` runs without a command.
//! Every result is printed as pretty JSON; errors never end the session.

use crate::application::router::Dispatcher;
use crate::domain::result::OpResult;
use crate::strings::{help, messages};
use anyhow::Result;
use serde_json::Value;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

pub const PROMPT: &str = "gendev> ";

/// What a single input line asks for.
#[derive(Debug, PartialEq)]
pub enum ShellInput {
    Empty,
    Exit,
    /// A line that looks like a JSON object, sent to the model as-is.
    Prompt(String),
    Command(Vec<String>),
}

pub fn classify(line: &str) -> ShellInput {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ShellInput::Empty;
    }
    if trimmed == "exit" || trimmed == "quit" {
        return ShellInput::Exit;
    }
    if trimmed.starts_with('{') && trimmed.ends_with('}') {
        return ShellInput::Prompt(trimmed.to_string());
    }
    ShellInput::Command(trimmed.split_whitespace().map(String::from).collect())
}

fn print_result(result: &OpResult) {
    match serde_json::to_string_pretty(result) {
        Ok(text) => println!("{text}"),
        Err(e) => tracing::error!("Failed to serialize result: {}", e),
    }
}

fn show_prompt() -> Result<()> {
    let mut stdout = std::io::stdout();
    write!(stdout, "{PROMPT}")?;
    stdout.flush()?;
    Ok(())
}

pub async fn run(dispatcher: &Dispatcher) -> Result<()> {
    println!("{}", help::BANNER);
    tracing::info!("Interactive session started");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        show_prompt()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let result = match classify(&line) {
            ShellInput::Empty => continue,
            ShellInput::Exit => break,
            ShellInput::Prompt(text) => match serde_json::from_str::<Value>(&text) {
                Ok(prompt) => dispatcher.ask(&prompt).await,
                Err(e) => OpResult::error(messages::invalid_prompt_json(&e.to_string())),
            },
            ShellInput::Command(argv) => dispatcher.route(&argv).await,
        };
        print_result(&result);
    }

    tracing::info!("Interactive session ended");
    Ok(())
}
