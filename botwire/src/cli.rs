//! # CLI
//!
//! This module defines the command-line interface of `botwire` using `clap`.
//!
//! It is responsible for parsing user input and performing validation (e.g., ensuring chats are
//! numeric ids or `@usernames` and bodies are valid JSON).
use botwire_core::types::{ChatId, ParseMode};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "botwire", version, about = "Command-line client for bot messaging APIs")]
pub struct Cli {
    /// Bot token issued by the API provider
    #[arg(long, global = true, env = "BOTWIRE_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Base URL of the API (e.g. https://api.telegram.org)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Path to a JSON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the bot's own user
    Me,

    /// Send a text message
    ///
    /// ## Examples:
    ///
    /// ```bash
    /// botwire send @my_channel '*hello*' --parse-mode markdown-v2
    /// ```
    Send {
        /// Target chat: a numeric id or a public @username
        #[arg(value_parser = parse_chat)]
        chat: ChatId,

        /// Message text
        text: String,

        #[arg(long, value_enum)]
        parse_mode: Option<ParseModeArg>,

        /// Deliver the message without a notification sound
        #[arg(long)]
        silent: bool,
    },

    /// Poll incoming updates and print them as JSON
    ///
    /// Stops after `--count` updates, or when a long-poll returns nothing.
    Poll {
        /// Identifier of the first update to fetch
        #[arg(long)]
        offset: Option<i64>,

        /// Batch size per request (1-100)
        #[arg(long)]
        limit: Option<u32>,

        /// Long-poll wait in seconds
        #[arg(long)]
        timeout: Option<u32>,

        /// Stop after this many updates
        #[arg(long)]
        count: Option<usize>,
    },

    /// Call any method with a raw JSON body and print its result
    ///
    /// ## Examples:
    ///
    /// ```bash
    /// botwire call getChat --body '{"chat_id": "@my_channel"}'
    /// ```
    Call {
        /// Method name (e.g. getChat)
        method: String,

        /// JSON object sent as the request body
        #[arg(long, value_parser = parse_body, default_value = "{}")]
        body: serde_json::Value,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
pub enum ParseModeArg {
    Markdown,
    MarkdownV2,
    Html,
}

impl From<ParseModeArg> for ParseMode {
    fn from(arg: ParseModeArg) -> Self {
        match arg {
            ParseModeArg::Markdown => ParseMode::Markdown,
            ParseModeArg::MarkdownV2 => ParseMode::MarkdownV2,
            ParseModeArg::Html => ParseMode::Html,
        }
    }
}

fn parse_chat(value: &str) -> Result<ChatId, String> {
    if let Ok(id) = value.parse::<i64>() {
        return Ok(ChatId::Id(id));
    }

    match value.strip_prefix('@') {
        Some(name) if !name.trim().is_empty() => Ok(ChatId::Username(value.to_string())),
        _ => Err(format!(
            "Invalid chat: '{value}'. Expected a numeric id or '@username'"
        )),
    }
}

fn parse_body(value: &str) -> Result<serde_json::Value, String> {
    let body: serde_json::Value =
        serde_json::from_str(value).map_err(|e| format!("Invalid JSON: {e}"))?;

    if !body.is_object() {
        return Err("The request body must be a JSON object".to_string());
    }

    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn chat_accepts_ids_and_usernames() {
        assert_eq!(parse_chat("42"), Ok(ChatId::Id(42)));
        assert_eq!(parse_chat("-1001234"), Ok(ChatId::Id(-1001234)));
        assert_eq!(
            parse_chat("@news"),
            Ok(ChatId::Username("@news".to_string()))
        );
    }

    #[test]
    fn chat_rejects_bare_names() {
        assert!(parse_chat("news").is_err());
        assert!(parse_chat("@").is_err());
    }

    #[test]
    fn body_must_be_an_object() {
        assert_eq!(parse_body(r#"{"a": 1}"#), Ok(json!({ "a": 1 })));
        assert!(parse_body("[1]").is_err());
        assert!(parse_body("{").unwrap_err().starts_with("Invalid JSON"));
    }

    #[test]
    fn send_command_parses_flags() {
        let cli = Cli::try_parse_from([
            "botwire",
            "--token",
            "t",
            "send",
            "@news",
            "hi",
            "--parse-mode",
            "markdown-v2",
            "--silent",
        ])
        .unwrap();

        assert_eq!(cli.token.as_deref(), Some("t"));

        let Commands::Send {
            chat,
            text,
            parse_mode,
            silent,
        } = cli.command
        else {
            panic!("Expected the send command");
        };

        assert_eq!(chat, ChatId::Username("@news".to_string()));
        assert_eq!(text, "hi");
        assert_eq!(parse_mode.map(ParseMode::from), Some(ParseMode::MarkdownV2));
        assert!(silent);
    }

    #[test]
    fn call_body_defaults_to_empty_object() {
        let cli = Cli::try_parse_from(["botwire", "call", "getMe"]).unwrap();

        let Commands::Call { method, body } = cli.command else {
            panic!("Expected the call command");
        };

        assert_eq!(method, "getMe");
        assert_eq!(body, json!({}));
    }
}
