//! # Botwire CLI Entry Point
//!
//! The main executable for the Botwire tool. This file drives the application lifecycle:
//!
//! 1. **Initialization**: Parses command-line arguments using [`cli::Cli`] and installs the
//!    log subscriber (`RUST_LOG`, `warn` by default, written to stderr).
//! 2. **Configuration**: Layers the config file, the environment and the flags into a
//!    `ClientConfig`.
//! 3. **Execution**: Delegates the command to a `BotClient`.
//! 4. **Presentation**: Formats and prints the resulting data or error to standard output/error.

mod cli;
mod formatter;

use anyhow::Context;
use botwire_core::client::BotClient;
use botwire_core::codec::{self, Maybe};
use botwire_core::config::{ClientConfig, ConfigError};
use botwire_core::methods::SendMessage;
use botwire_core::types::{ChatId, ParseMode};
use clap::Parser;
use cli::{Cli, Commands};
use formatter::FormattedString;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();

    let mut config = match load_config(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", FormattedString::from(err));
            process::exit(1);
        }
    };

    if let Commands::Poll { limit, timeout, .. } = &args.command {
        config.poll_limit = limit.unwrap_or(config.poll_limit);
        config.poll_timeout_secs = timeout.unwrap_or(config.poll_timeout_secs);
    }

    let client = match BotClient::from_config(&config) {
        Ok(client) => client,
        Err(err) => {
            eprintln!("{}", FormattedString::from(anyhow::Error::from(err)));
            process::exit(1);
        }
    };

    let result = match args.command {
        Commands::Me => show_me(&client).await,
        Commands::Send {
            chat,
            text,
            parse_mode,
            silent,
        } => send(&client, chat, text, parse_mode.map(ParseMode::from), silent).await,
        Commands::Poll { offset, count, .. } => poll(&client, offset, count).await,
        Commands::Call { method, body } => call(&client, &method, body).await,
    };

    if let Err(err) = result {
        eprintln!("{}", FormattedString::from(err));
        process::exit(1);
    }
}

/// Config file, then environment, then flags.
fn load_config(args: &Cli) -> Result<ClientConfig, ConfigError> {
    let config = match &args.config {
        Some(path) => ClientConfig::load(path)?,
        None => ClientConfig::default(),
    };

    let mut config = config.apply_env();

    if let Some(token) = &args.token {
        config.token = token.clone();
    }
    if let Some(api_url) = &args.api_url {
        config.api_url = api_url.clone();
    }

    Ok(config)
}

async fn show_me(client: &BotClient) -> anyhow::Result<()> {
    let me = client.get_me().await.context("getMe")?;
    println!("{}", FormattedString::from(me));
    Ok(())
}

async fn send(
    client: &BotClient,
    chat: ChatId,
    text: String,
    parse_mode: Option<ParseMode>,
    silent: bool,
) -> anyhow::Result<()> {
    let request = SendMessage {
        parse_mode: Maybe::from_option(parse_mode),
        disable_notification: if silent { Maybe::Present(true) } else { Maybe::Absent },
        ..SendMessage::new(chat, text)
    };

    let message = client.call(&request).await.context("sendMessage")?;
    println!("{}", FormattedString::from(message));
    Ok(())
}

async fn poll(client: &BotClient, offset: Option<i64>, count: Option<usize>) -> anyhow::Result<()> {
    let mut updates = client.updates();
    if let Some(offset) = offset {
        updates = updates.starting_at(offset);
    }

    let mut seen = 0;
    while count.is_none_or(|count| seen < count) {
        let Some(update) = updates.next().await.context("getUpdates")? else {
            break;
        };

        println!("{}", FormattedString::from(codec::to_value(&update)));
        seen += 1;
    }

    tracing::info!(
        updates = seen,
        next_offset = updates.next_key(),
        "Polling finished"
    );
    Ok(())
}

async fn call(client: &BotClient, method: &str, body: serde_json::Value) -> anyhow::Result<()> {
    let result = client.call_raw(method, body).await.context(method.to_string())?;
    println!("{}", FormattedString::from(result));
    Ok(())
}
