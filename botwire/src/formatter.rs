use botwire_core::client::CallError;
use botwire_core::codec;
use botwire_core::config::ConfigError;
use botwire_core::envelope::RemoteError;
use botwire_core::types::{Message, User};
use colored::*;
use std::fmt::Display;

/// A wrapper struct for a formatted, colored string.
///
/// Implements `Display` so it can be printed directly.
pub struct FormattedString(pub String);

pub struct GenericError<T: Display>(pub &'static str, pub T);

impl std::fmt::Display for FormattedString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;
        writeln!(f, "{}", self.0)?;
        Ok(())
    }
}

impl From<serde_json::Value> for FormattedString {
    fn from(value: serde_json::Value) -> Self {
        FormattedString(serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string()))
    }
}

impl From<User> for FormattedString {
    fn from(user: User) -> Self {
        let handle = match user.username.get() {
            Some(username) => format!("@{username}"),
            None => user.first_name.clone(),
        };

        FormattedString(format!(
            "{} {} (id {})\n\n{}",
            "Bot:".green().bold(),
            handle,
            user.id,
            FormattedString::from(codec::to_value(&user)).0
        ))
    }
}

impl From<Message> for FormattedString {
    fn from(message: Message) -> Self {
        FormattedString(format!(
            "{} message {} in chat {}",
            "Sent:".green().bold(),
            message.message_id,
            message.chat.id
        ))
    }
}

impl From<RemoteError> for FormattedString {
    fn from(err: RemoteError) -> Self {
        let mut out = format!(
            "{} code={} description={:?}",
            "Request Rejected:".red().bold(),
            err.error_code,
            err.description
        );

        if let Some(secs) = err.retry_after() {
            out.push_str(&format!("\n\n{}", format!("Retry after {secs}s").yellow()));
        }

        FormattedString(out)
    }
}

impl From<ConfigError> for FormattedString {
    fn from(err: ConfigError) -> Self {
        FormattedString(format!("{}\n\n'{}'", "Invalid Configuration:".red().bold(), err))
    }
}

impl From<anyhow::Error> for FormattedString {
    fn from(err: anyhow::Error) -> Self {
        if let Some(CallError::Remote(remote)) = err.downcast_ref::<CallError>() {
            return FormattedString::from(remote.clone());
        }

        FormattedString::from(GenericError("Call Failed", format!("{err:#}")))
    }
}

impl<T: Display> From<GenericError<T>> for FormattedString {
    fn from(GenericError(msg, err): GenericError<T>) -> Self {
        FormattedString(format!("{}:\n\n'{}'", msg.red().bold(), err))
    }
}
