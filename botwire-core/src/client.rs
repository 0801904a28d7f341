//! # Bot Client
//!
//! This module implements the typed entry point for calling the Bot API.
//!
//! A [`BotClient`] is generic over its [`Transport`]. Every call follows the same path:
//!
//! 1. The request record is encoded with the [codec](crate::codec).
//! 2. The transport sends it to the endpoint named by [`Method::NAME`].
//! 3. The response [envelope](crate::envelope) is unwrapped and its `result` decoded as
//!    [`Method::Response`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use botwire_core::{client::BotClient, config::ClientConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = BotClient::from_config(&ClientConfig::new("123456:secret"))?;
//!
//! let me = client.get_me().await?;
//! println!("Running as @{}", me.username.get().map_or("?", |u| u.as_str()));
//!
//! let mut updates = client.updates();
//! while let Some(update) = updates.next().await? {
//!     if let Some(message) = update.message.get() {
//!         client.send_message(message.chat.id, "pong").await?;
//!     }
//! }
//! # Ok(())
//! # }
//! ```
use crate::codec::{Maybe, SchemaError};
use crate::config::{ClientConfig, ConfigError};
use crate::cursor::{Cursor, FetchBatch};
use crate::envelope::{RemoteError, decode_envelope};
use crate::methods::{
    AnswerCallbackQuery, DeleteMessage, EditMessageText, ForwardMessage, GetChat, GetMe,
    GetUpdates, Method, SendChatAction, SendMessage,
};
use crate::transport::http::HttpTransport;
use crate::transport::{Transport, TransportError};
use crate::types::{Chat, ChatAction, ChatId, Message, MessageOrTrue, Update, User};
use serde_json::Value;

/// Errors that can occur while performing an API call.
#[derive(Debug, thiserror::Error)]
pub enum CallError {
    #[error("Response does not match the expected schema: '{0}'")]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Remote(#[from] RemoteError),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Errors that can occur when building a client from its configuration.
#[derive(Debug, thiserror::Error)]
pub enum ClientBuildError {
    #[error("Invalid configuration: '{0}'")]
    Config(#[from] ConfigError),
    #[error("Failed to build the HTTP transport: '{0}'")]
    Transport(#[from] TransportError),
}

/// The typed Bot API client.
#[derive(Clone, Debug)]
pub struct BotClient<T = HttpTransport> {
    transport: T,
    poll_limit: u32,
    poll_timeout_secs: u32,
}

impl BotClient<HttpTransport> {
    /// Validates the configuration and builds a client over HTTP.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientBuildError> {
        config.validate()?;

        let transport = HttpTransport::new(config)?;

        Ok(Self::new(transport).with_polling(config.poll_limit, config.poll_timeout_secs))
    }
}

impl<T: Transport> BotClient<T> {
    /// Creates a client over any transport. Polling defaults to batches of 100 with no wait.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            poll_limit: crate::cursor::DEFAULT_PAGE_SIZE,
            poll_timeout_secs: 0,
        }
    }

    /// Sets the batch size and long-poll wait used by [`BotClient::updates`].
    pub fn with_polling(mut self, limit: u32, timeout_secs: u32) -> Self {
        self.poll_limit = limit;
        self.poll_timeout_secs = timeout_secs;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends a request record and decodes the typed result.
    pub async fn call<M: Method>(&self, request: &M) -> Result<M::Response, CallError> {
        let response = self.send(M::NAME, request.encode()).await?;
        decode_envelope(&response).inspect_err(|err| log_failure(M::NAME, err))
    }

    /// Sends an untyped request body and returns the untyped `result`.
    pub async fn call_raw(&self, method: &str, body: Value) -> Result<Value, CallError> {
        let response = self.send(method, body).await?;
        decode_envelope(&response).inspect_err(|err| log_failure(method, err))
    }

    async fn send(&self, method: &str, body: Value) -> Result<Value, TransportError> {
        tracing::debug!(method, "Calling API method");
        tracing::trace!(method, %body, "Request body");

        let response = self.transport.send(method, body).await?;

        tracing::trace!(method, %response, "Response body");
        Ok(response)
    }

    pub async fn get_me(&self) -> Result<User, CallError> {
        self.call(&GetMe {}).await
    }

    pub async fn get_updates(&self, request: &GetUpdates) -> Result<Vec<Update>, CallError> {
        self.call(request).await
    }

    pub async fn send_message(
        &self,
        chat_id: impl Into<ChatId>,
        text: impl Into<String>,
    ) -> Result<Message, CallError> {
        self.call(&SendMessage::new(chat_id, text)).await
    }

    pub async fn forward_message(
        &self,
        chat_id: impl Into<ChatId>,
        from_chat_id: impl Into<ChatId>,
        message_id: i64,
    ) -> Result<Message, CallError> {
        self.call(&ForwardMessage {
            chat_id: chat_id.into(),
            from_chat_id: from_chat_id.into(),
            message_id,
            disable_notification: Maybe::Absent,
        })
        .await
    }

    pub async fn edit_message_text(
        &self,
        request: &EditMessageText,
    ) -> Result<MessageOrTrue, CallError> {
        self.call(request).await
    }

    pub async fn delete_message(
        &self,
        chat_id: impl Into<ChatId>,
        message_id: i64,
    ) -> Result<bool, CallError> {
        self.call(&DeleteMessage {
            chat_id: chat_id.into(),
            message_id,
        })
        .await
    }

    pub async fn get_chat(&self, chat_id: impl Into<ChatId>) -> Result<Chat, CallError> {
        self.call(&GetChat {
            chat_id: chat_id.into(),
        })
        .await
    }

    pub async fn answer_callback_query(
        &self,
        request: &AnswerCallbackQuery,
    ) -> Result<bool, CallError> {
        self.call(request).await
    }

    pub async fn send_chat_action(
        &self,
        chat_id: impl Into<ChatId>,
        action: ChatAction,
    ) -> Result<bool, CallError> {
        self.call(&SendChatAction {
            chat_id: chat_id.into(),
            action,
        })
        .await
    }
}

impl<T: Transport + Sync> BotClient<T> {
    /// Returns a cursor over incoming updates, starting from the oldest unconfirmed one.
    ///
    /// Use [`Cursor::starting_at`] to resume from a known update id.
    pub fn updates(&self) -> Cursor<UpdateFetcher<'_, T>> {
        self.update_cursor(None)
    }

    /// Like [`BotClient::updates`], restricted to the given update kinds (e.g. `["message"]`).
    pub fn updates_of(&self, kinds: &[&str]) -> Cursor<UpdateFetcher<'_, T>> {
        self.update_cursor(Some(kinds.iter().map(|k| k.to_string()).collect()))
    }

    fn update_cursor(
        &self,
        allowed_updates: Option<Vec<String>>,
    ) -> Cursor<UpdateFetcher<'_, T>> {
        Cursor::new(UpdateFetcher {
            client: self,
            allowed_updates,
        })
        .page_size(self.poll_limit)
        .wait(self.poll_timeout_secs)
    }
}

fn log_failure(method: &str, err: &CallError) {
    match err {
        CallError::Remote(remote) => tracing::warn!(
            method,
            error_code = remote.error_code,
            description = %remote.description,
            "API call rejected"
        ),
        other => tracing::warn!(method, error = %other, "API call failed"),
    }
}

/// The `getUpdates` primitive behind [`BotClient::updates`].
pub struct UpdateFetcher<'a, T> {
    client: &'a BotClient<T>,
    allowed_updates: Option<Vec<String>>,
}

impl<T: Transport + Sync> FetchBatch for UpdateFetcher<'_, T> {
    type Item = Update;
    type Error = CallError;

    async fn fetch_batch(
        &mut self,
        offset: i64,
        limit: u32,
        wait_secs: u32,
    ) -> Result<Vec<Update>, CallError> {
        let request = GetUpdates {
            offset: Maybe::Present(offset),
            limit: Maybe::Present(limit),
            timeout: Maybe::Present(wait_secs),
            allowed_updates: Maybe::from_option(self.allowed_updates.clone()),
        };

        self.client.call(&request).await
    }
}
