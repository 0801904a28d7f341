//! # Methods
//!
//! Request records for the supported endpoints. Each request is a plain [`record!`] whose
//! [`Method`] implementation names the endpoint and the type of its `result`.
//!
//! Requests are sent with [`BotClient::call`](crate::client::BotClient::call), or through the
//! convenience functions on the client.
use crate::codec::{JsonCodec, Maybe};
use crate::record;
use crate::types::{
    Chat, ChatAction, ChatId, Message, MessageEntity, MessageOrTrue, ParseMode, ReplyMarkup,
    ReplyParameters, Update, User,
};

/// A request record bound to a remote endpoint.
pub trait Method: JsonCodec {
    /// The endpoint name, appended to the bot URL (e.g. `sendMessage`).
    const NAME: &'static str;

    /// The type of the envelope's `result` payload.
    type Response: JsonCodec;
}

macro_rules! method {
    ($request:ident => $name:literal, $response:ty) => {
        impl Method for $request {
            const NAME: &'static str = $name;
            type Response = $response;
        }
    };
}

record! {
    /// Returns the bot's own user.
    pub struct GetMe {}
}
method!(GetMe => "getMe", User);

record! {
    /// Long-polls for incoming updates.
    pub struct GetUpdates {
        /// Identifier of the first update to return.
        pub offset: Maybe<i64>,
        /// Batch size, 1-100.
        pub limit: Maybe<u32>,
        /// Long-poll wait in seconds; 0 means short polling.
        pub timeout: Maybe<u32>,
        pub allowed_updates: Maybe<Vec<String>>,
    }
}
method!(GetUpdates => "getUpdates", Vec<Update>);

record! {
    pub struct SendMessage {
        pub chat_id: ChatId,
        pub message_thread_id: Maybe<i64>,
        pub text: String,
        pub parse_mode: Maybe<ParseMode>,
        pub entities: Maybe<Vec<MessageEntity>>,
        pub disable_notification: Maybe<bool>,
        pub protect_content: Maybe<bool>,
        pub reply_parameters: Maybe<ReplyParameters>,
        pub reply_markup: Maybe<ReplyMarkup>,
    }
}
method!(SendMessage => "sendMessage", Message);

impl SendMessage {
    pub fn new(chat_id: impl Into<ChatId>, text: impl Into<String>) -> Self {
        Self {
            chat_id: chat_id.into(),
            text: text.into(),
            ..Default::default()
        }
    }
}

record! {
    pub struct ForwardMessage {
        pub chat_id: ChatId,
        pub from_chat_id: ChatId,
        pub message_id: i64,
        pub disable_notification: Maybe<bool>,
    }
}
method!(ForwardMessage => "forwardMessage", Message);

record! {
    /// Edits the text of a sent message, or of an inline message when `inline_message_id` is set.
    pub struct EditMessageText {
        pub chat_id: Maybe<ChatId>,
        pub message_id: Maybe<i64>,
        pub inline_message_id: Maybe<String>,
        pub text: String,
        pub parse_mode: Maybe<ParseMode>,
        pub reply_markup: Maybe<ReplyMarkup>,
    }
}
method!(EditMessageText => "editMessageText", MessageOrTrue);

record! {
    pub struct DeleteMessage {
        pub chat_id: ChatId,
        pub message_id: i64,
    }
}
method!(DeleteMessage => "deleteMessage", bool);

record! {
    pub struct GetChat {
        pub chat_id: ChatId,
    }
}
method!(GetChat => "getChat", Chat);

record! {
    pub struct AnswerCallbackQuery {
        pub callback_query_id: String,
        pub text: Maybe<String>,
        pub show_alert: Maybe<bool>,
        pub url: Maybe<String>,
        pub cache_time: Maybe<u32>,
    }
}
method!(AnswerCallbackQuery => "answerCallbackQuery", bool);

record! {
    pub struct SendChatAction {
        pub chat_id: ChatId,
        pub action: ChatAction,
    }
}
method!(SendChatAction => "sendChatAction", bool);
