//! # Schema
//!
//! Record, union and enum types exchanged with the Bot API. Each type is declared once through
//! the codec macros; their JSON mapping is derived from these declarations.
use crate::codec::Maybe;
use crate::cursor::Sequenced;
use crate::{one_of, record, string_enum};

string_enum! {
    /// Formatting applied by the server to message text.
    pub enum ParseMode {
        None = "",
        Markdown = "Markdown",
        MarkdownV2 = "MarkdownV2",
        Html = "HTML",
    }
}

string_enum! {
    pub enum ChatType {
        Private = "private",
        Group = "group",
        Supergroup = "supergroup",
        Channel = "channel",
    }
}

string_enum! {
    /// Kind of a [`MessageEntity`].
    pub enum EntityType {
        Mention = "mention",
        Hashtag = "hashtag",
        Cashtag = "cashtag",
        BotCommand = "bot_command",
        Url = "url",
        Email = "email",
        PhoneNumber = "phone_number",
        Bold = "bold",
        Italic = "italic",
        Underline = "underline",
        Strikethrough = "strikethrough",
        Spoiler = "spoiler",
        Code = "code",
        Pre = "pre",
        TextLink = "text_link",
        TextMention = "text_mention",
    }
}

string_enum! {
    /// Status shown to the chat members while the bot prepares a reply.
    pub enum ChatAction {
        Typing = "typing",
        UploadPhoto = "upload_photo",
        RecordVideo = "record_video",
        UploadVideo = "upload_video",
        RecordVoice = "record_voice",
        UploadVoice = "upload_voice",
        UploadDocument = "upload_document",
        FindLocation = "find_location",
    }
}

record! {
    /// A user or bot account.
    pub struct User {
        pub id: i64,
        pub is_bot: bool,
        pub first_name: String,
        pub last_name: Maybe<String>,
        pub username: Maybe<String>,
        pub language_code: Maybe<String>,
        pub can_join_groups: Maybe<bool>,
        pub can_read_all_group_messages: Maybe<bool>,
        pub supports_inline_queries: Maybe<bool>,
    }
}

record! {
    pub struct Chat {
        pub id: i64,
        pub kind: ChatType => "type",
        pub title: Maybe<String>,
        pub username: Maybe<String>,
        pub first_name: Maybe<String>,
        pub last_name: Maybe<String>,
        pub description: Maybe<String>,
    }
}

record! {
    /// A special span inside message text (command, link, formatting...).
    pub struct MessageEntity {
        pub kind: EntityType => "type",
        /// Offset in UTF-16 code units.
        pub offset: i64,
        pub length: i64,
        pub url: Maybe<String>,
        pub user: Maybe<User>,
        pub language: Maybe<String>,
    }
}

record! {
    pub struct Message {
        pub message_id: i64,
        pub from: Maybe<User>,
        pub sender_chat: Maybe<Chat>,
        pub date: i64,
        pub chat: Chat,
        pub forward_from: Maybe<User>,
        pub forward_date: Maybe<i64>,
        pub reply_to_message: Maybe<Box<Message>>,
        pub edit_date: Maybe<i64>,
        pub text: Maybe<String>,
        pub entities: Maybe<Vec<MessageEntity>>,
        pub caption: Maybe<String>,
        pub reply_markup: Maybe<InlineKeyboardMarkup>,
    }
}

impl Message {
    /// Returns the bot command (e.g. `/start`) the text starts with, if any.
    pub fn command(&self) -> Option<&str> {
        let text = self.text.get()?;
        let entity = self.entities.get()?.iter().find(|e| {
            e.kind == EntityType::BotCommand && e.offset == 0
        })?;
        // Commands are ASCII, so UTF-16 offsets equal byte offsets here.
        text.get(..usize::try_from(entity.length).ok()?)
    }
}

record! {
    /// Sent when a user presses an inline keyboard button.
    pub struct CallbackQuery {
        pub id: String,
        pub from: User,
        pub message: Maybe<Message>,
        pub inline_message_id: Maybe<String>,
        pub chat_instance: String,
        pub data: Maybe<String>,
    }
}

record! {
    /// An incoming event. Exactly one of the optional payloads is present.
    pub struct Update {
        pub update_id: i64,
        pub message: Maybe<Message>,
        pub edited_message: Maybe<Message>,
        pub channel_post: Maybe<Message>,
        pub edited_channel_post: Maybe<Message>,
        pub callback_query: Maybe<CallbackQuery>,
    }
}

impl Sequenced for Update {
    fn sequence_key(&self) -> i64 {
        self.update_id
    }
}

record! {
    pub struct InlineKeyboardButton {
        pub text: String,
        pub url: Maybe<String>,
        pub callback_data: Maybe<String>,
        pub switch_inline_query: Maybe<String>,
    }
}

record! {
    pub struct InlineKeyboardMarkup {
        pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
    }
}

record! {
    pub struct KeyboardButton {
        pub text: String,
        pub request_contact: Maybe<bool>,
        pub request_location: Maybe<bool>,
    }
}

record! {
    pub struct ReplyKeyboardMarkup {
        pub keyboard: Vec<Vec<KeyboardButton>>,
        pub resize_keyboard: Maybe<bool>,
        pub one_time_keyboard: Maybe<bool>,
        pub input_field_placeholder: Maybe<String>,
        pub selective: Maybe<bool>,
    }
}

record! {
    pub struct ReplyKeyboardRemove {
        pub remove_keyboard: bool,
        pub selective: Maybe<bool>,
    }
}

record! {
    pub struct ForceReply {
        pub force_reply: bool,
        pub input_field_placeholder: Maybe<String>,
        pub selective: Maybe<bool>,
    }
}

record! {
    /// Describes the reply the message is answering.
    pub struct ReplyParameters {
        pub message_id: i64,
        pub chat_id: Maybe<ChatId>,
        pub allow_sending_without_reply: Maybe<bool>,
    }
}

one_of! {
    /// Target chat: numeric id, or `@username` for public channels and supergroups.
    pub enum ChatId {
        Id(i64),
        Username(String),
    }
}

impl From<&str> for ChatId {
    fn from(value: &str) -> Self {
        ChatId::Username(value.to_string())
    }
}

one_of! {
    /// Additional interface options sent along a message.
    ///
    /// Every candidate is an object, so values of this union can be sent but not decoded.
    pub enum ReplyMarkup {
        InlineKeyboard(InlineKeyboardMarkup),
        ReplyKeyboard(ReplyKeyboardMarkup),
        RemoveKeyboard(ReplyKeyboardRemove),
        ForceReply(ForceReply),
    }
}

one_of! {
    /// Result of edit methods: the edited message, or `true` for inline messages.
    pub enum MessageOrTrue {
        Message(Message),
        True(bool),
    }
}
