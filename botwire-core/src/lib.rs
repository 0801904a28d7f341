//! # Botwire Core
//!
//! `botwire-core` is the library powering the Botwire CLI. It provides a typed client for
//! JSON/HTTP bot-messaging APIs (Telegram Bot API conventions): callers build typed request
//! records, send them, and receive typed results without per-endpoint JSON plumbing.
//!
//! ## Key Components
//!
//! * **[`codec`]:** The descriptor-driven JSON codec. Records, tagged unions and string enums
//!   are declared once with [`record!`], [`one_of!`] and [`string_enum!`]; their wire mapping
//!   (optional fields, renames, wire-transparent unions) is derived from that declaration.
//! * **[`BotClient`](client::BotClient):** Encodes requests, sends them through a
//!   [`Transport`](transport::Transport) and unwraps the response [`envelope`].
//! * **[`Cursor`](cursor::Cursor):** Turns the paged `getUpdates` long-poll into a single
//!   lazily fetched sequence of updates.
//!
//! ## Transports
//!
//! The client is generic over its transport. [`HttpTransport`](transport::http::HttpTransport)
//! talks to the real API over `reqwest`; any other implementation (an in-memory fake, a proxy)
//! can be plugged in through the [`Transport`](transport::Transport) trait.
//!
//! See the README.md for more details about usage.
pub mod client;
pub mod codec;
pub mod config;
pub mod cursor;
pub mod envelope;
pub mod methods;
pub mod transport;
pub mod types;

// Re-exports
pub use serde_json;

/// Type alias for the standard boxed error used by the transport boundary.
type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

// Paths used by the codec macros.
#[doc(hidden)]
pub mod __private {
    pub use serde_json::Value;
}
