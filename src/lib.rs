//! Typed Rust client for the websms HTTP API.
//!
//! The crate is split into a domain layer of strong types, a transport layer for
//! wire-format quirks, and a small client layer that authenticates, posts one request per
//! send and maps the provider's `statusCode` to typed errors.
//!
//! ```rust,no_run
//! use websms::{Auth, WebSmsClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), websms::WebSmsError> {
//!     let client = WebSmsClient::new(Auth::access_token("...")?)?;
//!     let id = client
//!         .sms_message()
//!         .to("+4311111111")
//!         .text("hello")
//!         .client_message_id("greeting-1")
//!         .send()
//!         .await?;
//!     println!("accepted: {id:?}");
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod config;
pub mod domain;
mod transport;

pub use client::{
    Auth, BasicCredentials, DEFAULT_ENDPOINT, DraftMessage, TransportOptions, WebSmsClient,
    WebSmsClientBuilder, WebSmsError,
};
pub use config::{AuthConfig, ConfigError, WebSmsConfig};
pub use domain::{
    AccessToken, ContentCategory, KnownStatusCode, MAX_RECIPIENTS, Message, MessageType,
    Outcome, Password, PhoneNumber, SenderAddressType, StatusCode, TextMessage, Username,
    ValidationError, ValidityPeriod, classify,
};
