//! Domain layer: strong types with validation and invariants (no I/O).

mod message;
mod status;
mod validation;
mod value;

pub use message::{
    ContentCategory, MAX_RECIPIENTS, Message, MessageType, SenderAddressType, TextMessage,
};
pub use status::{KnownStatusCode, Outcome, StatusCode, classify};
pub use validation::ValidationError;
pub use value::{AccessToken, Password, PhoneNumber, Username, ValidityPeriod};
