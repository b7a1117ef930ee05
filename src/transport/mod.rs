//! Transport layer: HTTP and wire-format details (serialization/deserialization).

mod send_message;

pub use send_message::{
    SendMessageResponse, decode_send_message_json_response, encode_message_payload,
    encode_text_message,
};
