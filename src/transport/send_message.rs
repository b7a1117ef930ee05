use serde_json::{Value, json};

use crate::domain::{Message, StatusCode, TextMessage};

const DEFAULT_STATUS_MESSAGE: &str = "no message";

/// Response envelope returned by every websms messaging endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendMessageResponse {
    pub status_code: StatusCode,
    pub status_message: String,
    pub client_message_id: Option<String>,
    pub transfer_id: Option<String>,
}

/// Build the JSON request body for `message`.
///
/// Every key is always present; an unset `clientMessageId` is sent as `""` and an unset
/// sender address as `null`.
pub fn encode_message_payload(message: &Message) -> serde_json::Value {
    match message {
        Message::Text(text) => encode_text_message(text),
    }
}

pub fn encode_text_message(message: &TextMessage) -> serde_json::Value {
    json!({
        "senderAddressType": message.sender_address_type().as_str(),
        "senderAddress": message.sender_address(),
        "recipientAddressList": message.recipients(),
        "messageContent": message.content(),
        "contentCategory": message.category().as_str(),
        "validityPeriode": message.validity_period().seconds(),
        "sendAsFlashSms": message.is_flash(),
        "clientMessageId": message.message_id().unwrap_or_default(),
        "test": message.is_simulated(),
    })
}

/// Decode a websms response body.
///
/// Decoding never fails: a body that is not a JSON object, or a `statusCode` that is not an
/// integer (or a numeric string), reads as status code 0, which classifies as unknown.
pub fn decode_send_message_json_response(body: &str) -> SendMessageResponse {
    let parsed = serde_json::from_str::<Value>(body).unwrap_or(Value::Null);

    SendMessageResponse {
        status_code: StatusCode::new(status_code_field(parsed.get("statusCode"))),
        status_message: string_field(parsed.get("statusMessage"))
            .unwrap_or_else(|| DEFAULT_STATUS_MESSAGE.to_owned()),
        client_message_id: string_field(parsed.get("clientMessageId")),
        transfer_id: string_field(parsed.get("transferId")),
    }
}

fn status_code_field(value: Option<&Value>) -> i32 {
    match value {
        Some(Value::Number(number)) => number
            .as_i64()
            .and_then(|code| i32::try_from(code).ok())
            .unwrap_or_default(),
        Some(Value::String(text)) => text.trim().parse().unwrap_or_default(),
        _ => 0,
    }
}

// Numbers are rendered as text; null, booleans and nested values count as absent.
fn string_field(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(text)) => Some(text.clone()),
        Some(Value::Number(number)) => Some(number.to_string()),
        _ => None,
    }
}
