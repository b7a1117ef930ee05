use crate::domain::value::{PhoneNumber, ValidityPeriod};

/// Maximum number of recipients websms accepts in one request.
///
/// Not enforced here; the provider rejects larger lists with status 4025.
pub const MAX_RECIPIENTS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Provider-side classification of the message content, used for blacklist handling.
pub enum ContentCategory {
    #[default]
    Informational,
    Advertisement,
}

impl ContentCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Informational => "informational",
            Self::Advertisement => "advertisement",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Format of the originating address.
pub enum SenderAddressType {
    National,
    #[default]
    International,
    Alphanumeric,
    Shortcode,
}

impl SenderAddressType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::National => "national",
            Self::International => "international",
            Self::Alphanumeric => "alphanumeric",
            Self::Shortcode => "shortcode",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Message kinds a caller can ask the client for.
pub enum MessageType {
    /// Plain text SMS.
    Text,
    /// WhatsApp message. Declared by websms but not implemented by this crate.
    WhatsApp,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Outbound text SMS.
///
/// Setters consume and return `self` so a message can be built in one expression. Nothing
/// is validated beyond the types themselves: an empty recipient list or more than
/// [`MAX_RECIPIENTS`] entries are left for the provider to reject.
pub struct TextMessage {
    recipients: Vec<String>,
    text: String,
    simulate_only: bool,
    client_message_id: Option<String>,
    content_category: ContentCategory,
    validity: ValidityPeriod,
    sender_address: Option<String>,
    sender_address_type: SenderAddressType,
    send_as_flash: bool,
}

impl TextMessage {
    /// Sub-path of the websms endpoint that accepts text messages.
    pub const REQUEST_ENDPOINT: &'static str = "smsmessaging/text";

    pub fn new() -> Self {
        Self::default()
    }

    /// Append a recipient (E.164 MSISDN). No de-duplication or format check is done.
    pub fn to(mut self, address: impl Into<String>) -> Self {
        self.recipients.push(address.into());
        self
    }

    /// Append a parsed recipient using its E.164 form.
    pub fn to_phone(self, phone: &PhoneNumber) -> Self {
        self.to(phone.e164())
    }

    /// Replace the message text.
    pub fn text(mut self, content: impl Into<String>) -> Self {
        self.text = content.into();
        self
    }

    /// When `true`, websms only simulates delivery and no SMS is sent.
    pub fn simulate(mut self, simulate: bool) -> Self {
        self.simulate_only = simulate;
        self
    }

    /// Set the sender address with the default [`SenderAddressType::International`] type.
    pub fn sender(self, address: impl Into<String>) -> Self {
        self.sender_with_type(address, SenderAddressType::International)
    }

    /// Set the sender address and its type together.
    pub fn sender_with_type(
        mut self,
        address: impl Into<String>,
        address_type: SenderAddressType,
    ) -> Self {
        self.sender_address = Some(address.into());
        self.sender_address_type = address_type;
        self
    }

    /// Display the message immediately on the handset.
    pub fn flash(mut self, flash: bool) -> Self {
        self.send_as_flash = flash;
        self
    }

    /// Caller-chosen id echoed back by websms.
    pub fn client_message_id(mut self, id: impl Into<String>) -> Self {
        self.client_message_id = Some(id.into());
        self
    }

    pub fn content_category(mut self, category: ContentCategory) -> Self {
        self.content_category = category;
        self
    }

    pub fn validity(mut self, validity: ValidityPeriod) -> Self {
        self.validity = validity;
        self
    }

    pub fn recipients(&self) -> &[String] {
        &self.recipients
    }

    pub fn content(&self) -> &str {
        &self.text
    }

    pub fn is_simulated(&self) -> bool {
        self.simulate_only
    }

    pub fn message_id(&self) -> Option<&str> {
        self.client_message_id.as_deref()
    }

    pub fn category(&self) -> ContentCategory {
        self.content_category
    }

    pub fn validity_period(&self) -> ValidityPeriod {
        self.validity
    }

    pub fn sender_address(&self) -> Option<&str> {
        self.sender_address.as_deref()
    }

    pub fn sender_address_type(&self) -> SenderAddressType {
        self.sender_address_type
    }

    pub fn is_flash(&self) -> bool {
        self.send_as_flash
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A message the client knows how to send.
pub enum Message {
    Text(TextMessage),
}

impl Message {
    /// Sub-path appended to the client endpoint for this kind of message.
    pub fn request_endpoint(&self) -> &'static str {
        match self {
            Self::Text(_) => TextMessage::REQUEST_ENDPOINT,
        }
    }

    pub fn message_type(&self) -> MessageType {
        match self {
            Self::Text(_) => MessageType::Text,
        }
    }

    pub fn recipient_count(&self) -> usize {
        match self {
            Self::Text(text) => text.recipients().len(),
        }
    }
}

impl From<TextMessage> for Message {
    fn from(value: TextMessage) -> Self {
        Self::Text(value)
    }
}
