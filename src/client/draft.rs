use crate::client::{WebSmsClient, WebSmsError};
use crate::domain::{
    ContentCategory, Message, PhoneNumber, SenderAddressType, TextMessage, ValidityPeriod,
};

#[derive(Debug, Clone)]
/// A text SMS bound to the client that created it.
///
/// Obtained from [`WebSmsClient::sms_message`]. Setters mirror [`TextMessage`];
/// [`DraftMessage::send`] consumes the draft, so a draft is sent at most once.
pub struct DraftMessage<'c> {
    client: &'c WebSmsClient,
    message: TextMessage,
}

impl<'c> DraftMessage<'c> {
    pub(crate) fn new(client: &'c WebSmsClient) -> Self {
        Self {
            client,
            message: TextMessage::new(),
        }
    }

    fn map(mut self, f: impl FnOnce(TextMessage) -> TextMessage) -> Self {
        self.message = f(self.message);
        self
    }

    /// Append a recipient (E.164 MSISDN). No de-duplication or format check is done.
    pub fn to(self, address: impl Into<String>) -> Self {
        self.map(|message| message.to(address))
    }

    /// Append a parsed recipient using its E.164 form.
    pub fn to_phone(self, phone: &PhoneNumber) -> Self {
        self.map(|message| message.to_phone(phone))
    }

    pub fn text(self, content: impl Into<String>) -> Self {
        self.map(|message| message.text(content))
    }

    /// Only simulate delivery on the websms side.
    pub fn simulate(self, simulate: bool) -> Self {
        self.map(|message| message.simulate(simulate))
    }

    pub fn sender(self, address: impl Into<String>) -> Self {
        self.map(|message| message.sender(address))
    }

    pub fn sender_with_type(
        self,
        address: impl Into<String>,
        address_type: SenderAddressType,
    ) -> Self {
        self.map(|message| message.sender_with_type(address, address_type))
    }

    pub fn flash(self, flash: bool) -> Self {
        self.map(|message| message.flash(flash))
    }

    pub fn client_message_id(self, id: impl Into<String>) -> Self {
        self.map(|message| message.client_message_id(id))
    }

    pub fn content_category(self, category: ContentCategory) -> Self {
        self.map(|message| message.content_category(category))
    }

    pub fn validity(self, validity: ValidityPeriod) -> Self {
        self.map(|message| message.validity(validity))
    }

    /// Borrow the message built so far.
    pub fn message(&self) -> &TextMessage {
        &self.message
    }

    /// Detach the message from its client.
    pub fn into_message(self) -> TextMessage {
        self.message
    }

    /// Sub-path the message will be posted to.
    pub fn request_endpoint(&self) -> &'static str {
        TextMessage::REQUEST_ENDPOINT
    }

    /// JSON body that [`DraftMessage::send`] will post.
    pub fn request_payload(&self) -> serde_json::Value {
        crate::transport::encode_text_message(&self.message)
    }

    /// Send through the owning client. See [`WebSmsClient::send`].
    pub async fn send(self) -> Result<Option<String>, WebSmsError> {
        self.client.send(Message::Text(self.message)).await
    }
}
