use std::io;
use std::time::Duration;

use websms::{PhoneNumber, SenderAddressType, WebSmsClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let access_token = std::env::var("WEBSMS_ACCESS_TOKEN").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "WEBSMS_ACCESS_TOKEN environment variable is required",
        )
    })?;
    let phone_raw = std::env::var("WEBSMS_PHONE").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "WEBSMS_PHONE environment variable is required",
        )
    })?;
    let message = std::env::var("WEBSMS_MESSAGE")
        .unwrap_or_else(|_| "Hello from the websms demo.".to_owned());
    let sender = std::env::var("WEBSMS_SENDER").ok();

    let client = WebSmsClient::builder()
        .access_token(access_token)
        .timeout(Duration::from_secs(30))
        .build()?;
    let phone = PhoneNumber::parse(None, phone_raw)?;

    let mut draft = client
        .sms_message()
        .to_phone(&phone)
        .text(message)
        .client_message_id("websms-demo")
        .simulate(std::env::var("WEBSMS_SIMULATE").is_ok());
    if let Some(sender) = sender {
        draft = draft.sender_with_type(sender, SenderAddressType::Alphanumeric);
    }

    let id = draft.send().await?;
    println!("accepted, clientMessageId: {id:?}");

    Ok(())
}
