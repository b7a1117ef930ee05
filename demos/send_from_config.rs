use websms::{WebSmsClient, WebSmsConfig, WebSmsError};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let client = WebSmsClient::from_config(&WebSmsConfig::from_env())?;
    let recipient = std::env::var("WEBSMS_PHONE").unwrap_or_else(|_| "+4311111111".to_owned());

    let result = client
        .sms_message()
        .to(recipient)
        .text("Simulated message from the websms demo.")
        .simulate(true)
        .send()
        .await;

    match result {
        Ok(id) => println!("accepted, clientMessageId: {id:?}"),
        Err(err @ WebSmsError::NotAuthorized { .. }) => {
            eprintln!("check WEBSMS_ACCESS_TOKEN or WEBSMS_USERNAME/WEBSMS_PASSWORD: {err}");
        }
        Err(err) if err.is_retryable() => eprintln!("temporary failure, try again later: {err}"),
        Err(err) => return Err(err.into()),
    }

    Ok(())
}
