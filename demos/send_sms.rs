use std::io;

use infobip::{Destination, InfobipClient, Sms};
use tracing_subscriber::EnvFilter;

fn required_env(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let username = required_env("INFOBIP_USERNAME")?;
    let password = required_env("INFOBIP_PASSWORD")?;
    let phone = required_env("INFOBIP_PHONE")?;
    let sender = std::env::var("INFOBIP_SENDER").unwrap_or_else(|_| "InfoSMS".to_owned());
    let message = std::env::var("INFOBIP_MESSAGE")
        .unwrap_or_else(|_| "Hello from the infobip demo.".to_owned());

    let client = InfobipClient::login(username, password).await?;
    let sms = Sms::single(sender, Destination::new(phone)?, message);

    let response = client.send_sms(&sms).await?;
    for message in &response.messages {
        println!(
            "to: {}, message_id: {}, status: {} ({})",
            message.to, message.message_id, message.status.name, message.status.description
        );
    }

    Ok(())
}
