use std::io;

use infobip::{InfobipClient, MessageId};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let username = std::env::var("INFOBIP_USERNAME").unwrap_or_default();
    let password = std::env::var("INFOBIP_PASSWORD").unwrap_or_default();
    let message_id = std::env::args().nth(1).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "usage: delivery_report <message-id>",
        )
    })?;

    let client = InfobipClient::login(username, password).await?;
    let report = client.delivery_report(&MessageId::new(message_id)).await?;

    if report.results.is_empty() {
        println!("no delivery report available yet");
    }
    for result in &report.results {
        println!(
            "to: {}, status: {}, done_at: {}, price: {} {}, error: {}",
            result.to,
            result.status.name,
            result.done_at,
            result.price.price_per_message,
            result.price.currency,
            result.error.name
        );
    }

    Ok(())
}
