//! Typed Rust client for the Infobip SMS HTTP API.
//!
//! The crate is split into a domain layer of strong types, a transport layer for
//! the JSON wire format, and a small client layer that owns the session token and
//! runs each request/response exchange.
//!
//! ```rust,no_run
//! use infobip::{Destination, InfobipClient, Sms};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), infobip::InfobipError> {
//!     let client = InfobipClient::login("username", "password").await?;
//!     let sms = Sms::single("InfoSMS", Destination::new("41793026727")?, "hello");
//!     let sent = client.send_sms(&sms).await?;
//!     let report = client.delivery_report(&sent.messages[0].message_id).await?;
//!     println!("{report:?}");
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{InfobipClient, InfobipClientBuilder, InfobipError};
pub use domain::{
    DeliveryError, DeliveryReport, DeliveryReportResponse, Destination, MessageId, MessageStatus,
    MessageText, Password, PhoneNumber, Price, SendSmsResponse, SenderId, SentMessage, Sms, Token,
    Username, ValidationError,
};
pub use rust_decimal::Decimal;
