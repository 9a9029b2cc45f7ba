//! Transport layer: JSON wire-format details (serialization/deserialization).

mod money;
mod reports;
mod send_sms;
mod session;

pub use reports::decode_delivery_report_json_response;
pub use send_sms::{decode_send_sms_json_response, encode_send_sms_body};
pub use session::{decode_session_json_response, encode_session_body};

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("session response does not contain a token")]
    MissingToken,
}
