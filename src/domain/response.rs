use rust_decimal::Decimal;

use crate::domain::value::MessageId;

/// Message status as reported by Infobip (`status` object).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessageStatus {
    pub group_id: i32,
    pub group_name: String,
    pub id: i32,
    pub name: String,
    pub description: String,
    /// Only present in delivery reports.
    pub action: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendSmsResponse {
    /// Present only when the message went to more than one destination.
    pub bulk_id: Option<String>,
    pub messages: Vec<SentMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub to: String,
    pub status: MessageStatus,
    pub sms_count: u32,
    pub message_id: MessageId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReportResponse {
    pub results: Vec<DeliveryReport>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReport {
    pub bulk_id: Option<String>,
    pub to: String,
    /// Timestamps are kept exactly as Infobip formats them.
    pub sent_at: String,
    pub done_at: String,
    pub status: MessageStatus,
    pub sms_count: u32,
    pub message_id: MessageId,
    pub mcc_mnc: Option<String>,
    pub price: Price,
    pub error: DeliveryError,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Price {
    pub price_per_message: Decimal,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeliveryError {
    pub group_id: i32,
    pub group_name: String,
    pub id: i32,
    pub name: String,
    pub description: String,
    pub permanent: bool,
}

impl DeliveryError {
    /// `false` for Infobip's `NO_ERROR` record (group 0, id 0).
    pub fn is_error(&self) -> bool {
        self.group_id != 0 || self.id != 0
    }
}
