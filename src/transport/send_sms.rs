use serde::Deserialize;
use serde_json::{Map, Value};

use super::DecodeError;
use crate::domain::{
    Destination, MessageId, MessageStatus, MessageText, SendSmsResponse, SenderId, SentMessage,
    Sms,
};

// Infobip may send `null` for any field; those decode to the zero value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(super) struct StatusJson {
    group_id: Option<i32>,
    group_name: Option<String>,
    id: Option<i32>,
    name: Option<String>,
    description: Option<String>,
    action: Option<String>,
}

impl From<StatusJson> for MessageStatus {
    fn from(value: StatusJson) -> Self {
        MessageStatus {
            group_id: value.group_id.unwrap_or_default(),
            group_name: value.group_name.unwrap_or_default(),
            id: value.id.unwrap_or_default(),
            name: value.name.unwrap_or_default(),
            description: value.description.unwrap_or_default(),
            action: value.action,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SendSmsJsonResponse {
    bulk_id: Option<String>,
    messages: Option<Vec<SentMessageJson>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SentMessageJson {
    to: Option<String>,
    status: Option<StatusJson>,
    sms_count: Option<u32>,
    message_id: Option<String>,
}

pub fn encode_send_sms_body(sms: &Sms) -> Value {
    let to = sms
        .to()
        .iter()
        .map(|destination| Value::from(destination.raw()))
        .collect::<Vec<_>>();

    let mut body = Map::new();
    body.insert(SenderId::FIELD.to_owned(), sms.from().as_str().into());
    body.insert(Destination::FIELD.to_owned(), Value::Array(to));
    body.insert(MessageText::FIELD.to_owned(), sms.text().as_str().into());
    Value::Object(body)
}

pub fn decode_send_sms_json_response(json: &str) -> Result<SendSmsResponse, DecodeError> {
    let parsed: SendSmsJsonResponse = serde_json::from_str(json)?;

    let messages = parsed
        .messages
        .unwrap_or_default()
        .into_iter()
        .map(|message| SentMessage {
            to: message.to.unwrap_or_default(),
            status: message.status.unwrap_or_default().into(),
            sms_count: message.sms_count.unwrap_or_default(),
            message_id: MessageId::new(message.message_id.unwrap_or_default()),
        })
        .collect();

    Ok(SendSmsResponse {
        bulk_id: parsed.bulk_id.filter(|id| !id.is_empty()),
        messages,
    })
}
