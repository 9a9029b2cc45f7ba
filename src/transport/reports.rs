use serde::Deserialize;

use super::DecodeError;
use super::money::TransportDecimal;
use super::send_sms::StatusJson;
use crate::domain::{DeliveryError, DeliveryReport, DeliveryReportResponse, MessageId, Price};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct DeliveryReportJsonResponse {
    results: Option<Vec<DeliveryReportJson>>,
}

// Every field is nullable on the wire; `null` maps to the zero value so a report
// is never lost to a single missing value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct DeliveryReportJson {
    bulk_id: Option<String>,
    to: Option<String>,
    sent_at: Option<String>,
    done_at: Option<String>,
    status: Option<StatusJson>,
    sms_count: Option<u32>,
    message_id: Option<String>,
    mcc_mnc: Option<String>,
    price: Option<PriceJson>,
    error: Option<ErrorJson>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct PriceJson {
    price_per_message: Option<TransportDecimal>,
    currency: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ErrorJson {
    group_id: Option<i32>,
    group_name: Option<String>,
    id: Option<i32>,
    name: Option<String>,
    description: Option<String>,
    permanent: Option<bool>,
}

impl From<ErrorJson> for DeliveryError {
    fn from(value: ErrorJson) -> Self {
        DeliveryError {
            group_id: value.group_id.unwrap_or_default(),
            group_name: value.group_name.unwrap_or_default(),
            id: value.id.unwrap_or_default(),
            name: value.name.unwrap_or_default(),
            description: value.description.unwrap_or_default(),
            permanent: value.permanent.unwrap_or_default(),
        }
    }
}

pub fn decode_delivery_report_json_response(
    json: &str,
) -> Result<DeliveryReportResponse, DecodeError> {
    let parsed: DeliveryReportJsonResponse = serde_json::from_str(json)?;

    let results = parsed
        .results
        .unwrap_or_default()
        .into_iter()
        .map(|report| {
            let price = report.price.unwrap_or_default();
            DeliveryReport {
                bulk_id: report.bulk_id.filter(|id| !id.is_empty()),
                to: report.to.unwrap_or_default(),
                sent_at: report.sent_at.unwrap_or_default(),
                done_at: report.done_at.unwrap_or_default(),
                status: report.status.unwrap_or_default().into(),
                sms_count: report.sms_count.unwrap_or_default(),
                message_id: MessageId::new(report.message_id.unwrap_or_default()),
                mcc_mnc: report.mcc_mnc,
                price: Price {
                    price_per_message: price
                        .price_per_message
                        .map(TransportDecimal::into_decimal)
                        .unwrap_or_default(),
                    currency: price.currency.unwrap_or_default(),
                },
                error: report.error.unwrap_or_default().into(),
            }
        })
        .collect();

    Ok(DeliveryReportResponse { results })
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    const FIXTURE: &str = r#"
    {
      "results": [
        {
          "bulkId": "80664c0c-e1ca-414d-806a-5caf146463df",
          "messageId": "bcfb828b-7df9-4e7b-8715-f34f5c61271a",
          "to": "41793026731",
          "sentAt": "2015-02-23T17:41:11.833+0100",
          "doneAt": "2015-02-23T17:41:11.843+0100",
          "smsCount": 1,
          "mccMnc": "22801",
          "price": {
            "pricePerMessage": 1.23,
            "currency": "EUR"
          },
          "status": {
            "groupId": 3,
            "groupName": "DELIVERED",
            "id": 5,
            "name": "DELIVERED_TO_HANDSET",
            "description": "Message delivered to handset",
            "action": "none"
          },
          "error": {
            "groupId": 0,
            "groupName": "OK",
            "id": 0,
            "name": "NO_ERROR",
            "description": "No Error",
            "permanent": false
          }
        }
      ]
    }
    "#;

    #[test]
    fn decode_report_fixture() {
        let resp = decode_delivery_report_json_response(FIXTURE).unwrap();
        assert_eq!(resp.results.len(), 1);

        let report = &resp.results[0];
        assert_eq!(
            report.message_id.as_str(),
            "bcfb828b-7df9-4e7b-8715-f34f5c61271a"
        );
        assert_eq!(
            report.bulk_id.as_deref(),
            Some("80664c0c-e1ca-414d-806a-5caf146463df")
        );
        assert_eq!(report.to, "41793026731");
        assert_eq!(report.sent_at, "2015-02-23T17:41:11.833+0100");
        assert_eq!(report.done_at, "2015-02-23T17:41:11.843+0100");
        assert_eq!(report.sms_count, 1);
        assert_eq!(report.mcc_mnc.as_deref(), Some("22801"));
        assert_eq!(report.price.price_per_message, Decimal::new(123, 2));
        assert_eq!(report.price.price_per_message.to_string(), "1.23");
        assert_eq!(report.price.currency, "EUR");
        assert_eq!(report.status.group_name, "DELIVERED");
        assert_eq!(report.status.action.as_deref(), Some("none"));
        assert_eq!(report.error.name, "NO_ERROR");
        assert!(!report.error.is_error());
    }

    #[test]
    fn decode_string_price() {
        let json = r#"{"results": [{"messageId": "x", "price": {"pricePerMessage": "0.0125", "currency": "USD"}}]}"#;
        let resp = decode_delivery_report_json_response(json).unwrap();
        assert_eq!(
            resp.results[0].price.price_per_message,
            Decimal::new(125, 4)
        );
    }

    #[test]
    fn decode_empty_results_is_not_an_error() {
        let resp = decode_delivery_report_json_response(r#"{"results": []}"#).unwrap();
        assert!(resp.results.is_empty());

        let resp = decode_delivery_report_json_response("{}").unwrap();
        assert!(resp.results.is_empty());
    }

    #[test]
    fn decode_missing_price_and_error_default_to_zero() {
        let json = r#"{"results": [{"messageId": "x", "price": null}]}"#;
        let resp = decode_delivery_report_json_response(json).unwrap();
        let report = &resp.results[0];
        assert_eq!(report.price.price_per_message, Decimal::ZERO);
        assert!(!report.error.is_error());
        assert_eq!(report.bulk_id, None);
    }

    #[test]
    fn decode_null_fields_keep_the_report() {
        let json = r#"
        {
          "results": [
            {
              "bulkId": null,
              "messageId": "bcfb828b",
              "to": null,
              "sentAt": "2015-02-23T17:41:11.833+0100",
              "doneAt": null,
              "smsCount": null,
              "mccMnc": null,
              "price": {"pricePerMessage": null, "currency": null},
              "status": null,
              "error": {"groupId": null, "name": null, "permanent": null}
            }
          ]
        }
        "#;

        let resp = decode_delivery_report_json_response(json).unwrap();
        assert_eq!(resp.results.len(), 1);

        let report = &resp.results[0];
        assert_eq!(report.message_id.as_str(), "bcfb828b");
        assert_eq!(report.to, "");
        assert_eq!(report.sent_at, "2015-02-23T17:41:11.833+0100");
        assert_eq!(report.done_at, "");
        assert_eq!(report.sms_count, 0);
        assert_eq!(report.mcc_mnc, None);
        assert_eq!(report.status, crate::domain::MessageStatus::default());
        assert_eq!(report.price, Price::default());
        assert_eq!(report.error, DeliveryError::default());

        let resp = decode_delivery_report_json_response(r#"{"results": null}"#).unwrap();
        assert!(resp.results.is_empty());
    }

    #[test]
    fn decode_rejects_invalid_price() {
        let json = r#"{"results": [{"messageId": "x", "price": {"pricePerMessage": "cheap"}}]}"#;
        assert!(decode_delivery_report_json_response(json).is_err());
    }
}
