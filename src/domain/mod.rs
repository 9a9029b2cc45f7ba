//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::Sms;
pub use response::{
    DeliveryError, DeliveryReport, DeliveryReportResponse, MessageStatus, Price, SendSmsResponse,
    SentMessage,
};
pub use validation::ValidationError;
pub use value::{
    Destination, MessageId, MessageText, Password, PhoneNumber, SenderId, Token, Username,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sms_requires_at_least_one_destination() {
        let err = Sms::new("InfoSMS", Vec::new(), "hello").unwrap_err();
        assert!(matches!(
            err,
            ValidationError::Empty {
                field: Destination::FIELD
            }
        ));
    }

    #[test]
    fn sms_keeps_destination_order() {
        let to = vec![
            Destination::new("41793026727").unwrap(),
            Destination::new("41793026731").unwrap(),
        ];
        let sms = Sms::new("InfoSMS", to, "hello").unwrap();
        let raw = sms.to().iter().map(Destination::raw).collect::<Vec<_>>();
        assert_eq!(raw, vec!["41793026727", "41793026731"]);
        assert_eq!(sms.from().as_str(), "InfoSMS");
        assert_eq!(sms.text().as_str(), "hello");
    }

    #[test]
    fn sms_does_not_enforce_sender_convention() {
        let sms = Sms::single(
            "from somebody",
            Destination::new("12125551234").unwrap(),
            "some message",
        );
        assert!(!sms.from().is_conventional());
        assert_eq!(sms.to().len(), 1);
    }

    #[test]
    fn no_error_record_is_not_an_error() {
        assert!(!DeliveryError::default().is_error());

        let rejected = DeliveryError {
            group_id: 2,
            group_name: "HANDSET_ERRORS".to_owned(),
            id: 27,
            name: "EC_ABSENT_SUBSCRIBER".to_owned(),
            description: "Absent Subscriber".to_owned(),
            permanent: false,
        };
        assert!(rejected.is_error());
    }
}
