use crate::domain::validation::ValidationError;
use crate::domain::value::{Destination, MessageText, SenderId};

#[derive(Debug, Clone, PartialEq, Eq)]
/// A single text message sent to one or more destinations.
///
/// Invariant: at least one destination. Destinations keep their order on the wire.
pub struct Sms {
    from: SenderId,
    to: Vec<Destination>,
    text: MessageText,
}

impl Sms {
    pub fn new(
        from: impl Into<SenderId>,
        to: Vec<Destination>,
        text: impl Into<MessageText>,
    ) -> Result<Self, ValidationError> {
        if to.is_empty() {
            return Err(ValidationError::Empty {
                field: Destination::FIELD,
            });
        }
        Ok(Self {
            from: from.into(),
            to,
            text: text.into(),
        })
    }

    /// Message for exactly one destination.
    pub fn single(
        from: impl Into<SenderId>,
        to: Destination,
        text: impl Into<MessageText>,
    ) -> Self {
        Self {
            from: from.into(),
            to: vec![to],
            text: text.into(),
        }
    }

    pub fn from(&self) -> &SenderId {
        &self.from
    }

    pub fn to(&self) -> &[Destination] {
        &self.to
    }

    pub fn text(&self) -> &MessageText {
        &self.text
    }
}
