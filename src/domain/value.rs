use std::fmt;

use crate::domain::validation::ValidationError;

use phonenumber::country;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Infobip account username.
///
/// Invariant: must not be empty. The value is sent exactly as given.
pub struct Username(String);

impl Username {
    /// JSON field name used by the session endpoint (`username`).
    pub const FIELD: &'static str = "username";

    /// Create a validated [`Username`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the validated username.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Infobip account password.
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
pub struct Password(String);

impl Password {
    /// JSON field name used by the session endpoint (`password`).
    pub const FIELD: &'static str = "password";

    /// Create a validated [`Password`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the password as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Bearer token issued by the session endpoint.
///
/// Invariant: non-empty. The value is never printed by `Debug`.
pub struct Token(String);

impl Token {
    /// Authorization scheme Infobip expects in front of the token.
    pub const SCHEME: &'static str = "IBSSO";

    /// Create a validated [`Token`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: "token" });
        }
        Ok(Self(value))
    }

    /// Borrow the raw token.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header (`IBSSO <token>`).
    pub fn header_value(&self) -> String {
        format!("{} {}", Self::SCHEME, self.0)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Sender identifier (`from`).
///
/// Infobip expects an alphanumeric sender of 3 to 11 characters, but the value is
/// passed through as-is; use [`SenderId::is_conventional`] to check it up front.
pub struct SenderId(String);

impl SenderId {
    /// JSON field name used by the send endpoint (`from`).
    pub const FIELD: &'static str = "from";

    pub const MIN_LEN: usize = 3;
    pub const MAX_LEN: usize = 11;

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `true` when the sender is 3..=11 ASCII alphanumeric characters.
    pub fn is_conventional(&self) -> bool {
        let len = self.0.chars().count();
        (Self::MIN_LEN..=Self::MAX_LEN).contains(&len)
            && self.0.chars().all(|c| c.is_ascii_alphanumeric())
    }
}

impl From<&str> for SenderId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SenderId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message body (`text`), sent verbatim.
pub struct MessageText(String);

impl MessageText {
    /// JSON field name used by the send endpoint (`text`).
    pub const FIELD: &'static str = "text";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MessageText {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for MessageText {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Message id returned per destination by the send endpoint.
///
/// This is the correlation key for delivery report lookups. No local validation
/// is performed; an empty id is forwarded to the API unchanged.
pub struct MessageId(String);

impl MessageId {
    /// Query parameter name used by the reports endpoint (`messageId`).
    pub const FIELD: &'static str = "messageId";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MessageId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for MessageId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Destination address in international format (`to`).
///
/// Invariant: must not be empty. The value is sent verbatim; no phone-number
/// normalization is applied;
/// parse into [`PhoneNumber`] and convert it when normalization is wanted.
pub struct Destination(String);

impl Destination {
    /// JSON field name used by the send endpoint (`to`).
    pub const FIELD: &'static str = "to";

    /// Create a validated (non-empty) destination.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Raw value as sent to Infobip.
    pub fn raw(&self) -> &str {
        &self.0
    }
}

impl From<PhoneNumber> for Destination {
    /// Use the international digits (E.164 without the leading `+`).
    fn from(value: PhoneNumber) -> Self {
        Self(value.international_digits().to_owned())
    }
}

#[derive(Debug, Clone)]
/// Parsed phone number with an E.164 representation.
///
/// Equality and hashing are based on the E.164 form.
pub struct PhoneNumber {
    raw: String,
    e164: String,
    parsed: phonenumber::PhoneNumber,
}

impl PhoneNumber {
    /// Parse and normalize a phone number into E.164.
    ///
    /// `default_region` is used when the input does not contain an explicit country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::Empty {
                field: Destination::FIELD,
            });
        }

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self { raw, e164, parsed })
    }

    /// Raw input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized E.164 representation (`+41793026727`).
    pub fn e164(&self) -> &str {
        &self.e164
    }

    /// E.164 digits without the `+` prefix (`41793026727`).
    pub fn international_digits(&self) -> &str {
        self.e164.trim_start_matches('+')
    }

    /// The parsed phone number from the `phonenumber` crate.
    pub fn parsed(&self) -> &phonenumber::PhoneNumber {
        &self.parsed
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.e164.hash(state);
    }
}
