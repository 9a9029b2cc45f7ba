use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;
use serde::de::Error as DeError;

/// Price value returned by Infobip as either JSON number or JSON string.
///
/// The raw JSON token is parsed straight into a [`Decimal`], so `0.0125` never
/// passes through `f64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransportDecimal(Decimal);

impl TransportDecimal {
    pub fn into_decimal(self) -> Decimal {
        self.0
    }
}

impl<'de> Deserialize<'de> for TransportDecimal {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw: Box<serde_json::value::RawValue> = Deserialize::deserialize(deserializer)?;
        let token = raw.get();

        let text = match token.as_bytes().first().copied() {
            Some(b'"') => serde_json::from_str::<String>(token).map_err(D::Error::custom)?,
            Some(b'-' | b'0'..=b'9') => token.to_owned(),
            _ => {
                return Err(D::Error::custom(
                    "expected price field to be JSON string or number",
                ));
            }
        };

        parse_decimal(text.trim())
            .map(Self)
            .ok_or_else(|| D::Error::custom(format!("invalid decimal amount: {text}")))
    }
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    if text.contains(['e', 'E']) {
        Decimal::from_scientific(text).ok()
    } else {
        Decimal::from_str(text).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Wrapper {
        value: TransportDecimal,
    }

    fn decode(json: &str) -> Result<Decimal, serde_json::Error> {
        serde_json::from_str::<Wrapper>(json).map(|it| it.value.into_decimal())
    }

    #[test]
    fn number_token_keeps_exact_precision() {
        assert_eq!(decode(r#"{"value": 1.23}"#).unwrap(), Decimal::new(123, 2));
        assert_eq!(decode(r#"{"value": 0.1}"#).unwrap(), Decimal::new(1, 1));
        assert_eq!(
            decode(r#"{"value": 0.0125}"#).unwrap().to_string(),
            "0.0125"
        );
    }

    #[test]
    fn string_token_is_parsed() {
        assert_eq!(decode(r#"{"value": "1.23"}"#).unwrap(), Decimal::new(123, 2));
    }

    #[test]
    fn scientific_notation_is_accepted() {
        assert_eq!(decode(r#"{"value": 1.5e-2}"#).unwrap(), Decimal::new(15, 3));
    }

    #[test]
    fn non_numeric_values_are_rejected() {
        assert!(decode(r#"{"value": true}"#).is_err());
        assert!(decode(r#"{"value": "abc"}"#).is_err());
    }
}
