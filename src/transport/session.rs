use serde::Deserialize;
use serde_json::{Map, Value};

use super::DecodeError;
use crate::domain::{Password, Token, Username};

#[derive(Debug, Clone, Deserialize)]
struct SessionJsonResponse {
    #[serde(alias = "Token")]
    token: String,
}

pub fn encode_session_body(username: &Username, password: &Password) -> Value {
    let mut body = Map::new();
    body.insert(Username::FIELD.to_owned(), username.as_str().into());
    body.insert(Password::FIELD.to_owned(), password.as_str().into());
    Value::Object(body)
}

pub fn decode_session_json_response(json: &str) -> Result<Token, DecodeError> {
    let parsed: SessionJsonResponse = serde_json::from_str(json)?;
    Token::new(parsed.token).map_err(|_| DecodeError::MissingToken)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn encode_session_body_uses_username_and_password_fields() {
        let body = encode_session_body(
            &Username::new("user").unwrap(),
            &Password::new("pass").unwrap(),
        );
        assert_eq!(body, json!({"username": "user", "password": "pass"}));
    }

    #[test]
    fn encode_session_body_sends_username_verbatim() {
        let body = encode_session_body(
            &Username::new(" alice ").unwrap(),
            &Password::new("pw").unwrap(),
        );
        assert_eq!(body, json!({"username": " alice ", "password": "pw"}));
    }

    #[test]
    fn decode_session_response_reads_token() {
        let token = decode_session_json_response(r#"{"token": "2f9b4d31"}"#).unwrap();
        assert_eq!(token.as_str(), "2f9b4d31");

        let token = decode_session_json_response(r#"{"Token": "2f9b4d31"}"#).unwrap();
        assert_eq!(token.as_str(), "2f9b4d31");
    }

    #[test]
    fn decode_session_response_rejects_missing_or_blank_token() {
        assert!(matches!(
            decode_session_json_response("{}"),
            Err(DecodeError::Json(_))
        ));
        assert!(matches!(
            decode_session_json_response(r#"{"token": ""}"#),
            Err(DecodeError::MissingToken)
        ));
    }
}
