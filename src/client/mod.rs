//! Client layer: session handling, request gateway, and transport ↔ domain mapping.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use reqwest::Method;
use serde_json::Value;
use url::Url;

use crate::domain::{
    DeliveryReportResponse, MessageId, Password, SendSmsResponse, Sms, Token, Username,
    ValidationError,
};
use crate::transport::DecodeError;

const DEFAULT_BASE_URL: &str = "https://api.infobip.com";
const DEFAULT_USER_AGENT: &str = concat!("infobip-rs/", env!("CARGO_PKG_VERSION"));

const SESSION_ENDPOINT: &str = "/auth/1/session";
const SEND_SMS_ENDPOINT: &str = "/sms/1/text/single";
const REPORTS_ENDPOINT: &str = "/sms/1/reports";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpRequest {
    method: Method,
    url: Url,
    headers: Vec<(&'static str, String)>,
    body: Option<String>,
}

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> BoxFuture<'_, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> BoxFuture<'_, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let mut builder = self.client.request(request.method, request.url);
            for (name, value) in request.headers {
                builder = builder.header(name, value);
            }
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder.send().await?;
            let status = response.status().as_u16();
            // Reading the body to the end hands the connection back to the pool.
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

/// Bearer token holder shared by every clone of a client.
#[derive(Debug, Default)]
struct Session {
    token: RwLock<Option<Token>>,
}

impl Session {
    fn current(&self) -> Option<Token> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn replace(&self, token: Token) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    /// Add `Authorization: IBSSO <token>` when a token is held. Returns whether it did.
    fn set_auth(&self, headers: &mut Vec<(&'static str, String)>) -> bool {
        match self.current() {
            Some(token) => {
                headers.push(("Authorization", token.header_value()));
                true
            }
            None => false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`InfobipClient`].
///
/// Results and errors are exclusive: a failed call never hands back a partial response.
pub enum InfobipError {
    /// A caller-supplied value was rejected before any request was made.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-successful HTTP status code returned by the server.
    #[error("unexpected HTTP status: {status_text}")]
    HttpStatus {
        status: u16,
        /// Status line, e.g. `401 Unauthorized`.
        status_text: String,
        body: Option<String>,
    },

    /// Response body did not match the expected shape.
    #[error("decode error: {0}")]
    Decode(#[source] Box<dyn StdError + Send + Sync>),

    /// Infobip accepted the send request but reported no dispatched messages.
    #[error("no messages were sent: {response:?}")]
    Send { response: SendSmsResponse },
}

impl From<DecodeError> for InfobipError {
    fn from(value: DecodeError) -> Self {
        Self::Decode(Box::new(value))
    }
}

#[derive(Debug, Clone)]
/// Builder for [`InfobipClient`].
///
/// Every setter overwrites the previous value for the same field.
pub struct InfobipClientBuilder {
    base_url: String,
    timeout: Option<Duration>,
    user_agent: String,
}

impl Default for InfobipClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl InfobipClientBuilder {
    /// Create a builder targeting `https://api.infobip.com` with no timeout.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }

    /// Override the API base URL (for example a personal Infobip subdomain or a mock server).
    ///
    /// Endpoint paths are appended to it, so a path prefix is kept.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the `User-Agent` header sent with every request.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build an unauthenticated [`InfobipClient`].
    pub fn build(self) -> Result<InfobipClient, InfobipError> {
        let base_url = parse_base_url(&self.base_url)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| InfobipError::Transport(Box::new(err)))?;

        Ok(InfobipClient {
            base_url,
            user_agent: self.user_agent,
            session: Arc::new(Session::default()),
            http: Arc::new(ReqwestTransport { client }),
        })
    }

    /// Build a client and authenticate it right away.
    ///
    /// Empty credentials are rejected before the client is built, so no request is made.
    pub async fn login(
        self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<InfobipClient, InfobipError> {
        let username = Username::new(username)?;
        let password = Password::new(password)?;
        let client = self.build()?;
        client.authenticate_with(&username, &password).await?;
        Ok(client)
    }
}

fn parse_base_url(input: &str) -> Result<String, ValidationError> {
    let trimmed = input.trim().trim_end_matches('/');
    let invalid = || ValidationError::InvalidBaseUrl {
        input: input.to_owned(),
    };

    let url = Url::parse(trimmed).map_err(|_| invalid())?;
    if url.cannot_be_a_base()
        || !matches!(url.scheme(), "http" | "https")
        || url.query().is_some()
        || url.fragment().is_some()
    {
        return Err(invalid());
    }
    Ok(trimmed.to_owned())
}

#[derive(Clone)]
/// High-level Infobip SMS client.
///
/// Authenticate once with [`InfobipClient::authenticate`] (or construct through
/// [`InfobipClient::login`]); the issued token is then attached to every request as
/// `Authorization: IBSSO <token>` until a later authentication replaces it.
///
/// Clones share the same session. Concurrent calls are safe: the token is read as a
/// snapshot per request and only replaced after a fully successful authentication.
pub struct InfobipClient {
    base_url: String,
    user_agent: String,
    session: Arc<Session>,
    http: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for InfobipClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InfobipClient")
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}

impl Default for InfobipClient {
    fn default() -> Self {
        Self::new()
    }
}

impl InfobipClient {
    /// Create an unauthenticated client using the default base URL.
    ///
    /// For more customization, use [`InfobipClient::builder`].
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            session: Arc::new(Session::default()),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder() -> InfobipClientBuilder {
        InfobipClientBuilder::new()
    }

    /// Create a client with default settings and authenticate it.
    ///
    /// Fails with [`InfobipError::Validation`] without touching the network when either
    /// credential is empty.
    pub async fn login(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, InfobipError> {
        InfobipClientBuilder::new().login(username, password).await
    }

    /// Base URL all endpoints are resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether a session token is currently held.
    pub fn is_authenticated(&self) -> bool {
        self.session.current().is_some()
    }

    /// Open a session (`POST /auth/1/session`) and keep the returned token.
    ///
    /// On any failure the previously held token, if any, stays in place.
    pub async fn authenticate(
        &self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<(), InfobipError> {
        let username = Username::new(username)?;
        let password = Password::new(password)?;
        self.authenticate_with(&username, &password).await
    }

    async fn authenticate_with(
        &self,
        username: &Username,
        password: &Password,
    ) -> Result<(), InfobipError> {
        let url = self.endpoint(SESSION_ENDPOINT)?;
        let body = crate::transport::encode_session_body(username, password);
        let token = self
            .do_request(Method::POST, url, Some(body), |json| {
                crate::transport::decode_session_json_response(json)
            })
            .await?;

        self.session.replace(token);
        tracing::info!(username = username.as_str(), "authenticated Infobip session");
        Ok(())
    }

    /// Send one text message to every destination in `sms` (`POST /sms/1/text/single`).
    ///
    /// Errors:
    /// - [`InfobipError::HttpStatus`] for non-2xx HTTP responses,
    /// - [`InfobipError::Decode`] when the body is not a send response,
    /// - [`InfobipError::Send`] when the response lists no messages.
    pub async fn send_sms(&self, sms: &Sms) -> Result<SendSmsResponse, InfobipError> {
        let url = self.endpoint(SEND_SMS_ENDPOINT)?;
        let body = crate::transport::encode_send_sms_body(sms);
        let response = self
            .do_request(Method::POST, url, Some(body), |json| {
                crate::transport::decode_send_sms_json_response(json)
            })
            .await?;

        if response.messages.is_empty() {
            tracing::warn!(
                bulk_id = ?response.bulk_id,
                "Infobip accepted the send request but reported no messages"
            );
            return Err(InfobipError::Send { response });
        }

        Ok(response)
    }

    /// Fetch delivery reports for a sent message (`GET /sms/1/reports?messageId=<id>`).
    ///
    /// The id is not validated locally, and an empty `results` list is returned as-is.
    /// Infobip hands out each report only once.
    pub async fn delivery_report(
        &self,
        message_id: &MessageId,
    ) -> Result<DeliveryReportResponse, InfobipError> {
        let mut url = self.endpoint(REPORTS_ENDPOINT)?;
        url.query_pairs_mut()
            .append_pair(MessageId::FIELD, message_id.as_str());

        self.do_request(Method::GET, url, None, |json| {
            crate::transport::decode_delivery_report_json_response(json)
        })
        .await
    }

    fn endpoint(&self, path: &str) -> Result<Url, InfobipError> {
        let joined = format!("{}{}", self.base_url, path);
        Url::parse(&joined).map_err(|_| {
            InfobipError::Validation(ValidationError::InvalidBaseUrl {
                input: self.base_url.clone(),
            })
        })
    }

    async fn do_request<T>(
        &self,
        method: Method,
        url: Url,
        body: Option<Value>,
        decode: impl FnOnce(&str) -> Result<T, DecodeError>,
    ) -> Result<T, InfobipError> {
        let mut headers = Vec::with_capacity(4);
        let authorized = self.session.set_auth(&mut headers);
        headers.push(("Content-Type", "application/json".to_owned()));
        headers.push(("Cache-Control", "no-cache".to_owned()));
        headers.push(("User-Agent", self.user_agent.clone()));

        tracing::debug!(%method, %url, authorized, "sending Infobip API request");

        let response = self
            .http
            .execute(HttpRequest {
                method,
                url,
                headers,
                body: body.map(|value| value.to_string()),
            })
            .await
            .map_err(InfobipError::Transport)?;

        tracing::debug!(status = response.status, "received Infobip API response");

        if !(200..=299).contains(&response.status) {
            tracing::warn!(
                status = response.status,
                "Infobip API returned a non-success status"
            );
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(InfobipError::HttpStatus {
                status: response.status,
                status_text: status_line(response.status),
                body,
            });
        }

        Ok(decode(&response.body)?)
    }
}

fn status_line(status: u16) -> String {
    match reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
    {
        Some(reason) => format!("{status} {reason}"),
        None => status.to_string(),
    }
}
