use std::error::Error as StdError;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::redirect::Policy;
use reqwest::Client as HttpClient;
use serde_json::Value;
use thiserror::Error;
use url::Url;

/// Connect plus read budget for one backend call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_millis(12_000);

/// The single POST the relay makes per invocation.
#[derive(Debug, Clone, Copy)]
pub struct OutboundRequest<'a> {
    pub url: &'a Url,
    pub token: &'a str,
    pub body: &'a Value,
}

/// Status and fully buffered body of a backend reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendReply {
    pub status: u16,
    pub body: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<reqwest::Error> for TransportError {
    /// Keeps the innermost cause ("connection refused", "operation timed out")
    /// rather than reqwest's "error sending request for url (..)" wrapper.
    fn from(err: reqwest::Error) -> Self {
        let mut cause: &(dyn StdError + 'static) = &err;
        while let Some(source) = cause.source() {
            cause = source;
        }
        Self::new(cause.to_string())
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: OutboundRequest<'_>) -> Result<BackendReply, TransportError>;
}

/// How the reqwest client is built for one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientOptions {
    /// Cleared by `NOT_VERIFY_SSL=true`.
    pub verify_ssl: bool,
    /// Refuse anything but `https://` URLs.
    pub https_only: bool,
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            verify_ssl: true,
            https_only: true,
            timeout: REQUEST_TIMEOUT,
        }
    }
}

pub struct ApiClient {
    http: HttpClient,
}

impl ApiClient {
    pub fn new(options: ClientOptions) -> Result<Self, reqwest::Error> {
        let http = HttpClient::builder()
            .timeout(options.timeout)
            .danger_accept_invalid_certs(!options.verify_ssl)
            .https_only(options.https_only)
            .redirect(Policy::none())
            .build()?;
        Ok(Self { http })
    }

    fn with_auth(req: reqwest::RequestBuilder, token: &str) -> reqwest::RequestBuilder {
        req.header(AUTHORIZATION, format!("Bearer {}", token))
            .header(CONTENT_TYPE, "application/json")
    }
}

#[async_trait]
impl Transport for ApiClient {
    async fn send(&self, request: OutboundRequest<'_>) -> Result<BackendReply, TransportError> {
        let req = Self::with_auth(self.http.post(request.url.clone()), request.token);
        let resp = req.json(request.body).send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        Ok(BackendReply { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_default_options() {
        let options = ClientOptions::default();
        assert!(options.verify_ssl);
        assert!(options.https_only);
        assert_eq!(options.timeout, Duration::from_millis(12_000));
    }

    #[test]
    fn test_client_builds_with_and_without_verification() {
        assert!(ApiClient::new(ClientOptions::default()).is_ok());
        let insecure = ClientOptions { verify_ssl: false, ..ClientOptions::default() };
        assert!(ApiClient::new(insecure).is_ok());
    }

    #[tokio::test]
    async fn test_plain_http_is_refused_before_sending() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(0)
            .mount(&server)
            .await;

        let client = ApiClient::new(ClientOptions::default()).unwrap();
        let url = Url::parse(&format!("{}/api/alexa/smart_home", server.uri())).unwrap();
        let body = serde_json::json!({});
        let request = OutboundRequest { url: &url, token: "secret-token", body: &body };
        assert!(client.send(request).await.is_err());

        server.verify().await;
    }

    #[tokio::test]
    async fn test_plain_http_allowed_when_not_https_only() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(ClientOptions { https_only: false, ..ClientOptions::default() }).unwrap();
        let url = Url::parse(&format!("{}/api/alexa/smart_home", server.uri())).unwrap();
        let body = serde_json::json!({});
        let request = OutboundRequest { url: &url, token: "secret-token", body: &body };
        let reply = client.send(request).await.unwrap();
        assert_eq!(reply.status, 204);
    }

    #[test]
    fn test_transport_error_message() {
        let err = TransportError::new("ECONNRESET");
        assert_eq!(err.message(), "ECONNRESET");
        assert_eq!(err.to_string(), "ECONNRESET");
    }
}
