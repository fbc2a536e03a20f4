use std::collections::{BTreeMap, VecDeque};
use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use crate::error::{DhanError, ErrorPayload};

/// Identifying user agent applied to every outgoing request.
pub const USER_AGENT: &str = concat!("dhan-rs/", env!("CARGO_PKG_VERSION"));

pub const CONTENT_TYPE_FORM: &str = "application/x-www-form-urlencoded";
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Header names whose values are masked in debug traces.
const SENSITIVE_HEADERS: [&str; 2] = ["access-token", "partner_secret"];

/// Request headers keyed by lower-cased name.
pub type Headers = BTreeMap<String, String>;

/// Form or query parameters. Keys iterate in sorted order, which fixes the
/// encoded form.
pub type Params = BTreeMap<String, String>;

/// HTTP verbs used by the endpoint callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Whether parameters travel in the body (form encoded) rather than the
    /// query string.
    pub const fn mutates_state(self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }
}

impl Display for HttpMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTTP request envelope handed to an [`HttpClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Headers,
    pub body: Option<Vec<u8>>,
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Headers::new(),
            body: None,
            timeout: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    /// Replaces the whole header set.
    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = normalize_headers(headers);
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Body rendered as UTF-8 (lossy), mainly for assertions and traces.
    pub fn body_text(&self) -> String {
        self.body
            .as_deref()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
            .unwrap_or_default()
    }
}

/// HTTP response as received from the wire. Never modified after receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Headers,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Headers::new(),
            body: body.into(),
        }
    }

    pub fn ok_json(body: impl Into<Vec<u8>>) -> Self {
        Self::new(200, body).with_header("content-type", CONTENT_TYPE_JSON)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Structured error body, if this is a failed response carrying one.
    pub fn error_payload(&self) -> Option<ErrorPayload> {
        if self.is_success() {
            return None;
        }
        serde_json::from_slice(&self.body).ok()
    }
}

/// Classification of transport failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    InvalidUrl,
    Connect,
    Timeout,
    Request,
    Body,
}

/// Transport-level failure: the round trip could not be completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    kind: TransportErrorKind,
    message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn invalid_url(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::InvalidUrl, message)
    }

    pub fn request(message: impl Into<String>) -> Self {
        Self::new(TransportErrorKind::Request, message)
    }

    pub const fn kind(&self) -> TransportErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Callers decide on retries; this only says whether one could help.
    pub const fn retryable(&self) -> bool {
        !matches!(self.kind, TransportErrorKind::InvalidUrl)
    }
}

impl Display for TransportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for TransportError {}

/// Transport contract: perform one HTTP round trip.
pub trait HttpClient: Send + Sync {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, TransportError>> + Send + 'a>>;
}

/// Production HTTP client using reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Arc<reqwest::Client>,
}

impl ReqwestHttpClient {
    /// Create a new ReqwestHttpClient with default configuration.
    pub fn new() -> Self {
        Self {
            client: Arc::new(
                reqwest::Client::builder()
                    .user_agent(USER_AGENT)
                    .build()
                    .unwrap_or_else(|_| reqwest::Client::new()),
            ),
        }
    }

    /// Create a ReqwestHttpClient with a custom reqwest::Client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for ReqwestHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, TransportError>> + Send + 'a>> {
        Box::pin(async move {
            let method = match request.method {
                HttpMethod::Get => reqwest::Method::GET,
                HttpMethod::Post => reqwest::Method::POST,
                HttpMethod::Put => reqwest::Method::PUT,
                HttpMethod::Patch => reqwest::Method::PATCH,
                HttpMethod::Delete => reqwest::Method::DELETE,
            };
            let mut builder = self.client.request(method, &request.url);

            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }

            if let Some(timeout) = request.timeout {
                builder = builder.timeout(timeout);
            }

            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder.send().await.map_err(|e| {
                if e.is_timeout() {
                    TransportError::new(TransportErrorKind::Timeout, format!("request timeout: {e}"))
                } else if e.is_connect() {
                    TransportError::new(
                        TransportErrorKind::Connect,
                        format!("connection failed: {e}"),
                    )
                } else if e.is_builder() {
                    TransportError::invalid_url(format!("invalid request: {e}"))
                } else {
                    TransportError::request(format!("request failed: {e}"))
                }
            })?;

            let status = response.status().as_u16();
            let mut headers = Headers::new();
            for (name, value) in response.headers() {
                if let Ok(value) = value.to_str() {
                    headers
                        .entry(name.as_str().to_owned())
                        .and_modify(|existing: &mut String| {
                            existing.push_str(", ");
                            existing.push_str(value);
                        })
                        .or_insert_with(|| value.to_owned());
                }
            }
            let body = response.bytes().await.map_err(|e| {
                TransportError::new(
                    TransportErrorKind::Body,
                    format!("failed to read response body: {e}"),
                )
            })?;

            Ok(HttpResponse {
                status,
                headers,
                body: body.to_vec(),
            })
        })
    }
}

/// Fake transport that records requests and replays scripted outcomes in
/// order. Fails with a transport error once the script runs dry.
#[derive(Debug, Default)]
pub struct ScriptedHttpClient {
    script: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedHttpClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, response: HttpResponse) -> Self {
        self.push(Ok(response));
        self
    }

    pub fn with_json(self, status: u16, body: &str) -> Self {
        self.with_response(
            HttpResponse::new(status, body.as_bytes()).with_header("content-type", CONTENT_TYPE_JSON),
        )
    }

    pub fn with_error(self, error: TransportError) -> Self {
        self.push(Err(error));
        self
    }

    pub fn recorded_requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.recorded_requests().pop()
    }

    fn push(&self, outcome: Result<HttpResponse, TransportError>) {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(outcome);
        }
    }
}

impl HttpClient for ScriptedHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, TransportError>> + Send + 'a>> {
        let url = request.url.clone();
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }
        let outcome = self
            .script
            .lock()
            .ok()
            .and_then(|mut script| script.pop_front())
            .unwrap_or_else(|| {
                Err(TransportError::request(format!(
                    "no scripted response left for {url}"
                )))
            });
        Box::pin(async move { outcome })
    }
}

/// Composes requests in the three shapes the API uses and hands them to an
/// [`HttpClient`].
#[derive(Clone)]
pub struct Transport {
    client: Arc<dyn HttpClient>,
    debug: bool,
    timeout: Option<Duration>,
}

impl Transport {
    pub fn new(client: Arc<dyn HttpClient>, debug: bool) -> Self {
        Self {
            client,
            debug,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub const fn debug(&self) -> bool {
        self.debug
    }

    /// Sends `params` as a form body for POST/PUT/PATCH and as the query
    /// string for every other method.
    pub async fn send_encoded(
        &self,
        method: HttpMethod,
        url: &str,
        headers: Headers,
        params: &Params,
    ) -> Result<HttpResponse, TransportError> {
        let mut headers = normalize_headers(headers);
        if method.mutates_state() {
            let body = encode_form(params).into_bytes();
            headers
                .entry(String::from("content-type"))
                .or_insert_with(|| String::from(CONTENT_TYPE_FORM));
            self.send_raw(method, url, body, headers).await
        } else {
            let url = with_query(url, params)?;
            self.send_raw(method, &url, Vec::new(), headers).await
        }
    }

    /// Performs the round trip. A non-2xx status is returned, not raised.
    pub async fn send_raw(
        &self,
        method: HttpMethod,
        url: &str,
        body: Vec<u8>,
        headers: Headers,
    ) -> Result<HttpResponse, TransportError> {
        Url::parse(url).map_err(|e| TransportError::invalid_url(format!("invalid url '{url}': {e}")))?;

        let mut request = HttpRequest::new(method, url)
            .with_headers(headers)
            .with_timeout(self.timeout);
        if !body.is_empty() {
            request = request.with_body(body);
        }
        // Set last so callers cannot override it.
        request = request.with_header("user-agent", USER_AGENT);

        if self.debug {
            debug!(
                method = %request.method,
                url = %request.url,
                headers = ?masked_headers(&request.headers),
                body = %request.body_text(),
                "sending request"
            );
        }

        let response = self.client.execute(request).await?;

        if self.debug {
            debug!(
                status = response.status,
                body = %response.text(),
                "received response"
            );
        }

        if !response.is_success() {
            warn!(status = response.status, %method, url, "error response status");
            match serde_json::from_slice::<ErrorPayload>(&response.body) {
                Ok(payload) => {
                    if self.debug {
                        debug!(
                            error_type = %payload.kind,
                            error_code = %payload.code,
                            error_message = %payload.message,
                            "error response"
                        );
                    }
                }
                Err(error) => warn!(%error, "error response body is not a structured error"),
            }
        }

        Ok(response)
    }

    /// Serializes `payload` as the JSON body and appends `query` to the URL.
    pub async fn send_json<T: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        url: &str,
        query: &Params,
        payload: &T,
        headers: Headers,
    ) -> Result<HttpResponse, DhanError> {
        let body = serde_json::to_vec(payload)?;
        let mut headers = normalize_headers(headers);
        headers.insert(String::from("content-type"), String::from(CONTENT_TYPE_JSON));
        let url = with_query(url, query)?;
        Ok(self.send_raw(method, &url, body, headers).await?)
    }
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("debug", &self.debug)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Standard `application/x-www-form-urlencoded` encoding, keys sorted.
pub fn encode_form(params: &Params) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter())
        .finish()
}

/// Replaces the query string of `url` with `params`; leaves it untouched when
/// `params` is empty.
pub fn with_query(url: &str, params: &Params) -> Result<String, TransportError> {
    if params.is_empty() {
        return Ok(url.to_owned());
    }
    let mut parsed =
        Url::parse(url).map_err(|e| TransportError::invalid_url(format!("invalid url '{url}': {e}")))?;
    parsed.set_query(Some(&encode_form(params)));
    Ok(parsed.into())
}

fn normalize_headers(headers: Headers) -> Headers {
    headers
        .into_iter()
        .map(|(name, value)| (name.to_ascii_lowercase(), value))
        .collect()
}

fn masked_headers(headers: &Headers) -> Headers {
    headers
        .iter()
        .map(|(name, value)| {
            if SENSITIVE_HEADERS.contains(&name.as_str()) {
                (name.clone(), String::from("***"))
            } else {
                (name.clone(), value.clone())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Params {
        pairs
            .iter()
            .map(|(k, v)| (String::from(*k), String::from(*v)))
            .collect()
    }

    fn transport(client: &Arc<ScriptedHttpClient>) -> Transport {
        Transport::new(client.clone(), true)
    }

    #[tokio::test]
    async fn post_params_become_form_body_with_default_content_type() {
        let client = Arc::new(ScriptedHttpClient::new().with_json(200, "{}"));
        let params = params(&[("tokenId", "abc 123"), ("alpha", "x&y")]);

        transport(&client)
            .send_encoded(HttpMethod::Post, "https://auth.example.test/consume", Headers::new(), &params)
            .await
            .expect("round trip should succeed");

        let request = client.last_request().expect("request recorded");
        assert_eq!(request.body_text(), "alpha=x%26y&tokenId=abc+123");
        assert_eq!(request.header("content-type"), Some(CONTENT_TYPE_FORM));
        assert_eq!(request.url, "https://auth.example.test/consume");
    }

    #[tokio::test]
    async fn explicit_content_type_is_preserved_for_form_requests() {
        let client = Arc::new(ScriptedHttpClient::new().with_json(200, "{}"));
        let mut headers = Headers::new();
        headers.insert(String::from("Content-Type"), String::from("text/plain"));

        transport(&client)
            .send_encoded(HttpMethod::Put, "https://api.example.test/x", headers, &params(&[("a", "1")]))
            .await
            .expect("round trip should succeed");

        let request = client.last_request().expect("request recorded");
        assert_eq!(request.header("content-type"), Some("text/plain"));
        assert_eq!(request.body_text(), "a=1");
    }

    #[tokio::test]
    async fn get_params_go_to_query_string() {
        let client = Arc::new(ScriptedHttpClient::new().with_json(200, "{}"));

        transport(&client)
            .send_encoded(
                HttpMethod::Get,
                "https://api.example.test/v2/positions?stale=1",
                Headers::new(),
                &params(&[("b", "2"), ("a", "1")]),
            )
            .await
            .expect("round trip should succeed");

        let request = client.last_request().expect("request recorded");
        assert_eq!(request.url, "https://api.example.test/v2/positions?a=1&b=2");
        assert!(request.body.is_none());
        assert_eq!(request.header("content-type"), None);
    }

    #[tokio::test]
    async fn user_agent_overrides_caller_value() {
        let client = Arc::new(ScriptedHttpClient::new().with_json(200, "{}"));
        let mut headers = Headers::new();
        headers.insert(String::from("User-Agent"), String::from("spoofed"));
        headers.insert(String::from("access-token"), String::from("secret"));

        transport(&client)
            .send_raw(HttpMethod::Get, "https://api.example.test/v2/profile", Vec::new(), headers)
            .await
            .expect("round trip should succeed");

        let request = client.last_request().expect("request recorded");
        assert_eq!(request.header("user-agent"), Some(USER_AGENT));
        assert_eq!(request.header("access-token"), Some("secret"));
    }

    #[tokio::test]
    async fn non_success_status_is_not_a_transport_error() {
        let client = Arc::new(ScriptedHttpClient::new().with_json(502, "<html>bad gateway</html>"));

        let response = transport(&client)
            .send_raw(HttpMethod::Get, "https://api.example.test/v2/holdings", Vec::new(), Headers::new())
            .await
            .expect("status codes are left to the caller");

        assert_eq!(response.status, 502);
        assert_eq!(response.error_payload(), None);
    }

    #[tokio::test]
    async fn invalid_url_fails_before_reaching_the_client() {
        let client = Arc::new(ScriptedHttpClient::new());

        let error = transport(&client)
            .send_raw(HttpMethod::Get, "not a url", Vec::new(), Headers::new())
            .await
            .expect_err("malformed url must fail");

        assert_eq!(error.kind(), TransportErrorKind::InvalidUrl);
        assert!(!error.retryable());
        assert!(client.recorded_requests().is_empty());
    }

    #[tokio::test]
    async fn json_payload_forces_json_content_type() {
        let client = Arc::new(ScriptedHttpClient::new().with_json(200, "{}"));
        let mut headers = Headers::new();
        headers.insert(String::from("content-type"), String::from("text/plain"));
        let payload = serde_json::json!({ "NSE_EQ": [11536] });

        transport(&client)
            .send_json(
                HttpMethod::Post,
                "https://api.example.test/v2/marketfeed/ltp",
                &params(&[("page", "1")]),
                &payload,
                headers,
            )
            .await
            .expect("round trip should succeed");

        let request = client.last_request().expect("request recorded");
        assert_eq!(request.header("content-type"), Some(CONTENT_TYPE_JSON));
        assert_eq!(request.body_text(), r#"{"NSE_EQ":[11536]}"#);
        assert_eq!(request.url, "https://api.example.test/v2/marketfeed/ltp?page=1");
    }

    #[tokio::test]
    async fn exhausted_script_surfaces_transport_error() {
        let client = Arc::new(ScriptedHttpClient::new());

        let error = transport(&client)
            .send_raw(HttpMethod::Get, "https://api.example.test/v2/fundlimit", Vec::new(), Headers::new())
            .await
            .expect_err("no scripted response");

        assert!(error.message().contains("no scripted response"));
        assert_eq!(client.recorded_requests().len(), 1);
    }

    #[test]
    fn masked_headers_hide_credentials() {
        let mut headers = Headers::new();
        headers.insert(String::from("access-token"), String::from("token"));
        headers.insert(String::from("client-id"), String::from("100"));

        let masked = masked_headers(&headers);
        assert_eq!(masked.get("access-token").map(String::as_str), Some("***"));
        assert_eq!(masked.get("client-id").map(String::as_str), Some("100"));
    }
}
