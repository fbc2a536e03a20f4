//! Client configuration.
//!
//! [`ClientConfig`] is an immutable value. Every `with_*` method consumes the
//! config and returns an updated copy, so a config shared by in-flight calls
//! is never changed underneath them. To switch credentials, build a new
//! config and hand it to [`DhanClient::reconfigure`](crate::DhanClient::reconfigure).
//!
//! # Environment
//!
//! | Variable | Field |
//! |----------|-------|
//! | `DHAN_BASE_URL` | data API base url |
//! | `DHAN_AUTH_URL` | authentication base url |
//! | `DHAN_CLIENT_ID` | client identifier |
//! | `DHAN_ACCESS_TOKEN` | session access token |
//! | `DHAN_PARTNER_ID` | partner identifier |
//! | `DHAN_DEBUG` | `1`/`true` enables request tracing |

use std::env;
use std::time::Duration;

use url::Url;

use crate::domain::ConsumeConsentResponse;
use crate::error::ValidationError;

pub const DEFAULT_BASE_URL: &str = "https://api.dhan.co/v2";
pub const DEFAULT_AUTH_URL: &str = "https://auth.dhan.co";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    auth_url: String,
    client_id: String,
    access_token: String,
    partner_id: String,
    debug: bool,
    timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            auth_url: String::from(DEFAULT_AUTH_URL),
            client_id: String::new(),
            access_token: String::new(),
            partner_id: String::new(),
            debug: false,
            timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overlaid with whatever `DHAN_*` variables are set.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    /// Urls go through the same normalisation as the `with_*` overrides.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(value) = lookup("DHAN_BASE_URL") {
            config = config.with_base_url(value);
        }
        if let Some(value) = lookup("DHAN_AUTH_URL") {
            config = config.with_auth_url(value);
        }
        if let Some(value) = lookup("DHAN_CLIENT_ID") {
            config = config.with_client_id(value);
        }
        if let Some(value) = lookup("DHAN_ACCESS_TOKEN") {
            config = config.with_access_token(value);
        }
        if let Some(value) = lookup("DHAN_PARTNER_ID") {
            config = config.with_partner_id(value);
        }
        if let Some(value) = lookup("DHAN_DEBUG") {
            config = config.with_debug(matches!(value.trim(), "1" | "true" | "TRUE" | "yes"));
        }
        config
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = trim_trailing_slash(base_url.into());
        self
    }

    pub fn with_auth_url(mut self, auth_url: impl Into<String>) -> Self {
        self.auth_url = trim_trailing_slash(auth_url.into());
        self
    }

    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = client_id.into();
        self
    }

    pub fn with_access_token(mut self, access_token: impl Into<String>) -> Self {
        self.access_token = access_token.into();
        self
    }

    pub fn with_partner_id(mut self, partner_id: impl Into<String>) -> Self {
        self.partner_id = partner_id.into();
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Adopts the client id and access token issued by a consumed consent.
    pub fn with_session(self, session: &ConsumeConsentResponse) -> Self {
        self.with_client_id(session.dhan_client_id.clone())
            .with_access_token(session.access_token.clone())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_url("base_url", &self.base_url)?;
        validate_url("auth_url", &self.auth_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn auth_url(&self) -> &str {
        &self.auth_url
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn partner_id(&self) -> &str {
        &self.partner_id
    }

    pub const fn debug(&self) -> bool {
        self.debug
    }

    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

fn trim_trailing_slash(mut value: String) -> String {
    while value.ends_with('/') {
        value.pop();
    }
    value
}

fn validate_url(field: &'static str, value: &str) -> Result<(), ValidationError> {
    let invalid = || ValidationError::InvalidUrl {
        field,
        value: value.to_owned(),
    };
    let parsed = Url::parse(value).map_err(|_| invalid())?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(invalid());
    }
    Ok(())
}
