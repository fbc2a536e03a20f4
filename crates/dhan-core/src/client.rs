use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::domain::ConsumeConsentResponse;
use crate::error::{DhanError, ValidationError};
use crate::http_client::{
    Headers, HttpClient, HttpMethod, HttpResponse, Params, ReqwestHttpClient, Transport,
    CONTENT_TYPE_JSON,
};

/// REST paths, relative to the data base url unless noted.
pub mod endpoints {
    // Auth base.
    pub const PARTNER_GENERATE_CONSENT: &str = "/partner/generate-consent";
    pub const PARTNER_CONSENT_LOGIN: &str = "/partner/consent-login";
    pub const PARTNER_CONSUME_CONSENT: &str = "/partner/consume-consent";

    pub const MARKETFEED_LTP: &str = "/marketfeed/ltp";
    pub const MARKETFEED_OHLC: &str = "/marketfeed/ohlc";
    pub const MARKETFEED_QUOTE: &str = "/marketfeed/quote";

    pub const CHARTS_HISTORICAL: &str = "/charts/historical";
    pub const CHARTS_INTRADAY: &str = "/charts/intraday";

    pub const OPTIONCHAIN: &str = "/optionchain";
    pub const OPTIONCHAIN_EXPIRY_LIST: &str = "/optionchain/expirylist";

    pub const HOLDINGS: &str = "/holdings";
    pub const POSITIONS: &str = "/positions";
    pub const POSITIONS_CONVERT: &str = "/positions/convert";

    pub const MARGIN_CALCULATOR: &str = "/margincalculator";
    pub const FUND_LIMIT: &str = "/fundlimit";

    pub const PROFILE: &str = "/profile";
}

/// Client for the trading, data and partner-auth APIs.
///
/// Cheap to clone and safe to share across tasks: the configuration is
/// immutable, and switching credentials produces a new client via
/// [`reconfigure`](Self::reconfigure) or [`with_session`](Self::with_session).
#[derive(Debug, Clone)]
pub struct DhanClient {
    config: Arc<ClientConfig>,
    transport: Transport,
}

impl DhanClient {
    /// Client backed by reqwest.
    pub fn new(config: ClientConfig) -> Result<Self, DhanError> {
        Self::with_http_client(config, Arc::new(ReqwestHttpClient::new()))
    }

    pub fn with_http_client(
        config: ClientConfig,
        http_client: Arc<dyn HttpClient>,
    ) -> Result<Self, DhanError> {
        config.validate()?;
        let transport = Transport::new(http_client, config.debug()).with_timeout(config.timeout());
        Ok(Self {
            config: Arc::new(config),
            transport,
        })
    }

    /// New client with `config`, sharing this client's HTTP stack.
    pub fn reconfigure(&self, config: ClientConfig) -> Result<Self, DhanError> {
        config.validate()?;
        let transport = self
            .transport
            .clone()
            .with_debug(config.debug())
            .with_timeout(config.timeout());
        Ok(Self {
            config: Arc::new(config),
            transport,
        })
    }

    /// New client authenticated with the session from a consumed consent.
    pub fn with_session(&self, session: &ConsumeConsentResponse) -> Self {
        Self {
            config: Arc::new(self.config.as_ref().clone().with_session(session)),
            transport: self.transport.clone(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub(crate) fn data_endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url(), path)
    }

    pub(crate) fn auth_endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.auth_url(), path)
    }

    /// Headers for trading and account calls.
    pub(crate) fn data_headers(&self) -> Result<Headers, ValidationError> {
        let token = require(self.config.access_token(), "access_token")?;
        let mut headers = Headers::new();
        headers.insert(String::from("access-token"), token.to_owned());
        headers.insert(String::from("accept"), String::from(CONTENT_TYPE_JSON));
        Ok(headers)
    }

    /// Data headers plus the `client-id` the market feed requires.
    pub(crate) fn market_headers(&self) -> Result<Headers, ValidationError> {
        let mut headers = self.data_headers()?;
        let client_id = require(self.config.client_id(), "client_id")?;
        headers.insert(String::from("client-id"), client_id.to_owned());
        Ok(headers)
    }

    pub(crate) fn partner_headers(&self, partner_secret: &str) -> Result<Headers, ValidationError> {
        let partner_id = require(self.config.partner_id(), "partner_id")?;
        let partner_secret = require(partner_secret, "partner_secret")?;
        let mut headers = Headers::new();
        headers.insert(String::from("partner_id"), partner_id.to_owned());
        headers.insert(String::from("partner_secret"), partner_secret.to_owned());
        Ok(headers)
    }

    /// GET a data endpoint and decode the success schema.
    pub(crate) async fn get_data<T: DeserializeOwned>(&self, path: &str) -> Result<T, DhanError> {
        let headers = self.data_headers()?;
        let response = self
            .transport
            .send_encoded(HttpMethod::Get, &self.data_endpoint(path), headers, &Params::new())
            .await?;
        decode(&response)
    }

    /// POST a JSON body to a data endpoint.
    pub(crate) async fn post_json<B, T>(
        &self,
        path: &str,
        headers: Headers,
        body: &B,
    ) -> Result<T, DhanError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send_json(path, headers, body).await?;
        decode(&response)
    }

    pub(crate) async fn send_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        headers: Headers,
        body: &B,
    ) -> Result<HttpResponse, DhanError> {
        self.transport
            .send_json(
                HttpMethod::Post,
                &self.data_endpoint(path),
                &Params::new(),
                body,
                headers,
            )
            .await
    }
}

fn require<'a>(value: &'a str, name: &'static str) -> Result<&'a str, ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingCredential(name));
    }
    Ok(value)
}

/// Decodes a 2xx body as `T`; any other status becomes an error.
pub(crate) fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, DhanError> {
    ensure_success(response)?;
    Ok(response.json()?)
}

pub(crate) fn ensure_success(response: &HttpResponse) -> Result<(), DhanError> {
    if response.is_success() {
        Ok(())
    } else {
        Err(DhanError::from_response(response))
    }
}
