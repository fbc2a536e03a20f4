//! # Dhan Core
//!
//! Client library for the Dhan trading API: partner consent, market feed,
//! portfolio and funds, margin calculation, charts and option chains.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`http_client`] | `HttpClient` seam, reqwest and scripted implementations, `Transport` |
//! | [`config`] | Immutable client configuration |
//! | [`client`] | `DhanClient` and endpoint paths |
//! | [`domain`] | Request/response models |
//! | [`error`] | Error types |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dhan_core::{ClientConfig, DhanClient, ExchangeSegment, MarketDataInput};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = DhanClient::new(ClientConfig::from_env())?;
//!
//!     let input = MarketDataInput::new().with(ExchangeSegment::NseEq, [11536]);
//!     let ltp = client.ltp(&input).await?;
//!
//!     if let Some(quote) = ltp.get(ExchangeSegment::NseEq, 11536) {
//!         println!("NSE_EQ:11536 last price: {:.2}", quote.last_price);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  CLI / caller   │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │   DhanClient    │────▶│   ClientConfig   │
//! │ (endpoint APIs) │     │   (immutable)    │
//! └────────┬────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │    Transport    │────▶│   HttpClient     │
//! │ form/raw/json   │     │ (reqwest/script) │
//! └─────────────────┘     └──────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns `Result<_, DhanError>`. Non-2xx responses are
//! always errors at the endpoint layer, except the holdings call, which
//! reports an account without holdings as an empty list:
//!
//! ```rust
//! use dhan_core::DhanError;
//!
//! fn describe(error: &DhanError) -> String {
//!     match error {
//!         DhanError::Remote { payload, .. } => format!("service said {}", payload.code),
//!         DhanError::Transport(transport) if transport.retryable() => String::from("try again"),
//!         other => other.to_string(),
//!     }
//! }
//! ```
//!
//! ## Security
//!
//! - Credentials are read from configuration or environment variables only
//! - Debug traces mask `access-token` and `partner_secret` header values

mod api;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod http_client;

pub use client::{endpoints, DhanClient};

pub use config::{ClientConfig, DEFAULT_AUTH_URL, DEFAULT_BASE_URL};

pub use domain::{
    Candle, Candles, ChartInterval, ConsumeConsentResponse, ConvertPositionRequest, DepthLevel,
    ExchangeSegment, ExpiryListResponse, FundLimit, GenerateConsentResponse, Holding,
    HistoricalRequest, InstrumentType, IntradayRequest, LtpQuote, LtpResponse, MarginRequest,
    MarginResponse, MarketDataInput, MarketDepthQuote, MarketDepthResponse, OhlcQuote,
    OhlcResponse, OptionChainRequest, OptionChainResponse, Position, ProductType, Profile,
    TransactionType,
};

pub use error::{DhanError, ErrorPayload, ValidationError, NO_HOLDINGS_CODE};

pub use http_client::{
    Headers, HttpClient, HttpMethod, HttpRequest, HttpResponse, Params, ReqwestHttpClient,
    ScriptedHttpClient, Transport, TransportError, TransportErrorKind, USER_AGENT,
};
