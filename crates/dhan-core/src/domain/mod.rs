//! # Domain Models
//!
//! Request and response shapes for every endpoint the client calls.
//!
//! Field names follow the Rust convention; serde attributes carry the wire
//! names, including the service's own spellings. Response structs default
//! missing fields so that additions on the service side never break
//! decoding.
//!
//! | Type | Endpoint |
//! |------|----------|
//! | [`GenerateConsentResponse`], [`ConsumeConsentResponse`] | partner consent |
//! | [`MarketDataInput`], [`LtpResponse`], [`OhlcResponse`], [`MarketDepthResponse`] | market feed |
//! | [`Position`], [`Holding`], [`FundLimit`], [`ConvertPositionRequest`] | portfolio and funds |
//! | [`MarginRequest`], [`MarginResponse`] | margin calculator |
//! | [`HistoricalRequest`], [`IntradayRequest`], [`Candles`] | charts |
//! | [`ExpiryListRequest`], [`OptionChainRequest`], [`OptionChainResponse`] | option chain |
//! | [`Profile`] | profile |

mod charts;
mod consent;
mod enums;
mod margin;
mod market;
mod option_chain;
mod portfolio;
mod profile;

pub use charts::{parse_date, Candle, Candles, HistoricalRequest, IntradayRequest};
pub use consent::{ConsumeConsentResponse, GenerateConsentResponse};
pub use enums::{ChartInterval, ExchangeSegment, InstrumentType, ProductType, TransactionType};
pub use margin::{MarginRequest, MarginResponse};
pub use market::{
    DepthLevel, LtpQuote, LtpResponse, MarketDataInput, MarketDepth, MarketDepthQuote,
    MarketDepthResponse, MarketFeedResponse, Ohlc, OhlcQuote, OhlcResponse,
};
pub use option_chain::{
    ExpiryListRequest, ExpiryListResponse, Greeks, OptionChain, OptionChainRequest,
    OptionChainResponse, OptionLeg, StrikeRow,
};
pub use portfolio::{ConvertPositionRequest, FundLimit, Holding, Position};
pub use profile::Profile;
