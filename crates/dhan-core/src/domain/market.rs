use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ExchangeSegment;
use crate::error::ValidationError;

/// Securities to quote, grouped by exchange segment.
///
/// Serializes to the body the market feed expects:
/// `{"NSE_EQ": [11536], "NSE_FNO": [49081, 49082]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarketDataInput {
    instruments: BTreeMap<ExchangeSegment, Vec<u64>>,
}

impl MarketDataInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, segment: ExchangeSegment, security_ids: impl IntoIterator<Item = u64>) -> Self {
        self.instruments
            .entry(segment)
            .or_default()
            .extend(security_ids);
        self
    }

    pub fn push(&mut self, segment: ExchangeSegment, security_id: u64) {
        self.instruments.entry(segment).or_default().push(security_id);
    }

    pub fn is_empty(&self) -> bool {
        self.instruments.values().all(Vec::is_empty)
    }

    pub fn len(&self) -> usize {
        self.instruments.values().map(Vec::len).sum()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::EmptyMarketInput);
        }
        Ok(())
    }
}

/// Market feed envelope: quotes keyed by segment, then by security id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketFeedResponse<Q> {
    #[serde(default)]
    pub status: String,
    #[serde(default = "BTreeMap::new")]
    pub data: BTreeMap<String, BTreeMap<String, Q>>,
}

impl<Q> MarketFeedResponse<Q> {
    pub fn get(&self, segment: ExchangeSegment, security_id: u64) -> Option<&Q> {
        self.data
            .get(segment.as_str())
            .and_then(|quotes| quotes.get(&security_id.to_string()))
    }

    /// Flattened `(segment, security_id, quote)` view.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &Q)> {
        self.data.iter().flat_map(|(segment, quotes)| {
            quotes
                .iter()
                .map(move |(security_id, quote)| (segment.as_str(), security_id.as_str(), quote))
        })
    }

    pub fn len(&self) -> usize {
        self.data.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub type LtpResponse = MarketFeedResponse<LtpQuote>;
pub type OhlcResponse = MarketFeedResponse<OhlcQuote>;
pub type MarketDepthResponse = MarketFeedResponse<MarketDepthQuote>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LtpQuote {
    pub last_price: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ohlc {
    pub open: f64,
    pub close: f64,
    pub high: f64,
    pub low: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OhlcQuote {
    pub last_price: f64,
    pub ohlc: Ohlc,
}

/// One aggregated order book level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepthLevel {
    pub quantity: i64,
    pub orders: i64,
    pub price: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketDepth {
    pub buy: Vec<DepthLevel>,
    pub sell: Vec<DepthLevel>,
}

impl MarketDepth {
    pub fn best_bid(&self) -> Option<&DepthLevel> {
        self.buy.first()
    }

    pub fn best_ask(&self) -> Option<&DepthLevel> {
        self.sell.first()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketDepthQuote {
    pub average_price: f64,
    pub buy_quantity: i64,
    pub sell_quantity: i64,
    pub depth: MarketDepth,
    pub last_price: f64,
    pub last_quantity: i64,
    pub last_trade_time: String,
    pub lower_circuit_limit: f64,
    pub upper_circuit_limit: f64,
    pub net_change: f64,
    pub volume: i64,
    pub oi: i64,
    pub oi_day_high: i64,
    pub oi_day_low: i64,
    pub ohlc: Ohlc,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_serializes_as_segment_map() {
        let input = MarketDataInput::new()
            .with(ExchangeSegment::NseFno, [49081, 49082])
            .with(ExchangeSegment::NseEq, [11536]);

        let json = serde_json::to_string(&input).expect("serializable");
        assert_eq!(json, r#"{"NSE_EQ":[11536],"NSE_FNO":[49081,49082]}"#);
        assert_eq!(input.len(), 3);
    }

    #[test]
    fn empty_input_fails_validation() {
        let mut input = MarketDataInput::new().with(ExchangeSegment::NseEq, []);
        assert_eq!(input.validate(), Err(ValidationError::EmptyMarketInput));

        input.push(ExchangeSegment::NseEq, 1333);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn depth_response_exposes_nested_lookup() {
        let body = r#"{
            "status": "success",
            "data": {
                "NSE_EQ": {
                    "1333": {
                        "last_price": 1650.25,
                        "volume": 120000,
                        "depth": {
                            "buy": [{"quantity": 10, "orders": 2, "price": 1650.2}],
                            "sell": [{"quantity": 5, "orders": 1, "price": 1650.3}]
                        },
                        "ohlc": {"open": 1640.0, "close": 1645.0, "high": 1655.0, "low": 1638.5}
                    }
                }
            }
        }"#;

        let response: MarketDepthResponse = serde_json::from_str(body).expect("valid body");
        let quote = response
            .get(ExchangeSegment::NseEq, 1333)
            .expect("quote present");
        assert_eq!(quote.volume, 120000);
        assert_eq!(quote.depth.best_bid().map(|level| level.price), Some(1650.2));
        assert_eq!(quote.depth.best_ask().map(|level| level.orders), Some(1));
        assert_eq!(quote.ohlc.low, 1638.5);
        assert_eq!(response.iter().count(), 1);
    }

    #[test]
    fn missing_data_decodes_as_empty() {
        let response: LtpResponse =
            serde_json::from_str(r#"{"status":"success"}"#).expect("valid body");
        assert!(response.is_empty());
        assert_eq!(response.get(ExchangeSegment::NseEq, 1), None);
    }
}
