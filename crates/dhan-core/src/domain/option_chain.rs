use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::charts::parse_date;
use super::ExchangeSegment;
use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryListRequest {
    #[serde(rename = "UnderlyingScrip")]
    pub underlying_scrip: u64,
    #[serde(rename = "UnderlyingSeg")]
    pub underlying_segment: ExchangeSegment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionChainRequest {
    #[serde(rename = "UnderlyingScrip")]
    pub underlying_scrip: u64,
    #[serde(rename = "UnderlyingSeg")]
    pub underlying_segment: ExchangeSegment,
    /// `YYYY-MM-DD`, one of the dates from the expiry list.
    #[serde(rename = "Expiry")]
    pub expiry: String,
}

impl OptionChainRequest {
    pub fn new(
        underlying_scrip: u64,
        underlying_segment: ExchangeSegment,
        expiry: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let expiry = expiry.into();
        parse_date(&expiry)?;
        Ok(Self {
            underlying_scrip,
            underlying_segment,
            expiry,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpiryListResponse {
    pub status: String,
    pub data: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionChainResponse {
    pub status: String,
    pub data: OptionChain,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionChain {
    /// Last traded price of the underlying.
    pub last_price: f64,
    /// Rows keyed by strike as sent by the service, e.g. `"25650.000000"`.
    pub oc: BTreeMap<String, StrikeRow>,
}

impl OptionChain {
    /// Rows ordered by numeric strike. Keys that are not numbers are skipped.
    pub fn strikes(&self) -> Vec<(f64, &StrikeRow)> {
        let mut rows: Vec<(f64, &StrikeRow)> = self
            .oc
            .iter()
            .filter_map(|(strike, row)| strike.trim().parse::<f64>().ok().map(|value| (value, row)))
            .collect();
        rows.sort_by(|a, b| a.0.total_cmp(&b.0));
        rows
    }

    /// Strike closest to the underlying price.
    pub fn at_the_money(&self) -> Option<(f64, &StrikeRow)> {
        self.strikes().into_iter().min_by(|a, b| {
            (a.0 - self.last_price)
                .abs()
                .total_cmp(&(b.0 - self.last_price).abs())
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrikeRow {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ce: Option<OptionLeg>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pe: Option<OptionLeg>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Greeks {
    pub delta: f64,
    pub theta: f64,
    pub gamma: f64,
    pub vega: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionLeg {
    pub greeks: Greeks,
    pub implied_volatility: f64,
    pub last_price: f64,
    pub oi: i64,
    pub previous_close_price: f64,
    pub previous_oi: i64,
    pub previous_volume: i64,
    pub top_ask_price: f64,
    pub top_ask_quantity: i64,
    pub top_bid_price: f64,
    pub top_bid_quantity: i64,
    pub volume: i64,
}
