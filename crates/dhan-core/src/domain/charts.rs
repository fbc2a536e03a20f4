use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use super::{ChartInterval, ExchangeSegment, InstrumentType};
use crate::error::ValidationError;

/// Daily candles between two dates (inclusive of `from_date`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalRequest {
    pub security_id: String,
    pub exchange_segment: ExchangeSegment,
    pub instrument: InstrumentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_code: Option<u8>,
    #[serde(default)]
    pub oi: bool,
    pub from_date: String,
    pub to_date: String,
}

impl HistoricalRequest {
    pub fn new(
        security_id: impl Into<String>,
        exchange_segment: ExchangeSegment,
        instrument: InstrumentType,
        from_date: impl Into<String>,
        to_date: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let request = Self {
            security_id: security_id.into(),
            exchange_segment,
            instrument,
            expiry_code: None,
            oi: false,
            from_date: from_date.into(),
            to_date: to_date.into(),
        };
        request.validate()?;
        Ok(request)
    }

    pub fn with_expiry_code(mut self, expiry_code: u8) -> Self {
        self.expiry_code = Some(expiry_code);
        self
    }

    pub fn with_open_interest(mut self, oi: bool) -> Self {
        self.oi = oi;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_window(&self.security_id, &self.from_date, &self.to_date)
    }
}

/// Minute candles for a short window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntradayRequest {
    pub security_id: String,
    pub exchange_segment: ExchangeSegment,
    pub instrument: InstrumentType,
    pub interval: ChartInterval,
    #[serde(default)]
    pub oi: bool,
    pub from_date: String,
    pub to_date: String,
}

impl IntradayRequest {
    pub fn new(
        security_id: impl Into<String>,
        exchange_segment: ExchangeSegment,
        instrument: InstrumentType,
        interval: ChartInterval,
        from_date: impl Into<String>,
        to_date: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let request = Self {
            security_id: security_id.into(),
            exchange_segment,
            instrument,
            interval,
            oi: false,
            from_date: from_date.into(),
            to_date: to_date.into(),
        };
        request.validate()?;
        Ok(request)
    }

    pub fn with_open_interest(mut self, oi: bool) -> Self {
        self.oi = oi;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_window(&self.security_id, &self.from_date, &self.to_date)
    }
}

fn validate_window(security_id: &str, from: &str, to: &str) -> Result<(), ValidationError> {
    if security_id.trim().is_empty() {
        return Err(ValidationError::EmptyField("securityId"));
    }
    let from_date = parse_date(from)?;
    let to_date = parse_date(to)?;
    if from_date > to_date {
        return Err(ValidationError::InvertedDateRange {
            from: from.to_owned(),
            to: to.to_owned(),
        });
    }
    Ok(())
}

pub fn parse_date(value: &str) -> Result<Date, ValidationError> {
    Date::parse(value.trim(), format_description!("[year]-[month]-[day]")).map_err(|_| {
        ValidationError::InvalidDate {
            value: value.to_owned(),
        }
    })
}

/// Columnar candle arrays as returned by the chart endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Candles {
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
    pub volume: Vec<f64>,
    /// Epoch seconds.
    pub timestamp: Vec<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub open_interest: Vec<f64>,
}

/// One row of [`Candles`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candle {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub open_interest: Option<f64>,
}

impl Candle {
    pub fn time(&self) -> Option<OffsetDateTime> {
        OffsetDateTime::from_unix_timestamp(self.timestamp).ok()
    }
}

impl Candles {
    /// Number of complete rows; ragged trailing columns are ignored.
    pub fn len(&self) -> usize {
        [
            self.open.len(),
            self.high.len(),
            self.low.len(),
            self.close.len(),
            self.volume.len(),
            self.timestamp.len(),
        ]
        .into_iter()
        .min()
        .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Candle> + '_ {
        (0..self.len()).map(move |index| Candle {
            timestamp: self.timestamp[index] as i64,
            open: self.open[index],
            high: self.high[index],
            low: self.low[index],
            close: self.close[index],
            volume: self.volume[index],
            open_interest: self.open_interest.get(index).copied(),
        })
    }
}
