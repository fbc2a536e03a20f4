use crate::client::endpoints::{MARKETFEED_LTP, MARKETFEED_OHLC, MARKETFEED_QUOTE};
use crate::client::DhanClient;
use crate::domain::{LtpResponse, MarketDataInput, MarketDepthResponse, OhlcResponse};
use crate::error::DhanError;

impl DhanClient {
    /// Last traded price for every requested security.
    pub async fn ltp(&self, input: &MarketDataInput) -> Result<LtpResponse, DhanError> {
        self.market_feed(MARKETFEED_LTP, input).await
    }

    /// Last price plus the day's open/high/low/close.
    pub async fn ohlc(&self, input: &MarketDataInput) -> Result<OhlcResponse, DhanError> {
        self.market_feed(MARKETFEED_OHLC, input).await
    }

    /// Full quote including five-level market depth.
    pub async fn market_depth(
        &self,
        input: &MarketDataInput,
    ) -> Result<MarketDepthResponse, DhanError> {
        self.market_feed(MARKETFEED_QUOTE, input).await
    }

    async fn market_feed<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        input: &MarketDataInput,
    ) -> Result<T, DhanError> {
        input.validate()?;
        let headers = self.market_headers()?;
        self.post_json(path, headers, input).await
    }
}
