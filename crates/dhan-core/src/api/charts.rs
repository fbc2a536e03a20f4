use crate::client::endpoints::{CHARTS_HISTORICAL, CHARTS_INTRADAY};
use crate::client::DhanClient;
use crate::domain::{Candles, HistoricalRequest, IntradayRequest};
use crate::error::DhanError;

impl DhanClient {
    pub async fn historical_daily(&self, request: &HistoricalRequest) -> Result<Candles, DhanError> {
        request.validate()?;
        let headers = self.data_headers()?;
        self.post_json(CHARTS_HISTORICAL, headers, request).await
    }

    pub async fn intraday(&self, request: &IntradayRequest) -> Result<Candles, DhanError> {
        request.validate()?;
        let headers = self.data_headers()?;
        self.post_json(CHARTS_INTRADAY, headers, request).await
    }
}
