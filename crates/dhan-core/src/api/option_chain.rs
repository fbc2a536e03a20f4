use crate::client::endpoints::{OPTIONCHAIN, OPTIONCHAIN_EXPIRY_LIST};
use crate::client::DhanClient;
use crate::domain::{
    ExchangeSegment, ExpiryListRequest, ExpiryListResponse, OptionChainRequest,
    OptionChainResponse,
};
use crate::error::DhanError;

impl DhanClient {
    /// Active expiry dates for an underlying.
    pub async fn expiry_list(
        &self,
        underlying_scrip: u64,
        underlying_segment: ExchangeSegment,
    ) -> Result<ExpiryListResponse, DhanError> {
        let request = ExpiryListRequest {
            underlying_scrip,
            underlying_segment,
        };
        let headers = self.market_headers()?;
        self.post_json(OPTIONCHAIN_EXPIRY_LIST, headers, &request).await
    }

    pub async fn option_chain(
        &self,
        request: &OptionChainRequest,
    ) -> Result<OptionChainResponse, DhanError> {
        let headers = self.market_headers()?;
        self.post_json(OPTIONCHAIN, headers, request).await
    }
}
