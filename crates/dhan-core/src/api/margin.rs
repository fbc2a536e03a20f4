use crate::client::endpoints::MARGIN_CALCULATOR;
use crate::client::DhanClient;
use crate::domain::{MarginRequest, MarginResponse};
use crate::error::DhanError;

impl DhanClient {
    /// Margin required to place `request`. Non-2xx responses are errors.
    pub async fn calculate_margin(&self, request: &MarginRequest) -> Result<MarginResponse, DhanError> {
        request.validate()?;
        let mut request = request.clone();
        if request.dhan_client_id.is_empty() {
            request.dhan_client_id = self.config().client_id().to_owned();
        }
        let headers = self.data_headers()?;
        self.post_json(MARGIN_CALCULATOR, headers, &request).await
    }
}
