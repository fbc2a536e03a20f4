use tracing::debug;

use crate::client::endpoints::{FUND_LIMIT, HOLDINGS, POSITIONS, POSITIONS_CONVERT};
use crate::client::{ensure_success, DhanClient};
use crate::domain::{ConvertPositionRequest, FundLimit, Holding, Position};
use crate::error::{DhanError, NO_HOLDINGS_CODE};

impl DhanClient {
    pub async fn positions(&self) -> Result<Vec<Position>, DhanError> {
        self.get_data(POSITIONS).await
    }

    /// Demat holdings. An account without holdings yields an empty list
    /// rather than the service's `DH-1111` error.
    pub async fn holdings(&self) -> Result<Vec<Holding>, DhanError> {
        match self.get_data::<Vec<Holding>>(HOLDINGS).await {
            Ok(holdings) => Ok(holdings),
            Err(error) if error.has_code(NO_HOLDINGS_CODE) => {
                debug!("account has no holdings");
                Ok(Vec::new())
            }
            Err(error) => Err(error),
        }
    }

    pub async fn fund_limit(&self) -> Result<FundLimit, DhanError> {
        self.get_data(FUND_LIMIT).await
    }

    /// Converts an open position to another product type. The service
    /// answers with an empty body on success.
    pub async fn convert_position(&self, request: &ConvertPositionRequest) -> Result<(), DhanError> {
        request.validate()?;
        let mut request = request.clone();
        if request.dhan_client_id.is_empty() {
            request.dhan_client_id = self.config().client_id().to_owned();
        }
        let headers = self.data_headers()?;
        let response = self.send_json(POSITIONS_CONVERT, headers, &request).await?;
        ensure_success(&response)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::config::ClientConfig;
    use crate::domain::{ConvertPositionRequest, ExchangeSegment, ProductType};
    use crate::http_client::{HttpResponse, ScriptedHttpClient};
    use crate::DhanClient;

    fn client(http: Arc<ScriptedHttpClient>) -> DhanClient {
        DhanClient::with_http_client(
            ClientConfig::new()
                .with_access_token("token")
                .with_client_id("1000000001"),
            http,
        )
        .expect("valid config")
    }

    #[tokio::test]
    async fn positions_decode_from_top_level_array() {
        let http = Arc::new(ScriptedHttpClient::new().with_json(
            200,
            r#"[{"tradingSymbol":"TCS","securityId":"11536","positionType":"LONG","netQty":40,"unrealizedProfit":12.5}]"#,
        ));

        let positions = client(http.clone()).positions().await.expect("decoded");
        assert_eq!(positions.len(), 1);
        assert_eq!(positions[0].net_qty, 40);

        let request = http.last_request().expect("request recorded");
        assert_eq!(request.url, "https://api.dhan.co/v2/positions");
        assert!(request.body.is_none());
    }

    #[tokio::test]
    async fn convert_position_fills_client_id_and_accepts_empty_body() {
        let http = Arc::new(ScriptedHttpClient::new().with_response(HttpResponse::new(202, "")));
        let request = ConvertPositionRequest {
            dhan_client_id: String::new(),
            from_product_type: ProductType::Intraday,
            exchange_segment: ExchangeSegment::NseEq,
            position_type: String::from("LONG"),
            security_id: String::from("11536"),
            trading_symbol: String::from("TCS"),
            convert_qty: 40,
            to_product_type: ProductType::Cnc,
        };

        client(http.clone())
            .convert_position(&request)
            .await
            .expect("conversion accepted");

        let sent: serde_json::Value =
            serde_json::from_str(&http.last_request().expect("recorded").body_text())
                .expect("json body");
        assert_eq!(sent["dhanClientId"], "1000000001");
        assert_eq!(sent["fromProductType"], "INTRADAY");
        assert_eq!(sent["toProductType"], "CNC");
    }

    #[tokio::test]
    async fn convert_position_surfaces_remote_error() {
        let http = Arc::new(ScriptedHttpClient::new().with_json(
            400,
            r#"{"errorType":"Order_Error","errorCode":"DH-906","errorMessage":"Position not found"}"#,
        ));
        let request = ConvertPositionRequest {
            dhan_client_id: String::from("1000000001"),
            from_product_type: ProductType::Intraday,
            exchange_segment: ExchangeSegment::NseEq,
            position_type: String::from("LONG"),
            security_id: String::from("11536"),
            trading_symbol: String::new(),
            convert_qty: 1,
            to_product_type: ProductType::Cnc,
        };

        let error = client(http)
            .convert_position(&request)
            .await
            .expect_err("remote error");
        assert!(error.to_string().contains("Position not found"));
    }
}
