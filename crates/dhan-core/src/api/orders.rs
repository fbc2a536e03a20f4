use serde::Serialize;

use crate::client::DhanClient;
use crate::error::DhanError;

// Order management is not wired up; these reserve the API surface and fail
// without touching the network.
impl DhanClient {
    pub async fn place_order<T: Serialize + Sync + ?Sized>(&self, _order: &T) -> Result<String, DhanError> {
        Err(DhanError::Unsupported("order placement"))
    }

    pub async fn modify_order<T: Serialize + Sync + ?Sized>(
        &self,
        _order_id: &str,
        _changes: &T,
    ) -> Result<String, DhanError> {
        Err(DhanError::Unsupported("order modification"))
    }

    pub async fn cancel_order(&self, _order_id: &str) -> Result<(), DhanError> {
        Err(DhanError::Unsupported("order cancellation"))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::config::ClientConfig;
    use crate::error::DhanError;
    use crate::http_client::ScriptedHttpClient;
    use crate::DhanClient;

    #[tokio::test]
    async fn order_endpoints_are_unsupported_and_offline() {
        let http = Arc::new(ScriptedHttpClient::new());
        let client = DhanClient::with_http_client(
            ClientConfig::new().with_access_token("token"),
            http.clone(),
        )
        .expect("valid config");

        let error = client
            .place_order(&serde_json::json!({"quantity": 1}))
            .await
            .expect_err("stubbed");
        assert!(matches!(error, DhanError::Unsupported("order placement")));
        assert!(client.cancel_order("1124").await.is_err());
        assert!(http.recorded_requests().is_empty());
    }
}
