//! Shared fixtures for the behaviour tests.

use std::sync::Arc;

pub use dhan_core::{ClientConfig, DhanClient, ScriptedHttpClient};

pub const TEST_BASE_URL: &str = "http://127.0.0.1:9000/v2";
pub const TEST_AUTH_URL: &str = "http://127.0.0.1:9001";

/// Config pointed at local hosts with a full set of credentials.
pub fn authenticated_config() -> ClientConfig {
    ClientConfig::new()
        .with_base_url(TEST_BASE_URL)
        .with_auth_url(TEST_AUTH_URL)
        .with_client_id("1000000001")
        .with_access_token("test-token")
        .with_partner_id("partner-1")
}

/// Client whose HTTP stack replays `http`'s script.
pub fn scripted_client(http: ScriptedHttpClient) -> (DhanClient, Arc<ScriptedHttpClient>) {
    let http = Arc::new(http);
    let client = DhanClient::with_http_client(authenticated_config(), http.clone())
        .expect("test config is valid");
    (client, http)
}
