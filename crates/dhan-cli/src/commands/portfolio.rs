use dhan_core::DhanClient;
use serde_json::Value;

use crate::error::CliError;

pub async fn positions(client: &DhanClient) -> Result<Value, CliError> {
    Ok(serde_json::to_value(client.positions().await?)?)
}

pub async fn holdings(client: &DhanClient) -> Result<Value, CliError> {
    Ok(serde_json::to_value(client.holdings().await?)?)
}

pub async fn funds(client: &DhanClient) -> Result<Value, CliError> {
    Ok(serde_json::to_value(client.fund_limit().await?)?)
}

pub async fn profile(client: &DhanClient) -> Result<Value, CliError> {
    Ok(serde_json::to_value(client.profile().await?)?)
}
