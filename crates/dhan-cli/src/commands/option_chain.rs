use dhan_core::{DhanClient, OptionChainRequest};
use serde_json::Value;

use crate::cli::{ExpiryArgs, OptionChainArgs};
use crate::error::CliError;

pub async fn expiries(args: &ExpiryArgs, client: &DhanClient) -> Result<Value, CliError> {
    let expiries = client
        .expiry_list(args.underlying_scrip, args.segment)
        .await?;
    Ok(serde_json::to_value(expiries)?)
}

pub async fn chain(args: &OptionChainArgs, client: &DhanClient) -> Result<Value, CliError> {
    let request =
        OptionChainRequest::new(args.underlying_scrip, args.segment, args.expiry.as_str())?;
    Ok(serde_json::to_value(client.option_chain(&request).await?)?)
}
