mod charts;
mod consent;
mod margin;
mod market;
mod option_chain;
mod portfolio;

use std::time::Duration;

use dhan_core::{ClientConfig, DhanClient};
use serde_json::Value;
use tracing::debug;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<Value, CliError> {
    let client = DhanClient::new(build_config(cli))?;
    debug!(
        base_url = client.config().base_url(),
        auth_url = client.config().auth_url(),
        "client configured"
    );

    match &cli.command {
        Command::Consent(args) => consent::run(args, &client).await,
        Command::Ltp(args) => market::ltp(args, &client).await,
        Command::Ohlc(args) => market::ohlc(args, &client).await,
        Command::Quote(args) => market::quote(args, &client).await,
        Command::Positions => portfolio::positions(&client).await,
        Command::Holdings => portfolio::holdings(&client).await,
        Command::Funds => portfolio::funds(&client).await,
        Command::Profile => portfolio::profile(&client).await,
        Command::Margin(args) => margin::run(args, &client).await,
        Command::History(args) => charts::run(args, &client).await,
        Command::Expiries(args) => option_chain::expiries(args, &client).await,
        Command::OptionChain(args) => option_chain::chain(args, &client).await,
    }
}

/// Environment first, then explicit flags on top.
fn build_config(cli: &Cli) -> ClientConfig {
    let mut config = ClientConfig::from_env()
        .with_debug(cli.debug)
        .with_timeout(cli.timeout_ms.map(Duration::from_millis));

    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url.as_str());
    }
    if let Some(auth_url) = &cli.auth_url {
        config = config.with_auth_url(auth_url.as_str());
    }
    if let Some(token) = &cli.access_token {
        config = config.with_access_token(token.as_str());
    }
    if let Some(client_id) = &cli.client_id {
        config = config.with_client_id(client_id.as_str());
    }
    if let Some(partner_id) = &cli.partner_id {
        config = config.with_partner_id(partner_id.as_str());
    }
    config
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn flags_override_config_and_timeout_is_optional() {
        let cli = Cli::try_parse_from([
            "dhan",
            "profile",
            "--base-url",
            "http://127.0.0.1:9000/v2/",
            "--access-token",
            "flag-token",
            "--timeout-ms",
            "2500",
        ])
        .expect("valid arguments");

        let config = build_config(&cli);
        assert_eq!(config.base_url(), "http://127.0.0.1:9000/v2");
        assert_eq!(config.access_token(), "flag-token");
        assert_eq!(config.timeout(), Some(Duration::from_millis(2500)));
    }
}
