use dhan_core::{DhanClient, ExchangeSegment, MarketDataInput};
use serde_json::Value;

use crate::cli::MarketArgs;
use crate::error::CliError;

pub async fn ltp(args: &MarketArgs, client: &DhanClient) -> Result<Value, CliError> {
    let input = parse_instruments(&args.instruments)?;
    Ok(serde_json::to_value(client.ltp(&input).await?)?)
}

pub async fn ohlc(args: &MarketArgs, client: &DhanClient) -> Result<Value, CliError> {
    let input = parse_instruments(&args.instruments)?;
    Ok(serde_json::to_value(client.ohlc(&input).await?)?)
}

pub async fn quote(args: &MarketArgs, client: &DhanClient) -> Result<Value, CliError> {
    let input = parse_instruments(&args.instruments)?;
    Ok(serde_json::to_value(client.market_depth(&input).await?)?)
}

/// Groups `SEGMENT:SECURITY_ID` arguments by segment.
fn parse_instruments(raw: &[String]) -> Result<MarketDataInput, CliError> {
    let mut input = MarketDataInput::new();
    for item in raw {
        let (segment, security_id) = item.split_once(':').ok_or_else(|| {
            CliError::Command(format!("expected SEGMENT:SECURITY_ID, got '{item}'"))
        })?;
        let segment: ExchangeSegment = segment.parse()?;
        let security_id = security_id
            .trim()
            .parse::<u64>()
            .map_err(|_| CliError::Command(format!("invalid security id in '{item}'")))?;
        input.push(segment, security_id);
    }
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_instruments_by_segment() {
        let input = parse_instruments(&[
            String::from("NSE_EQ:11536"),
            String::from("nse_eq:1333"),
            String::from("NSE_FNO:49081"),
        ])
        .expect("valid instruments");

        let body = serde_json::to_value(&input).expect("serializable");
        assert_eq!(
            body,
            serde_json::json!({ "NSE_EQ": [11536, 1333], "NSE_FNO": [49081] })
        );
    }

    #[test]
    fn rejects_malformed_instrument() {
        let error = parse_instruments(&[String::from("11536")]).expect_err("missing segment");
        assert_eq!(error.exit_code(), 2);

        let error = parse_instruments(&[String::from("NSE_EQ:abc")]).expect_err("bad id");
        assert!(matches!(error, CliError::Command(_)));
    }
}
