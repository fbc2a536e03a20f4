use dhan_core::{Candles, DhanClient, HistoricalRequest, IntradayRequest};
use serde_json::{json, Value};

use crate::cli::HistoryArgs;
use crate::error::CliError;

pub async fn run(args: &HistoryArgs, client: &DhanClient) -> Result<Value, CliError> {
    let candles = match args.interval {
        Some(interval) => {
            if args.expiry_code.is_some() {
                return Err(CliError::Command(String::from(
                    "--expiry-code applies to daily candles only",
                )));
            }
            let request = IntradayRequest::new(
                args.security_id.as_str(),
                args.segment,
                args.instrument,
                interval,
                args.from.as_str(),
                args.to.as_str(),
            )?
            .with_open_interest(args.oi);
            client.intraday(&request).await?
        }
        None => {
            let mut request = HistoricalRequest::new(
                args.security_id.as_str(),
                args.segment,
                args.instrument,
                args.from.as_str(),
                args.to.as_str(),
            )?
            .with_open_interest(args.oi);
            if let Some(expiry_code) = args.expiry_code {
                request = request.with_expiry_code(expiry_code);
            }
            client.historical_daily(&request).await?
        }
    };
    Ok(render_candles(&candles))
}

/// Row-oriented candles, easier to read than the columnar wire shape.
fn render_candles(candles: &Candles) -> Value {
    let rows = candles
        .iter()
        .map(|candle| {
            let mut row = json!({
                "timestamp": candle.timestamp,
                "open": candle.open,
                "high": candle.high,
                "low": candle.low,
                "close": candle.close,
                "volume": candle.volume,
            });
            if let (Some(open_interest), Value::Object(fields)) = (candle.open_interest, &mut row) {
                fields.insert(String::from("open_interest"), json!(open_interest));
            }
            row
        })
        .collect::<Vec<_>>();
    json!({ "count": rows.len(), "candles": rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candles(body: &str) -> Candles {
        serde_json::from_str(body).expect("valid candles")
    }

    #[test]
    fn rows_carry_open_interest_when_requested() {
        let rendered = render_candles(&candles(
            r#"{"open":[1.0],"high":[2.0],"low":[0.5],"close":[1.5],"volume":[10],"timestamp":[1704067200],"open_interest":[777.0]}"#,
        ));

        assert_eq!(rendered["count"], 1);
        assert_eq!(rendered["candles"][0]["open_interest"], 777.0);
        assert_eq!(rendered["candles"][0]["timestamp"], 1704067200);
    }

    #[test]
    fn rows_omit_open_interest_when_absent() {
        let rendered = render_candles(&candles(
            r#"{"open":[1.0],"high":[2.0],"low":[0.5],"close":[1.5],"volume":[10],"timestamp":[1704067200]}"#,
        ));

        assert!(rendered["candles"][0].get("open_interest").is_none());
        assert_eq!(rendered["candles"][0]["close"], 1.5);
    }
}
