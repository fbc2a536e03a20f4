//! Prints LTP, OHLC and depth for a few securities.
//!
//! ```bash
//! DHAN_ACCESS_TOKEN=... DHAN_CLIENT_ID=... cargo run -p dhan-core --example market_feed
//! ```

use dhan_core::{ClientConfig, DhanClient, ExchangeSegment, MarketDataInput};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = DhanClient::new(ClientConfig::from_env())?;
    let input = MarketDataInput::new()
        .with(ExchangeSegment::NseEq, [11536])
        .with(ExchangeSegment::NseFno, [49081, 49082]);

    let ltp = client.ltp(&input).await?;
    for (segment, security_id, quote) in ltp.iter() {
        println!("{segment} {security_id}: ltp {:.2}", quote.last_price);
    }

    let ohlc = client.ohlc(&input).await?;
    for (segment, security_id, quote) in ohlc.iter() {
        println!(
            "{segment} {security_id}: o {:.2} h {:.2} l {:.2} c {:.2}",
            quote.ohlc.open, quote.ohlc.high, quote.ohlc.low, quote.ohlc.close
        );
    }

    let depth = client.market_depth(&input).await?;
    for (segment, security_id, quote) in depth.iter() {
        println!("{segment} {security_id}: volume {}", quote.volume);
        for (index, level) in quote.depth.buy.iter().enumerate() {
            println!("  bid {}: {:.2} x {} ({} orders)", index + 1, level.price, level.quantity, level.orders);
        }
        for (index, level) in quote.depth.sell.iter().enumerate() {
            println!("  ask {}: {:.2} x {} ({} orders)", index + 1, level.price, level.quantity, level.orders);
        }
    }

    Ok(())
}
