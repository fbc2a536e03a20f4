//! CLI argument definitions for `dhan`.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `consent` | Partner consent flow (generate, login-url, consume) |
//! | `ltp` | Last traded price for instruments |
//! | `ohlc` | OHLC snapshot for instruments |
//! | `quote` | Full quote with market depth |
//! | `positions` | Open positions for the day |
//! | `holdings` | Demat holdings |
//! | `funds` | Fund limits and balances |
//! | `profile` | Account profile |
//! | `margin` | Margin required for a hypothetical order |
//! | `history` | Daily candles, or intraday candles with `--interval` |
//! | `expiries` | Option expiry dates for an underlying |
//! | `option-chain` | Option chain for an underlying and expiry |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--debug` | `false` | Trace requests and responses to stderr |
//! | `--base-url` | `https://api.dhan.co/v2` | Data API base url |
//! | `--auth-url` | `https://auth.dhan.co` | Partner auth base url |
//! | `--timeout-ms` | none | Per-request timeout |
//!
//! # Examples
//!
//! ```bash
//! # Last traded price for two NSE equities
//! dhan ltp NSE_EQ:11536 NSE_EQ:1333 --pretty
//!
//! # Five minute candles
//! dhan history 1333 --segment NSE_EQ --instrument EQUITY \
//!     --from 2024-09-11 --to 2024-09-12 --interval 5
//! ```

use clap::{Args, Parser, Subcommand};

use dhan_core::{ChartInterval, ExchangeSegment, InstrumentType, ProductType, TransactionType};

/// Command-line client for the Dhan trading API.
#[derive(Debug, Parser)]
#[command(name = "dhan", author, version, about = "Dhan trading API client")]
pub struct Cli {
    /// Pretty-print JSON output.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Trace outgoing requests and responses to stderr.
    ///
    /// Credential header values are masked.
    #[arg(long, global = true, default_value_t = false)]
    pub debug: bool,

    #[arg(long, global = true, env = "DHAN_BASE_URL")]
    pub base_url: Option<String>,

    #[arg(long, global = true, env = "DHAN_AUTH_URL")]
    pub auth_url: Option<String>,

    /// Per-request timeout in milliseconds. No timeout when unset.
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    #[arg(long, global = true, env = "DHAN_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    #[arg(long, global = true, env = "DHAN_CLIENT_ID")]
    pub client_id: Option<String>,

    #[arg(long, global = true, env = "DHAN_PARTNER_ID")]
    pub partner_id: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Partner consent flow.
    Consent(ConsentArgs),
    /// Last traded price.
    Ltp(MarketArgs),
    /// Open, high, low, close and last price.
    Ohlc(MarketArgs),
    /// Full quote including five levels of depth.
    Quote(MarketArgs),
    Positions,
    Holdings,
    /// Fund limits.
    Funds,
    Profile,
    /// Margin required for an order.
    Margin(MarginArgs),
    /// Daily or intraday candles.
    History(HistoryArgs),
    /// Option expiry dates.
    Expiries(ExpiryArgs),
    /// Option chain for one expiry.
    OptionChain(OptionChainArgs),
}

#[derive(Debug, Args)]
pub struct ConsentArgs {
    #[command(subcommand)]
    pub command: ConsentCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConsentCommand {
    /// Start a consent and print its id.
    Generate(PartnerSecretArgs),
    /// Print the login page url for a consent id.
    LoginUrl {
        consent_id: String,
    },
    /// Exchange the token id from the login redirect for a session.
    Consume {
        token_id: String,
        #[command(flatten)]
        secret: PartnerSecretArgs,
    },
}

#[derive(Debug, Args)]
pub struct PartnerSecretArgs {
    #[arg(long, env = "DHAN_PARTNER_SECRET", hide_env_values = true)]
    pub partner_secret: String,
}

#[derive(Debug, Args)]
pub struct MarketArgs {
    /// Instruments as `SEGMENT:SECURITY_ID`, e.g. `NSE_EQ:11536`.
    #[arg(required = true)]
    pub instruments: Vec<String>,
}

#[derive(Debug, Args)]
pub struct MarginArgs {
    pub security_id: String,

    #[arg(long)]
    pub segment: ExchangeSegment,

    #[arg(long)]
    pub side: TransactionType,

    #[arg(long)]
    pub product: ProductType,

    #[arg(long)]
    pub quantity: u32,

    #[arg(long)]
    pub price: f64,

    #[arg(long)]
    pub trigger_price: Option<f64>,
}

#[derive(Debug, Args)]
pub struct HistoryArgs {
    pub security_id: String,

    #[arg(long)]
    pub segment: ExchangeSegment,

    #[arg(long)]
    pub instrument: InstrumentType,

    /// First day, `YYYY-MM-DD`.
    #[arg(long)]
    pub from: String,

    /// Last day, `YYYY-MM-DD`.
    #[arg(long)]
    pub to: String,

    /// Candle width in minutes (1, 5, 15, 25, 60). Daily candles when unset.
    #[arg(long)]
    pub interval: Option<ChartInterval>,

    /// Contract expiry code for derivatives (daily candles only).
    #[arg(long)]
    pub expiry_code: Option<u8>,

    /// Include open interest.
    #[arg(long, default_value_t = false)]
    pub oi: bool,
}

#[derive(Debug, Args)]
pub struct ExpiryArgs {
    pub underlying_scrip: u64,

    #[arg(long)]
    pub segment: ExchangeSegment,
}

#[derive(Debug, Args)]
pub struct OptionChainArgs {
    pub underlying_scrip: u64,

    #[arg(long)]
    pub segment: ExchangeSegment,

    /// `YYYY-MM-DD`.
    #[arg(long)]
    pub expiry: String,
}
