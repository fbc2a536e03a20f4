//! Partner consent walkthrough.
//!
//! ```bash
//! DHAN_PARTNER_ID=... DHAN_PARTNER_SECRET=... cargo run -p dhan-core --example consent
//! ```

use std::io::{self, BufRead, Write};

use dhan_core::{ClientConfig, DhanClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let partner_secret = std::env::var("DHAN_PARTNER_SECRET")?;
    let client = DhanClient::new(ClientConfig::from_env())?;

    let consent = client.generate_consent(&partner_secret).await?;
    println!(
        "consent {} ({})",
        consent.consent_id, consent.consent_status
    );
    println!("log in at: {}", client.consent_login_url(&consent.consent_id));

    print!("token id from the login page: ");
    io::stdout().flush()?;
    let mut token_id = String::new();
    io::stdin().lock().read_line(&mut token_id)?;

    let session = client.consume_consent(token_id.trim(), &partner_secret).await?;
    println!("client id:   {}", session.dhan_client_id);
    println!("client name: {}", session.dhan_client_name);
    println!("expires:     {}", session.expiry_time);

    let client = client.with_session(&session);
    let funds = client.fund_limit().await?;
    println!("available balance: {:.2}", funds.available_balance);

    Ok(())
}
