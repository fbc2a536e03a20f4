use dhan_core::DhanClient;
use serde_json::{json, Value};

use crate::cli::{ConsentArgs, ConsentCommand};
use crate::error::CliError;

pub async fn run(args: &ConsentArgs, client: &DhanClient) -> Result<Value, CliError> {
    match &args.command {
        ConsentCommand::Generate(secret) => {
            let consent = client.generate_consent(&secret.partner_secret).await?;
            let login_url = client.consent_login_url(&consent.consent_id);
            let mut data = serde_json::to_value(consent)?;
            if let Value::Object(fields) = &mut data {
                fields.insert(String::from("loginUrl"), Value::String(login_url));
            }
            Ok(data)
        }
        ConsentCommand::LoginUrl { consent_id } => {
            if consent_id.trim().is_empty() {
                return Err(CliError::Command(String::from("consent id must not be empty")));
            }
            Ok(json!({ "loginUrl": client.consent_login_url(consent_id) }))
        }
        ConsentCommand::Consume { token_id, secret } => {
            let session = client
                .consume_consent(token_id, &secret.partner_secret)
                .await?;
            Ok(serde_json::to_value(session)?)
        }
    }
}
