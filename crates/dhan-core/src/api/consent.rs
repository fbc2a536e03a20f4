use tracing::debug;

use crate::client::endpoints::{
    PARTNER_CONSENT_LOGIN, PARTNER_CONSUME_CONSENT, PARTNER_GENERATE_CONSENT,
};
use crate::client::{decode, DhanClient};
use crate::domain::{ConsumeConsentResponse, GenerateConsentResponse};
use crate::error::{DhanError, ValidationError};
use crate::http_client::{HttpMethod, Params};

impl DhanClient {
    /// Starts a partner consent. The returned consent id feeds
    /// [`consent_login_url`](Self::consent_login_url).
    pub async fn generate_consent(
        &self,
        partner_secret: &str,
    ) -> Result<GenerateConsentResponse, DhanError> {
        let headers = self.partner_headers(partner_secret)?;
        let response = self
            .transport()
            .send_encoded(
                HttpMethod::Get,
                &self.auth_endpoint(PARTNER_GENERATE_CONSENT),
                headers,
                &Params::new(),
            )
            .await?;
        let consent: GenerateConsentResponse = decode(&response)?;
        debug!(consent_status = %consent.consent_status, "consent generated");
        Ok(consent)
    }

    /// Page where the user approves the consent and receives a token id.
    pub fn consent_login_url(&self, consent_id: &str) -> String {
        format!(
            "{}?consentId={}",
            self.auth_endpoint(PARTNER_CONSENT_LOGIN),
            urlencoding::encode(consent_id)
        )
    }

    /// Exchanges the token id from the login page for a session. Pass the
    /// result to [`with_session`](Self::with_session) to make data calls.
    pub async fn consume_consent(
        &self,
        token_id: &str,
        partner_secret: &str,
    ) -> Result<ConsumeConsentResponse, DhanError> {
        if token_id.trim().is_empty() {
            return Err(ValidationError::EmptyField("tokenId").into());
        }
        let headers = self.partner_headers(partner_secret)?;
        let mut params = Params::new();
        params.insert(String::from("tokenId"), token_id.to_owned());

        let response = self
            .transport()
            .send_encoded(
                HttpMethod::Post,
                &self.auth_endpoint(PARTNER_CONSUME_CONSENT),
                headers,
                &params,
            )
            .await?;
        decode(&response)
    }
}
