use serde::{Deserialize, Serialize};

/// Result of starting a partner consent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateConsentResponse {
    pub consent_id: String,
    pub consent_status: String,
}

/// Session issued once the user has approved a consent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConsumeConsentResponse {
    pub dhan_client_id: String,
    pub dhan_client_name: String,
    pub dhan_client_ucc: String,
    pub given_power_of_attorney: bool,
    pub access_token: String,
    pub expiry_time: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consume_response_reads_camel_case_fields() {
        let body = r#"{
            "dhanClientId": "1000000001",
            "dhanClientName": "A TRADER",
            "dhanClientUcc": "ABCD1234",
            "givenPowerOfAttorney": true,
            "accessToken": "jwt-token",
            "expiryTime": "2026-10-18T09:00:00"
        }"#;

        let session: ConsumeConsentResponse = serde_json::from_str(body).expect("valid body");
        assert_eq!(session.dhan_client_id, "1000000001");
        assert!(session.given_power_of_attorney);
        assert_eq!(session.access_token, "jwt-token");
    }
}
