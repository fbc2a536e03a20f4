use serde::{Deserialize, Serialize};

use super::{ExchangeSegment, ProductType, TransactionType};
use crate::error::ValidationError;

/// Margin calculator input for a single prospective order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginRequest {
    /// Filled from the client configuration when left empty.
    #[serde(default)]
    pub dhan_client_id: String,
    pub exchange_segment: ExchangeSegment,
    pub transaction_type: TransactionType,
    pub quantity: u32,
    pub product_type: ProductType,
    pub security_id: String,
    pub price: f64,
    #[serde(default)]
    pub trigger_price: f64,
}

impl MarginRequest {
    pub fn new(
        exchange_segment: ExchangeSegment,
        transaction_type: TransactionType,
        quantity: u32,
        product_type: ProductType,
        security_id: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            dhan_client_id: String::new(),
            exchange_segment,
            transaction_type,
            quantity,
            product_type,
            security_id: security_id.into(),
            price,
            trigger_price: 0.0,
        }
    }

    pub fn with_trigger_price(mut self, trigger_price: f64) -> Self {
        self.trigger_price = trigger_price;
        self
    }

    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.dhan_client_id = client_id.into();
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.quantity == 0 {
            return Err(ValidationError::ZeroQuantity);
        }
        if self.security_id.trim().is_empty() {
            return Err(ValidationError::EmptyField("securityId"));
        }
        validate_price("price", self.price)?;
        validate_price("triggerPrice", self.trigger_price)
    }
}

fn validate_price(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::InvalidPrice { field });
    }
    Ok(())
}

/// Margin requirement breakdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarginResponse {
    pub total_margin: f64,
    pub span_margin: f64,
    pub exposure_margin: f64,
    pub available_balance: f64,
    pub variable_margin: f64,
    pub insufficient_balance: f64,
    pub brokerage: f64,
    pub leverage: f64,
}

impl MarginResponse {
    pub fn is_sufficient(&self) -> bool {
        self.insufficient_balance <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_with_wire_names() {
        let request = MarginRequest::new(
            ExchangeSegment::NseEq,
            TransactionType::Buy,
            1,
            ProductType::Intraday,
            "NSE:RELIANCE",
            1447.00,
        )
        .with_trigger_price(1600.00)
        .with_client_id("1000000001");

        let json = serde_json::to_value(&request).expect("serializable");
        assert_eq!(json["exchangeSegment"], "NSE_EQ");
        assert_eq!(json["transactionType"], "BUY");
        assert_eq!(json["productType"], "INTRADAY");
        assert_eq!(json["triggerPrice"], 1600.0);
        assert_eq!(json["dhanClientId"], "1000000001");
    }

    #[test]
    fn negative_price_is_rejected() {
        let request = MarginRequest::new(
            ExchangeSegment::NseEq,
            TransactionType::Sell,
            5,
            ProductType::Cnc,
            "1333",
            -1.0,
        );
        assert_eq!(
            request.validate(),
            Err(ValidationError::InvalidPrice { field: "price" })
        );
    }

    #[test]
    fn insufficient_balance_flags_response() {
        let response = MarginResponse {
            insufficient_balance: 120.5,
            ..MarginResponse::default()
        };
        assert!(!response.is_sufficient());
    }
}
