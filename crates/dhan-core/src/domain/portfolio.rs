use serde::{Deserialize, Serialize};

use super::{ExchangeSegment, ProductType};
use crate::error::ValidationError;

/// Open or closed-today position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Position {
    pub dhan_client_id: String,
    pub trading_symbol: String,
    pub security_id: String,
    /// `LONG`, `SHORT` or `CLOSED`.
    pub position_type: String,
    pub exchange_segment: String,
    pub product_type: String,
    pub buy_avg: f64,
    pub cost_price: f64,
    pub buy_qty: i64,
    pub sell_avg: f64,
    pub sell_qty: i64,
    pub net_qty: i64,
    pub realized_profit: f64,
    pub unrealized_profit: f64,
    pub rbi_reference_rate: f64,
    pub multiplier: i64,
    pub carry_forward_buy_qty: i64,
    pub carry_forward_sell_qty: i64,
    pub carry_forward_buy_value: f64,
    pub carry_forward_sell_value: f64,
    pub day_buy_qty: i64,
    pub day_sell_qty: i64,
    pub day_buy_value: f64,
    pub day_sell_value: f64,
    pub drv_expiry_date: String,
    pub drv_option_type: String,
    pub drv_strike_price: f64,
    pub cross_currency: bool,
}

/// Demat holding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Holding {
    pub exchange: String,
    pub trading_symbol: String,
    pub security_id: String,
    pub isin: String,
    pub total_qty: i64,
    pub dp_qty: i64,
    pub t1_qty: i64,
    #[serde(rename = "mtf_tq_qty")]
    pub mtf_t1_qty: i64,
    #[serde(rename = "mtf_qty")]
    pub mtf_qty: i64,
    pub available_qty: i64,
    pub collateral_qty: i64,
    pub avg_cost_price: f64,
    pub last_traded_price: f64,
}

impl Holding {
    pub fn market_value(&self) -> f64 {
        self.total_qty as f64 * self.last_traded_price
    }
}

/// Account-level balances.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FundLimit {
    pub dhan_client_id: String,
    /// Spelled `availabelBalance` by the service.
    #[serde(rename = "availabelBalance")]
    pub available_balance: f64,
    pub sod_limit: f64,
    pub collateral_amount: f64,
    pub receivable_amount: f64,
    pub utilized_amount: f64,
    pub blocked_payout_amount: f64,
    pub withdrawable_balance: f64,
}

/// Moves an open position between product types, e.g. intraday to delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertPositionRequest {
    #[serde(default)]
    pub dhan_client_id: String,
    pub from_product_type: ProductType,
    pub exchange_segment: ExchangeSegment,
    pub position_type: String,
    pub security_id: String,
    #[serde(default)]
    pub trading_symbol: String,
    pub convert_qty: u32,
    pub to_product_type: ProductType,
}

impl ConvertPositionRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.security_id.trim().is_empty() {
            return Err(ValidationError::EmptyField("securityId"));
        }
        if self.convert_qty == 0 {
            return Err(ValidationError::ZeroQuantity);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fund_limit_keeps_service_spelling_on_the_wire() {
        let body = r#"{"dhanClientId":"1000000001","availabelBalance":98440.0,"sodLimit":113642,"withdrawableBalance":98310.0}"#;

        let funds: FundLimit = serde_json::from_str(body).expect("valid body");
        assert_eq!(funds.available_balance, 98440.0);
        assert_eq!(funds.sod_limit, 113642.0);

        let encoded = serde_json::to_value(&funds).expect("serializable");
        assert!(encoded.get("availabelBalance").is_some());
    }

    #[test]
    fn holding_reads_mixed_case_fields() {
        let body = r#"[{"exchange":"ALL","tradingSymbol":"HDFC","securityId":"1330","isin":"INE001A01036","totalQty":10,"mtf_tq_qty":2,"mtf_qty":3,"avgCostPrice":2655.0,"lastTradedPrice":2700.0}]"#;

        let holdings: Vec<Holding> = serde_json::from_str(body).expect("valid body");
        assert_eq!(holdings[0].mtf_t1_qty, 2);
        assert_eq!(holdings[0].mtf_qty, 3);
        assert_eq!(holdings[0].market_value(), 27000.0);
    }

    #[test]
    fn conversion_requires_quantity() {
        let request = ConvertPositionRequest {
            dhan_client_id: String::new(),
            from_product_type: ProductType::Intraday,
            exchange_segment: ExchangeSegment::NseEq,
            position_type: String::from("LONG"),
            security_id: String::from("11536"),
            trading_symbol: String::new(),
            convert_qty: 0,
            to_product_type: ProductType::Cnc,
        };
        assert_eq!(request.validate(), Err(ValidationError::ZeroQuantity));
    }
}
