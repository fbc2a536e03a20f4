use dhan_core::{DhanClient, MarginRequest};
use serde_json::Value;

use crate::cli::MarginArgs;
use crate::error::CliError;

pub async fn run(args: &MarginArgs, client: &DhanClient) -> Result<Value, CliError> {
    let mut request = MarginRequest::new(
        args.segment,
        args.side,
        args.quantity,
        args.product,
        args.security_id.as_str(),
        args.price,
    );
    if let Some(trigger_price) = args.trigger_price {
        request = request.with_trigger_price(trigger_price);
    }
    request.validate()?;

    let margin = client.calculate_margin(&request).await?;
    let mut data = serde_json::to_value(margin)?;
    if let Value::Object(fields) = &mut data {
        fields.insert(String::from("sufficient"), Value::Bool(margin.is_sufficient()));
    }
    Ok(data)
}
