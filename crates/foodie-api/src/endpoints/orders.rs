// Order endpoints

use crate::error::Error;
use crate::executor::ApiRequest;
use crate::models::PaymentVerification;

/// `POST /orders/confirm` with the payment gateway callback data.
pub fn confirm_payment(verification: &PaymentVerification) -> Result<ApiRequest, Error> {
    let body = serde_json::to_value(verification).map_err(Error::Serialization)?;
    Ok(ApiRequest::post("/orders/confirm", body))
}
