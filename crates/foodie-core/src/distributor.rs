// ── Distributor client ──
//
// Checkout-side calls: confirming a gateway payment and emptying the cart.
// The confirmation mirror only ever holds a confirmation the server
// reported as successful.

use std::sync::Arc;

use foodie_api::endpoints::{carts, orders};
use foodie_api::{HttpExecutor, PaymentConfirmation, PaymentVerification, StatusPayload};

use crate::error::CoreError;
use crate::resource::{ResourceClient, ResponseOrdering};
use crate::stream::Snapshot;

#[derive(Clone)]
pub struct DistributorClient {
    confirmation: ResourceClient<PaymentConfirmation>,
    cart: ResourceClient<StatusPayload>,
}

impl DistributorClient {
    pub fn new(executor: HttpExecutor, ordering: ResponseOrdering) -> Self {
        Self {
            confirmation: ResourceClient::new("payment", executor.clone(), ordering),
            cart: ResourceClient::new("cart", executor, ordering),
        }
    }

    /// `POST /orders/confirm`. A `success: false` answer is returned as
    /// [`CoreError::Rejected`] and leaves the mirror untouched. The session
    /// user id is filled in when the verification carries none.
    pub async fn verify_payment(
        &self,
        verification: &PaymentVerification,
    ) -> Result<Arc<PaymentConfirmation>, CoreError> {
        self.confirmation
            .mutate(
                |user_id| {
                    let mut body = verification.clone();
                    body.user_id.get_or_insert_with(|| user_id.to_owned());
                    Ok(orders::confirm_payment(&body)?)
                },
                |confirmation: PaymentConfirmation| {
                    if confirmation.success {
                        Ok(confirmation)
                    } else {
                        Err(CoreError::Rejected {
                            message: confirmation
                                .message
                                .unwrap_or_else(|| "payment verification failed".into()),
                        })
                    }
                },
            )
            .await
    }

    /// `DELETE /carts/clear-cart/{userId}`.
    pub async fn clear_cart(&self) -> Result<Arc<StatusPayload>, CoreError> {
        self.cart
            .mutate(|user_id| Ok(carts::clear_cart(user_id)), Ok)
            .await
    }

    pub fn last_confirmation(&self) -> Snapshot<PaymentConfirmation> {
        self.confirmation.current()
    }

    pub fn confirmation(&self) -> &ResourceClient<PaymentConfirmation> {
        &self.confirmation
    }

    pub fn cart(&self) -> &ResourceClient<StatusPayload> {
        &self.cart
    }

    pub(crate) fn reset(&self) {
        self.confirmation.reset();
        self.cart.reset();
    }
}
