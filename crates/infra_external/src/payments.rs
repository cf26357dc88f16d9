//! Stripe refund issuance
//!
//! Payout is modelled as a PaymentIntent for the settlement amount followed
//! by a Refund of that intent; the refund id is the transaction id recorded
//! on the claim. Neither call carries an idempotency key, so a failed call
//! is never resubmitted.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, instrument};

use core_kernel::{DomainPort, Money, PortError};
use domain_claims::{RefundIssuer, RefundTransactionId};

use crate::config::PaymentConfig;
use crate::http::{build_client, check_status, decode_json, map_transport_error};

const SERVICE: &str = "stripe";

#[derive(Debug, Deserialize)]
struct StripeObject {
    id: String,
}

/// `RefundIssuer` backed by the Stripe REST API
#[derive(Debug, Clone)]
pub struct StripeRefundIssuer {
    client: Client,
    config: PaymentConfig,
}

impl StripeRefundIssuer {
    pub fn new(config: PaymentConfig) -> Result<Self, PortError> {
        if config.api_key.trim().is_empty() {
            return Err(PortError::validation_field(
                "payments API key is not configured",
                "payments.api_key",
            ));
        }
        Ok(Self {
            client: build_client(config.timeout_secs)?,
            config,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn post_form(&self, path: &str, form: &[(&str, String)]) -> Result<StripeObject, PortError> {
        let response = self
            .client
            .post(self.url(path))
            .bearer_auth(&self.config.api_key)
            .form(form)
            .send()
            .await
            .map_err(|e| map_transport_error(SERVICE, self.config.timeout_secs, e))?;
        let response = check_status(SERVICE, response).await?;
        decode_json(SERVICE, response).await
    }
}

/// Form fields for the PaymentIntent covering `amount`
fn payment_intent_form(amount: &Money, payee_email: &str) -> Result<Vec<(&'static str, String)>, PortError> {
    let minor_units = amount
        .to_minor_units()
        .map_err(|e| PortError::validation_field(e.to_string(), "amount"))?;
    if minor_units <= 0 {
        return Err(PortError::validation_field(
            format!("refund amount must be positive, got {}", amount),
            "amount",
        ));
    }
    Ok(vec![
        ("amount", minor_units.to_string()),
        ("currency", amount.currency().code().to_lowercase()),
        ("receipt_email", payee_email.to_string()),
        ("payment_method_types[]", "card".to_string()),
    ])
}

impl DomainPort for StripeRefundIssuer {}

#[async_trait]
impl RefundIssuer for StripeRefundIssuer {
    #[instrument(skip(self, payee_email), fields(amount = %amount))]
    async fn issue_refund(
        &self,
        amount: Money,
        payee_email: &str,
    ) -> Result<RefundTransactionId, PortError> {
        let form = payment_intent_form(&amount, payee_email)?;
        let intent = self.post_form("/v1/payment_intents", &form).await?;
        info!(payment_intent = %intent.id, "PaymentIntent created");

        let refund = self
            .post_form("/v1/refunds", &[("payment_intent", intent.id)])
            .await?;
        info!(refund = %refund.id, "Refund created");

        Ok(RefundTransactionId::new(refund.id))
    }
}
