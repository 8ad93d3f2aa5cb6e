use base64::prelude::*;
use hmac::{Hmac, Mac};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::config::ProviderConfig;
use crate::core::money::to_minor_units;
use crate::core::{AppError, Result};
use crate::modules::installments::models::InstallmentCommitment;

type HmacSha256 = Hmac<Sha256>;

/// Customer details optionally passed to the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandoffCustomer {
    pub email: String,
    pub name: String,
    pub phone: String,
}

/// Where the provider sends the customer (and its status callback) afterwards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnUrls {
    pub success: String,
    pub cancel: String,
    pub callback: String,
}

/// Order facts the handoff needs beyond the commitment itself
#[derive(Debug, Clone)]
pub struct HandoffOrder {
    pub order_id: String,
    pub order_total: Decimal,
    /// ISO currency code, e.g. "NOK"
    pub currency: String,
    pub decimal_places: u32,
    pub customer: Option<HandoffCustomer>,
    pub return_urls: ReturnUrls,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandoffCalc {
    pub basis: Decimal,
    pub months: u32,
    pub apr_percent: Decimal,
    pub monthly_fee: Decimal,
    /// Monthly payment including fee
    pub monthly: Decimal,
    /// Interest plus fees
    pub total_credit: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandoffPayload {
    pub merchant_key: String,
    pub order_id: String,
    /// Order total in minor units
    pub amount: i64,
    pub currency: String,
    pub plan_id: String,
    pub calc: HandoffCalc,
    pub return_urls: ReturnUrls,
    pub ts: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<HandoffCustomer>,
}

/// Form fields for the auto-submitted POST to the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignedHandoff {
    pub action: String,
    /// Base64 of the JSON payload
    pub payload: String,
    /// Hex HMAC-SHA256 of the JSON payload, empty without a secret
    pub signature: String,
}

/// Builds the signed payload handed to an external installment provider.
pub struct HandoffBuilder {
    config: ProviderConfig,
}

impl HandoffBuilder {
    pub fn new(config: ProviderConfig) -> Self {
        Self { config }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.forwarding_enabled()
    }

    pub fn build_payload(
        &self,
        order: &HandoffOrder,
        commitment: &InstallmentCommitment,
    ) -> Result<HandoffPayload> {
        let amount = to_minor_units(order.order_total, order.decimal_places).ok_or_else(|| {
            AppError::validation(format!("Order total {} out of range", order.order_total))
        })?;

        let customer = if self.config.send_customer {
            order.customer.clone()
        } else {
            None
        };

        Ok(HandoffPayload {
            merchant_key: self.config.api_key.clone(),
            order_id: order.order_id.clone(),
            amount,
            currency: order.currency.clone(),
            plan_id: commitment.plan.code().to_string(),
            calc: HandoffCalc {
                basis: commitment.basis_total,
                months: commitment.plan_months,
                apr_percent: commitment.annual_rate_percent,
                monthly_fee: commitment.monthly_fee,
                monthly: commitment.monthly_amount,
                total_credit: commitment.total_credit_cost,
            },
            return_urls: order.return_urls.clone(),
            ts: commitment.committed_at.timestamp(),
            customer,
        })
    }

    /// Serializes, signs and encodes the payload for form transport
    pub fn sign(&self, payload: &HandoffPayload) -> Result<SignedHandoff> {
        let json = serde_json::to_string(payload)?;

        Ok(SignedHandoff {
            action: self.config.provider_url.clone(),
            payload: BASE64_STANDARD.encode(json.as_bytes()),
            signature: self.signature_for(json.as_bytes())?,
        })
    }

    /// Builds and signs in one step; `None` when forwarding is off
    pub fn prepare(
        &self,
        order: &HandoffOrder,
        commitment: &InstallmentCommitment,
    ) -> Result<Option<SignedHandoff>> {
        if !self.is_enabled() {
            return Ok(None);
        }

        let payload = self.build_payload(order, commitment)?;
        let signed = self.sign(&payload)?;

        tracing::info!(
            order_id = %order.order_id,
            plan = %commitment.plan,
            signed = !signed.signature.is_empty(),
            "Prepared provider handoff"
        );

        Ok(Some(signed))
    }

    fn signature_for(&self, message: &[u8]) -> Result<String> {
        if self.config.api_secret.is_empty() {
            return Ok(String::new());
        }

        let mut mac = HmacSha256::new_from_slice(self.config.api_secret.as_bytes())
            .map_err(|e| AppError::internal(format!("Invalid HMAC key: {}", e)))?;
        mac.update(message);

        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}
