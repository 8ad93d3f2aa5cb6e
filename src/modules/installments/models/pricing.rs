use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::money::{non_negative, DEFAULT_DECIMAL_PLACES};
use crate::modules::installments::models::PlanOption;

/// Inputs for one checkout session's installment pricing
///
/// Values are clamped to be non-negative on construction. Absent values are
/// zero, except `decimal_places` which defaults to 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingInput {
    /// Basis amount financed by the plan
    pub principal: Decimal,
    /// Annual interest rate in percent (9.9 means 9.9%)
    pub annual_rate_percent: Decimal,
    /// Fixed fee added to every monthly payment
    pub monthly_fee: Decimal,
    pub decimal_places: u32,
}

impl PricingInput {
    pub fn new(
        principal: Decimal,
        annual_rate_percent: Decimal,
        monthly_fee: Decimal,
        decimal_places: u32,
    ) -> Self {
        Self {
            principal: non_negative(principal),
            annual_rate_percent: non_negative(annual_rate_percent),
            monthly_fee: non_negative(monthly_fee),
            decimal_places,
        }
    }

    /// Same terms applied to a different basis
    pub fn with_principal(&self, principal: Decimal) -> Self {
        Self::new(
            principal,
            self.annual_rate_percent,
            self.monthly_fee,
            self.decimal_places,
        )
    }
}

impl Default for PricingInput {
    fn default() -> Self {
        Self::new(
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
            DEFAULT_DECIMAL_PLACES,
        )
    }
}

/// Priced plan figures, rounded to the input's decimal places
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingResult {
    /// Monthly payment including the monthly fee
    pub monthly_payment: Decimal,
    /// Interest plus fees over the life of the plan
    pub total_credit_cost: Decimal,
    /// Principal plus credit cost
    pub total_cost: Decimal,
}

/// One row of the plan comparison table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlanQuote {
    pub plan: PlanOption,
    pub months: u32,
    pub label: &'static str,
    #[serde(flatten)]
    pub result: PricingResult,
}

/// Figures recorded on an order when the installment plan is committed
///
/// Always produced by recomputation on the server, never copied from a
/// client-submitted estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallmentCommitment {
    pub plan: PlanOption,
    pub plan_months: u32,
    pub plan_label: &'static str,
    pub monthly_amount: Decimal,
    pub total_credit_cost: Decimal,
    pub total_cost: Decimal,
    /// Principal the calculation was based on
    pub basis_total: Decimal,
    pub monthly_fee: Decimal,
    pub annual_rate_percent: Decimal,
    pub terms_accepted: bool,
    pub payment_method_label: String,
    pub committed_at: DateTime<Utc>,
}
