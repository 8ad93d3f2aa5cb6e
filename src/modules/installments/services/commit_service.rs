use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{info, warn};

use crate::config::InstallmentSettings;
use crate::core::{AppError, Result};
use crate::modules::installments::models::{InstallmentCommitment, PlanOption};
use crate::modules::installments::services::PricingEngine;

/// What the checkout submits when the order is placed
#[derive(Debug, Clone, Deserialize)]
pub struct CommitRequest {
    pub plan_code: String,
    #[serde(default)]
    pub terms_accepted: bool,
    pub order_total: Decimal,
    /// Basis shown to the customer, if the checkout posted one
    #[serde(default)]
    pub basis: Option<Decimal>,
}

/// Recomputes installment figures at order finalization
///
/// Unlike the display path, an unknown plan code is a hard rejection here.
pub struct CommitService {
    settings: InstallmentSettings,
}

impl CommitService {
    pub fn new(settings: InstallmentSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &InstallmentSettings {
        &self.settings
    }

    /// Whether the installment method should be offered for a cart
    pub fn is_available(&self, cart_total: Decimal) -> bool {
        self.settings
            .is_available_for(self.settings.context_basis(cart_total))
    }

    /// Validates the submission and returns the figures to store on the order
    pub fn commit(&self, request: &CommitRequest) -> Result<InstallmentCommitment> {
        let plan: PlanOption = request.plan_code.parse().map_err(|err| {
            warn!(plan_code = %request.plan_code, "Rejecting commit with unknown plan");
            err
        })?;

        if !request.terms_accepted {
            warn!(plan = %plan, "Rejecting commit without accepted terms");
            return Err(AppError::TermsNotAccepted);
        }

        if request.order_total < Decimal::ZERO {
            return Err(AppError::validation("Order total cannot be negative"));
        }

        let basis_total = self.resolve_basis(request);
        if !self.settings.is_available_for(basis_total) {
            return Err(AppError::not_available(format!(
                "basis {} must exceed {}",
                basis_total, self.settings.min_total
            )));
        }

        let input = self.settings.pricing_input(basis_total);
        let result = PricingEngine::price_plan(&input, plan);

        info!(
            plan = %plan,
            basis = %basis_total,
            monthly = %result.monthly_payment,
            credit_cost = %result.total_credit_cost,
            "Installment plan committed"
        );

        Ok(InstallmentCommitment {
            plan,
            plan_months: plan.months(),
            plan_label: plan.label(),
            monthly_amount: result.monthly_payment,
            total_credit_cost: result.total_credit_cost,
            total_cost: result.total_cost,
            basis_total: input.principal,
            monthly_fee: input.monthly_fee,
            annual_rate_percent: input.annual_rate_percent,
            terms_accepted: request.terms_accepted,
            payment_method_label: self.settings.payment_method_label.clone(),
            committed_at: Utc::now(),
        })
    }

    /// Posted basis when positive, otherwise the basis the checkout displayed
    fn resolve_basis(&self, request: &CommitRequest) -> Decimal {
        match request.basis {
            Some(basis) if basis > Decimal::ZERO => basis,
            _ => self.settings.context_basis(request.order_total),
        }
    }
}
