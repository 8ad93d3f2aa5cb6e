use rust_decimal::Decimal;

use crate::core::money::{non_negative, round_money};
use crate::modules::installments::models::{PlanOption, PlanQuote, PricingInput, PricingResult};

const PERCENT: Decimal = Decimal::ONE_HUNDRED;
const MONTHS_PER_YEAR: u32 = 12;

/// Amortization math for fixed-duration installment plans
///
/// Every function here is pure and total. The checkout estimate and the
/// commit-time recomputation both go through [`PricingEngine::price`], so the
/// rounding order below is the single source of truth for both.
pub struct PricingEngine;

impl PricingEngine {
    /// Monthly rate derived from an annual percentage, negative rates clamped to 0
    pub fn monthly_rate(annual_rate_percent: Decimal) -> Decimal {
        non_negative(annual_rate_percent) / PERCENT / Decimal::from(MONTHS_PER_YEAR)
    }

    /// Unrounded monthly payment without fee.
    ///
    /// Standard annuity payment `P * r(1+r)^n / ((1+r)^n - 1)`, falling back
    /// to straight-line `P / n` when the rate is zero and to `0` when there
    /// are no periods.
    pub fn monthly_base(principal: Decimal, annual_rate_percent: Decimal, months: u32) -> Decimal {
        if months == 0 {
            return Decimal::ZERO;
        }

        let principal = non_negative(principal);
        let rate = Self::monthly_rate(annual_rate_percent);
        if rate <= Decimal::ZERO {
            return principal / Decimal::from(months);
        }

        // (1+r)^n / ((1+r)^n - 1) tends to 1 once the power no longer fits
        let factor = match Self::compound(Decimal::ONE + rate, months) {
            Some(pow) => pow / (pow - Decimal::ONE),
            None => Decimal::ONE,
        };

        principal.saturating_mul(rate).saturating_mul(factor)
    }

    /// `max(0, monthly * months - principal)`, rounded after the multiplication
    pub fn total_credit_cost(
        monthly_payment_incl_fee: Decimal,
        months: u32,
        principal: Decimal,
        decimal_places: u32,
    ) -> Decimal {
        let total_payments = monthly_payment_incl_fee.saturating_mul(Decimal::from(months));
        non_negative(round_money(total_payments - principal, decimal_places))
    }

    /// Prices one plan duration for the given input
    pub fn price(input: &PricingInput, months: u32) -> PricingResult {
        let decimals = input.decimal_places;
        let base = Self::monthly_base(input.principal, input.annual_rate_percent, months);

        let monthly_payment = round_money(base.saturating_add(input.monthly_fee), decimals);
        let total_credit_cost =
            Self::total_credit_cost(monthly_payment, months, input.principal, decimals);
        let total_cost = round_money(input.principal.saturating_add(total_credit_cost), decimals);

        PricingResult {
            monthly_payment,
            total_credit_cost,
            total_cost,
        }
    }

    pub fn price_plan(input: &PricingInput, plan: PlanOption) -> PricingResult {
        Self::price(input, plan.months())
    }

    /// Prices every offered plan, shortest first
    pub fn quote_all(input: &PricingInput) -> Vec<PlanQuote> {
        PlanOption::ALL
            .into_iter()
            .map(|plan| PlanQuote {
                plan,
                months: plan.months(),
                label: plan.label(),
                result: Self::price_plan(input, plan),
            })
            .collect()
    }

    /// Integer power by repeated multiplication; `None` on overflow
    fn compound(base: Decimal, periods: u32) -> Option<Decimal> {
        (0..periods).try_fold(Decimal::ONE, |acc, _| acc.checked_mul(base))
    }
}
