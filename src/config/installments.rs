use rust_decimal::Decimal;
use serde::Deserialize;
use std::env;

use crate::core::money::{parse_money, DEFAULT_DECIMAL_PLACES, MAX_DECIMAL_PLACES};
use crate::core::{AppError, Result};
use crate::modules::installments::models::PricingInput;

/// Label stored on orders paid through installments unless overridden
pub const DEFAULT_PAYMENT_METHOD_LABEL: &str = "Wattn Installment";

/// Which amount the calculator finances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BasisMode {
    /// Use the cart or order total
    OrderTotal,
    /// Use the configured fixed amount when it is positive
    Fixed,
}

impl std::str::FromStr for BasisMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "order_total" | "" => Ok(BasisMode::OrderTotal),
            "fixed" => Ok(BasisMode::Fixed),
            other => Err(AppError::configuration(format!(
                "Invalid INSTALLMENT_BASIS_MODE: {}",
                other
            ))),
        }
    }
}

/// Installment terms configured by the merchant
#[derive(Debug, Clone, Deserialize)]
pub struct InstallmentSettings {
    pub annual_rate_percent: Decimal,
    pub monthly_fee: Decimal,
    pub decimal_places: u32,
    pub currency_symbol: String,
    /// The method is offered only when the basis exceeds this amount
    pub min_total: Decimal,
    pub basis_mode: BasisMode,
    pub basis_fixed: Option<Decimal>,
    /// Payment method name stored on committed orders
    pub payment_method_label: String,
}

impl Default for InstallmentSettings {
    fn default() -> Self {
        Self {
            annual_rate_percent: Decimal::ZERO,
            monthly_fee: Decimal::from(30),
            decimal_places: DEFAULT_DECIMAL_PLACES,
            currency_symbol: String::new(),
            min_total: Decimal::from(9000),
            basis_mode: BasisMode::OrderTotal,
            basis_fixed: None,
            payment_method_label: DEFAULT_PAYMENT_METHOD_LABEL.to_string(),
        }
    }
}

impl InstallmentSettings {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            annual_rate_percent: money_var("INSTALLMENT_APR_PERCENT")?
                .unwrap_or(defaults.annual_rate_percent),
            monthly_fee: money_var("INSTALLMENT_MONTHLY_FEE")?.unwrap_or(defaults.monthly_fee),
            decimal_places: env::var("INSTALLMENT_DECIMALS")
                .unwrap_or_else(|_| DEFAULT_DECIMAL_PLACES.to_string())
                .trim()
                .parse()
                .map_err(|_| AppError::configuration("Invalid INSTALLMENT_DECIMALS"))?,
            currency_symbol: env::var("INSTALLMENT_CURRENCY_SYMBOL").unwrap_or_default(),
            min_total: money_var("INSTALLMENT_MIN_TOTAL")?.unwrap_or(defaults.min_total),
            basis_mode: env::var("INSTALLMENT_BASIS_MODE")
                .unwrap_or_default()
                .parse()?,
            basis_fixed: money_var("INSTALLMENT_BASIS_FIXED")?,
            payment_method_label: env::var("INSTALLMENT_PAYMENT_METHOD_LABEL")
                .ok()
                .map(|label| label.trim().to_string())
                .filter(|label| !label.is_empty())
                .unwrap_or(defaults.payment_method_label),
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.decimal_places > MAX_DECIMAL_PLACES {
            return Err(AppError::configuration(format!(
                "INSTALLMENT_DECIMALS must be at most {}",
                MAX_DECIMAL_PLACES
            )));
        }

        if self.annual_rate_percent < Decimal::ZERO {
            return Err(AppError::configuration("APR cannot be negative"));
        }

        if self.monthly_fee < Decimal::ZERO {
            return Err(AppError::configuration("Monthly fee cannot be negative"));
        }

        if self.min_total < Decimal::ZERO {
            return Err(AppError::configuration("Minimum total cannot be negative"));
        }

        Ok(())
    }

    /// Basis shown at checkout: the fixed amount when configured, else the cart total
    pub fn context_basis(&self, cart_total: Decimal) -> Decimal {
        match (self.basis_mode, self.basis_fixed) {
            (BasisMode::Fixed, Some(fixed)) if fixed > Decimal::ZERO => fixed,
            _ => cart_total,
        }
    }

    /// Whether the installment method may be offered for this basis
    pub fn is_available_for(&self, basis: Decimal) -> bool {
        basis > self.min_total
    }

    /// Engine input for a given basis under these terms
    pub fn pricing_input(&self, principal: Decimal) -> PricingInput {
        PricingInput::new(
            principal,
            self.annual_rate_percent,
            self.monthly_fee,
            self.decimal_places,
        )
    }
}

/// Reads an optional money-valued variable; set-but-unparseable is an error
fn money_var(name: &str) -> Result<Option<Decimal>> {
    match env::var(name) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => parse_money(&raw)
            .map(Some)
            .ok_or_else(|| AppError::configuration(format!("Invalid {}: {}", name, raw))),
        Err(_) => Ok(None),
    }
}
