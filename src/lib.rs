//! Installment plan pricing for checkout
//!
//! Prices 6/12/24/36 month plans (annuity payment plus monthly fee), keeps the
//! displayed estimate in step with the customer's plan selection, and
//! recomputes the figures authoritatively when the order is committed.

pub mod config;
pub mod core;
pub mod logging;
pub mod modules;

// Re-export commonly used types
pub use modules::installments;
pub use modules::installments::{PlanOption, PricingEngine, PricingInput, PricingResult};
