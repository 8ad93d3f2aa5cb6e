pub mod plan;
pub mod pricing;

pub use plan::PlanOption;
pub use pricing::{InstallmentCommitment, PlanQuote, PricingInput, PricingResult};
