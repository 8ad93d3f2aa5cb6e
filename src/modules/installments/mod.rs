pub mod controllers;
pub mod models;
pub mod services;

pub use controllers::{configure, InstallmentState};
pub use models::{InstallmentCommitment, PlanOption, PlanQuote, PricingInput, PricingResult};
pub use services::{CommitService, PricingEngine, SelectionController};
