pub mod installment_controller;

pub use installment_controller::{commit, configure, list_plans, quote, InstallmentState};
