pub mod error;
pub mod money;

pub use error::{AppError, Result};
pub use money::{format_amount, non_negative, parse_money, round_money};
