pub mod health;
pub mod installments;
