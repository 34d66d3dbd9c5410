//! Row models for the `owners` and `cars` tables.

pub mod car;
pub mod owner;
