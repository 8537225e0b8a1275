//! Data models for pay stub processing.

pub mod config;
pub mod paystub;
