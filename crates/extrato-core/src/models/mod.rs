//! Data models: words in, transaction records out.

pub mod config;
pub mod transaction;
pub mod word;
