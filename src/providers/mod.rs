//! Rate provider implementations.

pub mod currency_api;
