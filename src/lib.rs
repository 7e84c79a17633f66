//! Quack backend library
//!
//! Exposes the synthetic ledger and the HTTP router for the binary and tests.

pub mod api;
pub mod config;
pub mod ledger;
pub mod middleware;
