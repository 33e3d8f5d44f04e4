//! sellerdash: deterministic seller dashboard metrics.
//!
//! Generates a synthetic product catalog, aggregates hourly unit sales
//! across comparison windows, and filters the catalog by a free-text query.
//! The `sellerdash` binary renders the results as tables, JSON or CSV.

pub mod analytics;
pub mod catalog;
pub mod cli;
pub mod comparison;
pub mod config;
pub mod dashboard;
pub mod filter;
pub mod utils;
