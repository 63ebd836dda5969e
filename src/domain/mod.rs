// Domain layer - Sales records, filters and view models
pub mod chart;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod metrics;
pub mod order;
pub mod table;

#[cfg(test)]
pub mod fixtures;
