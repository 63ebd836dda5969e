// Superstore sales dashboard - filter, aggregate and serve chart data
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
