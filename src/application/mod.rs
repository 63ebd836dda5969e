// Application layer - Use cases over the sales table
pub mod aggregation;
pub mod dashboard_service;
pub mod sales_repository;
