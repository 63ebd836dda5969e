// Presentation layer - HTTP surface consumed by the dashboard UI
pub mod app_state;
pub mod error;
pub mod handlers;
