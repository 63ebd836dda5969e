// Repository trait for sales data access
use crate::domain::error::DatasetError;
use crate::domain::table::SalesTable;
use async_trait::async_trait;

#[async_trait]
pub trait SalesRepository: Send + Sync {
    /// Read and parse the full order-line table
    async fn load_orders(&self) -> Result<SalesTable, DatasetError>;
}
