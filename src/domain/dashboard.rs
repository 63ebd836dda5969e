// Dashboard domain model
use super::chart::{ChartData, TileData};
use super::filter::FilterSelection;
use super::metrics::{DashboardMetrics, LossMaker};
use serde::Serialize;

/// Loss-maker warning shown above the charts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub title: String,
    pub message: String,
    pub items: Vec<LossMaker>,
}

/// Everything the presentation layer needs for one filter state
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub title: String,
    pub filters: FilterSelection,
    pub record_count: usize,
    pub tiles: Vec<TileData>,
    pub alert: Option<Alert>,
    pub charts: Vec<ChartData>,
    pub metrics: DashboardMetrics,
}
