// Aggregate result types produced by the aggregation set
use super::order::MonthPeriod;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct KpiTotals {
    pub total_sales: f64,
    pub total_profit: f64,
    pub total_orders: usize,
    /// Profit as a percentage of sales; 0 when there are no positive sales
    pub profit_margin: f64,
}

/// A sub-category whose summed profit is negative
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LossMaker {
    pub sub_category: String,
    pub profit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub period: MonthPeriod,
    pub sales: f64,
    pub profit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSales {
    pub key: String,
    pub sales: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupTotals {
    pub key: String,
    pub sales: f64,
    pub profit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSales {
    pub product_name: String,
    /// Truncated name for chart axes
    pub label: String,
    pub sales: f64,
}

/// Every aggregate for one filter state
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardMetrics {
    pub kpis: KpiTotals,
    pub loss_makers: Vec<LossMaker>,
    pub monthly_trend: Vec<TrendPoint>,
    pub category_sales: Vec<GroupSales>,
    pub region_sales: Vec<GroupSales>,
    pub top_products: Vec<ProductSales>,
    pub segment_totals: Vec<GroupTotals>,
    pub sub_category_totals: Vec<GroupTotals>,
}
