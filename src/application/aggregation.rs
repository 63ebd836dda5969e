// Aggregation set - group-by sums over a filtered view
//
// Groups come out in lexical key order. Value sorts are stable, so ties
// keep that order.
use crate::domain::filter::FilteredOrders;
use crate::domain::metrics::{
    DashboardMetrics, GroupSales, GroupTotals, KpiTotals, LossMaker, ProductSales, TrendPoint,
};
use crate::domain::order::OrderLine;
use std::collections::{BTreeMap, HashSet};

pub const DEFAULT_TOP_PRODUCTS: usize = 10;
const PRODUCT_LABEL_CHARS: usize = 25;

#[derive(Debug, Clone, Copy, Default)]
struct Sums {
    sales: f64,
    profit: f64,
}

fn sum_by<'a, K, F>(orders: &FilteredOrders<'a>, key: F) -> BTreeMap<K, Sums>
where
    K: Ord,
    F: Fn(&'a OrderLine) -> K,
{
    let mut groups: BTreeMap<K, Sums> = BTreeMap::new();
    for line in orders.iter() {
        let entry = groups.entry(key(line)).or_default();
        entry.sales += line.sales;
        entry.profit += line.profit;
    }
    groups
}

fn sales_by(orders: &FilteredOrders<'_>, key: impl Fn(&OrderLine) -> &str) -> Vec<GroupSales> {
    sum_by(orders, |l| key(l))
        .into_iter()
        .map(|(key, sums)| GroupSales {
            key: key.to_string(),
            sales: sums.sales,
        })
        .collect()
}

fn totals_by(orders: &FilteredOrders<'_>, key: impl Fn(&OrderLine) -> &str) -> Vec<GroupTotals> {
    sum_by(orders, |l| key(l))
        .into_iter()
        .map(|(key, sums)| GroupTotals {
            key: key.to_string(),
            sales: sums.sales,
            profit: sums.profit,
        })
        .collect()
}

pub fn kpi_totals(orders: &FilteredOrders<'_>) -> KpiTotals {
    let mut total_sales = 0.0;
    let mut total_profit = 0.0;
    let mut order_ids = HashSet::new();
    for line in orders.iter() {
        total_sales += line.sales;
        total_profit += line.profit;
        order_ids.insert(line.order_id.as_str());
    }

    KpiTotals {
        total_sales,
        total_profit,
        total_orders: order_ids.len(),
        profit_margin: margin_percent(total_profit, total_sales),
    }
}

/// Profit over sales as a percentage, 0 unless sales are positive
pub fn margin_percent(profit: f64, sales: f64) -> f64 {
    if sales > 0.0 {
        profit / sales * 100.0
    } else {
        0.0
    }
}

/// Sub-categories with negative summed profit, most negative first
pub fn loss_makers(orders: &FilteredOrders<'_>) -> Vec<LossMaker> {
    let mut losses: Vec<LossMaker> = sum_by(orders, |l| l.sub_category.as_str())
        .into_iter()
        .filter(|(_, sums)| sums.profit < 0.0)
        .map(|(sub_category, sums)| LossMaker {
            sub_category: sub_category.to_string(),
            profit: sums.profit,
        })
        .collect();
    losses.sort_by(|a, b| a.profit.total_cmp(&b.profit));
    losses
}

pub fn monthly_trend(orders: &FilteredOrders<'_>) -> Vec<TrendPoint> {
    sum_by(orders, |l| l.month_period)
        .into_iter()
        .map(|(period, sums)| TrendPoint {
            period,
            sales: sums.sales,
            profit: sums.profit,
        })
        .collect()
}

pub fn sales_by_category(orders: &FilteredOrders<'_>) -> Vec<GroupSales> {
    sales_by(orders, |l| l.category.as_str())
}

/// Region sales, smallest first for a horizontal bar chart
pub fn sales_by_region(orders: &FilteredOrders<'_>) -> Vec<GroupSales> {
    let mut regions = sales_by(orders, |l| l.region.as_str());
    regions.sort_by(|a, b| a.sales.total_cmp(&b.sales));
    regions
}

/// The `limit` best-selling products, returned in ascending sales order
pub fn top_products(orders: &FilteredOrders<'_>, limit: usize) -> Vec<ProductSales> {
    let mut products: Vec<ProductSales> = sales_by(orders, |l| l.product_name.as_str())
        .into_iter()
        .map(|g| ProductSales {
            label: product_label(&g.key),
            product_name: g.key,
            sales: g.sales,
        })
        .collect();

    products.sort_by(|a, b| b.sales.total_cmp(&a.sales));
    products.truncate(limit);
    products.sort_by(|a, b| a.sales.total_cmp(&b.sales));
    products
}

fn product_label(name: &str) -> String {
    let short: String = name.chars().take(PRODUCT_LABEL_CHARS).collect();
    format!("{}...", short)
}

pub fn segment_totals(orders: &FilteredOrders<'_>) -> Vec<GroupTotals> {
    totals_by(orders, |l| l.segment.as_str())
}

pub fn sub_category_totals(orders: &FilteredOrders<'_>) -> Vec<GroupTotals> {
    totals_by(orders, |l| l.sub_category.as_str())
}

/// Run every aggregate over one filtered view
pub fn summarize(orders: &FilteredOrders<'_>, top_products_limit: usize) -> DashboardMetrics {
    DashboardMetrics {
        kpis: kpi_totals(orders),
        loss_makers: loss_makers(orders),
        monthly_trend: monthly_trend(orders),
        category_sales: sales_by_category(orders),
        region_sales: sales_by_region(orders),
        top_products: top_products(orders, top_products_limit),
        segment_totals: segment_totals(orders),
        sub_category_totals: sub_category_totals(orders),
    }
}
