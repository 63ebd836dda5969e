// Dashboard service - Use case for recomputing the dashboard per filter state
use crate::application::aggregation;
use crate::application::sales_repository::SalesRepository;
use crate::domain::chart::{ChartData, ChartKind, ChartPoint, SeriesData, TileData};
use crate::domain::dashboard::{Alert, Dashboard};
use crate::domain::error::DatasetError;
use crate::domain::filter::{FilterOptions, FilterSelection};
use crate::domain::metrics::{DashboardMetrics, GroupSales, GroupTotals, KpiTotals, LossMaker};
use crate::domain::table::SalesTable;
use crate::infrastructure::config::{ChartConfig, DashboardSettings, WidgetsConfig};
use std::sync::Arc;

const ALERT_TITLE: &str = "Loss-Making Products Detected";
const ALERT_ADVICE: &str = "Consider reviewing pricing or discontinuing these items.";

/// One labelled group ready to be turned into chart points
struct ChartRow {
    label: String,
    sales: f64,
    profit: f64,
}

/// Rows behind one chart; `has_profit` is false for sales-only breakdowns
struct ChartRows {
    rows: Vec<ChartRow>,
    has_profit: bool,
}

#[derive(Clone)]
pub struct DashboardService {
    table: Arc<SalesTable>,
    widgets_config: WidgetsConfig,
    settings: DashboardSettings,
}

impl DashboardService {
    pub fn new(
        table: Arc<SalesTable>,
        widgets_config: WidgetsConfig,
        settings: DashboardSettings,
    ) -> Self {
        Self {
            table,
            widgets_config,
            settings,
        }
    }

    /// Load the base table once and build the service around it
    pub async fn initialize(
        repository: &dyn SalesRepository,
        widgets_config: WidgetsConfig,
        settings: DashboardSettings,
    ) -> Result<Self, DatasetError> {
        let table = repository.load_orders().await?;
        Ok(Self::new(Arc::new(table), widgets_config, settings))
    }

    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions::from_table(&self.table)
    }

    pub fn default_selection(&self) -> FilterSelection {
        FilterSelection::all(&self.table)
    }

    /// Filter, aggregate and lay out one full dashboard pass
    pub fn recompute(&self, selection: &FilterSelection) -> Dashboard {
        let orders = selection.apply(&self.table);
        let metrics = aggregation::summarize(&orders, self.settings.top_products);

        tracing::debug!(
            years = selection.years.len(),
            regions = selection.regions.len(),
            categories = selection.categories.len(),
            rows = orders.len(),
            loss_makers = metrics.loss_makers.len(),
            "Recomputed dashboard"
        );

        Dashboard {
            title: self.settings.title.clone(),
            filters: selection.clone(),
            record_count: orders.len(),
            tiles: build_tiles(&metrics.kpis),
            alert: build_alert(&metrics.loss_makers),
            charts: self.build_charts(&metrics),
            metrics,
        }
    }

    fn build_charts(&self, metrics: &DashboardMetrics) -> Vec<ChartData> {
        let mut charts = Vec::new();

        for chart_config in &self.widgets_config.charts {
            let Some(kind) = ChartKind::parse(&chart_config.kind) else {
                tracing::warn!("Skipping chart {} - unknown kind {}", chart_config.id, chart_config.kind);
                continue;
            };
            let Some(data) = chart_rows(&chart_config.id, metrics) else {
                tracing::warn!("Skipping chart {} - no such dataset", chart_config.id);
                continue;
            };

            let series = build_series(chart_config, kind, &data);
            if series.is_empty() {
                tracing::warn!("Skipping chart {} - no usable series", chart_config.id);
                continue;
            }

            charts.push(ChartData::new(
                chart_config.id.clone(),
                chart_config.title.clone(),
                kind,
                series,
            ));
        }

        charts
    }
}

fn chart_rows(chart_id: &str, metrics: &DashboardMetrics) -> Option<ChartRows> {
    let chart_rows = match chart_id {
        "monthly_trend" => ChartRows {
            rows: metrics
                .monthly_trend
                .iter()
                .map(|p| ChartRow {
                    label: p.period.label(),
                    sales: p.sales,
                    profit: p.profit,
                })
                .collect(),
            has_profit: true,
        },
        "category_sales" => sales_rows(&metrics.category_sales),
        "region_sales" => sales_rows(&metrics.region_sales),
        "top_products" => ChartRows {
            rows: metrics
                .top_products
                .iter()
                .map(|p| ChartRow {
                    label: p.label.clone(),
                    sales: p.sales,
                    profit: 0.0,
                })
                .collect(),
            has_profit: false,
        },
        "segment_sales" => totals_rows(&metrics.segment_totals),
        "sub_category_profit" => totals_rows(&metrics.sub_category_totals),
        _ => return None,
    };
    Some(chart_rows)
}

fn sales_rows(groups: &[GroupSales]) -> ChartRows {
    ChartRows {
        rows: groups
            .iter()
            .map(|g| ChartRow {
                label: g.key.clone(),
                sales: g.sales,
                profit: 0.0,
            })
            .collect(),
        has_profit: false,
    }
}

fn totals_rows(groups: &[GroupTotals]) -> ChartRows {
    ChartRows {
        rows: groups
            .iter()
            .map(|g| ChartRow {
                label: g.key.clone(),
                sales: g.sales,
                profit: g.profit,
            })
            .collect(),
        has_profit: true,
    }
}

/// Scatter series plot sales against profit; other kinds plot the measure
/// named by the series id
fn build_series(chart_config: &ChartConfig, kind: ChartKind, data: &ChartRows) -> Vec<SeriesData> {
    let mut series_list = Vec::new();

    for series_config in &chart_config.series {
        let points: Option<Vec<ChartPoint>> = match (kind, series_config.id.as_str()) {
            (ChartKind::Scatter, _) if data.has_profit => Some(
                data.rows
                    .iter()
                    .map(|r| ChartPoint::xy(r.label.clone(), r.sales, r.profit))
                    .collect(),
            ),
            (ChartKind::Scatter, _) => None,
            (_, "sales") => Some(
                data.rows
                    .iter()
                    .map(|r| ChartPoint::new(r.label.clone(), r.sales))
                    .collect(),
            ),
            (_, "profit") if data.has_profit => Some(
                data.rows
                    .iter()
                    .map(|r| ChartPoint::new(r.label.clone(), r.profit))
                    .collect(),
            ),
            _ => None,
        };

        match points {
            Some(points) => series_list.push(SeriesData::new(
                series_config.id.clone(),
                series_config.name.clone(),
                series_config.color.clone(),
                points,
            )),
            None => {
                tracing::warn!(
                    "Skipping series {} for chart {} - measure not available",
                    series_config.id,
                    chart_config.id
                );
            }
        }
    }

    series_list
}

fn build_tiles(kpis: &KpiTotals) -> Vec<TileData> {
    vec![
        TileData::new("total_sales", "Total Sales", Some("$"), kpis.total_sales, 0),
        TileData::new("total_profit", "Total Profit", Some("$"), kpis.total_profit, 0),
        TileData::new("total_orders", "Total Orders", None, kpis.total_orders as f64, 0),
        TileData::new("profit_margin", "Profit Margin", Some("%"), kpis.profit_margin, 1),
    ]
}

fn build_alert(loss_makers: &[LossMaker]) -> Option<Alert> {
    if loss_makers.is_empty() {
        return None;
    }

    let items = loss_makers
        .iter()
        .map(|l| format!("{} ({})", l.sub_category, format_currency(l.profit)))
        .collect::<Vec<_>>()
        .join(", ");

    Some(Alert {
        title: ALERT_TITLE.to_string(),
        message: format!("{} => {}", items, ALERT_ADVICE),
        items: loss_makers.to_vec(),
    })
}

/// Whole dollars with thousands separators, e.g. `$-1,234`
fn format_currency(value: f64) -> String {
    let rounded = format!("{:.0}", value);
    let (sign, digits) = match rounded.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", rounded.as_str()),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("${}{}", sign, grouped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::sample_table;
    use async_trait::async_trait;

    struct StaticRepository(Option<SalesTable>);

    #[async_trait]
    impl SalesRepository for StaticRepository {
        async fn load_orders(&self) -> Result<SalesTable, DatasetError> {
            self.0
                .clone()
                .ok_or_else(|| DatasetError::MissingColumn("Order Date".to_string()))
        }
    }

    fn service() -> DashboardService {
        DashboardService::new(
            Arc::new(sample_table()),
            WidgetsConfig::default(),
            DashboardSettings::default(),
        )
    }

    fn chart<'a>(dashboard: &'a Dashboard, id: &str) -> &'a ChartData {
        dashboard.charts.iter().find(|c| c.id == id).unwrap()
    }

    #[test]
    fn test_recompute_default_selection() {
        let service = service();
        let dashboard = service.recompute(&service.default_selection());

        assert_eq!(dashboard.title, "Superstore Sales Dashboard");
        assert_eq!(dashboard.record_count, 7);

        let tile_ids: Vec<&str> = dashboard.tiles.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(tile_ids, vec!["total_sales", "total_profit", "total_orders", "profit_margin"]);
        assert_eq!(dashboard.tiles[2].value, 6.0);
        assert_eq!(dashboard.tiles[3].precision, 1);

        let alert = dashboard.alert.as_ref().unwrap();
        assert_eq!(alert.title, "Loss-Making Products Detected");
        assert_eq!(
            alert.message,
            "Machines ($-300), Tables ($-70), Binders ($-68) => Consider reviewing pricing or discontinuing these items."
        );
        assert_eq!(alert.items.len(), 3);
    }

    #[test]
    fn test_charts_follow_widget_layout() {
        let service = service();
        let dashboard = service.recompute(&service.default_selection());

        let ids: Vec<&str> = dashboard.charts.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["monthly_trend", "category_sales", "region_sales", "top_products", "segment_sales", "sub_category_profit"]
        );

        let trend = chart(&dashboard, "monthly_trend");
        assert_eq!(trend.kind, ChartKind::Line);
        assert_eq!(trend.series.len(), 2);
        let trend_sales: f64 = trend.series[0].points.iter().map(|p| p.y).sum();
        assert!((trend_sales - dashboard.metrics.kpis.total_sales).abs() < 1e-9);

        let regions = chart(&dashboard, "region_sales");
        let labels: Vec<&str> = regions.series[0].points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["West", "East", "Central"]);

        let scatter = chart(&dashboard, "sub_category_profit");
        assert_eq!(scatter.kind, ChartKind::Scatter);
        let tables = scatter.series[0].points.iter().find(|p| p.label == "Tables").unwrap();
        assert_eq!(tables.x, Some(700.0));
        assert_eq!(tables.y, -70.0);
    }

    #[test]
    fn test_empty_selection_has_zero_tiles_and_no_alert() {
        let service = service();
        let mut selection = service.default_selection();
        selection.years.clear();
        let dashboard = service.recompute(&selection);

        assert_eq!(dashboard.record_count, 0);
        assert!(dashboard.tiles.iter().all(|t| t.value == 0.0));
        assert!(dashboard.alert.is_none());
        assert_eq!(dashboard.charts.len(), 6);
        assert!(dashboard
            .charts
            .iter()
            .all(|c| c.series.iter().all(|s| s.points.is_empty())));
    }

    #[test]
    fn test_profit_series_on_sales_only_chart_is_skipped() {
        let mut widgets = WidgetsConfig::default();
        widgets.charts.retain(|c| c.id == "category_sales");
        widgets.charts[0].series.push(crate::infrastructure::config::SeriesConfig {
            id: "profit".to_string(),
            name: "Profit".to_string(),
            color: None,
        });
        let service = DashboardService::new(Arc::new(sample_table()), widgets, DashboardSettings::default());
        let dashboard = service.recompute(&service.default_selection());

        assert_eq!(dashboard.charts.len(), 1);
        let series_ids: Vec<&str> = dashboard.charts[0].series.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(series_ids, vec!["sales"]);

        let mut empty = service.default_selection();
        empty.categories.clear();
        let dashboard = service.recompute(&empty);
        assert_eq!(dashboard.charts[0].series.len(), 1);
    }

    #[test]
    fn test_top_products_setting_limits_chart() {
        let settings = DashboardSettings {
            top_products: 2,
            ..DashboardSettings::default()
        };
        let service = DashboardService::new(Arc::new(sample_table()), WidgetsConfig::default(), settings);
        let dashboard = service.recompute(&service.default_selection());

        let names: Vec<&str> = dashboard
            .metrics
            .top_products
            .iter()
            .map(|p| p.product_name.as_str())
            .collect();
        assert_eq!(names, vec!["Apple iPhone", "Cisco Machine"]);
        assert_eq!(chart(&dashboard, "top_products").series[0].points.len(), 2);
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(-300.0), "$-300");
        assert_eq!(format_currency(-12345.6), "$-12,346");
        assert_eq!(format_currency(1234567.0), "$1,234,567");
        assert_eq!(format_currency(999.4), "$999");
    }

    #[tokio::test]
    async fn test_initialize_loads_table_once() {
        let repository = StaticRepository(Some(sample_table()));
        let service = DashboardService::initialize(&repository, WidgetsConfig::default(), DashboardSettings::default())
            .await
            .unwrap();

        let cloned = service.clone();
        assert!(Arc::ptr_eq(&service.table, &cloned.table));
        assert_eq!(service.filter_options().years, vec![2014, 2015, 2016]);
    }

    #[tokio::test]
    async fn test_initialize_propagates_load_error() {
        let repository = StaticRepository(None);
        let result = DashboardService::initialize(&repository, WidgetsConfig::default(), DashboardSettings::default()).await;
        assert!(matches!(result, Err(DatasetError::MissingColumn(_))));
    }
}
