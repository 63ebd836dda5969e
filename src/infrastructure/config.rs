use crate::infrastructure::csv_repository::TextEncoding;
use config::builder::DefaultState;
use config::ConfigBuilder;
use serde::Deserialize;
use thiserror::Error;

const DASHBOARD_CONFIG: &str = "config/dashboard";
const WIDGETS_CONFIG: &str = "config/widgets";
const ENV_PREFIX: &str = "DASHBOARD";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DashboardConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub dataset: DatasetSettings,
    #[serde(default)]
    pub dashboard: DashboardSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatasetSettings {
    #[serde(default = "default_dataset_path")]
    pub path: String,
    #[serde(default)]
    pub encoding: TextEncoding,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardSettings {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_top_products")]
    pub top_products: usize,
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_dataset_path() -> String {
    "Sample_-_Superstore.csv".to_string()
}

fn default_title() -> String {
    "Superstore Sales Dashboard".to_string()
}

fn default_top_products() -> usize {
    crate::application::aggregation::DEFAULT_TOP_PRODUCTS
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self { bind: default_bind() }
    }
}

impl Default for DatasetSettings {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
            encoding: TextEncoding::default(),
        }
    }
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            title: default_title(),
            top_products: default_top_products(),
        }
    }
}

impl DashboardConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.dashboard.top_products == 0 {
            return Err(ConfigError::Invalid(
                "dashboard.top_products must be at least 1".to_string(),
            ));
        }
        if self.dataset.path.trim().is_empty() {
            return Err(ConfigError::Invalid("dataset.path is empty".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct WidgetsConfig {
    #[serde(default)]
    pub charts: Vec<ChartConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChartConfig {
    pub id: String,
    pub title: String,
    pub kind: String,
    #[serde(default)]
    pub series: Vec<SeriesConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeriesConfig {
    pub id: String,
    pub name: String,
    pub color: Option<String>,
}

impl ChartConfig {
    fn new(id: &str, title: &str, kind: &str, series: &[(&str, &str, &str)]) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            kind: kind.to_string(),
            series: series
                .iter()
                .map(|(id, name, color)| SeriesConfig {
                    id: id.to_string(),
                    name: name.to_string(),
                    color: Some(color.to_string()),
                })
                .collect(),
        }
    }
}

impl Default for WidgetsConfig {
    fn default() -> Self {
        const BLUE: &str = "#3b82f6";
        const GREEN: &str = "#22c55e";
        const SLATE: &str = "#64748b";

        Self {
            charts: vec![
                ChartConfig::new(
                    "monthly_trend",
                    "Monthly Sales Trend",
                    "line",
                    &[("sales", "Sales", BLUE), ("profit", "Profit", GREEN)],
                ),
                ChartConfig::new(
                    "category_sales",
                    "Sales by Category",
                    "pie",
                    &[("sales", "Sales", BLUE)],
                ),
                ChartConfig::new(
                    "region_sales",
                    "Sales by Region",
                    "horizontal_bar",
                    &[("sales", "Sales", BLUE)],
                ),
                ChartConfig::new(
                    "top_products",
                    "Top 10 Products",
                    "horizontal_bar",
                    &[("sales", "Sales", SLATE)],
                ),
                ChartConfig::new(
                    "segment_sales",
                    "Sales by Segment",
                    "grouped_bar",
                    &[("sales", "Sales", BLUE), ("profit", "Profit", GREEN)],
                ),
                ChartConfig::new(
                    "sub_category_profit",
                    "Profit vs Sales by Sub-Category",
                    "scatter",
                    &[("sub_categories", "Sub-Category", BLUE)],
                ),
            ],
        }
    }
}

impl WidgetsConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        for chart in &self.charts {
            if crate::domain::chart::ChartKind::parse(&chart.kind).is_none() {
                return Err(ConfigError::Invalid(format!(
                    "chart '{}' has unknown kind '{}'",
                    chart.id, chart.kind
                )));
            }
        }
        Ok(())
    }
}

pub fn load_dashboard_config() -> Result<DashboardConfig, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name(DASHBOARD_CONFIG).required(false))
        .add_source(env_overrides());
    dashboard_config_from(builder)
}

/// `DASHBOARD__DATASET__PATH` style overrides
fn env_overrides() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}

fn dashboard_config_from(
    builder: ConfigBuilder<DefaultState>,
) -> Result<DashboardConfig, ConfigError> {
    let config: DashboardConfig = builder.build()?.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

/// Chart layout; the built-in layout applies when no widgets file defines charts
pub fn load_widgets_config() -> Result<WidgetsConfig, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name(WIDGETS_CONFIG).required(false));
    widgets_config_from(builder)
}

fn widgets_config_from(builder: ConfigBuilder<DefaultState>) -> Result<WidgetsConfig, ConfigError> {
    let widgets: WidgetsConfig = builder.build()?.try_deserialize()?;
    let widgets = if widgets.charts.is_empty() {
        WidgetsConfig::default()
    } else {
        widgets
    };
    widgets.validate()?;
    Ok(widgets)
}
