// KPI tile and chart view models
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    pub y: f64,
}

impl ChartPoint {
    pub fn new(label: impl Into<String>, y: f64) -> Self {
        Self {
            label: label.into(),
            x: None,
            y,
        }
    }

    pub fn xy(label: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            label: label.into(),
            x: Some(x),
            y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileData {
    pub id: String,
    pub title: String,
    pub unit: Option<String>,
    pub value: f64,
    pub precision: u32,
}

impl TileData {
    pub fn new(id: &str, title: &str, unit: Option<&str>, value: f64, precision: u32) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            unit: unit.map(str::to_string),
            value,
            precision,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesData {
    pub id: String,
    pub name: String,
    pub color: Option<String>,
    pub points: Vec<ChartPoint>,
}

impl SeriesData {
    pub fn new(id: String, name: String, color: Option<String>, points: Vec<ChartPoint>) -> Self {
        Self {
            id,
            name,
            color,
            points,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Line,
    Pie,
    HorizontalBar,
    GroupedBar,
    Scatter,
}

impl ChartKind {
    pub fn parse(kind: &str) -> Option<Self> {
        match kind {
            "line" => Some(ChartKind::Line),
            "pie" => Some(ChartKind::Pie),
            "horizontal_bar" => Some(ChartKind::HorizontalBar),
            "grouped_bar" => Some(ChartKind::GroupedBar),
            "scatter" => Some(ChartKind::Scatter),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub id: String,
    pub title: String,
    pub kind: ChartKind,
    pub series: Vec<SeriesData>,
}

impl ChartData {
    pub fn new(id: String, title: String, kind: ChartKind, series: Vec<SeriesData>) -> Self {
        Self {
            id,
            title,
            kind,
            series,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_chart_kind() {
        assert_eq!(ChartKind::parse("horizontal_bar"), Some(ChartKind::HorizontalBar));
        assert_eq!(ChartKind::parse("scatter"), Some(ChartKind::Scatter));
        assert_eq!(ChartKind::parse("multiLine"), None);
    }

    #[test]
    fn test_category_point_omits_x() {
        let json = serde_json::to_value(ChartPoint::new("East", 10.0)).unwrap();
        assert_eq!(json, serde_json::json!({ "label": "East", "y": 10.0 }));

        let json = serde_json::to_value(ChartPoint::xy("Tables", 10.0, -2.5)).unwrap();
        assert_eq!(json["x"], 10.0);
    }
}
