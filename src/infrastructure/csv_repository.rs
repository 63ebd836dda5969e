// CSV repository implementation
use crate::application::sales_repository::SalesRepository;
use crate::domain::error::DatasetError;
use crate::domain::order::OrderLine;
use crate::domain::table::SalesTable;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Instant;

const DATE_FORMAT: &str = "%m/%d/%Y";

/// Text encoding of the source file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum TextEncoding {
    #[serde(rename = "utf-8", alias = "utf8")]
    Utf8,
    #[default]
    #[serde(rename = "latin1", alias = "latin-1", alias = "iso-8859-1")]
    Latin1,
}

impl TextEncoding {
    pub fn name(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Latin1 => "latin1",
        }
    }

    fn decode(&self, bytes: Vec<u8>) -> Result<String, DatasetError> {
        let text = match self {
            TextEncoding::Utf8 => String::from_utf8(bytes).map_err(|_| {
                DatasetError::InvalidEncoding {
                    encoding: self.name(),
                }
            })?,
            // Latin-1 maps every byte to the code point of the same value
            TextEncoding::Latin1 => bytes.into_iter().map(char::from).collect(),
        };
        Ok(match text.strip_prefix('\u{FEFF}') {
            Some(stripped) => stripped.to_string(),
            None => text,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CsvSalesRepository {
    path: PathBuf,
    encoding: TextEncoding,
}

impl CsvSalesRepository {
    pub fn new(path: impl Into<PathBuf>, encoding: TextEncoding) -> Self {
        Self {
            path: path.into(),
            encoding,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SalesRepository for CsvSalesRepository {
    async fn load_orders(&self) -> Result<SalesTable, DatasetError> {
        let started = Instant::now();
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| DatasetError::Unreadable {
                path: self.path.clone(),
                source,
            })?;

        let text = self.encoding.decode(bytes)?;
        let table = parse_orders(&text)?;

        tracing::info!(
            path = %self.path.display(),
            encoding = self.encoding.name(),
            rows = table.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Loaded sales dataset"
        );
        Ok(table)
    }
}

/// Positions of the required columns in the header row
struct Columns {
    order_id: usize,
    order_date: usize,
    ship_date: usize,
    region: usize,
    category: usize,
    sub_category: usize,
    segment: usize,
    product_name: usize,
    sales: usize,
    profit: usize,
}

impl Columns {
    fn locate(headers: &csv::StringRecord) -> Result<Self, DatasetError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))
        };

        Ok(Self {
            order_id: find("Order ID")?,
            order_date: find("Order Date")?,
            ship_date: find("Ship Date")?,
            region: find("Region")?,
            category: find("Category")?,
            sub_category: find("Sub-Category")?,
            segment: find("Segment")?,
            product_name: find("Product Name")?,
            sales: find("Sales")?,
            profit: find("Profit")?,
        })
    }
}

/// Parse decoded CSV text into the base table
pub fn parse_orders(text: &str) -> Result<SalesTable, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());

    let columns = Columns::locate(reader.headers()?)?;

    let mut records = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result?;
        let row = index + 1;
        let field = |i: usize| record.get(i).unwrap_or("").trim();

        records.push(OrderLine::new(
            field(columns.order_id).to_string(),
            parse_date(field(columns.order_date), row, "Order Date")?,
            parse_date(field(columns.ship_date), row, "Ship Date")?,
            field(columns.region).to_string(),
            field(columns.category).to_string(),
            field(columns.sub_category).to_string(),
            field(columns.segment).to_string(),
            field(columns.product_name).to_string(),
            parse_amount(field(columns.sales), row, "Sales")?,
            parse_amount(field(columns.profit), row, "Profit")?,
        ));
    }

    Ok(SalesTable::new(records))
}

fn parse_date(value: &str, row: usize, column: &'static str) -> Result<NaiveDate, DatasetError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| DatasetError::InvalidDate {
        row,
        column,
        value: value.to_string(),
    })
}

fn parse_amount(value: &str, row: usize, column: &'static str) -> Result<f64, DatasetError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| DatasetError::InvalidAmount {
            row,
            column,
            value: value.to_string(),
        })
}
