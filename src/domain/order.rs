// Order line domain model
use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};
use std::fmt;

/// One calendar month of one year, used as the trend axis.
///
/// Ordering is chronological, and the zero-padded `YYYY-MM` label sorts
/// lexically in the same order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthPeriod {
    year: i32,
    month: u32,
}

impl MonthPeriod {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MonthPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for MonthPeriod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A single transaction line. Several lines may share one `order_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    pub order_id: String,
    pub order_date: NaiveDate,
    pub ship_date: NaiveDate,
    pub year: i32,
    pub month: u32,
    pub month_period: MonthPeriod,
    pub region: String,
    pub category: String,
    pub sub_category: String,
    pub segment: String,
    pub product_name: String,
    pub sales: f64,
    pub profit: f64,
}

impl OrderLine {
    /// Build a line, deriving the calendar fields from `order_date`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        order_id: String,
        order_date: NaiveDate,
        ship_date: NaiveDate,
        region: String,
        category: String,
        sub_category: String,
        segment: String,
        product_name: String,
        sales: f64,
        profit: f64,
    ) -> Self {
        let month_period = MonthPeriod::from_date(order_date);
        Self {
            order_id,
            order_date,
            ship_date,
            year: month_period.year(),
            month: month_period.month(),
            month_period,
            region,
            category,
            sub_category,
            segment,
            product_name,
            sales,
            profit,
        }
    }
}
