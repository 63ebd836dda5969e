// Shared test fixtures
use super::order::OrderLine;
use super::table::SalesTable;
use chrono::NaiveDate;

#[allow(clippy::too_many_arguments)]
pub fn line(
    order_id: &str,
    (year, month, day): (i32, u32, u32),
    region: &str,
    category: &str,
    sub_category: &str,
    segment: &str,
    product_name: &str,
    sales: f64,
    profit: f64,
) -> OrderLine {
    let order_date = NaiveDate::from_ymd_opt(year, month, day).unwrap();
    OrderLine::new(
        order_id.to_string(),
        order_date,
        order_date + chrono::Days::new(3),
        region.to_string(),
        category.to_string(),
        sub_category.to_string(),
        segment.to_string(),
        product_name.to_string(),
        sales,
        profit,
    )
}

/// Seven lines over three years. Totals: sales 3000, profit -228, 6 orders.
/// Loss makers: Machines -300, Tables -70, Binders -68.
pub fn sample_table() -> SalesTable {
    SalesTable::new(vec![
        line("CA-1", (2014, 1, 5), "East", "Furniture", "Tables", "Consumer", "Bretford Table", 500.0, -120.0),
        line("CA-1", (2014, 1, 5), "East", "Furniture", "Chairs", "Consumer", "Hon Chair", 300.0, 30.0),
        line("CA-2", (2014, 2, 10), "West", "Office Supplies", "Binders", "Corporate", "GBC Binder", 40.0, 12.0),
        line("CA-3", (2015, 3, 15), "West", "Technology", "Phones", "Home Office", "Apple iPhone", 900.0, 180.0),
        line("CA-4", (2015, 11, 20), "Central", "Office Supplies", "Binders", "Consumer", "GBC Binder", 60.0, -80.0),
        line("CA-5", (2016, 12, 1), "East", "Furniture", "Tables", "Corporate", "Bretford Table", 200.0, 50.0),
        line("CA-6", (2016, 12, 24), "Central", "Technology", "Machines", "Consumer", "Cisco Machine", 1000.0, -300.0),
    ])
}

/// The two-record table from the dashboard's worked example.
pub fn two_record_table() -> SalesTable {
    SalesTable::new(vec![
        line("US-1", (2014, 6, 1), "East", "Furniture", "Tables", "Consumer", "Desk", 100.0, -10.0),
        line("US-2", (2015, 7, 1), "West", "Office", "Paper", "Corporate", "Copy Paper", 50.0, 5.0),
    ])
}
