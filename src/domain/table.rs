// Sales table - the immutable base record set
use super::order::OrderLine;
use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct SalesTable {
    records: Vec<OrderLine>,
}

impl SalesTable {
    pub fn new(records: Vec<OrderLine>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[OrderLine] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct order years, ascending
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.records.iter().map(|r| r.year).collect();
        years.sort_unstable();
        years.dedup();
        years
    }

    /// Distinct regions in first-seen order
    pub fn regions(&self) -> Vec<String> {
        distinct_in_order(self.records.iter().map(|r| r.region.as_str()))
    }

    /// Distinct categories in first-seen order
    pub fn categories(&self) -> Vec<String> {
        distinct_in_order(self.records.iter().map(|r| r.category.as_str()))
    }
}

fn distinct_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}
