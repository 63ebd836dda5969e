// Filter engine - set-membership predicates over the base table
use super::order::OrderLine;
use super::table::SalesTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The three multi-select filter controls.
///
/// An empty set matches nothing; it does not mean "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub years: BTreeSet<i32>,
    pub regions: BTreeSet<String>,
    pub categories: BTreeSet<String>,
}

impl FilterSelection {
    pub fn new(
        years: impl IntoIterator<Item = i32>,
        regions: impl IntoIterator<Item = impl Into<String>>,
        categories: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            years: years.into_iter().collect(),
            regions: regions.into_iter().map(Into::into).collect(),
            categories: categories.into_iter().map(Into::into).collect(),
        }
    }

    /// Every value present in the table, the default state of each control
    pub fn all(table: &SalesTable) -> Self {
        Self::new(table.years(), table.regions(), table.categories())
    }

    pub fn matches(&self, line: &OrderLine) -> bool {
        self.years.contains(&line.year)
            && self.regions.contains(&line.region)
            && self.categories.contains(&line.category)
    }

    /// Borrow the records that satisfy all three predicates
    pub fn apply<'a>(&self, table: &'a SalesTable) -> FilteredOrders<'a> {
        FilteredOrders {
            lines: table.records().iter().filter(|l| self.matches(l)).collect(),
        }
    }
}

/// A filtered view over the base table, owned by one recompute pass.
#[derive(Debug, Clone, Default)]
pub struct FilteredOrders<'a> {
    lines: Vec<&'a OrderLine>,
}

impl<'a> FilteredOrders<'a> {
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a OrderLine> + '_ {
        self.lines.iter().copied()
    }
}

/// Values offered by the filter controls
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub years: Vec<i32>,
    pub regions: Vec<String>,
    pub categories: Vec<String>,
}

impl FilterOptions {
    pub fn from_table(table: &SalesTable) -> Self {
        Self {
            years: table.years(),
            regions: table.regions(),
            categories: table.categories(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::sample_table;

    #[test]
    fn test_full_selection_returns_whole_table() {
        let table = sample_table();
        let filtered = FilterSelection::all(&table).apply(&table);
        assert_eq!(filtered.len(), table.len());
    }

    #[test]
    fn test_every_filtered_record_satisfies_all_predicates() {
        let table = sample_table();
        let selections = [
            FilterSelection::new([2014], ["East", "West"], ["Furniture", "Office Supplies"]),
            FilterSelection::new([2015, 2016], ["Central"], ["Technology", "Office Supplies"]),
            FilterSelection::new([2014, 2015, 2016], ["West"], ["Technology"]),
            FilterSelection::new([2013], ["East"], ["Furniture"]),
        ];

        for selection in selections {
            let filtered = selection.apply(&table);
            assert!(filtered.len() <= table.len());
            for line in filtered.iter() {
                assert!(selection.years.contains(&line.year));
                assert!(selection.regions.contains(&line.region));
                assert!(selection.categories.contains(&line.category));
            }
            let expected = table.records().iter().filter(|l| selection.matches(l)).count();
            assert_eq!(filtered.len(), expected);
        }
    }

    #[test]
    fn test_empty_set_on_any_dimension_matches_nothing() {
        let table = sample_table();
        let all = FilterSelection::all(&table);

        let mut no_years = all.clone();
        no_years.years.clear();
        let mut no_regions = all.clone();
        no_regions.regions.clear();
        let mut no_categories = all;
        no_categories.categories.clear();

        assert!(no_years.apply(&table).is_empty());
        assert!(no_regions.apply(&table).is_empty());
        assert!(no_categories.apply(&table).is_empty());
    }

    #[test]
    fn test_apply_does_not_touch_base_table() {
        let table = sample_table();
        let before = table.records().to_vec();
        let _ = FilterSelection::new([2014], ["East"], ["Furniture"]).apply(&table);
        assert_eq!(table.records(), before.as_slice());
    }

    #[test]
    fn test_unknown_values_match_nothing() {
        let table = sample_table();
        let selection = FilterSelection::new([2014], ["Atlantis"], ["Furniture"]);
        assert!(selection.apply(&table).is_empty());
    }

    #[test]
    fn test_filter_options_mirror_table() {
        let table = sample_table();
        let options = FilterOptions::from_table(&table);
        assert_eq!(options.years, vec![2014, 2015, 2016]);
        assert_eq!(options.regions, vec!["East", "West", "Central"]);
    }
}
