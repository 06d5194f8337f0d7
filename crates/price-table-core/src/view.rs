//! Table view state and row derivation.
//!
//! A [`TableView`] holds the transient state (category, search term, sort
//! column, calculator usage). Rows are re-derived from the catalog on every
//! call: filter, then sort, then format cells.

use serde::Serialize;

use crate::catalog::{category_label, Catalog, ModelRecord};
use crate::cost::{calculate_cost, format_money, per_million_cell, Usage};
use crate::filter::filter_category;
use crate::sort::{sort, SortKey, SortState};

pub const NOT_AVAILABLE: &str = "N/A";

/// A table header. Numeric columns double as sort triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub title: &'static str,
    pub sort_key: Option<SortKey>,
}

pub const COLUMNS: [Column; 7] = [
    Column { title: "Model",                        sort_key: None },
    Column { title: "Provider",                     sort_key: None },
    Column { title: "Context Length",               sort_key: Some(SortKey::MaxTokens) },
    Column { title: "Output Length",                sort_key: Some(SortKey::MaxOutputTokens) },
    Column { title: "Input Price (per 1M tokens)",  sort_key: Some(SortKey::InputCostPerToken) },
    Column { title: "Output Price (per 1M tokens)", sort_key: Some(SortKey::OutputCostPerToken) },
    Column { title: "Total Cost",                   sort_key: None },
];

/// One entry of the category selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tab {
    pub key: String,
    pub label: String,
    pub selected: bool,
}

/// Display cells of one model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub name: String,
    pub provider: String,
    pub logo: String,
    pub context_length: String,
    pub output_length: String,
    pub input_price: String,
    pub output_price: String,
    pub total_cost: String,
}

impl Row {
    /// Cells in [`COLUMNS`] order.
    pub fn cells(&self) -> [&str; 7] {
        [
            self.name.as_str(),
            self.provider.as_str(),
            self.context_length.as_str(),
            self.output_length.as_str(),
            self.input_price.as_str(),
            self.output_price.as_str(),
            self.total_cost.as_str(),
        ]
    }
}

fn count_cell(v: Option<u64>) -> String {
    v.map(|n| n.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Derive display cells. With `calculator` set, the total column holds the
/// calculated usage cost, otherwise the combined price per 1M tokens.
pub fn row(model: &ModelRecord, calculator: Option<&Usage>) -> Row {
    let spec = &model.sample_spec;
    let total_cost = match (spec.rates(), calculator) {
        (None, _) => NOT_AVAILABLE.to_string(),
        (Some(rates), Some(usage)) => format!("${}", format_money(calculate_cost(rates, usage))),
        (Some(rates), None) => format!("${}", format_money(rates.total_per_million())),
    };
    Row {
        name: model.name.clone(),
        provider: model.provider.clone(),
        logo: model.logo.clone(),
        context_length: count_cell(spec.max_tokens),
        output_length: count_cell(spec.max_output_tokens),
        input_price: per_million_cell(spec.input_cost_per_token),
        output_price: per_million_cell(spec.output_cost_per_token),
        total_cost,
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableView {
    pub category: String,
    pub search: String,
    pub sort: SortState,
    pub calculator: Option<Usage>,
}

impl TableView {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            ..Default::default()
        }
    }

    pub fn select_category(&mut self, category: &str) {
        self.category = category.to_string();
    }

    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_string();
    }

    /// Header click on a sortable column.
    pub fn request_sort(&mut self, key: SortKey) {
        self.sort.request(key);
    }

    pub fn set_calculator(&mut self, usage: Option<Usage>) {
        self.calculator = usage;
    }

    /// Move the selected category `step` places through the catalog's keys, wrapping.
    /// A category missing from the catalog counts as the position before the first key.
    /// A zero step leaves the selection alone.
    pub fn cycle_category(&mut self, catalog: &Catalog, step: isize) {
        let keys: Vec<&str> = catalog.categories().collect();
        if keys.is_empty() || step == 0 {
            return;
        }
        let n = keys.len() as isize;
        let next = match keys.iter().position(|k| *k == self.category) {
            Some(i) => (i as isize + step).rem_euclid(n),
            None if step > 0 => (step - 1).rem_euclid(n),
            None => step.rem_euclid(n),
        };
        self.category = keys[next as usize].to_string();
    }

    /// Filtered and sorted records of the selected category.
    pub fn records<'a>(&self, catalog: &'a Catalog) -> Vec<&'a ModelRecord> {
        sort(filter_category(catalog, &self.category, &self.search), self.sort)
    }

    pub fn rows(&self, catalog: &Catalog) -> Vec<Row> {
        self.records(catalog)
            .into_iter()
            .map(|m| row(m, self.calculator.as_ref()))
            .collect()
    }

    pub fn tabs(&self, catalog: &Catalog) -> Vec<Tab> {
        catalog
            .categories()
            .map(|key| Tab {
                key: key.to_string(),
                label: category_label(key),
                selected: key == self.category,
            })
            .collect()
    }

    /// Header title with the sort marker: the direction arrow on the active
    /// column, `↕` on the other sortable ones.
    pub fn header(&self, column: &Column) -> String {
        match column.sort_key {
            Some(k) if self.sort.key == Some(k) => {
                format!("{} {}", column.title, self.sort.direction.arrow())
            }
            Some(_) => format!("{} \u{2195}", column.title),
            None => column.title.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::PricingSpec;
    use crate::sort::Direction;

    fn model(name: &str, input: Option<f64>, output: Option<f64>) -> ModelRecord {
        ModelRecord {
            name: name.to_string(),
            provider: "Test".to_string(),
            logo: String::new(),
            sample_spec: PricingSpec {
                max_tokens: Some(8192),
                max_output_tokens: None,
                input_cost_per_token: input,
                output_cost_per_token: output,
            },
        }
    }

    #[test]
    fn row_without_calculator_shows_combined_price() {
        let r = row(&model("m", Some(0.000003), Some(0.000015)), None);
        assert_eq!(r.input_price, "3.00");
        assert_eq!(r.output_price, "15.00");
        assert_eq!(r.total_cost, "$18.00");
        assert_eq!(r.context_length, "8192");
        assert_eq!(r.output_length, NOT_AVAILABLE);
    }

    #[test]
    fn row_with_calculator_shows_usage_cost() {
        let usage = Usage {
            input_amount: 1000.0,
            output_amount: 500.0,
            api_calls: 10.0,
        };
        let r = row(&model("m", Some(0.000002), Some(0.000004)), Some(&usage));
        assert_eq!(r.total_cost, "$0.04");
    }

    #[test]
    fn missing_input_cost_is_na_in_both_modes() {
        let m = model("m", None, Some(0.000004));
        let usage = Usage::default();
        for calc in [None, Some(&usage)] {
            let r = row(&m, calc);
            assert_eq!(r.input_price, NOT_AVAILABLE);
            assert_eq!(r.total_cost, NOT_AVAILABLE);
            assert_eq!(r.output_price, "4.00");
        }
    }

    #[test]
    fn headers_mark_sort_column() {
        let mut view = TableView::new("chat");
        assert_eq!(view.header(&COLUMNS[0]), "Model");
        assert_eq!(view.header(&COLUMNS[2]), "Context Length \u{2195}");

        view.request_sort(SortKey::MaxTokens);
        assert_eq!(view.header(&COLUMNS[2]), "Context Length \u{25b2}");
        view.request_sort(SortKey::MaxTokens);
        assert_eq!(view.sort.direction, Direction::Descending);
        assert_eq!(view.header(&COLUMNS[2]), "Context Length \u{25bc}");
    }

    #[test]
    fn cells_follow_column_order() {
        let r = row(&model("m", Some(0.000001), Some(0.000001)), None);
        let cells = r.cells();
        assert_eq!(cells.len(), COLUMNS.len());
        assert_eq!(cells[0], "m");
        assert_eq!(cells[6], "$2.00");
    }
}
