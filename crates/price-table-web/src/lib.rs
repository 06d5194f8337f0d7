use wasm_bindgen::prelude::*;

use price_table_core::catalog::{self, Catalog};
use price_table_core::cost::{self, Rates, Usage};
use price_table_core::sort::{Direction, SortKey, SortState};
use price_table_core::view::TableView;

fn bundled() -> Option<&'static Catalog> {
    catalog::bundled().ok()
}

// ---------------------------------------------------------------------------
// Category selector
// ---------------------------------------------------------------------------

/// Category tabs of the bundled catalog: [{key, label, selected}].
#[wasm_bindgen]
pub fn categories(selected: &str) -> JsValue {
    let Some(catalog) = bundled() else {
        return JsValue::NULL;
    };
    let tabs = TableView::new(selected).tabs(catalog);
    serde_wasm_bindgen::to_value(&tabs).unwrap_or(JsValue::NULL)
}

#[wasm_bindgen]
pub fn category_label(key: &str) -> String {
    catalog::category_label(key)
}

// ---------------------------------------------------------------------------
// Table rows
// ---------------------------------------------------------------------------

/// Filtered, sorted, formatted rows for one category.
///
/// `sort_key` may be empty for catalog order. Usage figures are only used
/// when `calculator` is true. Unknown categories give an empty array; a bad
/// sort key or direction gives null.
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn table_rows(
    category: &str,
    search: &str,
    sort_key: &str,
    direction: &str,
    calculator: bool,
    input_amount: f64,
    output_amount: f64,
    api_calls: f64,
) -> JsValue {
    let Some(catalog) = bundled() else {
        return JsValue::NULL;
    };
    let sort = if sort_key.is_empty() {
        SortState::default()
    } else {
        match (sort_key.parse::<SortKey>(), direction.parse::<Direction>()) {
            (Ok(k), Ok(d)) => SortState::by(k, d),
            _ => return JsValue::NULL,
        }
    };

    let mut view = TableView::new(category);
    view.set_search(search);
    view.sort = sort;
    if calculator {
        view.set_calculator(Some(Usage {
            input_amount,
            output_amount,
            api_calls,
        }));
    }
    serde_wasm_bindgen::to_value(&view.rows(catalog)).unwrap_or(JsValue::NULL)
}

/// Next sort state after a header click: [key, direction].
#[wasm_bindgen]
pub fn request_sort(current_key: &str, current_direction: &str, clicked: &str) -> JsValue {
    let Ok(clicked) = clicked.parse::<SortKey>() else {
        return JsValue::NULL;
    };
    let mut state = SortState {
        key: current_key.parse().ok(),
        direction: current_direction.parse().unwrap_or_default(),
    };
    state.request(clicked);
    let direction = match state.direction {
        Direction::Ascending => "ascending",
        Direction::Descending => "descending",
    };
    serde_wasm_bindgen::to_value(&(clicked.field_name(), direction)).unwrap_or(JsValue::NULL)
}

// ---------------------------------------------------------------------------
// Cost utilities
// ---------------------------------------------------------------------------

/// Usage cost for explicit per-token rates.
#[wasm_bindgen]
pub fn calculate_cost(
    input_cost_per_token: f64,
    output_cost_per_token: f64,
    input_amount: f64,
    output_amount: f64,
    api_calls: f64,
) -> f64 {
    let rates = Rates {
        input_cost_per_token,
        output_cost_per_token,
    };
    cost::calculate_cost(
        rates,
        &Usage {
            input_amount,
            output_amount,
            api_calls,
        },
    )
}

/// Two decimal places.
#[wasm_bindgen]
pub fn format_money(v: f64) -> String {
    cost::format_money(v)
}
