use price_table_core::catalog::{bundled, parse_catalog, Catalog};
use price_table_core::cost::Usage;
use price_table_core::sort::{Direction, SortKey};
use price_table_core::view::{TableView, COLUMNS, NOT_AVAILABLE};

const SMALL: &str = r#"
[[category.chat]]
name = "alpha-large"
provider = "A"
logo = "/logos/a.svg"
sample_spec = { max_tokens = 32000, max_output_tokens = 4096, input_cost_per_token = 0.000002, output_cost_per_token = 0.000004 }

[[category.chat]]
name = "beta"
provider = "B"
sample_spec = { max_tokens = 8000, input_cost_per_token = 0.000001 }

[[category.chat]]
name = "alpha-small"
provider = "A"
sample_spec = { max_tokens = 128000, max_output_tokens = 8192, input_cost_per_token = 0.0000001, output_cost_per_token = 0.0000002 }

[[category.audio_speech]]
name = "voice"
provider = "C"
sample_spec = { input_cost_per_token = 0.000015 }
"#;

fn small() -> Catalog {
    parse_catalog(SMALL).expect("fixture parses")
}

fn row_names(view: &TableView, catalog: &Catalog) -> Vec<String> {
    view.rows(catalog).into_iter().map(|r| r.name).collect()
}

#[test]
fn unknown_category_renders_no_rows() {
    let catalog = small();
    let view = TableView::new("video");
    assert!(view.rows(&catalog).is_empty());

    let view = TableView::new("no_such_mode");
    assert!(view.rows(bundled().unwrap()).is_empty());
}

#[test]
fn search_then_sort() {
    let catalog = small();
    let mut view = TableView::new("chat");
    view.set_search("ALPHA");
    assert_eq!(row_names(&view, &catalog), ["alpha-large", "alpha-small"]);

    view.request_sort(SortKey::InputCostPerToken);
    assert_eq!(row_names(&view, &catalog), ["alpha-small", "alpha-large"]);

    view.request_sort(SortKey::InputCostPerToken);
    assert_eq!(view.sort.direction, Direction::Descending);
    assert_eq!(row_names(&view, &catalog), ["alpha-large", "alpha-small"]);
}

#[test]
fn header_clicks_cycle_direction() {
    let mut view = TableView::new("chat");
    let key = COLUMNS[3].sort_key.expect("output length is sortable");
    let mut seen = Vec::new();
    for _ in 0..3 {
        view.request_sort(key);
        seen.push(view.sort.direction);
    }
    assert_eq!(
        seen,
        [Direction::Ascending, Direction::Descending, Direction::Ascending]
    );
}

#[test]
fn category_switch_keeps_sort_and_search() {
    let catalog = small();
    let mut view = TableView::new("chat");
    view.set_search("v");
    view.request_sort(SortKey::MaxTokens);
    view.select_category("audio_speech");
    assert_eq!(view.sort.key, Some(SortKey::MaxTokens));
    assert_eq!(row_names(&view, &catalog), ["voice"]);
}

#[test]
fn calculator_mode_changes_total_column_only() {
    let catalog = small();
    let mut view = TableView::new("chat");
    let plain = view.rows(&catalog);
    assert_eq!(plain[0].total_cost, "$6.00");

    view.set_calculator(Some(Usage {
        input_amount: 1000.0,
        output_amount: 500.0,
        api_calls: 10.0,
    }));
    let calc = view.rows(&catalog);
    assert_eq!(calc[0].total_cost, "$0.04");
    assert_eq!(calc[0].input_price, plain[0].input_price);
    assert_eq!(calc[0].output_price, plain[0].output_price);
}

#[test]
fn bundled_gpt4o_usage_total_rounds_half_up() {
    let catalog = bundled().unwrap();
    let mut view = TableView::new("chat");
    view.set_search("gpt-4o");
    view.set_calculator(Some(Usage {
        input_amount: 1000.0,
        output_amount: 1000.0,
        api_calls: 10.0,
    }));
    let rows = view.rows(catalog);
    let gpt4o = rows.iter().find(|r| r.name == "gpt-4o").expect("gpt-4o missing");
    assert_eq!(gpt4o.total_cost, "$0.13");
}

#[test]
fn missing_cost_is_na_regardless_of_mode() {
    let catalog = small();
    let mut view = TableView::new("chat");
    view.set_search("beta");
    for usage in [None, Some(Usage::default())] {
        view.set_calculator(usage);
        let rows = view.rows(&catalog);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].output_price, NOT_AVAILABLE);
        assert_eq!(rows[0].total_cost, NOT_AVAILABLE);
        assert_eq!(rows[0].output_length, NOT_AVAILABLE);
        assert_eq!(rows[0].input_price, "1.00");
    }
}

#[test]
fn tabs_list_categories_with_labels() {
    let catalog = small();
    let view = TableView::new("chat");
    let tabs = view.tabs(&catalog);
    assert_eq!(tabs.len(), 2);
    assert_eq!(tabs[0].key, "audio_speech");
    assert_eq!(tabs[0].label, "TTS (Text To Speech)");
    assert!(!tabs[0].selected);
    assert_eq!(tabs[1].label, "Chat");
    assert!(tabs[1].selected);
}

#[test]
fn cycle_category_wraps() {
    let catalog = small();
    let mut view = TableView::new("chat");
    view.cycle_category(&catalog, 1);
    assert_eq!(view.category, "audio_speech");
    view.cycle_category(&catalog, 1);
    assert_eq!(view.category, "chat");
    view.cycle_category(&catalog, -1);
    assert_eq!(view.category, "audio_speech");

    let mut lost = TableView::new("video");
    lost.cycle_category(&catalog, 1);
    assert_eq!(lost.category, "audio_speech");
    let mut lost = TableView::new("video");
    lost.cycle_category(&catalog, -1);
    assert_eq!(lost.category, "chat");

    for category in ["video", "chat"] {
        let mut still = TableView::new(category);
        still.cycle_category(&catalog, 0);
        assert_eq!(still.category, category);
    }
}

#[test]
fn rows_serialize_for_json_output() {
    let catalog = small();
    let view = TableView::new("audio_speech");
    let json = serde_json::to_value(view.rows(&catalog)).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{
            "name": "voice",
            "provider": "C",
            "logo": "",
            "context_length": "N/A",
            "output_length": "N/A",
            "input_price": "15.00",
            "output_price": "N/A",
            "total_cost": "N/A"
        }])
    );
}
