use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use comfy_table::{presets, Cell, Color, ContentArrangement, Table};
use console::{Key, Style, Term};
use price_table_core::{
    catalog::{self, category_label, Catalog},
    cost::Usage,
    sort::SortKey,
    view::{TableView, COLUMNS, NOT_AVAILABLE},
};
use tracing_subscriber::EnvFilter;

// ── Palette ──────────────────────────────────────────────────────────

fn s_header() -> Style { Style::new().color256(252).bold() }  // bright gray, bold
fn s_dim() -> Style    { Style::new().color256(248) }         // light gray
fn s_tree() -> Style   { Style::new().color256(245) }         // mid gray
fn s_hint() -> Style   { Style::new().color256(243) }         // soft gray
fn s_err() -> Style    { Style::new().color256(167) }         // red
fn s_accent() -> Style { Style::new().color256(109) }         // teal accent

const C_HEAD: Color = Color::AnsiValue(243);
const C_SORTED: Color = Color::AnsiValue(109);
const C_NAME: Color = Color::AnsiValue(252);
const C_CELL: Color = Color::AnsiValue(248);
const C_NA: Color = Color::AnsiValue(240);
const C_TOTAL: Color = Color::AnsiValue(114);

fn sep(width: usize) -> String {
    s_tree().apply_to("\u{2500}".repeat(width)).to_string()
}

// ── CLI Args ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "price-table",
    about = "Sortable, filterable AI model pricing table with a usage cost calculator",
    version,
    after_help = "examples:\n  \
        price-table                                   (chat models, catalog order)\n  \
        price-table claude                            (filter by name)\n  \
        price-table -c embedding -s input_cost_per_token\n  \
        price-table -s max_tokens -s max_tokens       (second click sorts descending)\n  \
        price-table --input 1000 --output 500 --calls 10\n  \
        price-table -c audio_speech --json\n  \
        price-table -i                                (interactive)\n  \
        price-table categories"
)]
struct Cli {
    /// Case-insensitive model name filter.
    search: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,

    /// Category to show, e.g. chat, embedding, audio_speech.
    #[arg(long, short, default_value = "chat")]
    category: String,

    /// Sort by a pricing field. Each occurrence is one header click,
    /// so repeating a field flips the direction.
    #[arg(long, short)]
    sort: Vec<SortKey>,

    /// Input tokens per call (enables the cost calculator).
    #[arg(long)]
    input: Option<f64>,

    /// Output tokens per call (enables the cost calculator).
    #[arg(long)]
    output: Option<f64>,

    /// Number of API calls (enables the cost calculator).
    #[arg(long)]
    calls: Option<f64>,

    /// Catalog file (.toml or .json) instead of the bundled one.
    #[arg(long, env = "PRICE_TABLE_CATALOG")]
    catalog: Option<PathBuf>,

    /// Print rows as JSON instead of a table.
    #[arg(long, short)]
    json: bool,

    /// Browse the table interactively.
    #[arg(long, short)]
    interactive: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog categories.
    Categories,
}

impl Cli {
    /// Calculator usage, if any usage figure was given.
    fn usage(&self) -> anyhow::Result<Option<Usage>> {
        if self.input.is_none() && self.output.is_none() && self.calls.is_none() {
            return Ok(None);
        }
        let defaults = Usage::default();
        let usage = Usage {
            input_amount: self.input.unwrap_or(defaults.input_amount),
            output_amount: self.output.unwrap_or(defaults.output_amount),
            api_calls: self.calls.unwrap_or(defaults.api_calls),
        };
        for (name, v) in [
            ("--input", usage.input_amount),
            ("--output", usage.output_amount),
            ("--calls", usage.api_calls),
        ] {
            if !v.is_finite() || v < 0.0 {
                anyhow::bail!("{name} must be a non-negative number, got {v}");
            }
        }
        Ok(Some(usage))
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let catalog = load(cli.catalog.as_deref())?;

    match cli.command {
        Some(Commands::Categories) => cmd_categories(&catalog),
        None => {
            let mut view = TableView::new(cli.category.as_str());
            view.set_search(cli.search.as_deref().unwrap_or(""));
            for &key in &cli.sort {
                view.request_sort(key);
            }
            view.set_calculator(cli.usage()?);

            if cli.interactive && Term::stdout().is_term() {
                interactive(&catalog, view)?;
            } else {
                cmd_table(&catalog, &view, cli.json)?;
            }
        }
    }
    Ok(())
}

fn load(path: Option<&Path>) -> anyhow::Result<Catalog> {
    let catalog = match path {
        Some(p) => catalog::load_catalog(p)?,
        None => catalog::load_catalog_cached()?,
    };
    tracing::debug!(models = catalog.len(), "catalog loaded");
    Ok(catalog)
}

// ── Categories ───────────────────────────────────────────────────────

fn cmd_categories(catalog: &Catalog) {
    println!();
    println!("{}", s_header().apply_to("categories"));
    println!("{}", sep(56));
    for key in catalog.categories() {
        println!(
            "  {:<22} {:<24} {}",
            s_accent().apply_to(key),
            s_dim().apply_to(category_label(key)),
            s_hint().apply_to(format!("{} models", catalog.models(key).len()))
        );
    }
    println!("{}", sep(56));
    println!(
        "{}",
        s_hint().apply_to("  price-table -c <category> to show one")
    );
    println!();
}

// ── Table ────────────────────────────────────────────────────────────

fn cmd_table(catalog: &Catalog, view: &TableView, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&view.rows(catalog))?);
        return Ok(());
    }

    if !catalog.contains(&view.category) {
        eprintln!(
            "{}",
            s_err().apply_to(format!("no category '{}' in catalog", view.category))
        );
    }
    print_view(catalog, view, None);
    Ok(())
}

fn tab_line(catalog: &Catalog, view: &TableView) -> String {
    view.tabs(catalog)
        .iter()
        .map(|t| {
            if t.selected {
                s_header().reverse().apply_to(format!(" {} ", t.label)).to_string()
            } else {
                s_dim().apply_to(format!(" {} ", t.label)).to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `focus` highlights one sortable header (interactive mode).
fn render_table(catalog: &Catalog, view: &TableView, focus: Option<SortKey>) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::NOTHING);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(COLUMNS.iter().map(|col| {
        let title = view.header(col);
        let cell = if col.sort_key.is_some() && col.sort_key == view.sort.key {
            Cell::new(title).fg(C_SORTED)
        } else {
            Cell::new(title).fg(C_HEAD)
        };
        if focus.is_some() && col.sort_key == focus {
            cell.add_attribute(comfy_table::Attribute::Reverse)
        } else {
            cell
        }
    }));

    for row in view.rows(catalog) {
        let cells = row.cells();
        table.add_row(cells.iter().enumerate().map(|(i, text)| {
            let color = match i {
                _ if *text == NOT_AVAILABLE => C_NA,
                0 => C_NAME,
                6 => C_TOTAL,
                _ => C_CELL,
            };
            Cell::new(text).fg(color)
        }));
    }
    table
}

fn print_view(catalog: &Catalog, view: &TableView, focus: Option<SortKey>) {
    let rows = view.records(catalog).len();

    println!();
    println!("  {}", tab_line(catalog, view));
    println!();
    if rows == 0 {
        println!("  {}", s_dim().apply_to("no models"));
    } else {
        println!("{}", render_table(catalog, view, focus));
    }

    let mode = match &view.calculator {
        Some(u) => format!(
            "total = ({} in + {} out) x {} calls",
            u.input_amount, u.output_amount, u.api_calls
        ),
        None => "total = input + output per 1M tokens".to_string(),
    };
    let search = if view.search.is_empty() {
        String::new()
    } else {
        format!("   search: {}", view.search)
    };
    println!();
    println!(
        "{}",
        s_hint().apply_to(format!("  {rows} models   {mode}{search}"))
    );
    println!();
}

// ── Interactive ──────────────────────────────────────────────────────

fn interactive(catalog: &Catalog, mut view: TableView) -> anyhow::Result<()> {
    let term = Term::stdout();
    let sortable: Vec<SortKey> = COLUMNS.iter().filter_map(|c| c.sort_key).collect();
    let mut focus = view
        .sort
        .key
        .and_then(|k| sortable.iter().position(|s| *s == k))
        .unwrap_or(0);

    term.hide_cursor()?;
    let result = (|| -> anyhow::Result<()> {
        loop {
            term.clear_screen()?;
            print_view(catalog, &view, Some(sortable[focus]));
            println!(
                "{}",
                s_hint().apply_to(
                    "  \u{2190}\u{2192} category   \u{2191}\u{2193} column   \
                     enter sort   type to search   esc quit"
                )
            );

            match term.read_key()? {
                Key::ArrowLeft => view.cycle_category(catalog, -1),
                Key::ArrowRight | Key::Tab => view.cycle_category(catalog, 1),
                Key::ArrowUp => focus = (focus + sortable.len() - 1) % sortable.len(),
                Key::ArrowDown => focus = (focus + 1) % sortable.len(),
                Key::Enter => view.request_sort(sortable[focus]),
                Key::Backspace => {
                    let mut term_text = view.search.clone();
                    term_text.pop();
                    view.set_search(&term_text);
                }
                Key::Char(c) if !c.is_control() => {
                    let term_text = format!("{}{c}", view.search);
                    view.set_search(&term_text);
                }
                Key::Escape => break,
                _ => {}
            }
        }
        Ok(())
    })();
    term.show_cursor()?;
    result
}
