use std::collections::BTreeMap;
use std::path::Path;

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::error::{PriceError, Result};
use crate::sort::SortKey;

/// Pricing and capability figures attached to a model.
/// Costs are per single token in USD; any field may be unpublished.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingSpec {
    pub max_tokens: Option<u64>,
    pub max_output_tokens: Option<u64>,
    pub input_cost_per_token: Option<f64>,
    pub output_cost_per_token: Option<f64>,
}

impl PricingSpec {
    /// Numeric value of a sortable field, if present.
    pub fn field(&self, key: SortKey) -> Option<f64> {
        match key {
            SortKey::MaxTokens => self.max_tokens.map(|v| v as f64),
            SortKey::MaxOutputTokens => self.max_output_tokens.map(|v| v as f64),
            SortKey::InputCostPerToken => self.input_cost_per_token,
            SortKey::OutputCostPerToken => self.output_cost_per_token,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRecord {
    pub name: String,
    pub provider: String,
    /// Path or URL of the provider logo.
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub sample_spec: PricingSpec,
}

/// Category key -> models. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    categories: BTreeMap<String, Vec<ModelRecord>>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    category: BTreeMap<String, Vec<ModelRecord>>,
}

impl Catalog {
    /// Category keys in lexicographic order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// Models of a category. Unknown categories are empty, not an error.
    pub fn models(&self, category: &str) -> &[ModelRecord] {
        self.categories
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains(&self, category: &str) -> bool {
        self.categories.contains_key(category)
    }

    /// Total number of models across all categories.
    pub fn len(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FromIterator<(String, Vec<ModelRecord>)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (String, Vec<ModelRecord>)>>(iter: I) -> Self {
        Self {
            categories: iter.into_iter().collect(),
        }
    }
}

fn log_parsed(catalog: &Catalog, format: &str) {
    tracing::debug!(
        format = format,
        categories = catalog.categories.len(),
        models = catalog.len(),
        "parsed catalog"
    );
}

/// Parse a catalog from TOML (`[[category.<key>]]` tables).
pub fn parse_catalog(toml_str: &str) -> Result<Catalog> {
    let file: CatalogFile =
        toml::from_str(toml_str).map_err(|e| PriceError::Parse(e.to_string()))?;
    let catalog = Catalog {
        categories: file.category,
    };
    log_parsed(&catalog, "toml");
    Ok(catalog)
}

/// Parse a catalog from a JSON object mapping category key to model array.
pub fn parse_catalog_json(json_str: &str) -> Result<Catalog> {
    let categories: BTreeMap<String, Vec<ModelRecord>> = serde_json::from_str(json_str)?;
    let catalog = Catalog { categories };
    log_parsed(&catalog, "json");
    Ok(catalog)
}

/// Load a catalog file. `.json` files are parsed as JSON, everything else as TOML.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| PriceError::Io(format!("{}: {e}", path.display())))?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        parse_catalog_json(&content)
    } else {
        parse_catalog(&content)
    }
}

const BUNDLED_CATALOG: &str = include_str!("../../../data/catalog.toml");

static BUNDLED: OnceCell<Catalog> = OnceCell::new();

/// The bundled catalog, parsed on first use and shared for the rest of the process.
pub fn bundled() -> Result<&'static Catalog> {
    BUNDLED.get_or_try_init(|| parse_catalog(BUNDLED_CATALOG))
}

/// Location of the per-user catalog override.
#[cfg(feature = "user-catalog")]
pub fn user_catalog_path() -> Option<std::path::PathBuf> {
    Some(dirs::config_dir()?.join("price-table").join("catalog.toml"))
}

/// Load catalog data: the user override if present and valid, otherwise bundled.
#[cfg(feature = "user-catalog")]
pub fn load_catalog_cached() -> Result<Catalog> {
    if let Some(path) = user_catalog_path().filter(|p| p.exists()) {
        match load_catalog(&path) {
            Ok(catalog) => return Ok(catalog),
            Err(e) => tracing::warn!(path = %path.display(), "ignoring user catalog: {e}"),
        }
    }
    bundled().cloned()
}

/// Human label for a category key, e.g. "image_generation" -> "Image generation".
pub fn category_label(key: &str) -> String {
    if key == "audio_speech" {
        return "TTS (Text To Speech)".to_string();
    }
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => {
            let rest = chars.as_str().replacen('_', " ", 1);
            let label: String = first.to_uppercase().chain(rest.chars()).collect();
            label
        }
        None => String::new(),
    }
}
