use crate::catalog::{Catalog, ModelRecord};

/// Records whose name contains `term`, ignoring case. Input order is kept;
/// an empty term keeps everything.
pub fn filter<'a>(records: &'a [ModelRecord], term: &str) -> Vec<&'a ModelRecord> {
    let needle = term.to_lowercase();
    let matched: Vec<&ModelRecord> = records
        .iter()
        .filter(|m| needle.is_empty() || m.name.to_lowercase().contains(&needle))
        .collect();
    tracing::trace!(term, total = records.len(), matched = matched.len(), "filtered");
    matched
}

/// [`filter`] over one category of the catalog. Unknown categories match nothing.
pub fn filter_category<'a>(catalog: &'a Catalog, category: &str, term: &str) -> Vec<&'a ModelRecord> {
    filter(catalog.models(category), term)
}
