use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::ModelRecord;
use crate::error::PriceError;

/// A sortable numeric field of [`crate::PricingSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    MaxTokens,
    MaxOutputTokens,
    InputCostPerToken,
    OutputCostPerToken,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::MaxTokens,
        SortKey::MaxOutputTokens,
        SortKey::InputCostPerToken,
        SortKey::OutputCostPerToken,
    ];

    pub fn field_name(self) -> &'static str {
        match self {
            SortKey::MaxTokens => "max_tokens",
            SortKey::MaxOutputTokens => "max_output_tokens",
            SortKey::InputCostPerToken => "input_cost_per_token",
            SortKey::OutputCostPerToken => "output_cost_per_token",
        }
    }
}

impl FromStr for SortKey {
    type Err = PriceError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.field_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PriceError::UnknownSortKey(s.to_string()))
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Direction {
    pub fn arrow(self) -> &'static str {
        match self {
            Direction::Ascending => "\u{25b2}",
            Direction::Descending => "\u{25bc}",
        }
    }
}

impl FromStr for Direction {
    type Err = PriceError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            _ => Err(PriceError::UnknownDirection(s.to_string())),
        }
    }
}

/// Which column the table is sorted by. `key: None` keeps catalog order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub key: Option<SortKey>,
    pub direction: Direction,
}

impl SortState {
    pub fn by(key: SortKey, direction: Direction) -> Self {
        Self {
            key: Some(key),
            direction,
        }
    }

    /// Header click: the active ascending column flips to descending,
    /// anything else becomes `key` ascending.
    pub fn request(&mut self, key: SortKey) {
        let direction = if self.key == Some(key) && self.direction == Direction::Ascending {
            Direction::Descending
        } else {
            Direction::Ascending
        };
        *self = Self::by(key, direction);
    }
}

/// Compare two optional values. Absent values are equal to each other and
/// always come after present ones, whatever the direction.
fn compare(a: Option<f64>, b: Option<f64>, direction: Direction) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match direction {
            Direction::Ascending => a.total_cmp(&b),
            Direction::Descending => b.total_cmp(&a),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable sort of `records` by `state`. Ties keep their input order.
pub fn sort<'a>(mut records: Vec<&'a ModelRecord>, state: SortState) -> Vec<&'a ModelRecord> {
    let Some(key) = state.key else {
        return records;
    };
    records.sort_by(|a, b| {
        compare(
            a.sample_spec.field(key),
            b.sample_spec.field(key),
            state.direction,
        )
    });
    tracing::trace!(%key, direction = ?state.direction, rows = records.len(), "sorted");
    records
}
