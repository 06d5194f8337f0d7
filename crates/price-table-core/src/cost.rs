use serde::{Deserialize, Serialize};

use crate::catalog::PricingSpec;

/// Token counts are quoted per million in the table.
pub const PER_MILLION: f64 = 1_000_000.0;

/// Usage figures entered into the pricing calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    pub input_amount: f64,
    pub output_amount: f64,
    pub api_calls: f64,
}

impl Default for Usage {
    fn default() -> Self {
        Self {
            input_amount: 0.0,
            output_amount: 0.0,
            api_calls: 1.0,
        }
    }
}

/// Both per-token costs of a model. Only exists when both are published.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rates {
    pub input_cost_per_token: f64,
    pub output_cost_per_token: f64,
}

impl PricingSpec {
    /// `None` when either cost is missing; callers show "N/A" instead of a price.
    pub fn rates(&self) -> Option<Rates> {
        Some(Rates {
            input_cost_per_token: self.input_cost_per_token?,
            output_cost_per_token: self.output_cost_per_token?,
        })
    }
}

impl Rates {
    /// Combined input + output price per million tokens.
    pub fn total_per_million(self) -> f64 {
        (self.input_cost_per_token + self.output_cost_per_token) * PER_MILLION
    }
}

/// Total cost of `usage.api_calls` calls, each consuming the given input and output amounts.
pub fn calculate_cost(rates: Rates, usage: &Usage) -> f64 {
    (usage.input_amount * rates.input_cost_per_token
        + usage.output_amount * rates.output_cost_per_token)
        * usage.api_calls
}

/// Two decimal places, no currency sign.
///
/// Rounds the exact stored value to the nearest cent. Exact halves round
/// away from zero (0.125 -> "0.13"); 2.675, stored just below the half,
/// stays "2.67".
pub fn format_money(v: f64) -> String {
    let cents = v * 100.0;
    // The product is exact only when the fused error term is zero.
    let exact_half = cents.fract().abs() == 0.5 && v.mul_add(100.0, -cents) == 0.0;
    if exact_half {
        format!("{:.2}", cents.round() / 100.0)
    } else {
        format!("{v:.2}")
    }
}

/// Per-token cost shown per million tokens, or "N/A".
pub fn per_million_cell(cost: Option<f64>) -> String {
    match cost {
        Some(c) => format_money(c * PER_MILLION),
        None => "N/A".to_string(),
    }
}
