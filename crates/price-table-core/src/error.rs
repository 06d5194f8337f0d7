#[derive(Debug, thiserror::Error)]
pub enum PriceError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("bad catalog: {0}")]
    Parse(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown sort field: {0} (expected max_tokens, max_output_tokens, input_cost_per_token or output_cost_per_token)")]
    UnknownSortKey(String),

    #[error("unknown sort direction: {0} (expected asc or desc)")]
    UnknownDirection(String),
}

pub type Result<T> = std::result::Result<T, PriceError>;
