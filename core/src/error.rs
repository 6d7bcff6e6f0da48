use crate::field::Alliance;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("invalid configuration: {team} {field} = {value} (expected 0.0..=1.0)")]
    InvalidConfiguration {
        team: Alliance,
        field: &'static str,
        value: f64,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Histogram error: {0}")]
    Histogram(String),

    #[error("batch must contain at least one match")]
    EmptyBatch,
}

pub type Result<T> = std::result::Result<T, SimError>;
