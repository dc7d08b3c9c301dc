use thiserror::Error;

/// Failures raised by the scoring pipeline. Each variant carries the column
/// and fund identity needed to locate the offending record; nothing is
/// swallowed downstream.
#[derive(Debug, Error, PartialEq)]
pub enum PipelineError {
    #[error("fund '{scheme}': column '{column}' value '{value}' is neither a number nor '-'")]
    MalformedMetric {
        column: &'static str,
        scheme: String,
        value: String,
    },

    #[error("fund '{scheme}': no value for '{column}' after normalization")]
    IncompleteMetrics {
        column: &'static str,
        scheme: String,
    },

    #[error("input is missing required column '{0}'")]
    MissingColumn(String),

    #[error("metric weights must cover all eight metrics and sum to 1.0, got {0}")]
    InvalidWeights(f64),

    #[error("input contains no fund records")]
    EmptyTable,
}
