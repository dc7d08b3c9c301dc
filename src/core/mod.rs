//! Core scoring pipeline: cleaning, normalization, scoring and ranking.

pub mod clean;
pub mod error;
pub mod log;
pub mod metric;
pub mod normalize;
pub mod pipeline;
pub mod rank;
pub mod score;
pub mod table;

// Re-export main types for cleaner imports
pub use error::PipelineError;
pub use metric::{Metric, MetricValues};
pub use score::{MissingMetricPolicy, Weights};
pub use table::{FundRecord, FundTable, NormalizedTable, RankedFund, RankedTable, RawFundTable};
