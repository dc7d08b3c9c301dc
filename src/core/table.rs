//! In-memory fund tables at each stage of the pipeline.

use crate::core::metric::{Metric, MetricValues};

/// Identity columns required in every input file, ahead of the metric set.
pub const IDENTITY_COLUMNS: [&str; 2] = ["scheme_name", "category"];

/// A fund row straight from the loader. Metric cells are still unparsed
/// strings; `extras` holds the cells of any passthrough columns, in the order
/// those columns appear in the table header.
#[derive(Debug, Clone)]
pub struct RawFundRecord {
    pub scheme_name: String,
    pub category: String,
    pub metrics: MetricValues<String>,
    pub extras: Vec<String>,
}

/// Loader output: the original header row (order preserved for export) plus
/// raw fund records.
#[derive(Debug, Clone)]
pub struct RawFundTable {
    pub headers: Vec<String>,
    pub records: Vec<RawFundRecord>,
}

impl RawFundTable {
    /// Header names that are neither identity nor metric columns. Their cells
    /// pass through the pipeline unmodified.
    pub fn extra_headers(&self) -> Vec<&str> {
        self.headers
            .iter()
            .map(String::as_str)
            .filter(|h| !IDENTITY_COLUMNS.contains(h) && Metric::from_column_name(h).is_none())
            .collect()
    }
}

/// A fund row after cleaning: metric cells parsed, `-` treated as missing,
/// `returns_3yr`/`returns_5yr` imputed with their column means.
#[derive(Debug, Clone)]
pub struct FundRecord {
    pub scheme_name: String,
    pub category: String,
    pub metrics: MetricValues<Option<f64>>,
    pub extras: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct FundTable {
    pub headers: Vec<String>,
    pub records: Vec<FundRecord>,
}

/// The eight metrics of one fund rescaled to [0,1], higher always better.
/// Rows are parallel (by index) to the `FundTable` they were derived from.
#[derive(Debug, Clone)]
pub struct NormalizedRow {
    pub scheme_name: String,
    pub metrics: MetricValues<Option<f64>>,
}

#[derive(Debug, Clone)]
pub struct NormalizedTable {
    pub rows: Vec<NormalizedRow>,
}

/// A fund with its composite score and rank. Ties share a rank (min-rank
/// convention), so `rank` values may repeat and skip.
#[derive(Debug, Clone)]
pub struct RankedFund {
    pub record: FundRecord,
    pub normalized: MetricValues<Option<f64>>,
    pub composite_score: f64,
    pub rank: u32,
}

/// Final pipeline output, sorted by rank ascending. Funds dropped under the
/// `exclude` missing-metric policy are reported in `excluded`, never ranked.
#[derive(Debug, Clone)]
pub struct RankedTable {
    pub headers: Vec<String>,
    pub funds: Vec<RankedFund>,
    pub excluded: Vec<String>,
}

impl RankedTable {
    /// The first `min(n, len)` funds by rank, for export and charting.
    pub fn top(&self, n: usize) -> &[RankedFund] {
        &self.funds[..self.funds.len().min(n)]
    }
}
