//! Parsing and missing-value imputation for raw fund tables.

use crate::core::error::PipelineError;
use crate::core::metric::{Metric, MetricValues};
use crate::core::table::{FundRecord, FundTable, RawFundRecord, RawFundTable};
use tracing::debug;

/// The placeholder the upstream data source emits for an absent metric.
pub const MISSING_SENTINEL: &str = "-";

/// Columns whose missing entries are imputed with the column mean.
const IMPUTED_COLUMNS: [Metric; 2] = [Metric::Returns3Yr, Metric::Returns5Yr];

/// Parses every metric cell and imputes `returns_3yr`/`returns_5yr`.
///
/// The `-` sentinel (or an empty cell) marks a missing value. Any other
/// unparseable cell aborts the pipeline with [`PipelineError::MalformedMetric`].
/// Each imputed column's mean is computed over the values present before any
/// replacement. Other metric columns keep their missing entries; the scoring
/// policy decides what happens to them later.
pub fn clean(raw: RawFundTable) -> Result<FundTable, PipelineError> {
    let mut records = Vec::with_capacity(raw.records.len());
    for record in raw.records {
        records.push(parse_record(record)?);
    }

    for metric in IMPUTED_COLUMNS {
        let Some(mean) = column_mean(&records, metric) else {
            // Nothing present to average; leave the column missing.
            continue;
        };
        let mut imputed = 0usize;
        for record in &mut records {
            if record.metrics[metric].is_none() {
                record.metrics[metric] = Some(mean);
                imputed += 1;
            }
        }
        if imputed > 0 {
            debug!("Imputed {imputed} missing '{metric}' values with column mean {mean}");
        }
    }

    Ok(FundTable {
        headers: raw.headers,
        records,
    })
}

fn parse_record(record: RawFundRecord) -> Result<FundRecord, PipelineError> {
    let mut metrics: MetricValues<Option<f64>> = MetricValues::default();
    for metric in Metric::ALL {
        metrics[metric] = parse_cell(&record.metrics[metric]).map_err(|value| {
            PipelineError::MalformedMetric {
                column: metric.column_name(),
                scheme: record.scheme_name.clone(),
                value,
            }
        })?;
    }
    Ok(FundRecord {
        scheme_name: record.scheme_name,
        category: record.category,
        metrics,
        extras: record.extras,
    })
}

fn parse_cell(cell: &str) -> Result<Option<f64>, String> {
    let trimmed = cell.trim();
    if trimmed.is_empty() || trimmed == MISSING_SENTINEL {
        return Ok(None);
    }
    // f64::parse accepts "NaN" and "inf", which would poison the min/max
    // range during normalization; only finite values count as present.
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(Some)
        .ok_or_else(|| trimmed.to_string())
}

/// Arithmetic mean of the present values in a column, `None` if all missing.
fn column_mean(records: &[FundRecord], metric: Metric) -> Option<f64> {
    let present: Vec<f64> = records.iter().filter_map(|r| r.metrics[metric]).collect();
    if present.is_empty() {
        return None;
    }
    Some(present.iter().sum::<f64>() / present.len() as f64)
}
