//! Min-max normalization of fund metrics onto [0,1].

use crate::core::metric::{Metric, MetricValues};
use crate::core::table::{FundTable, NormalizedRow, NormalizedTable};
use tracing::warn;

/// Rescales every metric column to [0,1] over the current table.
///
/// Present values map through `(x - min) / (max - min)`; missing values stay
/// missing. Metrics where lower is better (`expense_ratio`, `beta`) are
/// inverted so a higher normalized value always reads "better". A column with
/// zero variance would divide by zero, so every present value in it becomes 0
/// instead, with a warning naming the column.
pub fn normalize(table: &FundTable) -> NormalizedTable {
    let ranges: MetricValues<Option<(f64, f64)>> =
        MetricValues::from_fn(|metric| column_range(table, metric));

    let rows = table
        .records
        .iter()
        .map(|record| NormalizedRow {
            scheme_name: record.scheme_name.clone(),
            metrics: MetricValues::from_fn(|metric| {
                let x = record.metrics[metric]?;
                let (min, max) = ranges[metric]?;
                if max == min {
                    // Degenerate column, flagged once below.
                    return Some(0.0);
                }
                let rescaled = (x - min) / (max - min);
                Some(if metric.lower_is_better() {
                    1.0 - rescaled
                } else {
                    rescaled
                })
            }),
        })
        .collect();

    for (metric, range) in ranges.iter() {
        if let Some((min, max)) = range {
            if max == min {
                warn!("Metric column '{metric}' has zero variance; normalizing all values to 0");
            }
        }
    }

    NormalizedTable { rows }
}

fn column_range(table: &FundTable, metric: Metric) -> Option<(f64, f64)> {
    let mut bounds: Option<(f64, f64)> = None;
    for record in &table.records {
        if let Some(x) = record.metrics[metric] {
            bounds = Some(match bounds {
                Some((min, max)) => (min.min(x), max.max(x)),
                None => (x, x),
            });
        }
    }
    bounds
}
