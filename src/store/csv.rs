//! CSV-backed fund source and sink.

use crate::core::error::PipelineError;
use crate::core::metric::{Metric, MetricValues};
use crate::core::table::{IDENTITY_COLUMNS, RankedTable, RawFundRecord, RawFundTable};
use crate::store::{FundSink, FundSource};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads the fund catalog from one CSV file and writes the ranked table to
/// another. Input and output paths are independent so ranking never has to
/// clobber its own source data.
pub struct CsvFundStore {
    input: PathBuf,
    output: PathBuf,
}

impl CsvFundStore {
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Self {
        CsvFundStore {
            input: input.as_ref().to_path_buf(),
            output: output.as_ref().to_path_buf(),
        }
    }
}

impl FundSource for CsvFundStore {
    /// Loads the input file, validating the schema up front: the two identity
    /// columns and all eight metric columns must exist in the header. Any
    /// other column passes through untouched.
    fn load(&self) -> Result<RawFundTable> {
        let mut reader = ::csv::ReaderBuilder::new()
            .trim(::csv::Trim::All)
            .from_path(&self.input)
            .with_context(|| format!("Failed to open input file: {}", self.input.display()))?;

        let headers: Vec<String> = reader
            .headers()
            .with_context(|| format!("Failed to read header row: {}", self.input.display()))?
            .iter()
            .map(str::to_string)
            .collect();

        let column_index = |name: &str| -> Result<usize, PipelineError> {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| PipelineError::MissingColumn(name.to_string()))
        };

        let scheme_idx = column_index("scheme_name")?;
        let category_idx = column_index("category")?;
        let metric_indices: MetricValues<usize> = {
            let mut indices: MetricValues<usize> = MetricValues::default();
            for metric in Metric::ALL {
                indices[metric] = column_index(metric.column_name())?;
            }
            indices
        };
        let extra_indices: Vec<usize> = headers
            .iter()
            .enumerate()
            .filter(|(_, h)| {
                !IDENTITY_COLUMNS.contains(&h.as_str()) && Metric::from_column_name(h).is_none()
            })
            .map(|(i, _)| i)
            .collect();

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row
                .with_context(|| format!("Failed to read record: {}", self.input.display()))?;
            let cell = |i: usize| row.get(i).unwrap_or("").to_string();
            records.push(RawFundRecord {
                scheme_name: cell(scheme_idx),
                category: cell(category_idx),
                metrics: MetricValues::from_fn(|m| cell(metric_indices[m])),
                extras: extra_indices.iter().map(|&i| cell(i)).collect(),
            });
        }

        debug!(
            "Loaded {} fund records from {}",
            records.len(),
            self.input.display()
        );
        Ok(RawFundTable { headers, records })
    }
}

impl FundSink for CsvFundStore {
    /// Writes the top `limit` funds in the original column order, with
    /// `composite_score` and `rank` appended, sorted by ascending rank.
    fn export(&self, table: &RankedTable, limit: usize) -> Result<()> {
        let mut writer = ::csv::Writer::from_path(&self.output)
            .with_context(|| format!("Failed to create output file: {}", self.output.display()))?;

        let mut headers = table.headers.clone();
        headers.push("composite_score".to_string());
        headers.push("rank".to_string());
        writer
            .write_record(&headers)
            .context("Failed to write output header row")?;

        for fund in table.top(limit) {
            let mut extras = fund.record.extras.iter();
            let mut row = Vec::with_capacity(headers.len());
            for header in &table.headers {
                let cell = match header.as_str() {
                    "scheme_name" => fund.record.scheme_name.clone(),
                    "category" => fund.record.category.clone(),
                    name => match Metric::from_column_name(name) {
                        Some(metric) => fund.record.metrics[metric]
                            .map_or_else(|| "-".to_string(), |v| v.to_string()),
                        None => extras.next().cloned().unwrap_or_default(),
                    },
                };
                row.push(cell);
            }
            row.push(fund.composite_score.to_string());
            row.push(fund.rank.to_string());
            writer
                .write_record(&row)
                .with_context(|| format!("Failed to write record for {}", fund.record.scheme_name))?;
        }

        writer
            .flush()
            .with_context(|| format!("Failed to flush output file: {}", self.output.display()))?;
        debug!(
            "Exported top {} funds to {}",
            table.top(limit).len(),
            self.output.display()
        );
        Ok(())
    }
}
