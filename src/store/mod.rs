//! Persistence seams for the pipeline: where fund tables come from and where
//! ranked results go.

pub mod csv;

use crate::core::table::{RankedTable, RawFundTable};
use anyhow::Result;

pub use csv::CsvFundStore;

/// Loads the raw fund catalog into memory.
pub trait FundSource {
    fn load(&self) -> Result<RawFundTable>;
}

/// Persists the ranked output, truncated to the top `limit` funds.
pub trait FundSink {
    fn export(&self, table: &RankedTable, limit: usize) -> Result<()>;
}
