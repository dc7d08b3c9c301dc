//! Terminal presentation of ranked fund tables.

pub mod charts;
pub mod rank;
pub mod ui;
