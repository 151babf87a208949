//! Prompt composition
//!
//! A [`PromptComposer`] pairs a persona and directive list with a
//! [`SheetProjection`] that decides which part of the spreadsheet is shown to
//! the model.

pub mod composer;
pub mod metrics;
pub mod projection;

pub use composer::{Prompt, PromptComposer};
pub use metrics::{ColumnRef, MetricColumn, MetricRecord, MetricsProjection};
pub use projection::{CellGrid, RowRecords, SheetProjection};
