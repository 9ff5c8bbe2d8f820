//! # Row Sinks
//!
//! A [`RowSink`] is somewhere completed quote rows are appended remotely,
//! typically the shared spreadsheet. Implementations live with the
//! front-end that owns the network stack; this crate only defines the seam.

use std::error::Error;

use crate::record::QuoteRecord;

/// Boxed error returned by sinks; callers only ever report it.
pub type SinkError = Box<dyn Error + Send + Sync>;

/// Destination for completed quote rows.
pub trait RowSink {
    /// Short human name used in warnings ("Google Sheets", ...)
    fn name(&self) -> &str;

    /// Append one row. No retry is expected from implementations.
    fn append(&self, record: &QuoteRecord) -> Result<(), SinkError>;
}
