//! # Session History
//!
//! Every quote completed while the program runs is kept here, in order,
//! whether or not the remote append worked. Nothing is written to disk.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::history::{SaveOutcome, SessionHistory};
//! # use quote_core::calculations::direct_sale::{self, DirectSaleRequest};
//! # use quote_core::record::QuoteRecord;
//! # let sale = DirectSaleRequest { client: "Feria".into(), product: "Llavero".into(), quantity: 10, unit_price: 500.0 };
//! # let result = direct_sale::calculate(&sale).unwrap();
//! # let at = chrono::NaiveDate::from_ymd_opt(2026, 1, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();
//! # let record = QuoteRecord::for_sale(&sale, &result, "Seba", at);
//!
//! let mut history = SessionHistory::new();
//! let outcome = history.keep(record, "offline");
//! assert!(matches!(outcome, SaveOutcome::LocalOnly { .. }));
//! assert!(outcome.warning().unwrap().contains("offline"));
//! assert_eq!(history.len(), 1);
//! assert_eq!(history.grand_total(), 5000.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::record::QuoteRecord;
use crate::sink::RowSink;

/// What happened to a saved record beyond the local history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum SaveOutcome {
    /// Appended to the remote sink
    Uploaded { sink: String },
    /// No sink available; kept locally only. `reason` says why
    /// (offline, missing credentials).
    LocalOnly { reason: String },
    /// The sink failed; kept locally, operator should be warned
    UploadFailed { sink: String, reason: String },
}

impl SaveOutcome {
    /// Warning text for the operator, if any
    pub fn warning(&self) -> Option<String> {
        match self {
            SaveOutcome::UploadFailed { sink, reason } => Some(format!(
                "Saved locally, but the upload to {} failed: {}",
                sink, reason
            )),
            SaveOutcome::LocalOnly { reason } => {
                Some(format!("Saved to session history only: {}", reason))
            }
            SaveOutcome::Uploaded { .. } => None,
        }
    }
}

/// Ordered list of records produced this session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionHistory {
    records: Vec<QuoteRecord>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record to `sink` and keep it.
    ///
    /// The record is kept whatever the sink does, so a sink failure never
    /// loses it.
    pub fn save(&mut self, record: QuoteRecord, sink: &dyn RowSink) -> SaveOutcome {
        let outcome = match sink.append(&record) {
            Ok(()) => {
                tracing::info!(sink = sink.name(), client = %record.client, "row appended");
                SaveOutcome::Uploaded {
                    sink: sink.name().to_string(),
                }
            }
            Err(e) => {
                tracing::warn!(sink = sink.name(), error = %e, "row append failed");
                SaveOutcome::UploadFailed {
                    sink: sink.name().to_string(),
                    reason: e.to_string(),
                }
            }
        };
        self.records.push(record);
        outcome
    }

    /// Keep a record without uploading it; `reason` travels in the outcome.
    pub fn keep(&mut self, record: QuoteRecord, reason: &str) -> SaveOutcome {
        tracing::debug!(client = %record.client, reason, "row kept locally");
        self.records.push(record);
        SaveOutcome::LocalOnly {
            reason: reason.to_string(),
        }
    }

    pub fn records(&self) -> &[QuoteRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of the total column
    pub fn grand_total(&self) -> f64 {
        self.records.iter().map(|r| r.total).sum()
    }
}
