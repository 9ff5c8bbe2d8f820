//! # Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Request` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(request, ...) -> CalcResult<*Result>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`print_job`] - 3D print quote (material, energy, wear, design, margin)
//! - [`direct_sale`] - Fixed unit price sale (stock, resale)

pub mod direct_sale;
pub mod print_job;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

// Re-export commonly used types
pub use direct_sale::{DirectSaleRequest, DirectSaleResult};
pub use print_job::{QuoteRequest, QuoteResult};

/// Kind of transaction, as written in the "type" column of the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobKind {
    #[serde(rename = "Impresión 3D")]
    Print3d,
    #[serde(rename = "Venta Directa")]
    DirectSale,
}

impl JobKind {
    pub fn label(&self) -> &'static str {
        match self {
            JobKind::Print3d => "Impresión 3D",
            JobKind::DirectSale => "Venta Directa",
        }
    }
}

impl fmt::Display for JobKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Client name is required for every calculation.
pub(crate) fn require_client(client: &str) -> CalcResult<()> {
    if client.trim().is_empty() {
        return Err(CalcError::invalid_input(
            "client",
            client,
            "Client name is required",
        ));
    }
    Ok(())
}
