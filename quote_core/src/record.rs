//! # Record Rows
//!
//! A [`QuoteRecord`] is the flattened row written for every completed
//! quote, both to the session history and to the shared spreadsheet. The
//! column order is fixed because the sheet is append-only and positional:
//!
//! | # | Column | Print job | Direct sale |
//! |---|--------|-----------|-------------|
//! | 0 | date (`dd/mm/yyyy`) | | |
//! | 1 | time (`HH:MM:SS`) | | |
//! | 2 | responsible | | |
//! | 3 | client | | |
//! | 4 | model | "Sin nombre" if empty | "Producto Varios" if empty |
//! | 5 | type | "Impresión 3D" | "Venta Directa" |
//! | 6 | material | catalog name | "-" |
//! | 7 | color | as typed, may be empty | "-" |
//! | 8 | weight (g) | | 0 |
//! | 9 | duration text | "2 hs", "0d 1h 30m" | "N/A" |
//! | 10 | quantity | | |
//! | 11 | design hours | | 0 |
//! | 12 | unit price | | |
//! | 13 | total | | |

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::calculations::{DirectSaleRequest, DirectSaleResult, JobKind, QuoteRequest, QuoteResult};

/// Column headers, in row order
pub const HEADERS: [&str; 14] = [
    "Fecha", "Hora", "Resp.", "Cliente", "Modelo", "Tipo", "Mat", "Color", "Peso", "Tiempo",
    "Cant", "Hs Dis", "Unitario", "Total",
];

/// Model name written when a print job has none
pub const UNNAMED_MODEL: &str = "Sin nombre";

/// Product name written when a direct sale has none
pub const UNNAMED_PRODUCT: &str = "Producto Varios";

const NOT_APPLICABLE: &str = "-";
const NO_DURATION: &str = "N/A";

const DATE_FORMAT: &str = "%d/%m/%Y";
const TIME_FORMAT: &str = "%H:%M:%S";

/// One row of the quote log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRecord {
    pub date: String,
    pub time: String,
    pub responsible: String,
    pub client: String,
    pub model: String,
    pub kind: JobKind,
    pub material: String,
    pub color: String,
    pub weight_g: f64,
    pub duration_text: String,
    pub quantity: u32,
    pub design_hours: f64,
    pub unit_price: f64,
    pub total: f64,
}

impl QuoteRecord {
    /// Row for a priced print job.
    pub fn for_print(
        request: &QuoteRequest,
        result: &QuoteResult,
        responsible: &str,
        at: NaiveDateTime,
    ) -> Self {
        QuoteRecord {
            date: at.format(DATE_FORMAT).to_string(),
            time: at.format(TIME_FORMAT).to_string(),
            responsible: responsible.to_string(),
            client: request.client.trim().to_string(),
            model: or_default(&request.model, UNNAMED_MODEL),
            kind: JobKind::Print3d,
            material: result.material.clone(),
            color: request.color.trim().to_string(),
            weight_g: request.weight_g,
            duration_text: request.duration.display_text(),
            quantity: result.quantity,
            design_hours: request.billed_design_hours(),
            unit_price: result.unit_price,
            total: result.batch_total,
        }
    }

    /// Row for a direct sale.
    pub fn for_sale(
        request: &DirectSaleRequest,
        result: &DirectSaleResult,
        responsible: &str,
        at: NaiveDateTime,
    ) -> Self {
        QuoteRecord {
            date: at.format(DATE_FORMAT).to_string(),
            time: at.format(TIME_FORMAT).to_string(),
            responsible: responsible.to_string(),
            client: request.client.trim().to_string(),
            model: or_default(&request.product, UNNAMED_PRODUCT),
            kind: JobKind::DirectSale,
            material: NOT_APPLICABLE.to_string(),
            color: NOT_APPLICABLE.to_string(),
            weight_g: 0.0,
            duration_text: NO_DURATION.to_string(),
            quantity: result.quantity,
            design_hours: 0.0,
            unit_price: result.unit_price,
            total: result.total,
        }
    }

    /// Positional values for the spreadsheet, in [`HEADERS`] order.
    pub fn to_row(&self) -> Vec<Value> {
        vec![
            Value::from(self.date.as_str()),
            Value::from(self.time.as_str()),
            Value::from(self.responsible.as_str()),
            Value::from(self.client.as_str()),
            Value::from(self.model.as_str()),
            Value::from(self.kind.label()),
            Value::from(self.material.as_str()),
            Value::from(self.color.as_str()),
            Value::from(self.weight_g),
            Value::from(self.duration_text.as_str()),
            Value::from(self.quantity),
            Value::from(self.design_hours),
            Value::from(self.unit_price),
            Value::from(self.total),
        ]
    }
}

fn or_default(value: &str, default: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}
