//! # Direct Sale
//!
//! Stock items sold at a fixed unit price (keychains, resale products).
//! No material, energy or wear cost is computed: `total = quantity * unit_price`.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::calculations::direct_sale::{calculate, DirectSaleRequest};
//!
//! let sale = DirectSaleRequest {
//!     client: "Feria".to_string(),
//!     product: "Llavero".to_string(),
//!     quantity: 10,
//!     unit_price: 500.0,
//! };
//! assert_eq!(calculate(&sale).unwrap().total, 5000.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::require_client;
use crate::errors::{CalcError, CalcResult};

/// Quantity the interactive front-end suggests for a direct sale
pub const DEFAULT_SALE_QUANTITY: u32 = 10;

fn default_sale_quantity() -> u32 {
    DEFAULT_SALE_QUANTITY
}

/// Input for a direct sale.
///
/// ## JSON Example
///
/// ```json
/// { "client": "Feria", "product": "Llavero", "quantity": 10, "unit_price": 500.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectSaleRequest {
    /// Client name (required)
    pub client: String,

    /// Product or model sold
    #[serde(default)]
    pub product: String,

    /// Units sold; 0 is treated as 1
    #[serde(default = "default_sale_quantity")]
    pub quantity: u32,

    /// Price per unit (required, positive)
    pub unit_price: f64,
}

impl DirectSaleRequest {
    pub fn validate(&self) -> CalcResult<()> {
        require_client(&self.client)?;

        if !self.unit_price.is_finite() || self.unit_price <= 0.0 {
            return Err(CalcError::invalid_input(
                "unit_price",
                self.unit_price.to_string(),
                "Unit price is required and must be positive",
            ));
        }
        Ok(())
    }

    pub fn effective_quantity(&self) -> u32 {
        self.quantity.max(1)
    }
}

/// Result of a direct sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectSaleResult {
    pub quantity: u32,
    pub unit_price: f64,
    pub total: f64,
}

/// Total a direct sale.
pub fn calculate(request: &DirectSaleRequest) -> CalcResult<DirectSaleResult> {
    request.validate()?;

    let quantity = request.effective_quantity();
    let total = quantity as f64 * request.unit_price;

    tracing::debug!(client = %request.client, quantity, total, "direct sale totaled");

    Ok(DirectSaleResult {
        quantity,
        unit_price: request.unit_price,
        total,
    })
}
