//! # Pricing Configuration
//!
//! [`PricingConfig`] is the single configuration value every calculation
//! receives: the material catalog plus the shop's operating costs. It is
//! read from disk (see [`crate::file_io`]), replaced wholesale by a saved
//! update, and passed by reference into
//! [`print_job::calculate`](crate::calculations::print_job::calculate).
//!
//! The JSON keys are the ones the shop's existing `configuracion.json`
//! already uses:
//!
//! ```json
//! {
//!   "materiales": { "PLA": 20000.0, "PETG": 16450.0 },
//!   "configuracion": {
//!     "precio_kwh": 170.0,
//!     "consumo_kw": 0.2,
//!     "precio_hora_diseno": 8500.0,
//!     "margen_ganancia": 100.0,
//!     "precio_desgaste_hora": 200.0
//!   }
//! }
//! ```
//!
//! A section missing from the file falls back to its defaults, and so does
//! a single field missing from `configuracion`.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::materials::MaterialCatalog;

/// Operating costs applied to every print job.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatingConfig {
    /// Electricity price per kWh
    #[serde(rename = "precio_kwh")]
    pub energy_price_per_kwh: f64,

    /// Printer power draw in kW
    #[serde(rename = "consumo_kw")]
    pub energy_draw_kw: f64,

    /// Design work price per hour
    #[serde(rename = "precio_hora_diseno")]
    pub design_price_per_hour: f64,

    /// Profit margin in percent, applied on the operational subtotal
    #[serde(rename = "margen_ganancia")]
    pub profit_margin_pct: f64,

    /// Machine wear cost per print hour
    #[serde(rename = "precio_desgaste_hora")]
    pub wear_price_per_hour: f64,
}

impl Default for OperatingConfig {
    fn default() -> Self {
        OperatingConfig {
            energy_price_per_kwh: 170.0,
            energy_draw_kw: 0.2,
            design_price_per_hour: 8500.0,
            profit_margin_pct: 100.0,
            wear_price_per_hour: 200.0,
        }
    }
}

impl OperatingConfig {
    /// Every field must be a finite, nonnegative number.
    pub fn validate(&self) -> CalcResult<()> {
        let fields = [
            ("precio_kwh", self.energy_price_per_kwh),
            ("consumo_kw", self.energy_draw_kw),
            ("precio_hora_diseno", self.design_price_per_hour),
            ("margen_ganancia", self.profit_margin_pct),
            ("precio_desgaste_hora", self.wear_price_per_hour),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(CalcError::invalid_input(
                    format!("configuracion.{}", name),
                    value.to_string(),
                    "Must be a nonnegative number",
                ));
            }
        }
        Ok(())
    }
}

/// Partial update of the operating costs; `None` keeps the current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OperatingUpdate {
    pub energy_price_per_kwh: Option<f64>,
    pub energy_draw_kw: Option<f64>,
    pub design_price_per_hour: Option<f64>,
    pub profit_margin_pct: Option<f64>,
    pub wear_price_per_hour: Option<f64>,
}

impl OperatingUpdate {
    pub fn is_empty(&self) -> bool {
        *self == OperatingUpdate::default()
    }
}

/// Material catalog plus operating costs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    #[serde(rename = "materiales")]
    pub materials: MaterialCatalog,

    #[serde(rename = "configuracion")]
    pub operating: OperatingConfig,
}

impl PricingConfig {
    pub fn new(materials: MaterialCatalog, operating: OperatingConfig) -> Self {
        PricingConfig { materials, operating }
    }

    pub fn validate(&self) -> CalcResult<()> {
        self.materials.validate()?;
        self.operating.validate()
    }

    /// Copy of this configuration with one material added or repriced.
    pub fn with_material_price(&self, name: &str, price_per_kg: f64) -> CalcResult<Self> {
        let mut updated = self.clone();
        updated.materials.set_price(name, price_per_kg)?;
        Ok(updated)
    }

    /// Copy of this configuration without a material.
    pub fn without_material(&self, name: &str) -> CalcResult<Self> {
        let mut updated = self.clone();
        updated.materials.remove(name)?;
        Ok(updated)
    }

    /// Copy of this configuration with some operating costs replaced.
    ///
    /// The result is validated as a whole; on error `self` is unchanged.
    pub fn with_operating(&self, update: &OperatingUpdate) -> CalcResult<Self> {
        let current = self.operating;
        let operating = OperatingConfig {
            energy_price_per_kwh: update.energy_price_per_kwh.unwrap_or(current.energy_price_per_kwh),
            energy_draw_kw: update.energy_draw_kw.unwrap_or(current.energy_draw_kw),
            design_price_per_hour: update.design_price_per_hour.unwrap_or(current.design_price_per_hour),
            profit_margin_pct: update.profit_margin_pct.unwrap_or(current.profit_margin_pct),
            wear_price_per_hour: update.wear_price_per_hour.unwrap_or(current.wear_price_per_hour),
        };
        operating.validate()?;
        Ok(PricingConfig {
            materials: self.materials.clone(),
            operating,
        })
    }
}
