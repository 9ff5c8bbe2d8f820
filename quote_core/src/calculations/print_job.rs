//! # 3D Print Job Quote
//!
//! Prices a batch of printed parts from material, energy, machine wear and
//! optional design time.
//!
//! ## Formulas
//!
//! ```text
//! material  = weight_g * (1 + error_margin/100) / 1000 * price_per_kg
//! energy    = hours * draw_kw * price_per_kwh
//! wear      = hours * wear_per_hour
//! subtotal  = material + energy + wear
//! sale      = subtotal * (1 + profit_margin/100)
//! design    = design_hours * design_per_hour
//! batch     = sale + design
//! unit      = batch / quantity
//! ```
//!
//! Design time is added after the profit margin, so it is billed at cost.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::calculations::print_job::{calculate, QuoteRequest};
//! use quote_core::config::PricingConfig;
//! use quote_core::duration::PrintDuration;
//!
//! let request = QuoteRequest {
//!     client: "Ana".to_string(),
//!     model: "Soporte celular".to_string(),
//!     material: "PLA".to_string(),
//!     color: "Negro".to_string(),
//!     weight_g: 100.0,
//!     duration: PrintDuration::hours(2.0),
//!     quantity: 1,
//!     error_margin_pct: 10.0,
//!     design_hours: None,
//! };
//!
//! let result = calculate(&request, &PricingConfig::default()).unwrap();
//! assert!((result.unit_price - 5336.0).abs() < 1e-6);
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::require_client;
use crate::config::PricingConfig;
use crate::duration::PrintDuration;
use crate::errors::{CalcError, CalcResult};
use crate::units::{Grams, Hours, Kilograms, Percent};

/// Error margin applied when the operator does not give one
pub const DEFAULT_ERROR_MARGIN_PCT: f64 = 10.0;

fn default_error_margin() -> f64 {
    DEFAULT_ERROR_MARGIN_PCT
}

fn default_quantity() -> u32 {
    1
}

/// Input parameters for a print job quote.
///
/// ## JSON Example
///
/// ```json
/// {
///   "client": "Ana",
///   "model": "Soporte celular",
///   "material": "PLA",
///   "color": "Negro",
///   "weight_g": 100.0,
///   "duration": { "unit": "Hours", "value": 2.0 },
///   "quantity": 1,
///   "error_margin_pct": 10.0,
///   "design_hours": null
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    /// Client name (required)
    pub client: String,

    /// Model or part name, usually the STL name
    #[serde(default)]
    pub model: String,

    /// Material name, must exist in the catalog
    pub material: String,

    /// Filament color (free text)
    #[serde(default)]
    pub color: String,

    /// Total printed weight in grams, supports included
    pub weight_g: f64,

    /// Print time for the whole batch
    pub duration: PrintDuration,

    /// Number of parts in the batch; 0 is treated as 1
    #[serde(default = "default_quantity")]
    pub quantity: u32,

    /// Extra material assumed wasted, in percent
    #[serde(default = "default_error_margin")]
    pub error_margin_pct: f64,

    /// Design hours to bill; `None` when no design work was requested
    #[serde(default)]
    pub design_hours: Option<f64>,
}

impl QuoteRequest {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_client(&self.client)?;

        if !self.weight_g.is_finite() || self.weight_g <= 0.0 {
            return Err(CalcError::invalid_input(
                "weight_g",
                self.weight_g.to_string(),
                "Weight must be positive",
            ));
        }

        self.duration.validate()?;

        if !self.error_margin_pct.is_finite() || self.error_margin_pct < 0.0 {
            return Err(CalcError::invalid_input(
                "error_margin_pct",
                self.error_margin_pct.to_string(),
                "Error margin cannot be negative",
            ));
        }

        if let Some(hours) = self.design_hours {
            if !hours.is_finite() || hours < 0.0 {
                return Err(CalcError::invalid_input(
                    "design_hours",
                    hours.to_string(),
                    "Design hours cannot be negative",
                ));
            }
        }

        Ok(())
    }

    /// Quantity actually priced (at least 1)
    pub fn effective_quantity(&self) -> u32 {
        self.quantity.max(1)
    }

    /// Design hours billed (0 when design was not requested)
    pub fn billed_design_hours(&self) -> f64 {
        self.design_hours.unwrap_or(0.0)
    }

    /// Print time normalized to hours
    pub fn total_hours(&self) -> f64 {
        self.duration.total_hours()
    }
}

/// Cost breakdown and price for a print job.
///
/// ## JSON Example
///
/// ```json
/// {
///   "material": "PLA",
///   "total_hours": 2.0,
///   "quantity": 1,
///   "material_cost": 2200.0,
///   "energy_cost": 68.0,
///   "wear_cost": 400.0,
///   "subtotal": 2668.0,
///   "sale_subtotal": 5336.0,
///   "design_cost": 0.0,
///   "batch_total": 5336.0,
///   "unit_price": 5336.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteResult {
    /// Catalog spelling of the material priced
    pub material: String,

    /// Print time used, in hours
    pub total_hours: f64,

    /// Quantity used for the unit price
    pub quantity: u32,

    /// Filament cost including the error margin
    pub material_cost: f64,

    /// Electricity cost
    pub energy_cost: f64,

    /// Machine wear cost
    pub wear_cost: f64,

    /// material + energy + wear
    pub subtotal: f64,

    /// Subtotal with the profit margin applied
    pub sale_subtotal: f64,

    /// Design work cost
    pub design_cost: f64,

    /// Price for the whole batch
    pub batch_total: f64,

    /// batch_total / quantity
    pub unit_price: f64,
}

/// Price a print job.
///
/// # Arguments
///
/// * `request` - What is being printed
/// * `config` - Material prices and operating costs
///
/// # Returns
///
/// * `Ok(QuoteResult)` - Cost breakdown and prices
/// * `Err(CalcError::InvalidInput)` - Missing client, bad weight or duration
/// * `Err(CalcError::MaterialNotFound)` - Material not in the catalog
pub fn calculate(request: &QuoteRequest, config: &PricingConfig) -> CalcResult<QuoteResult> {
    request.validate()?;

    let material = config
        .materials
        .resolve(&request.material)
        .ok_or_else(|| CalcError::material_not_found(&request.material))?
        .to_string();
    let price_per_kg = config.materials.price_per_kg(&material)?;
    let ops = &config.operating;

    let hours = Hours(request.total_hours());
    let quantity = request.effective_quantity();

    let billed_weight: Kilograms = (Grams(request.weight_g) * Percent(request.error_margin_pct).factor()).into();
    let material_cost = billed_weight.value() * price_per_kg;
    let energy_cost = hours.value() * ops.energy_draw_kw * ops.energy_price_per_kwh;
    let wear_cost = hours.value() * ops.wear_price_per_hour;

    let subtotal = material_cost + energy_cost + wear_cost;
    let sale_subtotal = subtotal * Percent(ops.profit_margin_pct).factor();
    let design_cost = request.billed_design_hours() * ops.design_price_per_hour;

    let batch_total = sale_subtotal + design_cost;
    let unit_price = batch_total / quantity as f64;

    tracing::debug!(
        client = %request.client,
        %material,
        hours = hours.value(),
        material_cost,
        energy_cost,
        wear_cost,
        design_cost,
        batch_total,
        "print job priced"
    );

    Ok(QuoteResult {
        material,
        total_hours: hours.value(),
        quantity,
        material_cost,
        energy_cost,
        wear_cost,
        subtotal,
        sale_subtotal,
        design_cost,
        batch_total,
        unit_price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::MaterialCatalog;

    const EPS: f64 = 1e-6;

    fn test_request() -> QuoteRequest {
        QuoteRequest {
            client: "Ana".to_string(),
            model: "Soporte".to_string(),
            material: "PLA".to_string(),
            color: "Negro".to_string(),
            weight_g: 100.0,
            duration: PrintDuration::hours(2.0),
            quantity: 1,
            error_margin_pct: 10.0,
            design_hours: None,
        }
    }

    #[test]
    fn test_reference_quote() {
        let result = calculate(&test_request(), &PricingConfig::default()).unwrap();

        // 100 g * 1.1 / 1000 * 20000
        assert!((result.material_cost - 2200.0).abs() < EPS);
        // 2 h * 0.2 kW * 170
        assert!((result.energy_cost - 68.0).abs() < EPS);
        // 2 h * 200
        assert!((result.wear_cost - 400.0).abs() < EPS);
        assert!((result.subtotal - 2668.0).abs() < EPS);
        assert!((result.sale_subtotal - 5336.0).abs() < EPS);
        assert!((result.batch_total - 5336.0).abs() < EPS);
        assert!((result.unit_price - 5336.0).abs() < EPS);
    }

    #[test]
    fn test_unit_price_times_quantity_is_batch_total() {
        let config = PricingConfig::default();
        for quantity in [1, 3, 7, 250] {
            for weight in [0.5, 12.3, 980.0] {
                let mut request = test_request();
                request.quantity = quantity;
                request.weight_g = weight;
                request.duration = PrintDuration::minutes(37.0);
                request.design_hours = Some(1.5);

                let result = calculate(&request, &config).unwrap();
                let rebuilt = result.unit_price * quantity as f64;
                assert!((rebuilt - result.batch_total).abs() < 1e-6 * result.batch_total.max(1.0));
            }
        }
    }

    #[test]
    fn test_material_cost_is_linear() {
        let config = PricingConfig::default();
        let base = calculate(&test_request(), &config).unwrap();

        let mut doubled = test_request();
        doubled.weight_g = 200.0;
        let doubled = calculate(&doubled, &config).unwrap();
        assert!((doubled.material_cost - 2.0 * base.material_cost).abs() < EPS);

        let mut no_margin = test_request();
        no_margin.error_margin_pct = 0.0;
        let no_margin = calculate(&no_margin, &config).unwrap();
        assert!((no_margin.material_cost * 1.1 - base.material_cost).abs() < EPS);
    }

    #[test]
    fn test_no_design_means_batch_equals_sale() {
        let result = calculate(&test_request(), &PricingConfig::default()).unwrap();
        assert_eq!(result.design_cost, 0.0);
        assert_eq!(result.batch_total, result.sale_subtotal);

        let mut zero_hours = test_request();
        zero_hours.design_hours = Some(0.0);
        let result = calculate(&zero_hours, &PricingConfig::default()).unwrap();
        assert_eq!(result.design_cost, 0.0);
        assert_eq!(result.batch_total, result.sale_subtotal);
    }

    #[test]
    fn test_design_hours_billed_after_margin() {
        let mut request = test_request();
        request.design_hours = Some(2.0);
        let result = calculate(&request, &PricingConfig::default()).unwrap();

        assert!((result.design_cost - 17000.0).abs() < EPS);
        assert!((result.batch_total - (5336.0 + 17000.0)).abs() < EPS);
    }

    #[test]
    fn test_quantity_splits_batch() {
        let mut request = test_request();
        request.quantity = 4;
        let result = calculate(&request, &PricingConfig::default()).unwrap();
        assert!((result.batch_total - 5336.0).abs() < EPS);
        assert!((result.unit_price - 1334.0).abs() < EPS);
    }

    #[test]
    fn test_zero_quantity_is_coerced_to_one() {
        let mut request = test_request();
        request.quantity = 0;
        let result = calculate(&request, &PricingConfig::default()).unwrap();
        assert_eq!(result.quantity, 1);
        assert_eq!(result.unit_price, result.batch_total);
    }

    #[test]
    fn test_duration_models_price_the_same() {
        let config = PricingConfig::default();
        let mut by_minutes = test_request();
        by_minutes.duration = PrintDuration::minutes(90.0);
        let mut by_split = test_request();
        by_split.duration = PrintDuration::split(0, 1, 30);

        let a = calculate(&by_minutes, &config).unwrap();
        let b = calculate(&by_split, &config).unwrap();
        assert_eq!(a.total_hours, 1.5);
        assert_eq!(a.batch_total, b.batch_total);
    }

    #[test]
    fn test_missing_client_is_invalid() {
        let mut request = test_request();
        request.client = "   ".to_string();
        let err = calculate(&request, &PricingConfig::default()).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { ref field, .. } if field == "client"));
    }

    #[test]
    fn test_invalid_weight() {
        for weight in [0.0, -3.0, f64::NAN] {
            let mut request = test_request();
            request.weight_g = weight;
            assert!(calculate(&request, &PricingConfig::default()).is_err());
        }
    }

    #[test]
    fn test_zero_duration_is_invalid() {
        let mut request = test_request();
        request.duration = PrintDuration::split(0, 0, 0);
        let err = calculate(&request, &PricingConfig::default()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_negative_extras_are_invalid() {
        let mut request = test_request();
        request.error_margin_pct = -5.0;
        assert!(calculate(&request, &PricingConfig::default()).is_err());

        let mut request = test_request();
        request.design_hours = Some(-1.0);
        assert!(calculate(&request, &PricingConfig::default()).is_err());
    }

    #[test]
    fn test_unknown_material() {
        let mut request = test_request();
        request.material = "Nylon".to_string();
        let err = calculate(&request, &PricingConfig::default()).unwrap_err();
        assert_eq!(err, CalcError::material_not_found("Nylon"));
    }

    #[test]
    fn test_material_name_resolved_to_catalog_spelling() {
        let mut request = test_request();
        request.material = "resina".to_string();
        let result = calculate(&request, &PricingConfig::default()).unwrap();
        assert_eq!(result.material, "Resina");
    }

    #[test]
    fn test_uses_passed_configuration() {
        let materials: MaterialCatalog = [("PLA", 10000.0)].into_iter().collect();
        let mut config = PricingConfig::default();
        config.materials = materials;
        config.operating.profit_margin_pct = 0.0;

        let result = calculate(&test_request(), &config).unwrap();
        assert!((result.material_cost - 1100.0).abs() < EPS);
        assert_eq!(result.sale_subtotal, result.subtotal);
    }

    #[test]
    fn test_request_json_defaults() {
        let json = r#"{
            "client": "Ana",
            "material": "PLA",
            "weight_g": 50,
            "duration": { "unit": "Minutes", "value": 90 }
        }"#;
        let request: QuoteRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.quantity, 1);
        assert_eq!(request.error_margin_pct, DEFAULT_ERROR_MARGIN_PCT);
        assert_eq!(request.design_hours, None);
        assert!(calculate(&request, &PricingConfig::default()).is_ok());
    }
}
