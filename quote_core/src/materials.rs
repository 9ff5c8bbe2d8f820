//! # Material Catalog
//!
//! Filament and resin prices per kilogram, keyed by the name the shop uses
//! ("PLA", "PETG", ...). The catalog is part of [`PricingConfig`] and is only
//! changed through a configuration update.
//!
//! Names are listed in alphabetical order. Lookups try the exact name first
//! and then an ASCII case-insensitive match, so "pla" finds "PLA".
//!
//! ## Example
//!
//! ```rust
//! use quote_core::materials::MaterialCatalog;
//!
//! let catalog = MaterialCatalog::default();
//! assert_eq!(catalog.price_per_kg("PLA").unwrap(), 20000.0);
//! assert_eq!(catalog.price_per_kg("petg").unwrap(), 16450.0);
//! assert!(catalog.price_per_kg("Nylon").is_err());
//! ```
//!
//! [`PricingConfig`]: crate::config::PricingConfig

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Built-in prices per kilogram used when no configuration file is readable.
pub const DEFAULT_MATERIAL_PRICES: [(&str, f64); 5] = [
    ("PLA", 20000.0),
    ("PETG", 16450.0),
    ("ABS", 19000.0),
    ("TPU", 22700.0),
    ("Resina", 35000.0),
];

/// Material preselected by the interactive front-end when present.
pub const PREFERRED_MATERIAL: &str = "PLA";

/// Mapping from material name to price per kilogram.
///
/// ## JSON Example
///
/// ```json
/// { "ABS": 19000.0, "PETG": 16450.0, "PLA": 20000.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialCatalog {
    prices: BTreeMap<String, f64>,
}

impl MaterialCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        MaterialCatalog {
            prices: BTreeMap::new(),
        }
    }

    /// Resolve a user-supplied name to the catalog's spelling of it.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        let name = name.trim();
        if let Some((key, _)) = self.prices.get_key_value(name) {
            return Some(key.as_str());
        }
        self.prices
            .keys()
            .find(|key| key.eq_ignore_ascii_case(name))
            .map(String::as_str)
    }

    /// Price per kilogram for a material.
    pub fn price_per_kg(&self, name: &str) -> CalcResult<f64> {
        self.resolve(name)
            .and_then(|key| self.prices.get(key))
            .copied()
            .ok_or_else(|| CalcError::material_not_found(name))
    }

    /// Add a material or reprice an existing one.
    ///
    /// An existing entry matched case-insensitively keeps its spelling.
    pub fn set_price(&mut self, name: &str, price_per_kg: f64) -> CalcResult<()> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(CalcError::invalid_input("material", name, "Material name is required"));
        }
        validate_price(trimmed, price_per_kg)?;

        let key = self
            .resolve(trimmed)
            .map(str::to_string)
            .unwrap_or_else(|| trimmed.to_string());
        self.prices.insert(key, price_per_kg);
        Ok(())
    }

    /// Remove a material, returning its old price.
    pub fn remove(&mut self, name: &str) -> CalcResult<f64> {
        let key = self
            .resolve(name)
            .map(str::to_string)
            .ok_or_else(|| CalcError::material_not_found(name))?;
        self.prices
            .remove(&key)
            .ok_or_else(|| CalcError::material_not_found(name))
    }

    /// Check every stored price.
    pub fn validate(&self) -> CalcResult<()> {
        for (name, price) in &self.prices {
            validate_price(name, *price)?;
        }
        Ok(())
    }

    /// Material names in listing order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.prices.keys().map(String::as_str)
    }

    /// (name, price per kg) pairs in listing order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.prices.iter().map(|(name, price)| (name.as_str(), *price))
    }

    /// Name to preselect in a material picker.
    pub fn preferred(&self) -> Option<&str> {
        self.resolve(PREFERRED_MATERIAL).or_else(|| self.names().next())
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl Default for MaterialCatalog {
    fn default() -> Self {
        DEFAULT_MATERIAL_PRICES.iter().copied().collect()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for MaterialCatalog {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        MaterialCatalog {
            prices: iter.into_iter().map(|(name, price)| (name.into(), price)).collect(),
        }
    }
}

fn validate_price(name: &str, price_per_kg: f64) -> CalcResult<()> {
    if !price_per_kg.is_finite() || price_per_kg < 0.0 {
        return Err(CalcError::invalid_input(
            format!("materiales.{}", name),
            price_per_kg.to_string(),
            "Price per kg must be a nonnegative number",
        ));
    }
    Ok(())
}
