//! # File I/O Module
//!
//! Reads and writes the pricing configuration file (`configuracion.json`).
//!
//! - **Load with fallback**: a missing or malformed file never stops the
//!   calculator; [`load_config_or_default`] falls back to the built-in
//!   defaults and reports why.
//! - **Atomic saves**: write to `.tmp`, sync, rename, so an interrupted save
//!   never leaves a half-written config behind.
//!
//! Saving replaces the whole file. Two operators saving at once is not
//! coordinated: the last rename wins.
//!
//! ## Example
//!
//! ```rust,no_run
//! use quote_core::config::PricingConfig;
//! use quote_core::file_io::{load_config_or_default, save_config};
//! use std::path::Path;
//!
//! let path = Path::new("configuracion.json");
//! let loaded = load_config_or_default(path);
//! let updated = loaded.config.with_material_price("Nylon", 30000.0)?;
//! save_config(&updated, path)?;
//! # Ok::<(), quote_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::PricingConfig;
use crate::errors::{CalcError, CalcResult};

/// Default configuration file name, resolved against the working directory
pub const DEFAULT_CONFIG_FILE: &str = "configuracion.json";

/// Where a loaded configuration came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source")]
pub enum ConfigSource {
    /// Read from the file
    File { path: PathBuf },
    /// No file at the path; built-in defaults
    Missing { path: PathBuf },
    /// File present but unreadable or invalid; built-in defaults
    Fallback { path: PathBuf, error: CalcError },
}

impl ConfigSource {
    pub fn is_fallback(&self) -> bool {
        matches!(self, ConfigSource::Fallback { .. })
    }
}

/// A configuration plus its provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    pub config: PricingConfig,
    pub source: ConfigSource,
}

/// Load the configuration, failing on any I/O, parse or validation error.
///
/// # Returns
///
/// * `Ok(PricingConfig)` - Parsed and validated configuration
/// * `Err(CalcError::FileError)` - File missing or unreadable
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::InvalidInput)` - A negative or non-finite price
pub fn load_config(path: &Path) -> CalcResult<PricingConfig> {
    let contents = fs::read_to_string(path).map_err(|e| {
        CalcError::file_error("read", path.display().to_string(), e.to_string())
    })?;

    let config: PricingConfig =
        serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;

    config.validate()?;
    Ok(config)
}

/// Load the configuration, falling back to the defaults on any failure.
///
/// The failure is logged at `warn` and kept in [`LoadedConfig::source`].
pub fn load_config_or_default(path: &Path) -> LoadedConfig {
    if !path.exists() {
        tracing::info!(path = %path.display(), "no configuration file, using defaults");
        return LoadedConfig {
            config: PricingConfig::default(),
            source: ConfigSource::Missing {
                path: path.to_path_buf(),
            },
        };
    }

    match load_config(path) {
        Ok(config) => {
            tracing::debug!(
                path = %path.display(),
                materials = config.materials.len(),
                "configuration loaded"
            );
            LoadedConfig {
                config,
                source: ConfigSource::File {
                    path: path.to_path_buf(),
                },
            }
        }
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "configuration unusable, using defaults");
            LoadedConfig {
                config: PricingConfig::default(),
                source: ConfigSource::Fallback {
                    path: path.to_path_buf(),
                    error,
                },
            }
        }
    }
}

/// Save the configuration with atomic write semantics.
///
/// The save process:
/// 1. Validate and serialize to pretty JSON
/// 2. Write to a temporary file next to the target
/// 3. Sync to disk (fsync)
/// 4. Rename over the target
pub fn save_config(config: &PricingConfig, path: &Path) -> CalcResult<()> {
    config.validate()?;

    let json = serde_json::to_string_pretty(config).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })?;

    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;
    drop(tmp_file);

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    tracing::info!(path = %path.display(), "configuration saved");
    Ok(())
}

/// `configuracion.json` -> `configuracion.json.tmp`
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OperatingUpdate;
    use tempfile::tempdir;

    #[test]
    fn test_tmp_path_generation() {
        let tmp = tmp_path_for(Path::new("/path/to/configuracion.json"));
        assert_eq!(tmp, Path::new("/path/to/configuracion.json.tmp"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);

        let config = PricingConfig::default()
            .with_material_price("Nylon", 31000.0)
            .unwrap()
            .with_operating(&OperatingUpdate {
                profit_margin_pct: Some(80.0),
                ..Default::default()
            })
            .unwrap();
        save_config(&config, &path).unwrap();

        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);

        save_config(&PricingConfig::default(), &path).unwrap();

        assert!(path.exists());
        assert!(!tmp_path_for(&path).exists());
    }

    #[test]
    fn test_saved_file_uses_shop_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        save_config(&PricingConfig::default(), &path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"materiales\""));
        assert!(text.contains("\"precio_desgaste_hora\""));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.json");

        let loaded = load_config_or_default(&path);
        assert_eq!(loaded.config, PricingConfig::default());
        assert!(matches!(loaded.source, ConfigSource::Missing { .. }));
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, "{ materiales: ").unwrap();

        let loaded = load_config_or_default(&path);
        assert_eq!(loaded.config, PricingConfig::default());
        assert!(loaded.source.is_fallback());
        if let ConfigSource::Fallback { error, .. } = loaded.source {
            assert_eq!(error.error_code(), "SERIALIZATION_ERROR");
        }
    }

    #[test]
    fn test_negative_price_in_file_falls_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        fs::write(&path, r#"{ "materiales": { "PLA": -5 } }"#).unwrap();

        assert!(load_config(&path).is_err());
        assert!(load_config_or_default(&path).source.is_fallback());
    }

    #[test]
    fn test_save_rejects_invalid_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        let mut config = PricingConfig::default();
        config.operating.energy_draw_kw = f64::NAN;

        assert!(save_config(&config, &path).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_save_overwrites_wholesale() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);

        let with_nylon = PricingConfig::default().with_material_price("Nylon", 1.0).unwrap();
        save_config(&with_nylon, &path).unwrap();
        save_config(&PricingConfig::default(), &path).unwrap();

        let loaded = load_config(&path).unwrap();
        assert!(loaded.materials.price_per_kg("Nylon").is_err());
    }
}
