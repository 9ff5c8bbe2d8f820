//! # quote_core - 3D Print Pricing Engine
//!
//! `quote_core` holds everything the Printquote front-end needs that is not
//! about terminals or networks: the pricing formulas, the configuration
//! model and its JSON file, the row written for each completed quote, and
//! the in-session history.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **Explicit configuration**: Every calculation receives a [`PricingConfig`];
//!   there is no global price table
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use quote_core::calculations::print_job::{self, QuoteRequest};
//! use quote_core::config::PricingConfig;
//! use quote_core::duration::PrintDuration;
//!
//! let config = PricingConfig::default();
//! let request = QuoteRequest {
//!     client: "Ana".to_string(),
//!     model: "Maceta".to_string(),
//!     material: "PETG".to_string(),
//!     color: "Verde".to_string(),
//!     weight_g: 85.0,
//!     duration: "3h 20m".parse::<PrintDuration>().unwrap(),
//!     quantity: 2,
//!     error_margin_pct: 10.0,
//!     design_hours: None,
//! };
//!
//! let result = print_job::calculate(&request, &config).unwrap();
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Print job quotes and direct sales
//! - [`config`] - Operating costs and the [`PricingConfig`] container
//! - [`materials`] - Material price catalog
//! - [`duration`] - Print time entry models and normalization
//! - [`units`] - Unit wrappers and numeric text parsing
//! - [`record`] - The positional row logged per quote
//! - [`history`] - In-session record list
//! - [`sink`] - Remote row sink trait
//! - [`file_io`] - Configuration file load/save
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod config;
pub mod duration;
pub mod errors;
pub mod file_io;
pub mod history;
pub mod materials;
pub mod record;
pub mod sink;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{DirectSaleRequest, DirectSaleResult, JobKind, QuoteRequest, QuoteResult};
pub use config::{OperatingConfig, OperatingUpdate, PricingConfig};
pub use duration::PrintDuration;
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_config, load_config_or_default, save_config, ConfigSource, LoadedConfig};
pub use history::{SaveOutcome, SessionHistory};
pub use materials::MaterialCatalog;
pub use record::QuoteRecord;
pub use sink::RowSink;
