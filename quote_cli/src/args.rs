//! CLI argument definitions using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use quote_core::duration::PrintDuration;
use quote_core::units::parse_decimal;
use quote_core::CalcResult;

use crate::sheets::DEFAULT_CREDENTIALS_FILE;

#[derive(Parser, Debug)]
#[command(name = "printquote")]
#[command(author, version, about = "Price 3D print jobs and log sales to the shared sheet")]
#[command(long_about = "Prices 3D print jobs from material, energy, machine wear and design time, \
records direct sales, and appends every result to the shared spreadsheet. \
Runs an interactive session when no subcommand is given.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Pricing configuration file
    #[arg(long, global = true, env = "PRINTQUOTE_CONFIG", default_value = quote_core::file_io::DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Spreadsheet credentials file
    #[arg(long, global = true, env = "PRINTQUOTE_CREDENTIALS", default_value = DEFAULT_CREDENTIALS_FILE)]
    pub credentials: PathBuf,

    /// Spreadsheet to append to (overrides `spreadsheet_id` in the credentials file)
    #[arg(long, global = true, env = "PRINTQUOTE_SPREADSHEET_ID")]
    pub spreadsheet_id: Option<String>,

    /// Person responsible for this session (default: current OS user)
    #[arg(long, short = 'r', global = true, env = "PRINTQUOTE_RESPONSIBLE")]
    pub responsible: Option<String>,

    /// Do not upload rows to the spreadsheet
    #[arg(long, global = true)]
    pub offline: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Price a 3D print job
    Quote(QuoteArgs),

    /// Record a direct sale (stock, keychains, resale)
    Sale(SaleArgs),

    /// Show or change prices and operating costs
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Interactive session (default)
    Session,
}

#[derive(Args, Debug)]
pub struct QuoteArgs {
    /// Client name
    #[arg(long)]
    pub client: String,

    /// Model or part name (STL)
    #[arg(long, default_value = "")]
    pub model: String,

    /// Material, as named in the catalog
    #[arg(long, short = 'm')]
    pub material: String,

    /// Filament color
    #[arg(long, default_value = "")]
    pub color: String,

    /// Total weight in grams, supports included ("12,5" accepted)
    #[arg(long, short = 'w', value_parser = parse_weight)]
    pub weight: f64,

    /// Print time: "2h", "90m", "1,5 hs" or "1d 2h 30m"
    #[arg(long, short = 't')]
    pub time: PrintDuration,

    /// Number of parts
    #[arg(long, short = 'q', default_value_t = 1)]
    pub quantity: u32,

    /// Error margin in percent (material assumed wasted)
    #[arg(long, value_parser = parse_percent, default_value = "10")]
    pub error_margin: f64,

    /// Bill this many design hours
    #[arg(long, value_parser = parse_hours)]
    pub design_hours: Option<f64>,
}

#[derive(Args, Debug)]
pub struct SaleArgs {
    /// Client name
    #[arg(long)]
    pub client: String,

    /// Product or model sold
    #[arg(long, default_value = "")]
    pub product: String,

    /// Units sold
    #[arg(long, short = 'q', default_value_t = quote_core::calculations::direct_sale::DEFAULT_SALE_QUANTITY)]
    pub quantity: u32,

    /// Price per unit
    #[arg(long, short = 'p', value_parser = parse_price)]
    pub unit_price: f64,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print material prices and operating costs
    Show,

    /// Add a material or change its price per kg
    SetMaterial {
        /// Material name
        name: String,
        /// Price per kilogram
        #[arg(value_parser = parse_price)]
        price: f64,
    },

    /// Remove a material from the catalog
    RemoveMaterial {
        /// Material name
        name: String,
    },

    /// Change operating costs
    Set(OperatingArgs),

    /// Overwrite the file with the built-in defaults
    Reset,
}

#[derive(Args, Debug, Default)]
pub struct OperatingArgs {
    /// Electricity price per kWh
    #[arg(long, value_parser = parse_price)]
    pub kwh: Option<f64>,

    /// Printer draw in kW
    #[arg(long, value_parser = parse_price)]
    pub draw: Option<f64>,

    /// Design price per hour
    #[arg(long, value_parser = parse_price)]
    pub design_hour: Option<f64>,

    /// Profit margin in percent
    #[arg(long, value_parser = parse_percent)]
    pub margin: Option<f64>,

    /// Machine wear cost per hour
    #[arg(long, value_parser = parse_price)]
    pub wear: Option<f64>,
}

fn parse_weight(s: &str) -> CalcResult<f64> {
    parse_decimal("weight", s)
}

fn parse_price(s: &str) -> CalcResult<f64> {
    parse_decimal("price", s)
}

fn parse_percent(s: &str) -> CalcResult<f64> {
    parse_decimal("percent", s.trim().trim_end_matches('%'))
}

fn parse_hours(s: &str) -> CalcResult<f64> {
    parse_decimal("design_hours", s)
}
