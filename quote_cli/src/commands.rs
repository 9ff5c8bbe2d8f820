//! One-shot subcommands: `quote`, `sale` and `config`.

use std::io::Write;

use anyhow::{Context, Result};
use quote_core::calculations::{DirectSaleRequest, QuoteRequest};
use quote_core::config::{OperatingUpdate, PricingConfig};
use quote_core::history::SaveOutcome;
use serde::Serialize;

use crate::app::App;
use crate::args::{ConfigCommands, OperatingArgs, QuoteArgs, SaleArgs};
use crate::report;

/// Machine output for `--json`
#[derive(Serialize)]
struct Recorded<'a, Req, Res> {
    request: &'a Req,
    result: &'a Res,
    outcome: &'a SaveOutcome,
}

impl From<QuoteArgs> for QuoteRequest {
    fn from(args: QuoteArgs) -> Self {
        QuoteRequest {
            client: args.client,
            model: args.model,
            material: args.material,
            color: args.color,
            weight_g: args.weight,
            duration: args.time,
            quantity: args.quantity,
            error_margin_pct: args.error_margin,
            design_hours: args.design_hours,
        }
    }
}

impl From<SaleArgs> for DirectSaleRequest {
    fn from(args: SaleArgs) -> Self {
        DirectSaleRequest {
            client: args.client,
            product: args.product,
            quantity: args.quantity,
            unit_price: args.unit_price,
        }
    }
}

impl From<OperatingArgs> for OperatingUpdate {
    fn from(args: OperatingArgs) -> Self {
        OperatingUpdate {
            energy_price_per_kwh: args.kwh,
            energy_draw_kw: args.draw,
            design_price_per_hour: args.design_hour,
            profit_margin_pct: args.margin,
            wear_price_per_hour: args.wear,
        }
    }
}

pub fn run_quote<W: Write>(app: &mut App, args: QuoteArgs, json: bool, out: &mut W) -> Result<()> {
    let request = QuoteRequest::from(args);
    let (result, outcome) = app.price_print(&request).context("Cannot price the job")?;

    if json {
        let doc = Recorded {
            request: &request,
            result: &result,
            outcome: &outcome,
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&doc)?)?;
    } else {
        report::write_quote(out, &request, &result)?;
        report::write_outcome(out, &outcome)?;
    }
    Ok(())
}

pub fn run_sale<W: Write>(app: &mut App, args: SaleArgs, json: bool, out: &mut W) -> Result<()> {
    let request = DirectSaleRequest::from(args);
    let (result, outcome) = app.record_sale(&request).context("Cannot record the sale")?;

    if json {
        let doc = Recorded {
            request: &request,
            result: &result,
            outcome: &outcome,
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&doc)?)?;
    } else {
        report::write_sale(out, &request, &result)?;
        report::write_outcome(out, &outcome)?;
    }
    Ok(())
}

pub fn run_config<W: Write>(app: &App, cmd: ConfigCommands, json: bool, out: &mut W) -> Result<()> {
    let config = match cmd {
        ConfigCommands::Show => app.config(),
        ConfigCommands::SetMaterial { name, price } => app
            .update_config(|c| c.with_material_price(&name, price))
            .with_context(|| format!("Cannot set the price of '{}'", name))?,
        ConfigCommands::RemoveMaterial { name } => app
            .update_config(|c| c.without_material(&name))
            .with_context(|| format!("Cannot remove '{}'", name))?,
        ConfigCommands::Set(args) => {
            let update = OperatingUpdate::from(args);
            if update.is_empty() {
                anyhow::bail!("Nothing to change: pass at least one of --kwh, --draw, --design-hour, --margin, --wear");
            }
            app.update_config(|c| c.with_operating(&update))
                .context("Cannot update operating costs")?
        }
        ConfigCommands::Reset => app.reset_config().context("Cannot reset the configuration")?,
    };

    write_config(out, &config, json)
}

fn write_config<W: Write>(out: &mut W, config: &PricingConfig, json: bool) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(config)?)?;
    } else {
        writeln!(out, "{}", report::config_table(config))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::GlobalOpts;
    use crate::sheets::DEFAULT_CREDENTIALS_FILE;
    use quote_core::duration::PrintDuration;
    use quote_core::file_io::DEFAULT_CONFIG_FILE;
    use tempfile::tempdir;

    fn quote_args(client: &str) -> QuoteArgs {
        QuoteArgs {
            client: client.to_string(),
            model: "Soporte".to_string(),
            material: "PLA".to_string(),
            color: "Negro".to_string(),
            weight: 100.0,
            time: PrintDuration::hours(2.0),
            quantity: 1,
            error_margin: 10.0,
            design_hours: None,
        }
    }

    #[test]
    fn test_quote_json_output() {
        let dir = tempdir().unwrap();
        let mut app = App::new(&dir.path().join(DEFAULT_CONFIG_FILE), "Nahuel");
        let mut out = Vec::new();

        run_quote(&mut app, quote_args("Ana"), true, &mut out).unwrap();

        let doc: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let total = doc["result"]["batch_total"].as_f64().unwrap();
        assert!((total - 5336.0).abs() < 1e-9);
        assert_eq!(doc["outcome"]["status"], "LocalOnly");
        assert_eq!(doc["outcome"]["reason"], "no spreadsheet configured");
    }

    #[test]
    fn test_json_output_explains_missing_credentials() {
        let dir = tempdir().unwrap();
        let opts = GlobalOpts {
            config: dir.path().join(DEFAULT_CONFIG_FILE),
            credentials: dir.path().join(DEFAULT_CREDENTIALS_FILE),
            spreadsheet_id: None,
            responsible: Some("Nahuel".to_string()),
            offline: false,
            json: true,
            verbose: false,
        };
        let mut app = App::from_opts(&opts);
        let mut out = Vec::new();

        run_quote(&mut app, quote_args("Ana"), true, &mut out).unwrap();

        let doc: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(doc["outcome"]["status"], "LocalOnly");
        let reason = doc["outcome"]["reason"].as_str().unwrap();
        assert!(reason.contains(DEFAULT_CREDENTIALS_FILE));
        assert!(reason.contains("not found"));
        assert_eq!(app.history().len(), 1);
    }

    #[test]
    fn test_text_output_says_offline() {
        let dir = tempdir().unwrap();
        let opts = GlobalOpts {
            config: dir.path().join(DEFAULT_CONFIG_FILE),
            credentials: dir.path().join(DEFAULT_CREDENTIALS_FILE),
            spreadsheet_id: None,
            responsible: Some("Nahuel".to_string()),
            offline: true,
            json: false,
            verbose: false,
        };
        let mut app = App::from_opts(&opts);
        let mut out = Vec::new();

        run_quote(&mut app, quote_args("Ana"), false, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Warning: Saved to session history only: offline"));
    }

    #[test]
    fn test_quote_without_client_fails() {
        let dir = tempdir().unwrap();
        let mut app = App::new(&dir.path().join(DEFAULT_CONFIG_FILE), "Nahuel");
        let mut out = Vec::new();

        let err = run_quote(&mut app, quote_args(""), false, &mut out).unwrap_err();
        assert!(format!("{:#}", err).contains("client"));
        assert!(app.history().is_empty());
    }

    #[test]
    fn test_sale_text_output() {
        let dir = tempdir().unwrap();
        let mut app = App::new(&dir.path().join(DEFAULT_CONFIG_FILE), "Seba");
        let mut out = Vec::new();

        let args = SaleArgs {
            client: "Feria".to_string(),
            product: "Llavero".to_string(),
            quantity: 10,
            unit_price: 500.0,
        };
        run_sale(&mut app, args, false, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("TOTAL:"));
        assert!(text.contains("$5,000.00"));
    }

    #[test]
    fn test_config_set_requires_a_flag() {
        let dir = tempdir().unwrap();
        let app = App::new(&dir.path().join(DEFAULT_CONFIG_FILE), "Nahuel");
        let mut out = Vec::new();

        assert!(run_config(&app, ConfigCommands::Set(OperatingArgs::default()), false, &mut out).is_err());

        let args = OperatingArgs {
            margin: Some(50.0),
            ..Default::default()
        };
        run_config(&app, ConfigCommands::Set(args), true, &mut out).unwrap();
        assert_eq!(app.config().operating.profit_margin_pct, 50.0);
    }

    #[test]
    fn test_remove_unknown_material_fails() {
        let dir = tempdir().unwrap();
        let app = App::new(&dir.path().join(DEFAULT_CONFIG_FILE), "Nahuel");
        let mut out = Vec::new();

        let cmd = ConfigCommands::RemoveMaterial {
            name: "Madera".to_string(),
        };
        assert!(run_config(&app, cmd, false, &mut out).is_err());
        assert!(!app.config_path().exists());
    }
}
