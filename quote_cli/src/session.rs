//! Interactive menu: the default mode when no subcommand is given.
//!
//! Every prompt returns `None` at end of input; the session then unwinds to
//! the main menu and exits as if Quit had been chosen.

use std::io::{self, Write};

use quote_core::calculations::direct_sale::DEFAULT_SALE_QUANTITY;
use quote_core::calculations::print_job::DEFAULT_ERROR_MARGIN_PCT;
use quote_core::calculations::{DirectSaleRequest, QuoteRequest};
use quote_core::config::OperatingUpdate;

use crate::app::App;
use crate::prompt::Ask;
use crate::report;

/// Bail out of the current flow when input ends.
macro_rules! ask {
    ($e:expr) => {
        match $e? {
            Some(value) => value,
            None => return Ok(()),
        }
    };
}

const MAIN_MENU: [&str; 5] = ["Print quote", "Direct sale", "Session history", "Configuration", "Quit"];

const CONFIG_MENU: [&str; 5] = [
    "Set material price",
    "Remove material",
    "Operating costs",
    "Restore defaults",
    "Back",
];

pub fn run(app: &mut App, p: &mut dyn Ask) -> io::Result<()> {
    writeln!(p.out(), "Printquote | responsible: {}", app.responsible())?;
    if let Some(note) = app.sink_note() {
        writeln!(p.out(), "Rows will only be kept in this session ({}).", note)?;
    }

    loop {
        writeln!(p.out())?;
        match p.choose("Main menu", &MAIN_MENU)? {
            Some(0) => print_quote(app, p)?,
            Some(1) => direct_sale(app, p)?,
            Some(2) => writeln!(p.out(), "{}", report::history_table(app.history()))?,
            Some(3) => configuration(app, p)?,
            _ => break,
        }
    }

    if !app.history().is_empty() {
        writeln!(
            p.out(),
            "{} record(s) this session, grand total {}.",
            app.history().len(),
            report::money(app.history().grand_total())
        )?;
    }
    Ok(())
}

fn required_text(p: &mut dyn Ask, label: &str) -> io::Result<Option<String>> {
    loop {
        match p.text(label, "")? {
            None => return Ok(None),
            Some(answer) if !answer.is_empty() => return Ok(Some(answer)),
            Some(_) => writeln!(p.out(), "  {} is required.", label)?,
        }
    }
}

fn positive(p: &mut dyn Ask, field: &str, label: &str, default: Option<f64>) -> io::Result<Option<f64>> {
    loop {
        match p.number(field, label, default)? {
            None => return Ok(None),
            Some(value) if value > 0.0 => return Ok(Some(value)),
            Some(_) => writeln!(p.out(), "  Must be greater than zero.")?,
        }
    }
}

fn print_quote(app: &mut App, p: &mut dyn Ask) -> io::Result<()> {
    let config = app.config();
    let client = ask!(required_text(p, "Client"));
    let model = ask!(p.text("Model (STL)", ""));

    let names: Vec<&str> = config.materials.names().collect();
    let default_material = config.materials.preferred().unwrap_or_default();
    let material = loop {
        let answer = ask!(p.text(&format!("Material ({})", names.join(", ")), default_material));
        match config.materials.resolve(&answer) {
            Some(name) => break name.to_string(),
            None => writeln!(p.out(), "  Unknown material '{}'.", answer)?,
        }
    };

    let color = ask!(p.text("Color", ""));
    let weight_g = ask!(positive(p, "weight", "Weight (g)", None));
    let duration = ask!(p.duration("Print time"));
    let quantity = ask!(p.count("Quantity", 1));
    let error_margin_pct = loop {
        let value = ask!(p.number("error_margin", "Error margin (%)", Some(DEFAULT_ERROR_MARGIN_PCT)));
        if value >= 0.0 {
            break value;
        }
        writeln!(p.out(), "  Must not be negative.")?;
    };
    let design_hours = if ask!(p.confirm("Bill design time?", false)) {
        Some(ask!(positive(p, "design_hours", "Design hours", None)))
    } else {
        None
    };

    let request = QuoteRequest {
        client,
        model,
        material,
        color,
        weight_g,
        duration,
        quantity,
        error_margin_pct,
        design_hours,
    };

    match app.price_print(&request) {
        Ok((result, outcome)) => {
            report::write_quote(p.out(), &request, &result)?;
            report::write_outcome(p.out(), &outcome)
        }
        Err(e) => writeln!(p.out(), "Error: {}", e),
    }
}

fn direct_sale(app: &mut App, p: &mut dyn Ask) -> io::Result<()> {
    let client = ask!(required_text(p, "Client"));
    let product = ask!(p.text("Product", ""));
    let quantity = ask!(p.count("Quantity", DEFAULT_SALE_QUANTITY));
    let unit_price = ask!(positive(p, "unit_price", "Unit price", None));

    let request = DirectSaleRequest {
        client,
        product,
        quantity,
        unit_price,
    };

    match app.record_sale(&request) {
        Ok((result, outcome)) => {
            report::write_sale(p.out(), &request, &result)?;
            report::write_outcome(p.out(), &outcome)
        }
        Err(e) => writeln!(p.out(), "Error: {}", e),
    }
}

fn configuration(app: &mut App, p: &mut dyn Ask) -> io::Result<()> {
    loop {
        writeln!(p.out())?;
        writeln!(p.out(), "{}", report::config_table(&app.config()))?;

        let saved = match ask!(p.choose("Configuration", &CONFIG_MENU)) {
            0 => {
                let name = ask!(required_text(p, "Material"));
                let price = loop {
                    let value = ask!(p.number("price", "Price per kg", None));
                    if value >= 0.0 {
                        break value;
                    }
                    writeln!(p.out(), "  Must not be negative.")?;
                };
                app.update_config(|c| c.with_material_price(&name, price))
            }
            1 => {
                let name = ask!(required_text(p, "Material"));
                app.update_config(|c| c.without_material(&name))
            }
            2 => {
                let ops = app.config().operating;
                let kwh = ask!(p.number("precio_kwh", "Energy price (kWh)", Some(ops.energy_price_per_kwh)));
                let draw = ask!(p.number("consumo_kw", "Printer draw (kW)", Some(ops.energy_draw_kw)));
                let margin = ask!(p.number("margen_ganancia", "Profit margin (%)", Some(ops.profit_margin_pct)));
                let wear = ask!(p.number("precio_desgaste_hora", "Machine wear (per h)", Some(ops.wear_price_per_hour)));
                let design = ask!(p.number("precio_hora_diseno", "Design (per h)", Some(ops.design_price_per_hour)));
                let update = OperatingUpdate {
                    energy_price_per_kwh: Some(kwh),
                    energy_draw_kw: Some(draw),
                    design_price_per_hour: Some(design),
                    profit_margin_pct: Some(margin),
                    wear_price_per_hour: Some(wear),
                };
                app.update_config(|c| c.with_operating(&update))
            }
            3 => {
                if !ask!(p.confirm("Overwrite the configuration with the defaults?", false)) {
                    continue;
                }
                app.reset_config()
            }
            _ => return Ok(()),
        };

        match saved {
            Ok(_) => writeln!(p.out(), "Saved to {}.", app.config_path().display())?,
            Err(e) => writeln!(p.out(), "Error: {}", e)?,
        }
    }
}
