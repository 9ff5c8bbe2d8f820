//! Human-readable output: quote breakdowns, configuration and history tables.

use std::io::{self, Write};

use quote_core::calculations::{DirectSaleRequest, DirectSaleResult, QuoteRequest, QuoteResult};
use quote_core::config::PricingConfig;
use quote_core::history::{SaveOutcome, SessionHistory};
use tabled::{builder::Builder, settings::Style};

/// `1234567.891` -> `$1,234,567.89`
pub fn money(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && formatted != "0.00" { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, frac_part)
}

pub fn write_quote<W: Write + ?Sized>(w: &mut W, request: &QuoteRequest, result: &QuoteResult) -> io::Result<()> {
    let model = if request.model.trim().is_empty() { "-" } else { request.model.trim() };
    writeln!(w)?;
    writeln!(w, "PRINT JOB | {} | {} x{}", model, result.material, result.quantity)?;
    writeln!(w, "  Material:   {:>14}", money(result.material_cost))?;
    writeln!(w, "  Energy:     {:>14}", money(result.energy_cost))?;
    writeln!(w, "  Wear:       {:>14}", money(result.wear_cost))?;
    writeln!(w, "  Subtotal:   {:>14}", money(result.subtotal))?;
    writeln!(w, "  With margin:{:>14}", money(result.sale_subtotal))?;
    if result.design_cost > 0.0 {
        writeln!(w, "  Design:     {:>14}", money(result.design_cost))?;
    }
    writeln!(w, "  ----------------------------")?;
    writeln!(w, "  UNIT PRICE: {:>14}", money(result.unit_price))?;
    writeln!(w, "  BATCH TOTAL:{:>14}", money(result.batch_total))?;
    Ok(())
}

pub fn write_sale<W: Write + ?Sized>(w: &mut W, request: &DirectSaleRequest, result: &DirectSaleResult) -> io::Result<()> {
    let product = if request.product.trim().is_empty() { "-" } else { request.product.trim() };
    writeln!(w)?;
    writeln!(w, "DIRECT SALE | {}", product)?;
    writeln!(w, "  Quantity:   {:>14}", result.quantity)?;
    writeln!(w, "  Unit price: {:>14}", money(result.unit_price))?;
    writeln!(w, "  ----------------------------")?;
    writeln!(w, "  TOTAL:      {:>14}", money(result.total))?;
    Ok(())
}

/// One line about where the record went.
pub fn write_outcome<W: Write + ?Sized>(w: &mut W, outcome: &SaveOutcome) -> io::Result<()> {
    match (outcome, outcome.warning()) {
        (SaveOutcome::Uploaded { sink }, _) => writeln!(w, "Saved to {}.", sink),
        (_, Some(warning)) => writeln!(w, "Warning: {}", warning),
        (_, None) => writeln!(w, "Saved to session history."),
    }
}

pub fn config_table(config: &PricingConfig) -> String {
    let mut materials = Builder::default();
    materials.push_record(["Material", "Price / kg"]);
    for (name, price) in config.materials.iter() {
        materials.push_record([name.to_string(), money(price)]);
    }

    let ops = &config.operating;
    let mut operating = Builder::default();
    operating.push_record(["Operating cost", "Value"]);
    operating.push_record(["Energy price (kWh)".to_string(), money(ops.energy_price_per_kwh)]);
    operating.push_record(["Printer draw (kW)".to_string(), format!("{}", ops.energy_draw_kw)]);
    operating.push_record(["Profit margin (%)".to_string(), format!("{}", ops.profit_margin_pct)]);
    operating.push_record(["Machine wear (per h)".to_string(), money(ops.wear_price_per_hour)]);
    operating.push_record(["Design (per h)".to_string(), money(ops.design_price_per_hour)]);

    let materials = materials.build().with(Style::rounded()).to_string();
    let operating = operating.build().with(Style::rounded()).to_string();
    format!("{}\n\n{}", materials, operating)
}

/// Session history with the columns shown to the operator (time of day
/// and design hours are left out).
pub fn history_table(history: &SessionHistory) -> String {
    if history.is_empty() {
        return "No quotes recorded in this session yet.".to_string();
    }

    let mut table = Builder::default();
    table.push_record([
        "Date", "Resp.", "Client", "Model", "Type", "Mat", "Color", "Weight", "Time", "Qty", "Unit",
        "Total",
    ]);
    for r in history.records() {
        table.push_record([
            r.date.clone(),
            r.responsible.clone(),
            r.client.clone(),
            r.model.clone(),
            r.kind.to_string(),
            r.material.clone(),
            r.color.clone(),
            format!("{}", r.weight_g),
            r.duration_text.clone(),
            r.quantity.to_string(),
            money(r.unit_price),
            money(r.total),
        ]);
    }

    let table = table.build().with(Style::rounded()).to_string();
    format!(
        "{}\n{} record(s), grand total {}",
        table,
        history.len(),
        money(history.grand_total())
    )
}
