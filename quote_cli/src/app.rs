//! Per-run state shared by the one-shot commands and the interactive session.

use std::path::{Path, PathBuf};

use chrono::Local;
use quote_core::calculations::{direct_sale, print_job};
use quote_core::calculations::{DirectSaleRequest, DirectSaleResult, QuoteRequest, QuoteResult};
use quote_core::config::PricingConfig;
use quote_core::file_io::{load_config_or_default, save_config};
use quote_core::history::{SaveOutcome, SessionHistory};
use quote_core::record::QuoteRecord;
use quote_core::sink::RowSink;
use quote_core::CalcResult;

use crate::args::GlobalOpts;
use crate::sheets::SheetsSink;

const NO_SINK: &str = "no spreadsheet configured";

pub struct App {
    config_path: PathBuf,
    responsible: String,
    sink: Option<Box<dyn RowSink>>,
    /// Why there is no sink, shown next to locally kept records
    sink_note: Option<String>,
    history: SessionHistory,
}

impl App {
    /// Build from the global options: resolve the responsible person and
    /// connect the spreadsheet sink unless running offline.
    pub fn from_opts(opts: &GlobalOpts) -> Self {
        let responsible = opts
            .responsible
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .unwrap_or_else(whoami::username);

        let mut app = App::new(&opts.config, responsible);
        if opts.offline {
            app.sink_note = Some("offline".to_string());
            return app;
        }

        match SheetsSink::from_file(&opts.credentials, opts.spreadsheet_id.as_deref()) {
            Ok(sink) => {
                tracing::debug!(url = %sink.append_url(), "spreadsheet sink ready");
                app.sink = Some(Box::new(sink));
                app.sink_note = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "spreadsheet upload disabled");
                app.sink_note = Some(e.to_string());
            }
        }
        app
    }

    /// No sink; records stay in the session history.
    pub fn new(config_path: &Path, responsible: impl Into<String>) -> Self {
        App {
            config_path: config_path.to_path_buf(),
            responsible: responsible.into(),
            sink: None,
            sink_note: Some(NO_SINK.to_string()),
            history: SessionHistory::new(),
        }
    }

    pub fn with_sink(mut self, sink: Box<dyn RowSink>) -> Self {
        self.sink = Some(sink);
        self.sink_note = None;
        self
    }

    pub fn responsible(&self) -> &str {
        &self.responsible
    }

    pub fn sink_note(&self) -> Option<&str> {
        self.sink_note.as_deref()
    }

    pub fn history(&self) -> &SessionHistory {
        &self.history
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Current configuration, re-read from disk so edits made elsewhere are
    /// picked up. Falls back to the defaults when the file is unusable.
    pub fn config(&self) -> PricingConfig {
        load_config_or_default(&self.config_path).config
    }

    /// Price a print job and record it.
    pub fn price_print(&mut self, request: &QuoteRequest) -> CalcResult<(QuoteResult, SaveOutcome)> {
        let config = self.config();
        let result = print_job::calculate(request, &config)?;
        let record = QuoteRecord::for_print(request, &result, &self.responsible, Local::now().naive_local());
        Ok((result, self.store(record)))
    }

    /// Total a direct sale and record it.
    pub fn record_sale(&mut self, request: &DirectSaleRequest) -> CalcResult<(DirectSaleResult, SaveOutcome)> {
        let result = direct_sale::calculate(request)?;
        let record = QuoteRecord::for_sale(request, &result, &self.responsible, Local::now().naive_local());
        Ok((result, self.store(record)))
    }

    /// Upload when a sink is connected, otherwise keep the record with the
    /// reason the sink is missing.
    fn store(&mut self, record: QuoteRecord) -> SaveOutcome {
        match self.sink.as_deref() {
            Some(sink) => self.history.save(record, sink),
            None => self
                .history
                .keep(record, self.sink_note.as_deref().unwrap_or(NO_SINK)),
        }
    }

    /// Apply `change` to the current configuration and save the result.
    pub fn update_config<F>(&self, change: F) -> CalcResult<PricingConfig>
    where
        F: FnOnce(&PricingConfig) -> CalcResult<PricingConfig>,
    {
        let updated = change(&self.config())?;
        save_config(&updated, &self.config_path)?;
        Ok(updated)
    }

    /// Overwrite the configuration file with the built-in defaults.
    pub fn reset_config(&self) -> CalcResult<PricingConfig> {
        let defaults = PricingConfig::default();
        save_config(&defaults, &self.config_path)?;
        Ok(defaults)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote_core::duration::PrintDuration;
    use quote_core::file_io::DEFAULT_CONFIG_FILE;
    use quote_core::sink::SinkError;
    use tempfile::tempdir;

    struct BrokenSink;

    impl RowSink for BrokenSink {
        fn name(&self) -> &str {
            "broken"
        }

        fn append(&self, _record: &QuoteRecord) -> Result<(), SinkError> {
            Err("connection refused".into())
        }
    }

    fn request() -> QuoteRequest {
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
    fn test_price_print_without_config_file() {
        let dir = tempdir().unwrap();
        let mut app = App::new(&dir.path().join(DEFAULT_CONFIG_FILE), "Nahuel");

        let (result, outcome) = app.price_print(&request()).unwrap();
        assert!((result.batch_total - 5336.0).abs() < 1e-9);
        assert_eq!(
            outcome,
            SaveOutcome::LocalOnly {
                reason: NO_SINK.to_string()
            }
        );
        assert_eq!(app.history().len(), 1);
        assert_eq!(app.history().records()[0].responsible, "Nahuel");
    }

    #[test]
    fn test_failed_upload_keeps_record() {
        let dir = tempdir().unwrap();
        let mut app = App::new(&dir.path().join(DEFAULT_CONFIG_FILE), "Seba").with_sink(Box::new(BrokenSink));

        let sale = DirectSaleRequest {
            client: "Feria".to_string(),
            product: String::new(),
            quantity: 10,
            unit_price: 500.0,
        };
        let (result, outcome) = app.record_sale(&sale).unwrap();
        assert_eq!(result.total, 5000.0);
        assert!(matches!(outcome, SaveOutcome::UploadFailed { .. }));
        assert_eq!(app.history().grand_total(), 5000.0);
    }

    #[test]
    fn test_invalid_request_records_nothing() {
        let dir = tempdir().unwrap();
        let mut app = App::new(&dir.path().join(DEFAULT_CONFIG_FILE), "Nahuel");

        let mut bad = request();
        bad.client = "  ".to_string();
        assert!(app.price_print(&bad).is_err());
        assert!(app.history().is_empty());
    }

    #[test]
    fn test_config_changes_apply_to_next_quote() {
        let dir = tempdir().unwrap();
        let mut app = App::new(&dir.path().join(DEFAULT_CONFIG_FILE), "Nahuel");

        app.update_config(|c| c.with_material_price("PLA", 40000.0)).unwrap();
        let (result, _) = app.price_print(&request()).unwrap();
        assert!((result.material_cost - 4400.0).abs() < 1e-9);

        app.reset_config().unwrap();
        assert_eq!(app.config(), PricingConfig::default());
    }
}
