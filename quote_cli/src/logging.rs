//! Logging setup.
//!
//! Log events go to stderr so they never mix with quotes printed on stdout.
//! `RUST_LOG` wins when set; otherwise only errors are shown, or everything
//! down to `debug` with `--verbose`.

use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "error";
const VERBOSE_FILTER: &str = "quote_core=debug,quote_cli=debug,warn";

/// Initialize the global subscriber. Safe to call more than once.
pub fn init(verbose: bool) {
    let fallback = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}
