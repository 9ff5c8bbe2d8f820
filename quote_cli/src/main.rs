//! # Printquote
//!
//! Command-line front-end for the 3D print pricing engine in `quote_core`.
//!
//! Without a subcommand it runs an interactive session; `quote`, `sale`
//! and `config` do one thing and exit. Every completed quote is kept in
//! the session history and appended to the shared spreadsheet when
//! credentials are available.

mod app;
mod args;
mod commands;
mod logging;
mod prompt;
mod report;
mod session;
mod sheets;

use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::Parser;

use crate::app::App;
use crate::args::{Cli, Commands};
use crate::prompt::{Prompter, TermPrompter};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.global.verbose);
    tracing::debug!(config = %cli.global.config.display(), "starting");

    let mut app = App::from_opts(&cli.global);
    let json = cli.global.json;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Some(Commands::Quote(args)) => commands::run_quote(&mut app, args, json, &mut out),
        Some(Commands::Sale(args)) => commands::run_sale(&mut app, args, json, &mut out),
        Some(Commands::Config(cmd)) => commands::run_config(&app, cmd, json, &mut out),
        Some(Commands::Session) | None => {
            if io::stdin().is_terminal() && io::stdout().is_terminal() {
                drop(out);
                session::run(&mut app, &mut TermPrompter::new())?;
            } else {
                session::run(&mut app, &mut Prompter::new(io::stdin().lock(), out))?;
            }
            Ok(())
        }
    }
}
