mod logging;
mod shell;

use std::io::{stdin, stdout};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use crate::application::Ledger;

pub use shell::Shell;

/// Tally - in-memory transfer ledger
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Register users, log in and send money between them. Nothing is saved on exit.")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging on stderr (RUST_LOG takes precedence)
    #[arg(short, long)]
    pub verbose: bool,

    /// Log line format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// Print the final ledger state as JSON when the program exits
    #[arg(long)]
    pub dump_state: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        logging::init(self.verbose, self.log_format);

        let mut shell = Shell::new(Ledger::new(), stdin().lock(), stdout().lock());
        shell.run()?;
        let ledger = shell.into_ledger();

        let report = ledger.check_integrity();
        if report.is_healthy() {
            tracing::debug!(
                users = report.user_count,
                transfers = report.transfer_count,
                "ledger consistent at exit"
            );
        } else {
            tracing::error!(issues = ?report.issues, "ledger inconsistent at exit");
        }

        if self.dump_state {
            let json = serde_json::to_string_pretty(&ledger.snapshot())
                .context("Failed to serialize ledger state")?;
            println!("{}", json);
        }

        Ok(())
    }
}
