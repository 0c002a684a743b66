//! Console entry point for the digital assist organizer.
//!
//! # Responsibility
//! - Parse command-line configuration and optionally start file logging.
//! - Open the store once, run the menu loop, release the store on the way out.
//! - Exit with status 0 whatever happens; failures are printed, not returned.

mod menu;
mod session;

use anyhow::Context;
use clap::Parser;
use organizer_core::{
    default_log_level, init_logging, ConnectionManager, DocumentStore, LogLevel, DEFAULT_DB_PATH,
};
use std::io::{self, Write};
use std::path::PathBuf;

/// Personal organizer for tasks, events and notes.
#[derive(Debug, Parser)]
#[command(name = "organizer", version)]
struct Args {
    /// SQLite file holding the document store.
    #[arg(long, default_value = DEFAULT_DB_PATH)]
    db: PathBuf,

    /// Log verbosity: trace|debug|info|warn|error.
    #[arg(long, value_parser = parse_log_level)]
    log_level: Option<LogLevel>,

    /// Absolute directory for rolling log files; logging is off when omitted.
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

fn parse_log_level(value: &str) -> Result<LogLevel, String> {
    value.parse().map_err(|err| format!("{err}"))
}

fn main() {
    // Usage errors, --help and --version all print and exit with status 0.
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return;
        }
    };

    if let Err(err) = run(&args) {
        println!("❌ Unexpected error: {err:#}");
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    if let Some(log_dir) = &args.log_dir {
        let level = args.log_level.unwrap_or_else(default_log_level);
        if let Err(err) = init_logging(level, log_dir) {
            println!("⚠️ Logging disabled: {err}");
        }
    }

    let manager = ConnectionManager::connect(&args.db);
    match manager.connect_error() {
        None => println!("✅ Connected to the document store at {}.", args.db.display()),
        Some(reason) => println!(
            "⚠️ Unable to connect to the document store at {}: {reason}",
            args.db.display()
        ),
    }
    println!("Welcome to Digital Assist Organizer!");

    let result = session::run(&manager, io::stdin().lock(), io::stdout().lock());
    finish(manager, result, &mut io::stdout().lock())
}

/// Releases the store, then says goodbye only when the loop ended cleanly.
fn finish<S: DocumentStore>(
    manager: ConnectionManager<S>,
    result: io::Result<()>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    if let Err(err) = manager.close() {
        writeln!(out, "⚠️ Failed to close the document store: {err}")?;
    }

    result.context("console input/output failed")?;
    writeln!(out, "👋 Goodbye!")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{finish, Args};
    use clap::Parser;
    use organizer_core::{ConnectionManager, LogLevel, DEFAULT_DB_PATH};
    use std::io;
    use std::path::Path;

    #[test]
    fn args_default_to_the_fixed_store_path_without_logging() {
        let args = Args::try_parse_from(["organizer"]).unwrap();
        assert_eq!(args.db, Path::new(DEFAULT_DB_PATH));
        assert!(args.log_level.is_none());
        assert!(args.log_dir.is_none());
    }

    #[test]
    fn args_accept_known_log_levels_and_reject_others_without_exiting() {
        let args = Args::try_parse_from(["organizer", "--log-level", "WARN"]).unwrap();
        assert_eq!(args.log_level, Some(LogLevel::Warn));

        let err = Args::try_parse_from(["organizer", "--log-level", "loud"]).unwrap_err();
        assert!(err.to_string().contains("unsupported log level"));
    }

    #[test]
    fn clean_shutdown_says_goodbye() {
        let mut out = Vec::new();
        finish(ConnectionManager::in_memory(), Ok(()), &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "👋 Goodbye!\n");
    }

    #[test]
    fn io_failure_skips_goodbye_and_reports_the_error() {
        let mut out = Vec::new();
        let failure = io::Error::new(io::ErrorKind::BrokenPipe, "stdout closed");

        let err = finish(ConnectionManager::in_memory(), Err(failure), &mut out).unwrap_err();
        assert!(format!("{err:#}").contains("stdout closed"));
        assert!(out.is_empty());
    }
}
