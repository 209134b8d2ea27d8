//! kobs-querylang command-line tool
//!
//! Tokenizes, highlights and completes klogs, MongoDB and Signal Sciences
//! queries, and exports their grammars for Monarch-style editors.
//!
//! # Usage
//!
//! ```bash
//! # Interactive editor
//! kobs-querylang --dialect klogs
//!
//! # One-shot tokenization
//! kobs-querylang -l mongodb --format json tokenize '{"age": {"$gte": 21}}'
//! ```

use kobs_querylang::cli::CliInterface;
use kobs_querylang::error::Result;
use kobs_querylang::repl::ReplEngine;
use tracing::Level;

/// Application entry point
#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Main application logic
///
/// 1. Parse command-line arguments and load configuration
/// 2. Initialize logging
/// 3. Handle subcommands or start the interactive editor
async fn run() -> Result<()> {
    let cli = CliInterface::new()?;

    initialize_logging(&cli);

    if cli.handle_subcommand().await? {
        return Ok(());
    }

    let dialect = cli.dialect()?;
    cli.print_banner(dialect);

    let mut repl = ReplEngine::new(cli.config(), dialect, cli.field_loader()).await?;
    repl.run().await?;

    if !cli.args().quiet {
        println!("Goodbye!");
    }
    Ok(())
}

/// Initialize logging system based on verbosity level
///
/// Logs go to stderr so tokenizer output stays pipeable.
fn initialize_logging(cli: &CliInterface) {
    let level: Level = cli.config().logging.level.to_tracing_level();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr);

    if cli.config().logging.timestamps {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }
}
