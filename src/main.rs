//! mongoq - one-shot MongoDB operation runner
//!
//! Runs a single MongoDB operation given as one shell argument:
//!
//! ```bash
//! mongoq 'users.find({"active": true})'
//! mongoq -d prod 'orders.countDocuments()'
//! mongoq --dry-run 'users.updateOne({"id": 1}, {"$set": {"flag": true}})'
//! ```
//!
//! The operation string is parsed and validated by the operation-string
//! parser, then executed against MongoDB and the result printed in the
//! configured output format.

use std::time::Instant;

use tracing::Level;

mod cli;
mod config;
mod connection;
mod error;
mod executor;
mod formatter;
mod parser;

use cli::CliInterface;
use connection::ConnectionManager;
use error::Result;
use executor::OperationExecutor;
use formatter::Formatter;
use parser::OperationParser;

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
/// 3. Handle subcommands (completion, config)
/// 4. Parse the operation string
/// 5. Execute against MongoDB (unless --dry-run) and display the result
async fn run() -> Result<()> {
    let cli = CliInterface::new()?;

    initialize_logging(&cli);

    if cli.handle_subcommand()? {
        return Ok(());
    }

    let operation = cli
        .operation()
        .ok_or("No operation given. Usage: mongoq '<collection>.<method>(<arguments>)'")?;

    let call = OperationParser::parse(operation)?;

    if cli.args().dry_run {
        let rendered = serde_json::to_string_pretty(&call)
            .map_err(|e| error::MongoqError::Generic(e.to_string()))?;
        println!("{rendered}");
        return Ok(());
    }

    let start = Instant::now();
    let mut conn_manager = ConnectionManager::new(cli.connection_uri(), cli.config().connection.clone());
    conn_manager.connect().await?;

    let database = conn_manager.database(&cli.database())?;
    let executor = OperationExecutor::new(database);
    let result = executor.execute(&call).await?;

    let formatter = Formatter::from_config(&cli.config().display);
    println!("{}", formatter.format(&result)?);

    if cli.config().display.show_timing {
        eprintln!(
            "Executed in {}ms (round trip {}ms)",
            result.stats.execution_time_ms,
            start.elapsed().as_millis()
        );
    }

    Ok(())
}

/// Initialize logging system based on verbosity level
///
/// Honors `RUST_LOG` when set; otherwise uses the CLI verbosity flags,
/// falling back to the configured level.
fn initialize_logging(cli: &CliInterface) {
    let level = if cli.args().very_verbose {
        Level::TRACE
    } else if cli.args().verbose {
        Level::DEBUG
    } else {
        cli.config().logging.level.to_tracing_level()
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.to_string()));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if cli.config().logging.timestamps {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }
}
