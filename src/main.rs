use std::io::{BufWriter, Write, stderr, stdout};
use std::process::exit;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, fmt};

use advance_ledger::engine::{BatchEngine, LedgerEngine};
use advance_ledger::storage::AdvanceStorage;

#[tokio::main]
async fn main() -> Result<()> {
    //NOTE: Two positional arguments do not justify pulling in clap; if this CLI
    //      ever grows subcommands, that is the point to switch.
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: advance-ledger [operations].csv [log_level:optional] > [balances].csv");
        eprintln!("Available log levels: error, warn, info, debug, trace (default: error)");
        exit(1);
    }

    let path = &args[1];
    let log_level = args
        .get(2)
        .map(|s| parse_log_level(s))
        .unwrap_or(LevelFilter::ERROR);

    setup_logging(log_level);

    let storage = Arc::new(AdvanceStorage::new());
    let batch = BatchEngine::new(storage.clone());

    let timer = Instant::now();
    batch.run(path).await?;
    let duration = timer.elapsed();

    info!("Processed operations in: {duration:?}");

    write_balances_to_stdout(storage)?;

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: Because we are doing stdout redirection, we will need to utilize stderr to display logging
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry().with(terminal_log).init();
}

fn write_balances_to_stdout(storage: Arc<AdvanceStorage>) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());
    let ledger = LedgerEngine::new(storage);

    writeln!(output, "emp_no,balance,monthly_installment")?;

    for row in ledger.list_balances() {
        writeln!(output, "{},{},{}", row.emp_no, row.balance, row.monthly_installment)?;
    }

    output.flush()?;

    Ok(())
}
