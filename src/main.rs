use std::io::{stderr, stdout, BufWriter};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use finance_tracker::actors::NotificationActor;
use finance_tracker::engine::Session;
use finance_tracker::storage::InMemoryRepository;
use finance_tracker::store::TransactionStore;
use finance_tracker::views::TransactionsTable;

/// Types every row of a CSV file into the new-transaction dialog, optionally
/// searches, and writes the resulting list to stdout as CSV.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// CSV file with the columns description,price,category,type (type defaults to income).
    input: String,

    /// Search the descriptions after every row was submitted.
    #[arg(short, long)]
    query: Option<String>,

    /// One of error, warn, info, debug, trace.
    #[arg(short, long, default_value = "error")]
    log_level: String
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    setup_logging(parse_log_level(&args.log_level));

    let query = args.query.as_deref().filter(|query| !query.trim().is_empty());

    let store = Arc::new(TransactionStore::new(Arc::new(InMemoryRepository::new())));
    let notifications = NotificationActor::new();
    let mut session = Session::new(store, Arc::new(notifications.notifier()));

    let timer = Instant::now();
    let report = session.run(&args.input, query).await?;
    let duration = timer.elapsed();

    //NOTE: Ending the session drops the forms' notifiers, which lets the actor finish
    let table = session.into_table();
    let toasts = notifications.despawn().await?;

    info!("Session finished in: {duration:?}");
    info!("Created [{}], invalid [{}], rejected [{}], toasts [{}]", report.created, report.invalid, report.rejected, toasts.len());

    let summary = table.summary();
    info!("Income [{}], outcome [{}], total [{}]", summary.income, summary.outcome, summary.total);

    write_results_to_stdout(&table)?;

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
    //NOTE: stdout carries the CSV output, so logging goes to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn write_results_to_stdout(table: &TransactionsTable) -> Result<()> {
    //NOTE: The header is written by hand so an empty session still produces one
    let mut output = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(BufWriter::new(stdout().lock()));

    output.write_record(["id", "description", "price", "category", "type", "created_at"])?;

    for transaction in table.transactions().iter() {
        output.serialize(transaction)?;
    }

    output.flush()?;

    Ok(())
}
