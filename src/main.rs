use anyhow::{Context, Result};
use issue_harness::cli::output::{format_batch_event, format_loaded, format_loading};
use issue_harness::cli::Cli;
use issue_harness::core::config::check_action_config;
use issue_harness::{BatchRunner, CaseTable, ProcessInvoker, RunConfig};
use std::io::IsTerminal;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging; stdout belongs to the case output
    let default_filter = if cli.verbose {
        "issue_harness=debug,warn"
    } else {
        "issue_harness=warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    run_batch(cli.run_config()).await
}

async fn run_batch(config: RunConfig) -> Result<()> {
    if config.check_config {
        check_action_config(&config.config_path)?;
        info!("Config file {} looks valid", config.config_path);
    }

    println!("{}", format_loading(&config.data_path));
    let table = CaseTable::from_file_with_delimiter(&config.data_path, config.delimiter)
        .context("Failed to load test cases")?;
    println!("{}", format_loaded(table.len()));

    let invoker = ProcessInvoker::from_config(&config);
    let runner = BatchRunner::new(invoker, config).with_event_handler(|event| {
        if let Some(line) = format_batch_event(event) {
            println!("{}", line);
        }
    });

    let outcome = runner.run(&table).await.context("Batch aborted")?;
    info!("Batch outcome: {:?}", outcome);

    Ok(())
}
