pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod events;
pub mod pipeline;
pub mod report;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use cli::Cli;
use events::TracingSink;
use pipeline::PipelineSummary;

pub fn run() -> ExitCode {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!("PANIC in flowtag: {info}");
        default_hook(info);
    }));

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config::DEFAULT_LOG_FILTER.into()),
        )
        .with_target(false)
        .without_time()
        .init();

    let cli = Cli::parse();

    match execute(&cli) {
        Ok(summary) => {
            tracing::info!(
                "Counted {} of {} records ({} untagged) using {} mappings; report at {}",
                summary.counted_records,
                summary.total_records,
                summary.untagged_records,
                summary.mapping_entries,
                summary.output.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: &Cli) -> anyhow::Result<PipelineSummary> {
    pipeline::validate_inputs(&cli.flow_log_file, &cli.mapping_file)?;

    let started = chrono::Local::now().naive_local();
    let inputs = cli.pipeline_inputs(&started);

    let outcome = pipeline::run_pipeline(&inputs, &mut TracingSink);
    outcome.context("flow log tagging aborted")
}
