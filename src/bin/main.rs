//! OTLP log load generator
//!
//! Sends a fixed number of synthetic log batches to an OTLP endpoint over gRPC
//! (default) or OTLP/HTTP protobuf (`--http`), then optionally writes a control
//! file with everything that was sent.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use otlp_log_loadgen::otlp::{LogBatchGenerator, LoremSentences, RunSummary, Transport, run};
use otlp_log_loadgen::{Cli, init_logging};
use tracing::error;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_format);

    match run_loadgen(cli).await {
        Ok(summary) => {
            println!("{}", summary);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Run aborted: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run_loadgen(cli: Cli) -> anyhow::Result<RunSummary> {
    let config = cli.into_config().context("invalid configuration")?;

    let mut transport = Transport::connect(&config).await?;
    let mut generator = LogBatchGenerator::new((&config).into(), LoremSentences::default())?;

    let summary = run(&config, &mut generator, &mut transport).await?;
    Ok(summary)
}
