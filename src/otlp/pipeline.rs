//! Generate-then-export loop
//!
//! Batches are produced and sent strictly one at a time. The first error ends the
//! run; the control file is only written once every batch has been accepted.

use std::fmt;

use tracing::{error, info};

use crate::config::Config;
use crate::error::LoadgenError;
use crate::otlp::body::BodySource;
use crate::otlp::control::ControlAccumulator;
use crate::otlp::exporter::LogExporter;
use crate::otlp::generator::LogBatchGenerator;

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Resource-log groups transmitted
    pub total_lines: usize,
    /// Target endpoint
    pub endpoint: String,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sent {} log lines to {}", self.total_lines, self.endpoint)
    }
}

/// Run `config.batches` generate/export iterations, then persist the control file.
pub async fn run<B, E>(
    config: &Config,
    generator: &mut LogBatchGenerator<B>,
    exporter: &mut E,
) -> Result<RunSummary, LoadgenError>
where
    B: BodySource,
    E: LogExporter,
{
    let control_path = config.control_path();
    let mut control = control_path.map(|_| ControlAccumulator::new());

    info!(
        endpoint = %exporter.endpoint(),
        batches = config.batches,
        groups_per_batch = generator.settings().groups_per_batch,
        control_file = ?control_path,
        "Starting log generation"
    );

    let mut total_lines = 0;
    for batch_index in 0..config.batches {
        let batch = generator.generate(batch_index, control.as_mut());
        let groups = batch.resource_logs.len();
        let severity = batch
            .resource_logs
            .first()
            .and_then(|rl| rl.scope_logs.first())
            .and_then(|sl| sl.log_records.first())
            .map(|r| r.severity_text.clone())
            .unwrap_or_default();

        exporter.export(batch).await.map_err(|e| {
            error!(batch_index, error = %e, "Failed to export batch");
            e
        })?;

        total_lines += groups;
        info!(batch_index, groups, severity = %severity, "Batch exported");
    }

    if let (Some(path), Some(control)) = (control_path, control.as_ref()) {
        control.persist(path)?;
    }

    Ok(RunSummary {
        total_lines,
        endpoint: exporter.endpoint().to_string(),
    })
}
