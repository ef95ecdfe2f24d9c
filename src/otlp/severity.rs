//! Severity rotation
//!
//! Batches cycle through a fixed, ordered table of severities. The severity of a
//! batch depends only on its index, so every group inside one batch shares it.

use opentelemetry_proto::tonic::logs::v1::SeverityNumber;
use serde::{Deserialize, Serialize};

/// Log severity levels the generator can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// SEVERITY_NUMBER_DEBUG (5)
    Debug,
    /// SEVERITY_NUMBER_INFO (9)
    Info,
    /// SEVERITY_NUMBER_WARN (13)
    Warn,
    /// SEVERITY_NUMBER_ERROR (17)
    Error,
}

/// Default rotation: debug, info, warn, error
pub const DEFAULT_SEVERITIES: [Severity; 4] = [
    Severity::Debug,
    Severity::Info,
    Severity::Warn,
    Severity::Error,
];

impl Severity {
    /// OTLP severity ordinal
    pub fn number(self) -> SeverityNumber {
        match self {
            Severity::Debug => SeverityNumber::Debug,
            Severity::Info => SeverityNumber::Info,
            Severity::Warn => SeverityNumber::Warn,
            Severity::Error => SeverityNumber::Error,
        }
    }

    /// Human-readable severity text, the protobuf name of the ordinal
    pub fn text(self) -> &'static str {
        self.number().as_str_name()
    }
}

/// Non-empty severity table, indexed by batch number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeverityRotation(Vec<Severity>);

impl SeverityRotation {
    /// Wrap `severities`; `None` if the table is empty
    pub fn new(severities: Vec<Severity>) -> Option<Self> {
        if severities.is_empty() {
            return None;
        }
        Some(Self(severities))
    }

    /// Severity assigned to every record of batch `batch_index`
    pub fn for_batch(&self, batch_index: usize) -> Severity {
        self.0[batch_index % self.0.len()]
    }
}
