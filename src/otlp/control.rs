//! Control accumulator
//!
//! Mirrors every resource-log group the generator produced, in generation order,
//! so the receiving endpoint's data can be compared against what was sent.

use opentelemetry_proto::tonic::collector::logs::v1::ExportLogsServiceRequest;
use opentelemetry_proto::tonic::logs::v1::ResourceLogs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::ControlFileError;

/// Ordered copy of everything generated during a run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlAccumulator {
    request: ExportLogsServiceRequest,
}

impl ControlAccumulator {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one generated group
    pub fn push(&mut self, group: ResourceLogs) {
        self.request.resource_logs.push(group);
    }

    /// Number of groups recorded
    pub fn len(&self) -> usize {
        self.request.resource_logs.len()
    }

    /// Whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.request.resource_logs.is_empty()
    }

    /// Recorded groups in generation order
    pub fn resource_logs(&self) -> &[ResourceLogs] {
        &self.request.resource_logs
    }

    /// Serialize as indented OTLP/JSON
    pub fn to_json(&self) -> Result<String, ControlFileError> {
        serde_json::to_string_pretty(&self.request)
            .map_err(|e| ControlFileError::Serialize(e.to_string()))
    }

    /// Write the control file, replacing any existing file at `path`.
    ///
    /// The payload goes to a sibling temporary file first and is renamed into place.
    pub fn persist(&self, path: impl AsRef<Path>) -> Result<(), ControlFileError> {
        let path = path.as_ref();
        let json = self.to_json()?;

        let tmp = temp_path(path);
        debug!(
            path = %path.display(),
            tmp_path = %tmp.display(),
            bytes = json.len(),
            groups = self.len(),
            "Writing control file"
        );

        let write_err = |e: std::io::Error| ControlFileError::Write {
            path: path.to_path_buf(),
            reason: e.to_string(),
        };
        std::fs::write(&tmp, json.as_bytes()).map_err(write_err)?;
        if let Err(e) = std::fs::rename(&tmp, path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(write_err(e));
        }

        info!(path = %path.display(), "Control file written");
        Ok(())
    }

    /// Read a control file back
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ControlFileError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ControlFileError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let request: ExportLogsServiceRequest = serde_json::from_str(&content)
            .map_err(|e| ControlFileError::Serialize(e.to_string()))?;
        Ok(Self { request })
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry_proto::tonic::common::v1::{AnyValue, KeyValue, any_value};
    use opentelemetry_proto::tonic::resource::v1::Resource;

    fn group(name: &str) -> ResourceLogs {
        ResourceLogs {
            resource: Some(Resource {
                attributes: vec![KeyValue {
                    key: "service.name".to_string(),
                    value: Some(AnyValue {
                        value: Some(any_value::Value::StringValue(name.to_string())),
                    }),
                }],
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_push_keeps_order() {
        let mut acc = ControlAccumulator::new();
        assert!(acc.is_empty());
        acc.push(group("a"));
        acc.push(group("b"));
        assert_eq!(acc.len(), 2);
        assert_eq!(acc.resource_logs()[0], group("a"));
        assert_eq!(acc.resource_logs()[1], group("b"));
    }

    #[test]
    fn test_json_has_single_top_level_field_with_two_space_indent() {
        let mut acc = ControlAccumulator::new();
        acc.push(group("a"));
        let json = acc.to_json().unwrap();
        assert!(json.starts_with("{\n  \"resourceLogs\": ["));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert_eq!(object["resourceLogs"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_temp_path_is_sibling() {
        assert_eq!(
            temp_path(Path::new("/tmp/out/control.json")),
            PathBuf::from("/tmp/out/control.json.tmp")
        );
    }
}
