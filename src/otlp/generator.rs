//! Batch generator
//!
//! Builds one `ExportLogsServiceRequest` per iteration. Each resource-log group
//! carries the fixed service attributes and a single scope holding a single
//! record.

use chrono::Utc;
use opentelemetry_proto::tonic::collector::logs::v1::ExportLogsServiceRequest;
use opentelemetry_proto::tonic::common::v1::{AnyValue, KeyValue, any_value};
use opentelemetry_proto::tonic::logs::v1::{LogRecord, ResourceLogs, ScopeLogs};
use opentelemetry_proto::tonic::resource::v1::Resource;

use crate::config::Config;
use crate::error::LoadgenConfigError;
use crate::otlp::body::BodySource;
use crate::otlp::control::ControlAccumulator;
use crate::otlp::severity::{Severity, SeverityRotation};

/// Resource attribute key for the service name
pub const SERVICE_NAME_KEY: &str = "service.name";
/// Resource attribute key for the service version
pub const SERVICE_VERSION_KEY: &str = "service.version";

/// Parameters of the batch shape
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorSettings {
    /// Severity rotation indexed by batch number
    pub severities: Vec<Severity>,
    /// Resource-log groups per batch
    pub groups_per_batch: usize,
    /// `service.name` value
    pub service_name: String,
    /// `service.version` value
    pub service_version: String,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for GeneratorSettings {
    fn from(config: &Config) -> Self {
        Self {
            severities: config.severities.clone(),
            groups_per_batch: config.groups_per_batch,
            service_name: config.service_name.clone(),
            service_version: config.service_version.clone(),
        }
    }
}

/// Generates export batches with rotating severities and random bodies
pub struct LogBatchGenerator<B> {
    settings: GeneratorSettings,
    rotation: SeverityRotation,
    resource: Resource,
    bodies: B,
}

impl<B> std::fmt::Debug for LogBatchGenerator<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogBatchGenerator")
            .field("settings", &self.settings)
            .field("rotation", &self.rotation)
            .field("resource", &self.resource)
            .finish_non_exhaustive()
    }
}

impl<B: BodySource> LogBatchGenerator<B> {
    /// Create a generator; the resource attributes are fixed here for the whole run.
    ///
    /// Fails if the severity table is empty.
    pub fn new(settings: GeneratorSettings, bodies: B) -> Result<Self, LoadgenConfigError> {
        let rotation = SeverityRotation::new(settings.severities.clone()).ok_or_else(|| {
            LoadgenConfigError::ValidationFailed("severity table must not be empty".to_string())
        })?;
        let resource = Resource {
            attributes: vec![
                string_attribute(SERVICE_NAME_KEY, &settings.service_name),
                string_attribute(SERVICE_VERSION_KEY, &settings.service_version),
            ],
            ..Default::default()
        };
        Ok(Self {
            settings,
            rotation,
            resource,
            bodies,
        })
    }

    /// Batch shape in use
    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// Build batch `batch_index`, mirroring each group into `control` as it is made.
    pub fn generate(
        &mut self,
        batch_index: usize,
        mut control: Option<&mut ControlAccumulator>,
    ) -> ExportLogsServiceRequest {
        // Severity follows the batch index only.
        let severity = self.rotation.for_batch(batch_index);

        let mut resource_logs = Vec::with_capacity(self.settings.groups_per_batch);
        for _ in 0..self.settings.groups_per_batch {
            let now = now_unix_nano();
            let group = ResourceLogs {
                resource: Some(self.resource.clone()),
                scope_logs: vec![ScopeLogs {
                    log_records: vec![LogRecord {
                        time_unix_nano: now,
                        observed_time_unix_nano: now,
                        severity_number: severity.number() as i32,
                        severity_text: severity.text().to_string(),
                        body: Some(AnyValue {
                            value: Some(any_value::Value::StringValue(self.bodies.next_body())),
                        }),
                        ..Default::default()
                    }],
                    ..Default::default()
                }],
                ..Default::default()
            };
            if let Some(acc) = control.as_deref_mut() {
                acc.push(group.clone());
            }
            resource_logs.push(group);
        }

        ExportLogsServiceRequest { resource_logs }
    }
}

fn string_attribute(key: &str, value: &str) -> KeyValue {
    KeyValue {
        key: key.to_string(),
        value: Some(AnyValue {
            value: Some(any_value::Value::StringValue(value.to_string())),
        }),
    }
}

/// Wall clock in Unix nanoseconds
fn now_unix_nano() -> u64 {
    Utc::now()
        .timestamp_nanos_opt()
        .and_then(|n| u64::try_from(n).ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry_proto::tonic::logs::v1::SeverityNumber;

    fn generator() -> LogBatchGenerator<impl BodySource> {
        let mut n = 0;
        LogBatchGenerator::new(GeneratorSettings::default(), move || {
            n += 1;
            format!("body {}", n)
        })
        .unwrap()
    }

    fn records(batch: &ExportLogsServiceRequest) -> Vec<&LogRecord> {
        batch
            .resource_logs
            .iter()
            .flat_map(|rl| rl.scope_logs.iter())
            .flat_map(|sl| sl.log_records.iter())
            .collect()
    }

    #[test]
    fn test_batch_shape() {
        let mut generator = generator();
        let batch = generator.generate(0, None);
        assert_eq!(batch.resource_logs.len(), 2);
        for group in &batch.resource_logs {
            assert_eq!(group.scope_logs.len(), 1);
            assert_eq!(group.scope_logs[0].log_records.len(), 1);
            assert!(group.scope_logs[0].scope.is_none());
        }
    }

    #[test]
    fn test_severity_depends_on_batch_index_only() {
        let mut generator = generator();
        let expected = [
            SeverityNumber::Debug,
            SeverityNumber::Info,
            SeverityNumber::Warn,
            SeverityNumber::Error,
        ];
        for i in 0..10 {
            let batch = generator.generate(i, None);
            for record in records(&batch) {
                assert_eq!(record.severity_number, expected[i % 4] as i32);
                assert_eq!(record.severity_text, expected[i % 4].as_str_name());
            }
        }
    }

    #[test]
    fn test_timestamps_are_equal_and_set() {
        let mut generator = generator();
        let batch = generator.generate(3, None);
        for record in records(&batch) {
            assert!(record.time_unix_nano > 0);
            assert_eq!(record.time_unix_nano, record.observed_time_unix_nano);
        }
    }

    #[test]
    fn test_resource_attributes_are_fixed() {
        let mut generator = generator();
        let first = generator.generate(0, None).resource_logs[0].resource.clone();
        for i in 0..5 {
            for group in generator.generate(i, None).resource_logs {
                assert_eq!(group.resource, first);
            }
        }
        let attrs = first.unwrap().attributes;
        assert_eq!(attrs[0].key, SERVICE_NAME_KEY);
        assert_eq!(attrs[1].key, SERVICE_VERSION_KEY);
        assert_eq!(
            attrs[0].value.as_ref().and_then(|v| v.value.clone()),
            Some(any_value::Value::StringValue("test-service".to_string()))
        );
    }

    #[test]
    fn test_bodies_come_from_source() {
        let mut generator = generator();
        let batch = generator.generate(0, None);
        let bodies: Vec<_> = records(&batch)
            .into_iter()
            .map(|r| r.body.clone().and_then(|b| b.value))
            .collect();
        assert_eq!(
            bodies,
            vec![
                Some(any_value::Value::StringValue("body 1".to_string())),
                Some(any_value::Value::StringValue("body 2".to_string())),
            ]
        );
    }

    #[test]
    fn test_groups_are_mirrored_at_generation_time() {
        let mut generator = generator();
        let mut control = ControlAccumulator::new();
        let first = generator.generate(0, Some(&mut control));
        assert_eq!(control.resource_logs(), first.resource_logs.as_slice());
        let second = generator.generate(1, Some(&mut control));
        assert_eq!(control.len(), 4);
        assert_eq!(control.resource_logs()[2..], second.resource_logs[..]);
    }

    #[test]
    fn test_custom_group_count() {
        let settings = GeneratorSettings {
            groups_per_batch: 5,
            ..Default::default()
        };
        let mut generator = LogBatchGenerator::new(settings, || "x".to_string()).unwrap();
        assert_eq!(generator.generate(0, None).resource_logs.len(), 5);
    }

    #[test]
    fn test_empty_severity_table_is_rejected() {
        let settings = GeneratorSettings {
            severities: Vec::new(),
            ..Default::default()
        };
        let err = LogBatchGenerator::new(settings, || "x".to_string()).unwrap_err();
        assert!(matches!(err, LoadgenConfigError::ValidationFailed(_)));
    }

    #[test]
    fn test_configured_severity_table_is_used() {
        let settings = GeneratorSettings {
            severities: vec![Severity::Error, Severity::Warn],
            ..Default::default()
        };
        let mut generator = LogBatchGenerator::new(settings, || "x".to_string()).unwrap();
        let expected = [
            SeverityNumber::Error,
            SeverityNumber::Warn,
            SeverityNumber::Error,
        ];
        for (index, expected) in expected.into_iter().enumerate() {
            for record in records(&generator.generate(index, None)) {
                assert_eq!(record.severity_number, expected as i32);
            }
        }
    }
}
