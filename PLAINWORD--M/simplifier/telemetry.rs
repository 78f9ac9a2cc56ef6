use std::{fmt, path::PathBuf, sync::Arc};

use anyhow::Result;
use plainword_logging::{JsonLogger, LogLevel, LogRecord};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{config::TelemetrySection, simplify::SimplifyReport};

/// Builder configuring simplifier telemetry sinks.
pub struct SimplifierTelemetryBuilder {
    module: String,
    log_path: Option<PathBuf>,
    min_level: LogLevel,
    run_id: Option<String>,
}

impl SimplifierTelemetryBuilder {
    /// Creates a new builder for the given module label.
    #[must_use]
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            log_path: None,
            min_level: LogLevel::Debug,
            run_id: None,
        }
    }

    /// Sets the JSON log path.
    #[must_use]
    pub fn log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_path = Some(path.into());
        self
    }

    /// Drops records below `level`.
    #[must_use]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Overrides the generated run id.
    #[must_use]
    pub fn run_id(mut self, run_id: impl Into<String>) -> Self {
        self.run_id = Some(run_id.into());
        self
    }

    /// Applies a `[telemetry]` config section.
    #[must_use]
    pub fn with_section(mut self, section: &TelemetrySection) -> Self {
        if let Some(path) = &section.log_path {
            self.log_path = Some(path.clone());
        }
        self.min_level = section.min_level;
        self
    }

    /// Finalizes the builder, opening the log file if one was configured.
    pub fn build(self) -> Result<SimplifierTelemetry> {
        let logger = match self.log_path {
            Some(path) => Some(JsonLogger::new(path)?.with_min_level(self.min_level)),
            None => None,
        };
        Ok(SimplifierTelemetry {
            inner: Arc::new(TelemetryInner {
                module: self.module,
                run_id: self.run_id.unwrap_or_else(new_run_id),
                logger,
            }),
        })
    }
}

fn new_run_id() -> String {
    format!("run-{}", Uuid::new_v4())
}

/// Telemetry handle shared by the simplifier and its front ends.
#[derive(Clone)]
pub struct SimplifierTelemetry {
    inner: Arc<TelemetryInner>,
}

impl fmt::Debug for SimplifierTelemetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimplifierTelemetry")
            .field("module", &self.inner.module)
            .field("run_id", &self.inner.run_id)
            .finish()
    }
}

struct TelemetryInner {
    module: String,
    run_id: String,
    logger: Option<JsonLogger>,
}

impl SimplifierTelemetry {
    /// Returns a builder for this telemetry helper.
    #[must_use]
    pub fn builder(module: impl Into<String>) -> SimplifierTelemetryBuilder {
        SimplifierTelemetryBuilder::new(module)
    }

    /// Telemetry that records nothing.
    #[must_use]
    pub fn disabled(module: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(TelemetryInner {
                module: module.into(),
                run_id: new_run_id(),
                logger: None,
            }),
        }
    }

    /// Identifier stamped on every record of this handle.
    #[must_use]
    pub fn run_id(&self) -> &str {
        &self.inner.run_id
    }

    /// Logs a structured record tagged with the run id.
    pub fn log(&self, level: LogLevel, message: &str, metadata: Value) -> Result<()> {
        if let Some(logger) = &self.inner.logger {
            let mut record = LogRecord::new(&self.inner.module, level, message);
            if let Some(obj) = metadata.as_object() {
                record.metadata = obj.clone();
            }
            record = record.with_field("run_id", self.inner.run_id.as_str());
            logger.log(&record)?;
        }
        Ok(())
    }

    /// Records the outcome of one simplification.
    pub fn record_report(&self, input_len: usize, report: &SimplifyReport) -> Result<()> {
        let rules: serde_json::Map<String, Value> = report
            .replacements
            .iter()
            .map(|hits| (hits.complex.clone(), json!(hits.count)))
            .collect();
        self.log(
            LogLevel::Info,
            "simplifier.text.simplified",
            json!({
                "input_chars": input_len,
                "output_chars": report.output.chars().count(),
                "sentences": report.sentences,
                "punctuation_rewrites": report.punctuation_rewrites,
                "replacements": report.total_replacements(),
                "rules": rules,
            }),
        )
    }
}
