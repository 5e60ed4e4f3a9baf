use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;

use crate::contracts::types::{RecordIssue, RecordsSummary};

pub(crate) const RECORDS_HELP_COMMAND: &str = "trendline trends --help";
pub(crate) const RECORDS_HELP_SECTION_TITLE: &str = "Record Input Troubleshooting";

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_records_help_data(self, data: Value) -> Self {
        self.with_data(merge_records_help_data(data))
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `trendline {cmd} --help` for usage."),
            None => "Run `trendline --help` for usage.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn invalid_argument_with_recovery(message: &str, recovery_steps: Vec<String>) -> Self {
        Self::new("invalid_argument", message, recovery_steps)
    }

    pub fn invalid_records_format(message: &str, received_format: &str) -> Self {
        Self::new(
            "invalid_records_format",
            message,
            vec![
                "Provide a supported record format (JSON array or CSV).".to_string(),
                format!("Run `{RECORDS_HELP_COMMAND}` to confirm field requirements."),
            ],
        )
        .with_records_help_data(json!({
            "received_format": received_format,
            "supported_formats": ["json_array", "csv"],
        }))
    }

    pub fn records_schema_mismatch(
        required_headers: Vec<String>,
        optional_headers: Vec<String>,
        actual_headers: Vec<String>,
    ) -> Self {
        Self::new(
            "records_schema_mismatch",
            "CSV headers do not satisfy the record schema.",
            vec![
                "Include `occurred_at` and exactly one amount header.".to_string(),
                "Do not include unknown headers.".to_string(),
                format!("Run `{RECORDS_HELP_COMMAND}` to review required and optional fields."),
            ],
        )
        .with_records_help_data(json!({
            "required_headers": required_headers,
            "optional_headers": optional_headers,
            "actual_headers": actual_headers,
        }))
    }

    pub fn records_validation_failed(summary: RecordsSummary, issues: Vec<RecordIssue>) -> Self {
        let invalid_rows = summary.rows_invalid;
        Self::new(
            "records_validation_failed",
            &format!(
                "Record input failed validation: {invalid_rows} rows need fixes. Nothing was aggregated."
            ),
            vec![
                "Fix the listed issues in your source file.".to_string(),
                "Rerun the same command with the corrected file.".to_string(),
            ],
        )
        .with_records_help_data(json!({
            "summary": summary,
            "issues": issues,
        }))
    }

    pub fn config_read_failed(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "config_read_failed",
            &format!("Could not read configuration at `{location}`: {detail}"),
            vec![format!(
                "Grant read access to `{location}` or set `TRENDLINE_HOME` to another directory."
            )],
        )
    }

    pub fn config_invalid(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "config_invalid",
            &format!("Configuration at `{location}` is invalid: {detail}"),
            vec![
                format!("Fix or remove `{location}`; defaults apply when it is absent."),
                "Supported keys: `window_months` and `tool_top_n`, both positive integers."
                    .to_string(),
            ],
        )
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }
}

fn merge_records_help_data(mut data: Value) -> Value {
    if !data.is_object() {
        data = json!({});
    }

    if let Some(object) = data.as_object_mut() {
        object.insert(
            "help_command".to_string(),
            Value::String(RECORDS_HELP_COMMAND.to_string()),
        );
        object.insert(
            "help_section_title".to_string(),
            Value::String(RECORDS_HELP_SECTION_TITLE.to_string()),
        );
    }

    data
}

pub type ClientResult<T> = Result<T, ClientError>;
