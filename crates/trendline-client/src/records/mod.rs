//! Turns a JSON array or CSV document into validated [`TransactionRecord`]s.

pub(crate) mod input;
pub(crate) mod parse;
pub(crate) mod validate;

use tracing::{debug, info};

use crate::ClientError;
use crate::ClientResult;
use crate::trends::TransactionRecord;

#[derive(Debug, Clone)]
pub(crate) struct LoadedRecords {
    pub(crate) records: Vec<TransactionRecord>,
    pub(crate) source_used: String,
}

pub(crate) fn load_records(
    path: Option<String>,
    stdin_override: Option<String>,
) -> ClientResult<LoadedRecords> {
    let resolved = input::resolve_source(path, stdin_override)?;
    debug!(
        source = resolved.source_kind.as_str(),
        source_ref = resolved.source_ref.as_deref().unwrap_or("-"),
        bytes = resolved.content.len(),
        "resolved record source"
    );

    let records = parse_records(&resolved.content)?;
    info!(
        source = resolved.source_kind.as_str(),
        records = records.len(),
        "loaded transaction records"
    );

    Ok(LoadedRecords {
        records,
        source_used: resolved.source_kind.as_str().to_string(),
    })
}

/// Parses and validates an in-memory document. Used for bundled sample data.
pub(crate) fn parse_records(content: &str) -> ClientResult<Vec<TransactionRecord>> {
    let parsed_rows = parse::parse_source(content)?;
    let validated = validate::validate_rows(parsed_rows)?;
    debug!(
        rows_read = validated.summary.rows_read,
        rows_valid = validated.summary.rows_valid,
        "validated record rows"
    );
    Ok(validated.records)
}

pub(crate) fn invalid_input_error(message: &str) -> ClientError {
    ClientError::invalid_argument_with_recovery(
        message,
        vec![
            "Provide records as a JSON array or a CSV file with a header row.".to_string(),
            "Run `trendline trends --help` to review the record fields.".to_string(),
        ],
    )
}
