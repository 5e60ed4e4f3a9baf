use std::collections::HashMap;

use serde_json::Value;

use crate::commands::common::{
    amount_record_field_names, optional_record_field_names, required_record_field_names,
};
use crate::records::invalid_input_error;
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone)]
pub(crate) struct ParsedRow {
    pub(crate) row: i64,
    pub(crate) occurred_at: Option<String>,
    pub(crate) amount_minor_units: Option<String>,
    pub(crate) amount: Option<String>,
    pub(crate) category: Option<String>,
    pub(crate) merchant_name: Option<String>,
}

pub(crate) fn parse_source(content: &str) -> ClientResult<Vec<ParsedRow>> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(invalid_input_error("Record source is empty."));
    }

    if looks_like_ndjson(trimmed) {
        return Err(ClientError::invalid_records_format(
            "NDJSON is not supported. Provide a JSON array or CSV.",
            "ndjson",
        ));
    }

    if trimmed.starts_with('[') {
        return parse_json_array(trimmed);
    }

    if looks_like_csv(trimmed) {
        return parse_csv(trimmed);
    }

    if serde_json::from_str::<Value>(trimmed).is_ok() {
        return Err(ClientError::invalid_records_format(
            "JSON input must be a top-level array of record objects.",
            "json_non_array",
        ));
    }

    Err(ClientError::invalid_records_format(
        "Unsupported record format. Provide a JSON array or CSV with headers.",
        "unknown",
    ))
}

fn parse_json_array(content: &str) -> ClientResult<Vec<ParsedRow>> {
    let parsed = serde_json::from_str::<Value>(content)
        .map_err(|_| invalid_input_error("Invalid JSON input. Provide a valid JSON array."))?;

    let Some(items) = parsed.as_array() else {
        return Err(invalid_input_error(
            "JSON input must be a top-level array of record objects.",
        ));
    };

    let mut rows = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let Some(object) = item.as_object() else {
            return Err(invalid_input_error(
                "JSON array entries must all be objects with record fields.",
            ));
        };

        rows.push(ParsedRow {
            row: (index as i64) + 1,
            occurred_at: read_optional_string(object.get("occurred_at")),
            amount_minor_units: read_optional_string(object.get("amount_minor_units")),
            amount: read_optional_string(object.get("amount")),
            category: read_optional_string(object.get("category")),
            merchant_name: read_optional_string(object.get("merchant_name")),
        });
    }

    Ok(rows)
}

fn parse_csv(content: &str) -> ClientResult<Vec<ParsedRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|_| invalid_input_error("CSV header row is missing or unreadable."))?
        .iter()
        .map(|value| value.trim().to_string())
        .collect::<Vec<String>>();

    if !headers_are_valid(&headers) {
        return Err(ClientError::records_schema_mismatch(
            required_headers(),
            optional_headers(),
            headers,
        ));
    }

    let index_by_name = headers
        .iter()
        .enumerate()
        .map(|(index, name)| (name.to_string(), index))
        .collect::<HashMap<String, usize>>();

    let mut rows = Vec::new();
    for (row_index, result_row) in reader.records().enumerate() {
        let record =
            result_row.map_err(|_| invalid_input_error("CSV rows are malformed or not UTF-8."))?;

        rows.push(ParsedRow {
            row: (row_index as i64) + 1,
            occurred_at: value_for(&record, &index_by_name, "occurred_at"),
            amount_minor_units: value_for(&record, &index_by_name, "amount_minor_units"),
            amount: value_for(&record, &index_by_name, "amount"),
            category: value_for(&record, &index_by_name, "category"),
            merchant_name: value_for(&record, &index_by_name, "merchant_name"),
        });
    }

    Ok(rows)
}

fn value_for(
    record: &csv::StringRecord,
    index_by_name: &HashMap<String, usize>,
    field_name: &str,
) -> Option<String> {
    let index = index_by_name.get(field_name)?;
    let value = record.get(*index)?;
    Some(value.to_string())
}

fn read_optional_string(value: Option<&Value>) -> Option<String> {
    let current = value?;

    if current.is_null() {
        return None;
    }

    if let Some(string_value) = current.as_str() {
        return Some(string_value.to_string());
    }

    // Number's Display keeps integers exact instead of routing through f64.
    if let Some(number_value) = current.as_number() {
        return Some(number_value.to_string());
    }

    Some(current.to_string())
}

fn looks_like_ndjson(content: &str) -> bool {
    let lines = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<&str>>();
    if lines.len() < 2 {
        return false;
    }

    lines.iter().all(|line| {
        let parsed = serde_json::from_str::<Value>(line.trim());
        if let Ok(value) = parsed {
            return value.is_object();
        }
        false
    })
}

fn looks_like_csv(content: &str) -> bool {
    let Some(first_line) = content.lines().find(|line| !line.trim().is_empty()) else {
        return false;
    };
    first_line.contains(',')
}

fn headers_are_valid(actual_headers: &[String]) -> bool {
    let required_fields = required_record_field_names();
    let amount_fields = amount_record_field_names();
    let optional_fields = optional_record_field_names();

    for required in &required_fields {
        if !actual_headers.iter().any(|value| value == required) {
            return false;
        }
    }

    let has_amount = actual_headers
        .iter()
        .any(|header| amount_fields.iter().any(|field| *field == header.as_str()));
    if !has_amount {
        return false;
    }

    actual_headers.iter().all(|header| {
        let name = header.as_str();
        required_fields
            .iter()
            .chain(amount_fields.iter())
            .chain(optional_fields.iter())
            .any(|field| *field == name)
    })
}

fn required_headers() -> Vec<String> {
    let mut headers = required_record_field_names()
        .iter()
        .map(|value| value.to_string())
        .collect::<Vec<String>>();
    headers.push(amount_record_field_names().join("|"));
    headers
}

fn optional_headers() -> Vec<String> {
    optional_record_field_names()
        .iter()
        .map(|value| value.to_string())
        .collect()
}
