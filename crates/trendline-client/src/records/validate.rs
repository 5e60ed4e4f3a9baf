use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::commands::common::{MAJOR_UNITS_FIELD, MINOR_UNITS_FIELD, TIMESTAMP_FIELD};
use crate::contracts::types::{RecordIssue, RecordsSummary};
use crate::records::parse::ParsedRow;
use crate::trends::TransactionRecord;
use crate::{ClientError, ClientResult};

const NAIVE_DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
];

#[derive(Debug, Clone)]
pub(crate) struct ValidatedRecords {
    pub(crate) records: Vec<TransactionRecord>,
    pub(crate) summary: RecordsSummary,
}

pub(crate) fn validate_rows(parsed_rows: Vec<ParsedRow>) -> ClientResult<ValidatedRecords> {
    let total_rows = parsed_rows.len();
    let mut records = Vec::with_capacity(total_rows);
    let mut issues = Vec::new();

    for raw in parsed_rows {
        let mut row_issues = Vec::new();

        let occurred_at = validate_occurred_at(raw.row, raw.occurred_at, &mut row_issues);
        let amount = validate_amount(
            raw.row,
            raw.amount_minor_units,
            raw.amount,
            &mut row_issues,
        );
        let category = normalize_optional(raw.category);
        let merchant_name = normalize_optional(raw.merchant_name);

        match (occurred_at, amount) {
            (Some(occurred_at), Some(amount_minor_units)) if row_issues.is_empty() => {
                records.push(TransactionRecord {
                    amount_minor_units,
                    category,
                    occurred_at,
                    merchant_name,
                });
            }
            _ => issues.extend(row_issues),
        }
    }

    let summary = RecordsSummary {
        rows_read: total_rows as i64,
        rows_valid: records.len() as i64,
        rows_invalid: issues
            .iter()
            .map(|issue| issue.row)
            .collect::<HashSet<i64>>()
            .len() as i64,
    };

    if !issues.is_empty() {
        return Err(ClientError::records_validation_failed(summary, issues));
    }

    Ok(ValidatedRecords { records, summary })
}

/// Accepts `YYYY-MM-DD` (midnight), a naive `YYYY-MM-DDTHH:MM:SS[.f]` (or
/// space separated), or RFC 3339. Offsets are not converted: the wall-clock
/// time written in the value is what gets bucketed.
pub(crate) fn parse_occurred_at(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if looks_like_iso_date(trimmed) {
        return NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(parsed);
        }
    }

    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|parsed| parsed.naive_local())
}

/// Converts a decimal major-unit amount (`-42.15`, `7`, `+0.5`) to minor
/// units without going through floating point. At most two fraction digits.
pub(crate) fn parse_major_units(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (unsigned, ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if fraction.len() > 2 || !all_digits(whole) || !all_digits(fraction) {
        return None;
    }

    let whole_units = if whole.is_empty() {
        0
    } else {
        whole.parse::<i64>().ok()?
    };
    let cents = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i64>().ok()? * 10,
        _ => fraction.parse::<i64>().ok()?,
    };

    let magnitude = whole_units.checked_mul(100)?.checked_add(cents)?;
    if negative {
        magnitude.checked_neg()
    } else {
        Some(magnitude)
    }
}

fn validate_occurred_at(
    row: i64,
    value: Option<String>,
    issues: &mut Vec<RecordIssue>,
) -> Option<NaiveDateTime> {
    let Some(raw) = normalize_optional(value) else {
        issues.push(issue(
            row,
            TIMESTAMP_FIELD,
            "missing_timestamp",
            "occurred_at must be present.",
            Some("YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS"),
            None,
        ));
        return None;
    };

    let parsed = parse_occurred_at(&raw);
    if parsed.is_none() {
        issues.push(issue(
            row,
            TIMESTAMP_FIELD,
            "invalid_timestamp",
            "occurred_at must be a real calendar date or timestamp.",
            Some("YYYY-MM-DD, YYYY-MM-DDTHH:MM:SS or RFC 3339"),
            Some(raw),
        ));
    }
    parsed
}

fn validate_amount(
    row: i64,
    minor_units: Option<String>,
    major_units: Option<String>,
    issues: &mut Vec<RecordIssue>,
) -> Option<i64> {
    match (normalize_optional(minor_units), normalize_optional(major_units)) {
        (Some(_), Some(_)) => {
            issues.push(issue(
                row,
                MINOR_UNITS_FIELD,
                "ambiguous_amount",
                "Provide either amount_minor_units or amount, not both.",
                None,
                None,
            ));
            None
        }
        (None, None) => {
            issues.push(issue(
                row,
                MINOR_UNITS_FIELD,
                "missing_amount",
                "One of amount_minor_units or amount must be present.",
                None,
                None,
            ));
            None
        }
        (Some(raw), None) => {
            let parsed = parse_minor_units(&raw);
            if parsed.is_none() {
                issues.push(issue(
                    row,
                    MINOR_UNITS_FIELD,
                    "invalid_amount",
                    "amount_minor_units must be a whole number of cents.",
                    Some("integer, e.g. -4215"),
                    Some(raw),
                ));
            }
            parsed
        }
        (None, Some(raw)) => {
            let parsed = parse_major_units(&raw);
            if parsed.is_none() {
                issues.push(issue(
                    row,
                    MAJOR_UNITS_FIELD,
                    "invalid_amount",
                    "amount must be a decimal number with at most 2 decimal places.",
                    Some("decimal, e.g. -42.15"),
                    Some(raw),
                ));
            }
            parsed
        }
    }
}

fn parse_minor_units(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    let digits = trimmed
        .strip_prefix('-')
        .or_else(|| trimmed.strip_prefix('+'))
        .unwrap_or(trimmed);
    if !all_digits(digits) || digits.is_empty() {
        return None;
    }
    trimmed.parse::<i64>().ok()
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|current| current.trim().to_string())
        .filter(|current| !current.is_empty())
}

fn issue(
    row: i64,
    field: &str,
    code: &str,
    description: &str,
    expected: Option<&str>,
    received: Option<String>,
) -> RecordIssue {
    RecordIssue {
        row,
        field: field.to_string(),
        code: code.to_string(),
        description: description.to_string(),
        expected: expected.map(str::to_string),
        received,
    }
}

fn all_digits(value: &str) -> bool {
    value.bytes().all(|byte| byte.is_ascii_digit())
}

fn looks_like_iso_date(value: &str) -> bool {
    if value.len() != 10 {
        return false;
    }
    let bytes = value.as_bytes();
    if bytes[4] != b'-' || bytes[7] != b'-' {
        return false;
    }

    for index in [0usize, 1, 2, 3, 5, 6, 8, 9] {
        if !bytes[index].is_ascii_digit() {
            return false;
        }
    }
    true
}
