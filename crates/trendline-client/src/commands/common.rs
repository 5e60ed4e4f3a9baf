use chrono::NaiveDateTime;

use crate::ClientError;
use crate::ClientResult;

pub(crate) const TIMESTAMP_FIELD: &str = "occurred_at";
pub(crate) const MINOR_UNITS_FIELD: &str = "amount_minor_units";
pub(crate) const MAJOR_UNITS_FIELD: &str = "amount";

const REQUIRED_RECORD_FIELDS: [(&str, &str); 1] = [(TIMESTAMP_FIELD, "date|datetime")];

/// Exactly one of these must carry a value on every row.
const AMOUNT_RECORD_FIELDS: [(&str, &str); 2] = [
    (MINOR_UNITS_FIELD, "integer"),
    (MAJOR_UNITS_FIELD, "decimal"),
];

const OPTIONAL_RECORD_FIELDS: [(&str, &str); 2] =
    [("category", "string|null"), ("merchant_name", "string|null")];

pub(crate) fn required_record_field_names() -> Vec<&'static str> {
    REQUIRED_RECORD_FIELDS
        .iter()
        .map(|(name, _)| *name)
        .collect()
}

pub(crate) fn amount_record_field_names() -> Vec<&'static str> {
    AMOUNT_RECORD_FIELDS.iter().map(|(name, _)| *name).collect()
}

pub(crate) fn optional_record_field_names() -> Vec<&'static str> {
    OPTIONAL_RECORD_FIELDS
        .iter()
        .map(|(name, _)| *name)
        .collect()
}

pub(crate) fn validate_window_months(window_months: i64, command: &str) -> ClientResult<u32> {
    if window_months < 1 {
        return Err(ClientError::invalid_argument_for_command(
            "`window-months` must be a positive whole number of months.",
            Some(command),
        ));
    }
    u32::try_from(window_months).map_err(|_| {
        ClientError::invalid_argument_for_command(
            "`window-months` is too large.",
            Some(command),
        )
    })
}

pub(crate) fn validate_top_n(top_n: i64, command: &str) -> ClientResult<usize> {
    if top_n < 1 {
        return Err(ClientError::invalid_argument_for_command(
            "`top` must be a positive number of entries per list.",
            Some(command),
        ));
    }
    usize::try_from(top_n).map_err(|_| {
        ClientError::invalid_argument_for_command("`top` is too large.", Some(command))
    })
}

/// Resolves the clock used for windowing: an explicit `--now` value, or the
/// local wall clock.
pub(crate) fn resolve_now(now: Option<&str>, command: &str) -> ClientResult<NaiveDateTime> {
    let Some(value) = now else {
        return Ok(chrono::Local::now().naive_local());
    };
    crate::records::validate::parse_occurred_at(value).ok_or_else(|| {
        ClientError::invalid_argument_for_command(
            "`now` must be YYYY-MM-DD, YYYY-MM-DDTHH:MM:SS or an RFC 3339 timestamp.",
            Some(command),
        )
    })
}

pub(crate) fn format_timestamp(value: &NaiveDateTime) -> String {
    value.format("%Y-%m-%dT%H:%M:%S").to_string()
}
