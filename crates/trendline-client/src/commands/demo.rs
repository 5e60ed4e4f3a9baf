use chrono::{NaiveDate, NaiveDateTime};

use crate::commands::common::{format_timestamp, validate_window_months};
use crate::contracts::envelope::SuccessEnvelope;
use crate::contracts::types::DemoData;
use crate::records::parse_records;
use crate::trends::window::{is_in_window, window_cutoff};
use crate::trends::{DEFAULT_WINDOW_MONTHS, compute_spend_trends};
use crate::{ClientError, ClientResult};

const DEMO_RECORDS_CSV: &str = include_str!("samples/demo_records.csv");

/// Bundled history is aggregated against a pinned clock so the demo output
/// never drifts.
fn demo_now() -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(2026, 3, 20).and_then(|date| date.and_hms_opt(12, 0, 0))
}

pub fn run(window_months: Option<i64>) -> ClientResult<SuccessEnvelope> {
    let window_months = validate_window_months(
        window_months.unwrap_or(i64::from(DEFAULT_WINDOW_MONTHS)),
        "demo trends",
    )?;
    let now = demo_now().ok_or_else(|| {
        ClientError::new("internal_demo_clock", "Demo clock is not a valid date.", Vec::new())
    })?;
    let records = parse_records(DEMO_RECORDS_CSV)?;
    let cutoff = window_cutoff(now, window_months);
    let records_in_window = records
        .iter()
        .filter(|record| is_in_window(record.occurred_at, cutoff))
        .count();

    let data = DemoData {
        topic: "trends".to_string(),
        source: "sample-snapshot".to_string(),
        window_months,
        now: format_timestamp(&now),
        cutoff: format_timestamp(&cutoff),
        records_read: records.len() as i64,
        records_in_window: records_in_window as i64,
        trends: compute_spend_trends(&records, window_months, now),
    };

    SuccessEnvelope::from_payload(&data)
}
