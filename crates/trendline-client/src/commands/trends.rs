use std::path::Path;

use tracing::{debug, info};

use crate::ClientResult;
use crate::commands::common::{format_timestamp, resolve_now, validate_window_months};
use crate::config::load_config;
use crate::contracts::envelope::{CommandPayload, SuccessEnvelope};
use crate::contracts::types::TrendsData;
use crate::records::load_records;
use crate::trends::compute_spend_trends;
use crate::trends::window::{is_in_window, window_cutoff};

const COMMAND: &str = TrendsData::COMMAND;

#[derive(Debug, Default)]
pub struct TrendsRunOptions<'a> {
    pub path: Option<String>,
    pub window_months: Option<i64>,
    pub now: Option<String>,
    pub home_override: Option<&'a Path>,
    pub stdin_override: Option<String>,
}

pub fn run(
    path: Option<String>,
    window_months: Option<i64>,
    now: Option<&str>,
) -> ClientResult<SuccessEnvelope> {
    run_with_options(TrendsRunOptions {
        path,
        window_months,
        now: now.map(std::string::ToString::to_string),
        home_override: None,
        stdin_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: TrendsRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
    let resolved = load_config(options.home_override)?;
    debug!(
        path = %resolved.config_path.display(),
        from_file = resolved.loaded_from_file,
        "resolved configuration"
    );
    let config = resolved.config;
    let window_months = validate_window_months(
        options
            .window_months
            .unwrap_or(i64::from(config.window_months)),
        COMMAND,
    )?;
    let now = resolve_now(options.now.as_deref(), COMMAND)?;

    let loaded = load_records(options.path, options.stdin_override)?;
    let cutoff = window_cutoff(now, window_months);
    let records_in_window = loaded
        .records
        .iter()
        .filter(|record| is_in_window(record.occurred_at, cutoff))
        .count();

    let trends = compute_spend_trends(&loaded.records, window_months, now);
    info!(
        window_months,
        records_read = loaded.records.len(),
        records_in_window,
        total_minor_units = trends.total_in_window_minor_units,
        "computed spend trends"
    );

    let data = TrendsData {
        window_months,
        now: format_timestamp(&now),
        cutoff: format_timestamp(&cutoff),
        source_used: loaded.source_used,
        records_read: loaded.records.len() as i64,
        records_in_window: records_in_window as i64,
        trends,
    };

    SuccessEnvelope::from_payload(&data)
}
