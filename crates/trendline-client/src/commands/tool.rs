use std::path::Path;

use tracing::{debug, info};

use crate::ClientResult;
use crate::commands::common::{
    format_timestamp, resolve_now, validate_top_n, validate_window_months,
};
use crate::config::load_config;
use crate::contracts::envelope::{CommandPayload, SuccessEnvelope};
use crate::contracts::types::ToolData;
use crate::records::load_records;
use crate::trends::{compute_spend_trends, render_tool_text, tool_payload};

const COMMAND: &str = ToolData::COMMAND;
const TOOL_NAME: &str = "get_spend_trends";

#[derive(Debug, Default)]
pub struct ToolRunOptions<'a> {
    pub path: Option<String>,
    pub window_months: Option<i64>,
    pub top_n: Option<i64>,
    pub now: Option<String>,
    pub home_override: Option<&'a Path>,
    pub stdin_override: Option<String>,
}

pub fn spend_trends(
    path: Option<String>,
    window_months: Option<i64>,
    top_n: Option<i64>,
    now: Option<&str>,
) -> ClientResult<SuccessEnvelope> {
    run_with_options(ToolRunOptions {
        path,
        window_months,
        top_n,
        now: now.map(std::string::ToString::to_string),
        home_override: None,
        stdin_override: None,
    })
}

/// Computes trends and trims them into the payload an LLM tool call returns.
#[doc(hidden)]
pub fn run_with_options(options: ToolRunOptions<'_>) -> ClientResult<SuccessEnvelope> {
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
    let top_n = match options.top_n {
        Some(value) => validate_top_n(value, COMMAND)?,
        None => config.tool_top_n,
    };
    let now = resolve_now(options.now.as_deref(), COMMAND)?;

    let loaded = load_records(options.path, options.stdin_override)?;
    let trends = compute_spend_trends(&loaded.records, window_months, now);
    let payload = tool_payload(&trends, top_n);
    info!(
        tool = TOOL_NAME,
        window_months,
        top_n,
        records_read = loaded.records.len(),
        "built tool payload"
    );

    let data = ToolData {
        tool: TOOL_NAME.to_string(),
        window_months,
        top_n,
        now: format_timestamp(&now),
        text: render_tool_text(&payload),
        payload,
    };

    SuccessEnvelope::from_payload(&data)
}
