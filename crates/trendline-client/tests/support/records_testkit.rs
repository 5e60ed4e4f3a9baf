use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tempfile::{Builder, TempDir};
use trendline_client::commands::trends::{self, TrendsRunOptions};

pub const FIXED_NOW: &str = "2026-04-15T12:00:00";

pub fn temp_home_in_tmp(prefix: &str) -> std::io::Result<(TempDir, PathBuf)> {
    let dir = Builder::new().prefix(prefix).tempdir_in("/tmp")?;
    let home = dir.path().join("trendline-home");
    fs::create_dir_all(&home)?;
    Ok((dir, home))
}

pub fn record(
    occurred_at: &str,
    amount_minor_units: i64,
    category: Option<&str>,
    merchant_name: Option<&str>,
) -> Value {
    json!({
        "occurred_at": occurred_at,
        "amount_minor_units": amount_minor_units,
        "category": category,
        "merchant_name": merchant_name,
    })
}

pub fn write_fixture(base: &Path, name: &str, body: &str) -> std::io::Result<PathBuf> {
    let path = base.join(name);
    fs::write(&path, body)?;
    Ok(path)
}

pub fn write_fixture_json(base: &Path, name: &str, rows: &[Value]) -> std::io::Result<PathBuf> {
    let body = serde_json::to_string_pretty(rows).map_err(std::io::Error::other)?;
    write_fixture(base, name, &body)
}

/// Runs `trends` over `rows` with a pinned clock and returns the envelope as JSON.
pub fn trends_payload(rows: &[Value], window_months: Option<i64>) -> Value {
    let temp = temp_home_in_tmp("trendline-trends-scenario");
    assert!(temp.is_ok());
    if let Ok((dir, home)) = temp {
        let fixture = write_fixture_json(dir.path(), "records.json", rows);
        assert!(fixture.is_ok());
        if let Ok(path) = fixture {
            let result = trends::run_with_options(TrendsRunOptions {
                path: Some(path.display().to_string()),
                window_months,
                now: Some(FIXED_NOW.to_string()),
                home_override: Some(&home),
                stdin_override: None,
            });
            assert!(result.is_ok());
            if let Ok(success) = result {
                let payload = serde_json::to_value(success);
                assert!(payload.is_ok());
                if let Ok(value) = payload {
                    return value;
                }
            }
        }
    }
    Value::Null
}

pub fn category_names(list: &Value) -> Vec<String> {
    list.as_array()
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| entry["category"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
