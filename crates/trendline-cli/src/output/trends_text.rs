use std::io;

use serde_json::Value;
use trendline_client::trends::money::{format_money, format_pct, format_signed_pct};

use super::format::{Align, Column, key_value_rows, render_table_or_blocks, terminal_width};

pub fn render_trends(data: &Value) -> io::Result<String> {
    let heading = format!(
        "Spend trends (last {}, since {})",
        months_label(value_i64(data, "window_months")),
        value_str(data, "cutoff"),
    );
    render_report(&heading, data)
}

pub fn render_demo(data: &Value) -> io::Result<String> {
    let heading = format!(
        "Demo spend trends (sample data, last {}, since {})",
        months_label(value_i64(data, "window_months")),
        value_str(data, "cutoff"),
    );
    let mut body = render_report(&heading, data)?;
    body.push_str("\n\nTry it with your own records:\n  trendline trends --help");
    Ok(body)
}

/// The tool text is already rendered by the client; print it verbatim.
pub fn render_tool(data: &Value) -> io::Result<String> {
    data.get("text")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| io::Error::other("tool output is missing its text block"))
}

fn render_report(heading: &str, data: &Value) -> io::Result<String> {
    let trends = data
        .get("trends")
        .ok_or_else(|| io::Error::other("trends output is missing its trends section"))?;
    let width = terminal_width();

    let mut lines = vec![
        heading.to_string(),
        String::new(),
        format!("  {}", value_str(trends, "summary_text")),
        String::new(),
        "Overview:".to_string(),
    ];
    lines.extend(key_value_rows(
        &[
            ("Now:", value_str(data, "now")),
            ("Records read:", value_i64(data, "records_read").to_string()),
            (
                "Records in window:",
                value_i64(data, "records_in_window").to_string(),
            ),
            (
                "Total spend:",
                format_money(value_i64(trends, "total_in_window_minor_units")),
            ),
            (
                "Month over month:",
                trends
                    .get("month_over_month_pct")
                    .and_then(Value::as_f64)
                    .map(format_signed_pct)
                    .map(|pct| format!("{pct}%"))
                    .unwrap_or_else(|| "n/a".to_string()),
            ),
        ],
        2,
    ));

    lines.push(String::new());
    lines.push("By category:".to_string());
    lines.extend(section_or_empty(render_table_or_blocks(
        &[
            left("Category"),
            right("Total"),
            right("Share"),
            right("Txns"),
        ],
        &category_rows(trends.get("by_category")),
        width,
        "Category",
    )));

    lines.push(String::new());
    lines.push("By month:".to_string());
    lines.extend(section_or_empty(render_table_or_blocks(
        &[
            left("Month"),
            right("Total"),
            right("Txns"),
            left("Largest category"),
        ],
        &month_rows(trends.get("by_month")),
        width,
        "Month",
    )));

    lines.push(String::new());
    lines.push("Top merchants:".to_string());
    lines.extend(section_or_empty(render_table_or_blocks(
        &[left("Merchant"), right("Total"), right("Txns")],
        &merchant_rows(trends.get("top_merchants")),
        width,
        "Merchant",
    )));

    Ok(lines.join("\n"))
}

fn category_rows(list: Option<&Value>) -> Vec<Vec<String>> {
    entries(list)
        .iter()
        .map(|entry| {
            vec![
                value_str(entry, "category"),
                format_money(value_i64(entry, "total_minor_units")),
                format!(
                    "{}%",
                    format_pct(entry.get("pct_of_total").and_then(Value::as_f64).unwrap_or(0.0))
                ),
                value_i64(entry, "count").to_string(),
            ]
        })
        .collect()
}

fn month_rows(list: Option<&Value>) -> Vec<Vec<String>> {
    entries(list)
        .iter()
        .map(|entry| {
            let largest = entries(entry.get("by_category"))
                .first()
                .map(|category| {
                    format!(
                        "{} ({})",
                        value_str(category, "category"),
                        format_money(value_i64(category, "total_minor_units"))
                    )
                })
                .unwrap_or_else(|| "-".to_string());
            vec![
                value_str(entry, "month_key"),
                format_money(value_i64(entry, "total_minor_units")),
                value_i64(entry, "count").to_string(),
                largest,
            ]
        })
        .collect()
}

fn merchant_rows(list: Option<&Value>) -> Vec<Vec<String>> {
    entries(list)
        .iter()
        .map(|entry| {
            vec![
                value_str(entry, "name"),
                format_money(value_i64(entry, "total_minor_units")),
                value_i64(entry, "count").to_string(),
            ]
        })
        .collect()
}

fn section_or_empty(rows: Vec<String>) -> Vec<String> {
    // Header only means there were no entries.
    if rows.len() <= 1 {
        return vec!["  No spending in this window.".to_string()];
    }
    rows
}

fn months_label(window_months: i64) -> String {
    if window_months == 1 {
        "1 month".to_string()
    } else {
        format!("{window_months} months")
    }
}

fn left(name: &str) -> Column<'_> {
    Column {
        name,
        align: Align::Left,
    }
}

fn right(name: &str) -> Column<'_> {
    Column {
        name,
        align: Align::Right,
    }
}

fn entries(list: Option<&Value>) -> Vec<Value> {
    list.and_then(Value::as_array).cloned().unwrap_or_default()
}

fn value_str(row: &Value, key: &str) -> String {
    row.get(key)
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}

fn value_i64(row: &Value, key: &str) -> i64 {
    row.get(key).and_then(Value::as_i64).unwrap_or(0)
}
