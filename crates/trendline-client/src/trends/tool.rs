use serde::Serialize;

use crate::trends::money::{format_money, format_pct, format_signed_pct};
use crate::trends::summary::plural;
use crate::trends::types::{CategoryTotal, MerchantTotal, MonthBucket, SpendTrends};

pub const DEFAULT_TOOL_TOP_N: usize = 5;

/// Trimmed view of [`SpendTrends`] handed to a language model as the result of
/// a tool call. Money is carried both as minor units and pre-formatted so the
/// model never has to do arithmetic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendTrendsToolPayload {
    pub summary_text: String,
    pub total_in_window_minor_units: i64,
    pub total_in_window_display: String,
    pub month_over_month_pct: Option<f64>,
    pub by_category: ToolList<ToolCategory>,
    pub by_month: ToolList<ToolMonth>,
    pub top_merchants: ToolList<ToolMerchant>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolList<T> {
    pub items: Vec<T>,
    pub total_available: usize,
    pub truncated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolCategory {
    pub category: String,
    pub total_minor_units: i64,
    pub total_display: String,
    pub count: u64,
    pub pct_of_total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolMonth {
    pub month_key: String,
    pub total_minor_units: i64,
    pub total_display: String,
    pub count: u64,
    pub by_category: ToolList<ToolCategory>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolMerchant {
    pub name: String,
    pub total_minor_units: i64,
    pub total_display: String,
    pub count: u64,
}

pub fn tool_payload(trends: &SpendTrends, top_n: usize) -> SpendTrendsToolPayload {
    // Months keep ascending order but only the most recent `top_n` survive.
    let skipped_months = trends.by_month.len().saturating_sub(top_n);
    let months = trends.by_month[skipped_months..]
        .iter()
        .map(|bucket| tool_month(bucket, top_n))
        .collect::<Vec<ToolMonth>>();

    SpendTrendsToolPayload {
        summary_text: trends.summary_text.clone(),
        total_in_window_minor_units: trends.total_in_window_minor_units,
        total_in_window_display: format_money(trends.total_in_window_minor_units),
        month_over_month_pct: trends.month_over_month_pct,
        by_category: head(&trends.by_category, top_n, tool_category),
        by_month: ToolList {
            items: months,
            total_available: trends.by_month.len(),
            truncated: skipped_months > 0,
        },
        top_merchants: head(&trends.top_merchants, top_n, tool_merchant),
    }
}

/// Plain-text block for the model's context window.
pub fn render_tool_text(payload: &SpendTrendsToolPayload) -> String {
    let mut lines = vec![
        format!("summary: {}", payload.summary_text),
        format!("total_in_window: {}", payload.total_in_window_display),
        format!(
            "month_over_month_pct: {}",
            payload
                .month_over_month_pct
                .map(|pct| format!("{}%", format_signed_pct(pct)))
                .unwrap_or_else(|| "n/a".to_string())
        ),
    ];

    lines.push(list_heading("top_categories", &payload.by_category));
    for entry in &payload.by_category.items {
        lines.push(format!(
            "- {}: {} ({}%, {})",
            entry.category,
            entry.total_display,
            format_pct(entry.pct_of_total),
            txn_count(entry.count)
        ));
    }

    lines.push(list_heading("months", &payload.by_month));
    for month in &payload.by_month.items {
        let categories = month
            .by_category
            .items
            .iter()
            .map(|entry| format!("{} {}", entry.category, entry.total_display))
            .collect::<Vec<String>>()
            .join(", ");
        lines.push(format!(
            "- {}: {} ({}) [{}]",
            month.month_key,
            month.total_display,
            txn_count(month.count),
            categories
        ));
    }

    lines.push(list_heading("top_merchants", &payload.top_merchants));
    for merchant in &payload.top_merchants.items {
        lines.push(format!(
            "- {}: {} ({})",
            merchant.name,
            merchant.total_display,
            txn_count(merchant.count)
        ));
    }

    lines.join("\n")
}

fn txn_count(count: u64) -> String {
    format!("{count} {}", plural(count, "txn", "txns"))
}

fn list_heading<T>(label: &str, list: &ToolList<T>) -> String {
    if list.truncated {
        format!(
            "{label} (showing {} of {}):",
            list.items.len(),
            list.total_available
        )
    } else {
        format!("{label}:")
    }
}

fn head<S, T>(source: &[S], top_n: usize, convert: fn(&S) -> T) -> ToolList<T> {
    ToolList {
        items: source.iter().take(top_n).map(convert).collect(),
        total_available: source.len(),
        truncated: source.len() > top_n,
    }
}

fn tool_category(entry: &CategoryTotal) -> ToolCategory {
    ToolCategory {
        category: entry.category.clone(),
        total_minor_units: entry.total_minor_units,
        total_display: format_money(entry.total_minor_units),
        count: entry.count,
        pct_of_total: entry.pct_of_total,
    }
}

fn tool_month(bucket: &MonthBucket, top_n: usize) -> ToolMonth {
    ToolMonth {
        month_key: bucket.month_key.clone(),
        total_minor_units: bucket.total_minor_units,
        total_display: format_money(bucket.total_minor_units),
        count: bucket.count,
        by_category: head(&bucket.by_category, top_n, tool_category),
    }
}

fn tool_merchant(entry: &MerchantTotal) -> ToolMerchant {
    ToolMerchant {
        name: entry.name.clone(),
        total_minor_units: entry.total_minor_units,
        total_display: format_money(entry.total_minor_units),
        count: entry.count,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};

    use super::{render_tool_text, tool_payload};
    use crate::trends::aggregate::compute_spend_trends;
    use crate::trends::types::TransactionRecord;

    fn on(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(10, 0, 0))
            .unwrap_or(NaiveDateTime::MIN)
    }

    fn history() -> Vec<TransactionRecord> {
        let mut rows = Vec::new();
        for month in 1..=6_u32 {
            for (index, category) in ["Meals", "Travel", "Software", "Rent"].iter().enumerate() {
                rows.push(TransactionRecord {
                    amount_minor_units: 1_000 * (index as i64 + 1) + i64::from(month),
                    category: Some((*category).to_string()),
                    occurred_at: on(2026, month, 3),
                    merchant_name: Some(format!("{category} Vendor {month}")),
                });
            }
        }
        rows
    }

    #[test]
    fn payload_trims_every_list_to_top_n() {
        let trends = compute_spend_trends(&history(), 12, on(2026, 6, 30));
        let payload = tool_payload(&trends, 2);

        assert_eq!(payload.by_category.items.len(), 2);
        assert_eq!(payload.by_category.total_available, 4);
        assert!(payload.by_category.truncated);
        assert_eq!(payload.by_category.items[0].category, "Rent");

        assert_eq!(payload.by_month.items.len(), 2);
        assert_eq!(payload.by_month.total_available, 6);
        assert_eq!(payload.by_month.items[0].month_key, "2026-05");
        assert_eq!(payload.by_month.items[1].month_key, "2026-06");
        assert_eq!(payload.by_month.items[1].by_category.items.len(), 2);

        assert_eq!(payload.top_merchants.items.len(), 2);
        assert_eq!(payload.top_merchants.total_available, 10);
        assert_eq!(payload.top_merchants.items[0].name, "Rent Vendor 6");
    }

    #[test]
    fn payload_is_not_truncated_when_lists_are_short() {
        let trends = compute_spend_trends(&history()[..2], 12, on(2026, 6, 30));
        let payload = tool_payload(&trends, 5);
        assert!(!payload.by_category.truncated);
        assert!(!payload.by_month.truncated);
        assert!(!payload.top_merchants.truncated);
        assert_eq!(payload.total_in_window_display, "$30.02");
    }

    #[test]
    fn tool_text_marks_truncated_sections() {
        let trends = compute_spend_trends(&history(), 12, on(2026, 6, 30));
        let text = render_tool_text(&tool_payload(&trends, 3));
        assert!(text.starts_with("summary: Total spend over the last 12 months"));
        assert!(text.contains("top_categories (showing 3 of 4):"));
        assert!(text.contains("months (showing 3 of 6):"));
        assert!(text.contains("- 2026-06: $100.24 (4 txns)"));
        assert!(text.contains("month_over_month_pct: +0.0%"));
    }

    #[test]
    fn tool_text_signs_change_and_pluralizes_counts() {
        let records = vec![
            TransactionRecord {
                amount_minor_units: 8_000,
                category: Some("Groceries".to_string()),
                occurred_at: on(2026, 5, 4),
                merchant_name: Some("Corner Market".to_string()),
            },
            TransactionRecord {
                amount_minor_units: 4_000,
                category: Some("Groceries".to_string()),
                occurred_at: on(2026, 6, 2),
                merchant_name: Some("Corner Market".to_string()),
            },
            TransactionRecord {
                amount_minor_units: 5_000,
                category: Some("Dining".to_string()),
                occurred_at: on(2026, 6, 9),
                merchant_name: Some("Noodle Bar".to_string()),
            },
        ];
        let trends = compute_spend_trends(&records, 3, on(2026, 6, 30));
        let text = render_tool_text(&tool_payload(&trends, 5));

        assert!(text.contains("\nmonth_over_month_pct: +12.5%\n"));
        assert!(text.contains("- 2026-05: $80.00 (1 txn) [Groceries $80.00]"));
        assert!(text.contains("- 2026-06: $90.00 (2 txns) [Dining $50.00, Groceries $40.00]"));
        assert!(text.contains("- Groceries: $120.00 (70.6%, 2 txns)"));
        assert!(text.contains("- Noodle Bar: $50.00 (1 txn)"));
    }

    #[test]
    fn empty_trends_render_without_sections_content() {
        let trends = compute_spend_trends(&[], 3, on(2026, 6, 30));
        let text = render_tool_text(&tool_payload(&trends, 5));
        assert!(text.contains("month_over_month_pct: n/a"));
        assert!(text.contains("top_merchants:"));
    }
}
