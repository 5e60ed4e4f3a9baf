use crate::trends::money::{format_money, format_pct, format_signed_pct};
use crate::trends::types::CategoryTotal;

const SUMMARY_CATEGORY_LIMIT: usize = 5;

pub fn summary_text(
    window_months: u32,
    total_minor_units: i64,
    transaction_count: u64,
    by_category: &[CategoryTotal],
    month_over_month_pct: Option<f64>,
) -> String {
    let clauses = [
        total_clause(window_months, total_minor_units, transaction_count),
        categories_clause(by_category),
        month_over_month_clause(month_over_month_pct),
    ];

    clauses
        .into_iter()
        .filter(|clause| !clause.is_empty())
        .collect::<Vec<String>>()
        .join(" ")
}

fn total_clause(window_months: u32, total_minor_units: i64, transaction_count: u64) -> String {
    format!(
        "Total spend over the last {window_months} {}: {} across {transaction_count} {}.",
        plural(u64::from(window_months), "month", "months"),
        format_money(total_minor_units),
        plural(transaction_count, "transaction", "transactions"),
    )
}

fn categories_clause(by_category: &[CategoryTotal]) -> String {
    if by_category.is_empty() {
        return String::new();
    }

    let listed = by_category
        .iter()
        .take(SUMMARY_CATEGORY_LIMIT)
        .map(|entry| {
            format!(
                "{} ({}, {}%)",
                entry.category,
                format_money(entry.total_minor_units),
                format_pct(entry.pct_of_total)
            )
        })
        .collect::<Vec<String>>()
        .join("; ");
    format!("Top categories: {listed}.")
}

fn month_over_month_clause(month_over_month_pct: Option<f64>) -> String {
    match month_over_month_pct {
        Some(value) => format!("Month-over-month change: {}%.", format_signed_pct(value)),
        None => String::new(),
    }
}

pub(crate) fn plural(count: u64, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 { one } else { many }
}
