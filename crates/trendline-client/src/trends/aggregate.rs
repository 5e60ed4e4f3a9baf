use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDateTime;

use crate::trends::labels::{category_key, merchant_key};
use crate::trends::money::{pct_change, pct_of};
use crate::trends::summary::summary_text;
use crate::trends::types::{
    CategoryTotal, MerchantTotal, MonthBucket, SpendTrends, TransactionRecord,
};
use crate::trends::window::{is_in_window, month_key, window_cutoff};

pub const DEFAULT_WINDOW_MONTHS: u32 = 3;
pub const TOP_MERCHANT_LIMIT: usize = 10;

/// Running totals keyed by free-text label, remembering the order in which
/// labels were first seen so equal totals keep encounter order after sorting.
#[derive(Debug, Default)]
struct Rollup {
    index_by_label: HashMap<String, usize>,
    entries: Vec<RollupEntry>,
}

#[derive(Debug)]
struct RollupEntry {
    label: String,
    total_minor_units: i64,
    count: u64,
}

impl Rollup {
    fn add(&mut self, label: &str, amount_minor_units: i64) {
        let index = match self.index_by_label.get(label) {
            Some(index) => *index,
            None => {
                self.entries.push(RollupEntry {
                    label: label.to_string(),
                    total_minor_units: 0,
                    count: 0,
                });
                let index = self.entries.len() - 1;
                self.index_by_label.insert(label.to_string(), index);
                index
            }
        };

        let entry = &mut self.entries[index];
        entry.total_minor_units = entry.total_minor_units.saturating_add(amount_minor_units);
        entry.count += 1;
    }

    fn into_sorted(self) -> Vec<RollupEntry> {
        let mut entries = self.entries;
        entries.sort_by(|left, right| right.total_minor_units.cmp(&left.total_minor_units));
        entries
    }

    fn into_category_totals(self, denominator: i64) -> Vec<CategoryTotal> {
        self.into_sorted()
            .into_iter()
            .map(|entry| CategoryTotal {
                pct_of_total: pct_of(entry.total_minor_units, denominator),
                category: entry.label,
                total_minor_units: entry.total_minor_units,
                count: entry.count,
            })
            .collect()
    }
}

#[derive(Debug, Default)]
struct MonthAccumulator {
    total_minor_units: i64,
    count: u64,
    categories: Rollup,
}

/// Summarizes the records that fall inside the trailing `window_months`
/// calendar months ending at `now`.
///
/// Pure: the caller supplies the clock, nothing is logged and the input is
/// only read. Empty input yields zero totals, empty lists and no
/// month-over-month change.
pub fn compute_spend_trends(
    records: &[TransactionRecord],
    window_months: u32,
    now: NaiveDateTime,
) -> SpendTrends {
    let cutoff = window_cutoff(now, window_months);

    let mut window_total: i64 = 0;
    let mut window_count: u64 = 0;
    let mut categories = Rollup::default();
    let mut months: BTreeMap<String, MonthAccumulator> = BTreeMap::new();
    let mut merchants = Rollup::default();

    for record in records
        .iter()
        .filter(|record| is_in_window(record.occurred_at, cutoff))
    {
        let amount = record.amount_minor_units;
        let category = category_key(record.category.as_deref());

        window_total = window_total.saturating_add(amount);
        window_count += 1;
        categories.add(category, amount);

        let month = months.entry(month_key(record.occurred_at)).or_default();
        month.total_minor_units = month.total_minor_units.saturating_add(amount);
        month.count += 1;
        month.categories.add(category, amount);

        merchants.add(merchant_key(record.merchant_name.as_deref()), amount);
    }

    let by_category = categories.into_category_totals(window_total);

    // BTreeMap iteration is already ascending by `YYYY-MM`.
    let by_month = months
        .into_iter()
        .map(|(month_key, month)| MonthBucket {
            month_key,
            total_minor_units: month.total_minor_units,
            count: month.count,
            by_category: month.categories.into_category_totals(month.total_minor_units),
        })
        .collect::<Vec<MonthBucket>>();

    let month_over_month_pct = match by_month.as_slice() {
        [.., previous, last] => pct_change(previous.total_minor_units, last.total_minor_units),
        _ => None,
    };

    let top_merchants = merchants
        .into_sorted()
        .into_iter()
        .take(TOP_MERCHANT_LIMIT)
        .map(|entry| MerchantTotal {
            name: entry.label,
            total_minor_units: entry.total_minor_units,
            count: entry.count,
        })
        .collect::<Vec<MerchantTotal>>();

    SpendTrends {
        summary_text: summary_text(
            window_months,
            window_total,
            window_count,
            &by_category,
            month_over_month_pct,
        ),
        total_in_window_minor_units: window_total,
        by_category,
        by_month,
        month_over_month_pct,
        top_merchants,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    use super::{DEFAULT_WINDOW_MONTHS, compute_spend_trends};
    use crate::trends::types::TransactionRecord;
    use crate::trends::window::window_cutoff;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 4, 15)
            .and_then(|date| date.and_hms_opt(12, 0, 0))
            .unwrap_or(NaiveDateTime::MIN)
    }

    fn on(date: &str) -> NaiveDateTime {
        NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .ok()
            .and_then(|value| value.and_hms_opt(9, 30, 0))
            .unwrap_or(NaiveDateTime::MIN)
    }

    fn record(
        amount: i64,
        category: Option<&str>,
        occurred_at: NaiveDateTime,
        merchant: Option<&str>,
    ) -> TransactionRecord {
        TransactionRecord {
            amount_minor_units: amount,
            category: category.map(str::to_string),
            occurred_at,
            merchant_name: merchant.map(str::to_string),
        }
    }

    #[test]
    fn empty_input_produces_zeroed_trends() {
        let trends = compute_spend_trends(&[], DEFAULT_WINDOW_MONTHS, now());
        assert_eq!(trends.total_in_window_minor_units, 0);
        assert!(trends.by_category.is_empty());
        assert!(trends.by_month.is_empty());
        assert!(trends.top_merchants.is_empty());
        assert_eq!(trends.month_over_month_pct, None);
        assert_eq!(
            trends.summary_text,
            "Total spend over the last 3 months: $0.00 across 0 transactions."
        );
    }

    #[test]
    fn records_just_outside_window_are_excluded_everywhere() {
        let cutoff = window_cutoff(now(), 3);
        let rows = vec![
            record(500, Some("Meals"), cutoff - Duration::days(1), Some("Old Diner")),
            record(700, Some("Meals"), cutoff + Duration::days(1), Some("New Diner")),
        ];

        let trends = compute_spend_trends(&rows, 3, now());
        assert_eq!(trends.total_in_window_minor_units, 700);
        assert_eq!(trends.by_category.len(), 1);
        assert_eq!(trends.by_category[0].count, 1);
        assert_eq!(trends.by_month.len(), 1);
        assert_eq!(trends.by_month[0].month_key, "2026-01");
        assert_eq!(trends.top_merchants.len(), 1);
        assert_eq!(trends.top_merchants[0].name, "New Diner");
    }

    #[test]
    fn record_exactly_at_cutoff_is_included() {
        let cutoff = window_cutoff(now(), 1);
        let trends = compute_spend_trends(&[record(100, None, cutoff, None)], 1, now());
        assert_eq!(trends.total_in_window_minor_units, 100);
    }

    #[test]
    fn blank_and_missing_categories_roll_up_together() {
        let rows = vec![
            record(100, Some(""), on("2026-04-01"), None),
            record(200, None, on("2026-04-02"), None),
            record(300, Some("Travel"), on("2026-04-03"), None),
        ];

        let trends = compute_spend_trends(&rows, 3, now());
        assert_eq!(trends.by_category.len(), 2);
        let uncategorized = trends
            .by_category
            .iter()
            .find(|entry| entry.category == "Uncategorized");
        assert!(uncategorized.is_some());
        if let Some(entry) = uncategorized {
            assert_eq!(entry.total_minor_units, 300);
            assert_eq!(entry.count, 2);
        }
        assert_eq!(trends.by_month[0].by_category.len(), 2);
        assert_eq!(trends.top_merchants[0].name, "Unknown");
        assert_eq!(trends.top_merchants[0].count, 3);
    }

    #[test]
    fn category_percentages_use_one_decimal_place() {
        let rows = vec![
            record(333, Some("Software"), on("2026-04-01"), None),
            record(667, Some("Travel"), on("2026-04-02"), None),
        ];

        let trends = compute_spend_trends(&rows, 3, now());
        assert_eq!(trends.by_category[0].category, "Travel");
        assert_eq!(trends.by_category[0].pct_of_total, 66.7);
        assert_eq!(trends.by_category[1].category, "Software");
        assert_eq!(trends.by_category[1].pct_of_total, 33.3);
    }

    #[test]
    fn months_are_ascending_regardless_of_input_order() {
        let rows = vec![
            record(300, Some("Rent"), on("2026-03-10"), None),
            record(100, Some("Rent"), on("2026-01-10"), None),
            record(200, Some("Rent"), on("2026-02-10"), None),
        ];

        let trends = compute_spend_trends(&rows, 6, now());
        let keys = trends
            .by_month
            .iter()
            .map(|bucket| bucket.month_key.as_str())
            .collect::<Vec<&str>>();
        assert_eq!(keys, vec!["2026-01", "2026-02", "2026-03"]);
    }

    #[test]
    fn month_categories_use_month_total_as_denominator() {
        let rows = vec![
            record(100, Some("Meals"), on("2026-03-01"), None),
            record(300, Some("Travel"), on("2026-03-02"), None),
            record(600, Some("Meals"), on("2026-04-01"), None),
        ];

        let trends = compute_spend_trends(&rows, 3, now());
        let march = &trends.by_month[0];
        assert_eq!(march.month_key, "2026-03");
        assert_eq!(march.by_category[0].category, "Travel");
        assert_eq!(march.by_category[0].pct_of_total, 75.0);
        assert_eq!(march.by_category[1].pct_of_total, 25.0);

        let april = &trends.by_month[1];
        assert_eq!(april.by_category.len(), 1);
        assert_eq!(april.by_category[0].pct_of_total, 100.0);

        assert_eq!(trends.by_category[0].category, "Meals");
        assert_eq!(trends.by_category[0].pct_of_total, 70.0);
    }

    #[test]
    fn month_over_month_requires_two_months_and_nonzero_baseline() {
        let single = vec![record(100, None, on("2026-04-01"), None)];
        assert_eq!(compute_spend_trends(&single, 3, now()).month_over_month_pct, None);

        let zero_baseline = vec![
            record(100, None, on("2026-03-01"), None),
            record(-100, None, on("2026-03-02"), None),
            record(150, None, on("2026-04-01"), None),
        ];
        assert_eq!(
            compute_spend_trends(&zero_baseline, 3, now()).month_over_month_pct,
            None
        );

        let growth = vec![
            record(100, None, on("2026-03-01"), None),
            record(150, None, on("2026-04-01"), None),
        ];
        assert_eq!(
            compute_spend_trends(&growth, 3, now()).month_over_month_pct,
            Some(50.0)
        );
    }

    #[test]
    fn month_over_month_compares_only_last_two_buckets() {
        let rows = vec![
            record(1_000, None, on("2026-02-01"), None),
            record(200, None, on("2026-03-01"), None),
            record(100, None, on("2026-04-01"), None),
        ];
        assert_eq!(
            compute_spend_trends(&rows, 3, now()).month_over_month_pct,
            Some(-50.0)
        );
    }

    #[test]
    fn top_merchants_are_capped_at_ten_with_stable_ties() {
        let mut rows = Vec::new();
        for index in 0..15_i64 {
            let name = format!("Merchant {index:02}");
            let amount = if index < 4 { 5_000 } else { 1_000 + index };
            rows.push(record(amount, None, on("2026-04-01"), Some(name.as_str())));
        }

        let trends = compute_spend_trends(&rows, 3, now());
        assert_eq!(trends.top_merchants.len(), 10);

        let names = trends
            .top_merchants
            .iter()
            .map(|merchant| merchant.name.as_str())
            .collect::<Vec<&str>>();
        assert_eq!(
            &names[..5],
            &[
                "Merchant 00",
                "Merchant 01",
                "Merchant 02",
                "Merchant 03",
                "Merchant 14"
            ]
        );
        for pair in trends.top_merchants.windows(2) {
            assert!(pair[0].total_minor_units >= pair[1].total_minor_units);
        }
    }

    #[test]
    fn identical_inputs_serialize_identically() {
        let rows = vec![
            record(1_250, Some("Meals"), on("2026-03-04"), Some("Cafe")),
            record(9_900, Some("Software"), on("2026-04-02"), Some("Hosting Co")),
            record(1_250, Some("Meals"), on("2026-04-03"), Some("Bistro")),
        ];

        let first = serde_json::to_string(&compute_spend_trends(&rows, 3, now()));
        let second = serde_json::to_string(&compute_spend_trends(&rows, 3, now()));
        assert!(first.is_ok());
        assert!(second.is_ok());
        if let (Ok(left), Ok(right)) = (first, second) {
            assert_eq!(left, right);
        }
    }

    #[test]
    fn same_day_software_and_travel_scenario() {
        let today = now();
        let rows = vec![
            record(1_000, Some("Software"), today, Some("Editor Inc")),
            record(2_000, Some("Software"), today, Some("Cloud Ltd")),
            record(3_000, Some("Travel"), today, Some("Airline")),
        ];

        let trends = compute_spend_trends(&rows, 1, today);
        assert_eq!(trends.total_in_window_minor_units, 6_000);
        assert_eq!(trends.by_category.len(), 2);
        // Equal totals keep first-encounter order.
        assert_eq!(trends.by_category[0].category, "Software");
        assert_eq!(trends.by_category[0].total_minor_units, 3_000);
        assert_eq!(trends.by_category[0].count, 2);
        assert_eq!(trends.by_category[0].pct_of_total, 50.0);
        assert_eq!(trends.by_category[1].category, "Travel");
        assert_eq!(trends.by_category[1].count, 1);
        assert_eq!(trends.by_category[1].pct_of_total, 50.0);
        assert_eq!(trends.month_over_month_pct, None);
        assert_eq!(
            trends.summary_text,
            "Total spend over the last 1 month: $60.00 across 3 transactions. \
             Top categories: Software ($30.00, 50.0%); Travel ($30.00, 50.0%)."
        );
    }

    #[test]
    fn input_records_are_left_untouched() {
        let rows = vec![record(100, Some(" "), on("2026-04-01"), Some(""))];
        let before = rows.clone();
        let _ = compute_spend_trends(&rows, 3, now());
        assert_eq!(rows, before);
    }
}
