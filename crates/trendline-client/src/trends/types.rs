use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    pub amount_minor_units: i64,
    pub category: Option<String>,
    pub occurred_at: NaiveDateTime,
    pub merchant_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendTrends {
    pub summary_text: String,
    pub total_in_window_minor_units: i64,
    pub by_category: Vec<CategoryTotal>,
    pub by_month: Vec<MonthBucket>,
    pub month_over_month_pct: Option<f64>,
    pub top_merchants: Vec<MerchantTotal>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total_minor_units: i64,
    pub count: u64,
    pub pct_of_total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthBucket {
    pub month_key: String,
    pub total_minor_units: i64,
    pub count: u64,
    pub by_category: Vec<CategoryTotal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MerchantTotal {
    pub name: String,
    pub total_minor_units: i64,
    pub count: u64,
}
