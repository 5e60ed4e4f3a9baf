use serde::Serialize;

use crate::trends::{SpendTrends, SpendTrendsToolPayload};

#[derive(Debug, Clone, Serialize)]
pub struct TrendsData {
    pub window_months: u32,
    pub now: String,
    pub cutoff: String,
    pub source_used: String,
    pub records_read: i64,
    pub records_in_window: i64,
    pub trends: SpendTrends,
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolData {
    pub tool: String,
    pub window_months: u32,
    pub top_n: usize,
    pub now: String,
    pub payload: SpendTrendsToolPayload,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DemoData {
    pub topic: String,
    pub source: String,
    pub window_months: u32,
    pub now: String,
    pub cutoff: String,
    pub records_read: i64,
    pub records_in_window: i64,
    pub trends: SpendTrends,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordsSummary {
    pub rows_read: i64,
    pub rows_valid: i64,
    pub rows_invalid: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordIssue {
    pub row: i64,
    pub field: String,
    pub code: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<String>,
}
