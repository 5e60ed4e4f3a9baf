//! Spend trend aggregation: windowed totals, category and month rollups,
//! month-over-month change and top merchants over a flat record list.

pub mod aggregate;
pub mod labels;
pub mod money;
pub mod summary;
pub mod tool;
pub mod types;
pub mod window;

pub use aggregate::{DEFAULT_WINDOW_MONTHS, TOP_MERCHANT_LIMIT, compute_spend_trends};
pub use tool::{DEFAULT_TOOL_TOP_N, SpendTrendsToolPayload, render_tool_text, tool_payload};
pub use types::{CategoryTotal, MerchantTotal, MonthBucket, SpendTrends, TransactionRecord};
