pub const UNCATEGORIZED: &str = "Uncategorized";
pub const UNKNOWN_MERCHANT: &str = "Unknown";

/// Grouping key for a record's category. Shared by the window-level and the
/// per-month category rollups so both treat blank labels the same way.
pub fn category_key(category: Option<&str>) -> &str {
    non_blank(category).unwrap_or(UNCATEGORIZED)
}

pub fn merchant_key(merchant_name: Option<&str>) -> &str {
    non_blank(merchant_name).unwrap_or(UNKNOWN_MERCHANT)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|label| !label.trim().is_empty())
}
