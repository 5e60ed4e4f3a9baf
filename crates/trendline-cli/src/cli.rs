use chrono::{DateTime, NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NowArg(pub String);

impl NowArg {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub fn parse_now(value: &str) -> Result<NowArg, String> {
    let trimmed = value.trim();
    let valid = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").is_ok()
        || NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S").is_ok()
        || NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
        || DateTime::parse_from_rfc3339(trimmed).is_ok();
    if !valid {
        return Err(
            "now must use YYYY-MM-DD, YYYY-MM-DDTHH:MM:SS or RFC 3339 with valid calendar values"
                .to_string(),
        );
    }

    Ok(NowArg(trimmed.to_string()))
}

/// Extended help shown after `trendline trends --help`.
/// Describes the accepted record formats and field rules.
pub const RECORDS_AFTER_HELP: &str = "\
How trends works:
  Trendline reads a normalized list of spending records and summarizes the
  most recent window of calendar months: totals by category, by month, the
  month-over-month change and the top merchants.

  Accepted formats:
    JSON: one top-level array of record objects
    CSV:  one header row with record field names

  <path> is a local file path.
  To read stdin explicitly, use `-` as the path.
  Example: cat records.csv | trendline trends -
  Newline-delimited JSON is not accepted; wrap the rows in one array.

Record fields:
  JSON example (one top-level array):
  [
    {
      \"occurred_at\": \"2026-01-15\",
      \"amount_minor_units\": 4215,
      \"category\": \"Groceries\",
      \"merchant_name\": \"Whole Foods\"
    }
  ]

  CSV example (header + rows):
  occurred_at,amount,category,merchant_name
  2026-01-15,42.15,Groceries,Whole Foods
  2026-01-16T09:30:00,-42.15,Groceries,Whole Foods

Field rules:
  occurred_at (required):
    `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS` or RFC 3339.
    Offsets are not converted; the written wall-clock time is bucketed.

  amount_minor_units | amount (exactly one per row):
    amount_minor_units is a whole number of cents.
    amount is a decimal in major units with at most 2 decimal places.
    Positive = spend. Negative values (refunds) reduce totals.

  category (optional):
    Missing or blank values are grouped as `Uncategorized`.

  merchant_name (optional):
    Missing or blank values are grouped as `Unknown`.

Window:
  --window-months N keeps records on or after `now` minus N calendar months.
  The default comes from `config.json` in $TRENDLINE_HOME (or ~/.trendline),
  falling back to 3.
";

#[derive(Debug, Parser)]
#[command(
    name = "trendline",
    version,
    about = "spend trend aggregation for transaction histories",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Summarize spending over a trailing window of calendar months
    #[command(after_long_help = RECORDS_AFTER_HELP)]
    Trends {
        /// Path to a JSON or CSV records file (use `-` for stdin)
        path: Option<String>,
        /// Number of calendar months to include, counting back from now
        #[arg(long, allow_negative_numbers = true)]
        window_months: Option<i64>,
        /// Reference time for the window (defaults to the local clock)
        #[arg(long, value_parser = parse_now)]
        now: Option<NowArg>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Produce compact payloads for agent tool calls
    #[command(arg_required_else_help = true)]
    Tool {
        #[command(subcommand)]
        command: ToolCommand,
    },
    /// Preview trends using bundled sample data
    #[command(arg_required_else_help = true)]
    Demo {
        #[command(subcommand)]
        command: DemoCommand,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ToolCommand {
    /// Spend trends trimmed to the top entries of every list
    #[command(after_long_help = RECORDS_AFTER_HELP)]
    SpendTrends {
        /// Path to a JSON or CSV records file (use `-` for stdin)
        path: Option<String>,
        /// Number of calendar months to include, counting back from now
        #[arg(long, allow_negative_numbers = true)]
        window_months: Option<i64>,
        /// Entries kept per list (defaults to config, then 5)
        #[arg(long, allow_negative_numbers = true)]
        top: Option<i64>,
        /// Reference time for the window (defaults to the local clock)
        #[arg(long, value_parser = parse_now)]
        now: Option<NowArg>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum DemoCommand {
    /// Summarize a bundled sample history against a fixed clock
    Trends {
        /// Number of calendar months to include
        #[arg(long, allow_negative_numbers = true)]
        window_months: Option<i64>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}
