use serde_json::Value;
use trendline_client::ClientError;

/// Row issues beyond this many are summarized in a single line.
const MAX_LISTED_ISSUES: usize = 10;

pub fn render_error(error: &ClientError) -> String {
    let mut lines = vec![
        "Something went wrong, but it's easy to fix.".to_string(),
        String::new(),
        format!("  Error:    {}", error.code),
        format!("  Details:  {}", error.message),
    ];

    let issues = issue_lines(error.data.as_ref());
    if !issues.is_empty() {
        lines.push(String::new());
        lines.push("Row issues:".to_string());
        lines.extend(issues);
    }

    lines.push(String::new());
    lines.push("What to do next:".to_string());
    if error.recovery_steps.is_empty() {
        lines.push("  1. Retry the command.".to_string());
    } else {
        for (index, step) in error.recovery_steps.iter().enumerate() {
            lines.push(format!("  {}. {step}", index + 1));
        }
    }

    lines.join("\n")
}

fn issue_lines(data: Option<&Value>) -> Vec<String> {
    let issues = data
        .and_then(|value| value.get("issues"))
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    let mut lines = issues
        .iter()
        .take(MAX_LISTED_ISSUES)
        .map(|issue| {
            let row = issue.get("row").and_then(Value::as_i64).unwrap_or(0);
            let field = issue.get("field").and_then(Value::as_str).unwrap_or("-");
            let description = issue
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or("");
            match issue.get("received").and_then(Value::as_str) {
                Some(received) => {
                    format!("  row {row}, {field}: {description} (got `{received}`)")
                }
                None => format!("  row {row}, {field}: {description}"),
            }
        })
        .collect::<Vec<String>>();

    if issues.len() > MAX_LISTED_ISSUES {
        lines.push(format!(
            "  ...and {} more (rerun with --json for the full list)",
            issues.len() - MAX_LISTED_ISSUES
        ));
    }
    lines
}
