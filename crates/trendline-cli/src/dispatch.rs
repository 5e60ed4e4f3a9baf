use trendline_client::commands;
use trendline_client::{ClientResult, SuccessEnvelope};

use crate::cli::{Cli, Commands, DemoCommand, NowArg, ToolCommand};

pub fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    match &cli.command {
        Commands::Trends {
            path,
            window_months,
            now,
            ..
        } => commands::trends::run(path.clone(), *window_months, now_str(now)),
        Commands::Tool { command } => match command {
            ToolCommand::SpendTrends {
                path,
                window_months,
                top,
                now,
                ..
            } => commands::tool::spend_trends(path.clone(), *window_months, *top, now_str(now)),
        },
        Commands::Demo { command } => match command {
            DemoCommand::Trends { window_months, .. } => commands::demo::run(*window_months),
        },
    }
}

fn now_str(now: &Option<NowArg>) -> Option<&str> {
    now.as_ref().map(NowArg::as_str)
}

#[cfg(test)]
mod tests {
    use crate::cli::parse_from;

    use super::dispatch;

    #[test]
    fn demo_dispatches_to_demo_command() {
        let parsed = parse_from(["trendline", "demo", "trends"]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            let response = dispatch(&cli);
            assert!(response.is_ok());
            if let Ok(success) = response {
                assert_eq!(success.command, "demo");
            }
        }
    }

    #[test]
    fn missing_records_file_is_a_user_error() {
        let parsed = parse_from([
            "trendline",
            "trends",
            "/tmp/trendline-definitely-missing/records.json",
            "--now",
            "2026-04-15",
        ]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            let response = dispatch(&cli);
            assert!(response.is_err());
            if let Err(error) = response {
                assert_eq!(error.code, "invalid_argument");
            }
        }
    }
}
