use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

const LOG_ENV_VAR: &str = "TRENDLINE_LOG";
const DEFAULT_DIRECTIVE: &str = "warn";

/// Installs a stderr subscriber so stdout stays reserved for command output.
/// `TRENDLINE_LOG` takes `EnvFilter` directives, e.g. `trendline_client=debug`.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    // A second init (tests) leaves the first subscriber in place.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();
}
