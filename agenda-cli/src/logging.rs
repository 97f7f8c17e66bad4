use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `AGENDA_LOG=agenda_core=debug`.
const LOG_ENV: &str = "AGENDA_LOG";

/// Install the stderr subscriber. `--verbose` wins over the environment.
pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
