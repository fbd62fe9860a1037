use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::args::AnalyzerArgs;

/// Install the global subscriber. Logs go to stderr so stdout stays clean
/// for report output.
pub(crate) fn init_logging(args: &AnalyzerArgs) {
    let default_level = if args.verbose { "debug" } else { "info" };

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter(default_level))
        .with_ansi(!args.no_color)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set global default subscriber: {}", err);
    }
}

fn env_filter(default_level: &str) -> EnvFilter {
    std::env::var("COOKIELENS_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map_or_else(
            |_| EnvFilter::new(default_level),
            |value| EnvFilter::try_new(value).unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
}
