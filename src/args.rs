use std::num::NonZeroUsize;

use clap::Parser;

use crate::error::ValidationError;

/// Observation queue capacity used when neither the CLI nor a config file
/// sets one.
pub const DEFAULT_QUEUE_CAPACITY: usize = 10_000;

#[derive(Parser, Debug)]
#[command(
    name = "cookielens",
    version,
    about = "Cookie analytics for captured HTTP traffic"
)]
pub struct AnalyzerArgs {
    /// JSON-lines exchange file to replay, or '-' for stdin.
    #[arg(value_name = "INPUT", default_value = "-")]
    pub input: String,

    /// Print an intermediate report every N replayed exchanges.
    #[arg(long, value_name = "N")]
    pub report_every: Option<PositiveUsize>,

    /// Observation queue capacity; submissions beyond it are dropped.
    #[arg(long, value_name = "N")]
    pub queue_capacity: Option<PositiveUsize>,

    /// Config file path (.toml or .json).
    #[arg(short, long, env = "COOKIELENS_CONFIG")]
    pub config: Option<String>,

    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable ANSI colors in log output.
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositiveUsize(NonZeroUsize);

impl PositiveUsize {
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl TryFrom<usize> for PositiveUsize {
    type Error = ValidationError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        NonZeroUsize::new(value)
            .map(PositiveUsize)
            .ok_or_else(|| ValidationError::ValueTooSmall { min: 1 })
    }
}

impl std::str::FromStr for PositiveUsize {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: usize = s
            .parse()
            .map_err(|err| ValidationError::InvalidNumber { source: err })?;
        PositiveUsize::try_from(value)
    }
}

impl From<PositiveUsize> for usize {
    fn from(value: PositiveUsize) -> Self {
        value.get()
    }
}
