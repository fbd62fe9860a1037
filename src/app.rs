use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

use crate::config::RunSettings;
use crate::error::AppResult;
use crate::metrics::{CookieAnalytics, Observation, render_report, setup_cookie_analytics};

/// Input argument sentinel for reading exchanges from stdin.
const STDIN_INPUT: &str = "-";

/// Replay captured exchanges into the pipeline, print the report, and shut
/// the pipeline down.
pub(crate) async fn run_replay(settings: &RunSettings) -> AppResult<()> {
    let analytics = setup_cookie_analytics(settings.analytics)?;

    let outcome = if settings.input == STDIN_INPUT {
        feed_exchanges(BufReader::new(tokio::io::stdin()), settings, &analytics).await
    } else {
        match tokio::fs::File::open(&settings.input).await {
            Ok(file) => feed_exchanges(BufReader::new(file), settings, &analytics).await,
            Err(err) => Err(err.into()),
        }
    };

    match outcome {
        Ok(stats) => {
            if stats.malformed_lines > 0 {
                tracing::warn!("Skipped {} malformed input lines.", stats.malformed_lines);
            }
            tracing::debug!("Replayed {} exchanges.", stats.exchanges);
            // Final report comes from the drained store returned at shutdown.
            let store = analytics.shutdown().await?;
            println!("{}", render_report(&store));
            Ok(())
        }
        Err(err) => {
            // Stop the worker before surfacing the replay error.
            drop(analytics.shutdown().await);
            Err(err)
        }
    }
}

struct ReplayStats {
    exchanges: u64,
    malformed_lines: u64,
}

async fn feed_exchanges<R>(
    reader: BufReader<R>,
    settings: &RunSettings,
    analytics: &CookieAnalytics,
) -> AppResult<ReplayStats>
where
    R: AsyncRead + Unpin,
{
    let mut stats = ReplayStats {
        exchanges: 0,
        malformed_lines: 0,
    };
    let report_interval = settings
        .report_every
        .map(|every| u64::try_from(every.get()).unwrap_or(u64::MAX));

    let mut lines = reader.lines();
    let mut line_number = 0u64;
    while let Some(line) = lines.next_line().await? {
        line_number = line_number.saturating_add(1);
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let observation: Observation = match serde_json::from_str(trimmed) {
            Ok(observation) => observation,
            Err(err) => {
                stats.malformed_lines = stats.malformed_lines.saturating_add(1);
                tracing::warn!("Skipping malformed exchange on line {}: {}", line_number, err);
                continue;
            }
        };
        if observation.is_empty() {
            continue;
        }

        analytics.feed(observation).await?;
        stats.exchanges = stats.exchanges.saturating_add(1);

        if let Some(interval) = report_interval
            && stats.exchanges.checked_rem(interval).unwrap_or(1) == 0
        {
            let report = analytics.report().await?;
            println!("{}", report);
        }
    }

    Ok(stats)
}
