use std::collections::BTreeMap;

use super::bucketize::{Bucket, histogram_buckets};
use super::histogram::ValueHistogram;
use super::store::CookieStore;

/// Visual width of a full histogram bar, in characters.
const BAR_WIDTH: u64 = 40;
const BAR_CHAR: &str = "■";
const NAME_HEADER: &str = "NAME";

/// Render the full report: per-key tables for both sides, client-side-only
/// keys, and the two exchange-wide distributions.
#[must_use]
pub fn render_report(store: &CookieStore) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("Cookies from http requests:".to_owned());
    lines.extend(series_table_lines(store.request_series()));
    lines.push(String::new());

    lines.push("Cookies from http responses:".to_owned());
    lines.extend(series_table_lines(store.response_series()));
    lines.push(String::new());

    lines.push(
        "Cookies likely set from frontend/client-side (seen in requests, missing in responses):"
            .to_owned(),
    );
    lines.extend(client_side_lines(store));
    lines.push(String::new());

    lines.push("Cookie count per exchange:".to_owned());
    lines.extend(summary_lines(store.exchange_count()));
    lines.extend(distribution_lines("count", store.exchange_count()));
    lines.push(String::new());

    lines.push("Cookie size per exchange:".to_owned());
    lines.extend(summary_lines(store.exchange_size()));
    lines.extend(distribution_lines("size", store.exchange_size()));

    lines.join("\n")
}

/// One row per canonical key, in key order. Empty series render nothing
/// under their heading.
fn series_table_lines(series: &BTreeMap<String, ValueHistogram>) -> Vec<String> {
    if series.is_empty() {
        return Vec::new();
    }

    let name_width = series
        .keys()
        .map(String::len)
        .max()
        .unwrap_or(0)
        .max(NAME_HEADER.len());

    let mut lines = Vec::with_capacity(series.len().saturating_add(1));
    lines.push(format!(
        "{:<name_width$}  {:>10}  {:>10}  {:>8}  {:>8}  {:>8}",
        NAME_HEADER, "AVGSIZE", "STDDEV", "MIN", "MAX", "TOTAL"
    ));
    for (name, histogram) in series {
        lines.push(format!(
            "{:<name_width$}  {:>10.2}  {:>10.2}  {:>8}  {:>8}  {:>8}",
            name,
            histogram.mean(),
            histogram.stdev(),
            histogram.min(),
            histogram.max(),
            histogram.total_count()
        ));
    }
    lines
}

fn client_side_lines(store: &CookieStore) -> Vec<String> {
    // With no response-side series yet, every request cookie would be
    // flagged; suppress the table until both sides have data.
    if store.request_series().is_empty() || store.response_series().is_empty() {
        return Vec::new();
    }
    store
        .client_side_only()
        .iter()
        .map(|name| format!("  {}", name))
        .collect()
}

fn summary_lines(histogram: &ValueHistogram) -> Vec<String> {
    if histogram.total_count() == 0 {
        return Vec::new();
    }
    vec![
        format!(
            "{:>10}  {:>10}  {:>8}  {:>8}  {:>8}",
            "AVG", "STDDEV", "MIN", "MAX", "TOTAL"
        ),
        format!(
            "{:>10.2}  {:>10.2}  {:>8}  {:>8}  {:>8}",
            histogram.mean(),
            histogram.stdev(),
            histogram.min(),
            histogram.max(),
            histogram.total_count()
        ),
    ]
}

fn distribution_lines(label: &str, histogram: &ValueHistogram) -> Vec<String> {
    let bars = histogram.bars();
    let buckets = histogram_buckets(&bars, histogram.min(), histogram.max());
    if buckets.is_empty() {
        return Vec::new();
    }

    let mut lines = Vec::with_capacity(buckets.len().saturating_add(2));
    lines.push(String::new());
    lines.push(format!("Histogram of \"{}\" distribution:", label));
    lines.extend(histogram_lines(&buckets));
    lines
}

/// One line per bucket: mark, count, and a proportional bar scaled so the
/// largest count fills the fixed width (half-up integer rounding).
pub(crate) fn histogram_lines(buckets: &[Bucket]) -> Vec<String> {
    let max_count = buckets.iter().map(|bucket| bucket.count).max().unwrap_or(0);
    buckets
        .iter()
        .map(|bucket| {
            let scaled = bucket
                .count
                .saturating_mul(BAR_WIDTH)
                .saturating_add(max_count / 2);
            let bar_len = scaled.checked_div(max_count).unwrap_or(0);
            let bar = BAR_CHAR.repeat(usize::try_from(bar_len).unwrap_or(0));
            format!("{:>10} [{:>10}]\t|{}", bucket.mark, bucket.count, bar)
        })
        .collect()
}
