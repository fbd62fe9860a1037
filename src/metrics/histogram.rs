use hdrhistogram::Histogram;

use crate::error::MetricsError;

/// Tracked range for cookie value and exchange byte sizes (1 B..=4 MiB).
pub(crate) const SIZE_RANGE: (u64, u64) = (1, 4_194_304);
/// Tracked range for cookie counts per exchange.
pub(crate) const COUNT_RANGE: (u64, u64) = (1, 2_000);
/// Significant value digits tracked by every histogram.
const SIGNIFICANT_FIGURES: u8 = 3;

/// One recorded-value interval reported by a histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bar {
    pub from: u64,
    pub to: u64,
    pub count: u64,
}

/// Streaming histogram of recorded values.
///
/// Thin wrapper over `hdrhistogram` exposing exactly the surface the
/// aggregation pipeline needs; any streaming histogram with this contract
/// would substitute.
#[derive(Debug)]
pub struct ValueHistogram {
    hist: Histogram<u64>,
}

impl ValueHistogram {
    /// Create a histogram tracking `range.0..=range.1`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying histogram rejects the bounds.
    pub fn new(range: (u64, u64)) -> Result<Self, MetricsError> {
        let (low, high) = range;
        let hist = Histogram::<u64>::new_with_bounds(low, high, SIGNIFICANT_FIGURES).map_err(
            |err| MetricsError::Histogram {
                context: "create",
                source: Box::new(err),
            },
        )?;
        Ok(Self { hist })
    }

    /// Record one value, clamping it into the tracked range. Out-of-range
    /// input degrades precision at the edges instead of failing.
    pub fn record(&mut self, value: u64) {
        self.hist.saturating_record(value);
    }

    #[must_use]
    pub fn min(&self) -> u64 {
        self.hist.min()
    }

    #[must_use]
    pub fn max(&self) -> u64 {
        self.hist.max()
    }

    #[must_use]
    pub fn mean(&self) -> f64 {
        self.hist.mean()
    }

    #[must_use]
    pub fn stdev(&self) -> f64 {
        self.hist.stdev()
    }

    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.hist.len()
    }

    /// Recorded-value intervals in ascending order; steps with no
    /// occurrences are skipped.
    #[must_use]
    pub fn bars(&self) -> Vec<Bar> {
        self.hist
            .iter_recorded()
            .map(|step| Bar {
                from: self.hist.lowest_equivalent(step.value_iterated_to()),
                to: self.hist.highest_equivalent(step.value_iterated_to()),
                count: step.count_at_value(),
            })
            .collect()
    }
}
