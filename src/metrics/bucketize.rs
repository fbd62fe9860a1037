use super::histogram::Bar;

/// Number of uniform display intervals; marks = intervals + one terminal.
const DISPLAY_INTERVALS: u64 = 10;

/// One display-resolution interval: its lower boundary and the occurrences
/// attributed to it. Produced only while rendering, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    pub mark: u64,
    pub count: u64,
}

/// Remap a histogram's bars onto eleven uniformly spaced marks.
///
/// The terminal mark is pinned to `max` (integer steps truncate) and seeded
/// with the last bar's count, so the bucket holding the true maximum is
/// never dropped. Remaining bars are walked against the marks with a
/// two-cursor merge: a bar sitting exactly on the current mark counts
/// there; a bar starting at-or-before the mark folds into the previous
/// bucket to avoid double counting at overlaps; otherwise the mark cursor
/// advances. Attribution of partially overlapping bars is approximate —
/// the total is not guaranteed to be conserved in every topology.
///
/// No bars, or `max <= min`, yields no buckets; callers skip histogram
/// rendering entirely for such degenerate distributions.
#[must_use]
pub fn histogram_buckets(bars: &[Bar], min: u64, max: u64) -> Vec<Bucket> {
    let Some(last) = bars.last() else {
        return Vec::new();
    };
    if max <= min {
        return Vec::new();
    }

    let step = max.saturating_sub(min) / DISPLAY_INTERVALS;
    let mut marks: Vec<u64> = (0..DISPLAY_INTERVALS)
        .map(|index| min.saturating_add(step.saturating_mul(index)))
        .collect();
    marks.push(max);

    let mut counts = vec![0u64; marks.len()];
    if let Some(terminal) = counts.last_mut() {
        *terminal = last.count;
    }

    let mut bucket_index = 0usize;
    let mut remaining = bars
        .iter()
        .take(bars.len().saturating_sub(1))
        .peekable();
    while let Some(bar) = remaining.peek().map(|bar| **bar) {
        let Some(mark) = marks.get(bucket_index).copied() else {
            break;
        };
        if bar.from >= mark && bar.to <= mark {
            if let Some(slot) = counts.get_mut(bucket_index) {
                *slot = slot.saturating_add(bar.count);
            }
            remaining.next();
        } else if bar.from <= mark {
            let previous = bucket_index.saturating_sub(1);
            if let Some(slot) = counts.get_mut(previous) {
                *slot = slot.saturating_add(bar.count);
            }
            remaining.next();
        } else if bucket_index < marks.len().saturating_sub(1) {
            bucket_index = bucket_index.saturating_add(1);
        } else {
            break;
        }
    }

    marks
        .into_iter()
        .zip(counts)
        .map(|(mark, count)| Bucket { mark, count })
        .collect()
}
