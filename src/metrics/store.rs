use std::collections::BTreeMap;

use crate::error::MetricsError;

use super::histogram::{COUNT_RANGE, SIZE_RANGE, ValueHistogram};
use super::normalize::normalize_cookie_name;
use super::types::{Cookie, Observation};

/// All aggregate state, owned exclusively by the aggregation task.
///
/// Single writer: nothing else ever touches a store, so the series need no
/// synchronization.
#[derive(Debug)]
pub struct CookieStore {
    request: BTreeMap<String, ValueHistogram>,
    response: BTreeMap<String, ValueHistogram>,
    exchange_count: ValueHistogram,
    exchange_size: ValueHistogram,
}

impl CookieStore {
    /// # Errors
    ///
    /// Returns an error if the exchange-wide histograms cannot be created.
    pub fn new() -> Result<Self, MetricsError> {
        Ok(Self {
            request: BTreeMap::new(),
            response: BTreeMap::new(),
            exchange_count: ValueHistogram::new(COUNT_RANGE)?,
            exchange_size: ValueHistogram::new(SIZE_RANGE)?,
        })
    }

    /// Fold one exchange into the per-key and exchange-wide series.
    pub fn record(&mut self, observation: &Observation) {
        record_side(&mut self.request, &observation.request);
        record_side(&mut self.response, &observation.response);

        if observation.is_empty() {
            return;
        }
        self.exchange_count.record(observation.cookie_count());
        self.exchange_size.record(observation.cookie_bytes());
    }

    /// Canonical keys seen on requests but never on responses — cookies
    /// most likely set by frontend code rather than Set-Cookie headers.
    ///
    /// Recomputed from the live series on every call.
    #[must_use]
    pub fn client_side_only(&self) -> Vec<&str> {
        self.request
            .keys()
            .filter(|key| !self.response.contains_key(*key))
            .map(String::as_str)
            .collect()
    }

    #[must_use]
    pub const fn request_series(&self) -> &BTreeMap<String, ValueHistogram> {
        &self.request
    }

    #[must_use]
    pub const fn response_series(&self) -> &BTreeMap<String, ValueHistogram> {
        &self.response
    }

    #[must_use]
    pub const fn exchange_count(&self) -> &ValueHistogram {
        &self.exchange_count
    }

    #[must_use]
    pub const fn exchange_size(&self) -> &ValueHistogram {
        &self.exchange_size
    }
}

fn record_side(series: &mut BTreeMap<String, ValueHistogram>, cookies: &[Cookie]) {
    for cookie in cookies {
        let key = normalize_cookie_name(&cookie.name);
        if !series.contains_key(&key) {
            match ValueHistogram::new(SIZE_RANGE) {
                Ok(histogram) => {
                    series.insert(key.clone(), histogram);
                }
                Err(err) => {
                    tracing::warn!("Skipping series '{}': {}", key, err);
                    continue;
                }
            }
        }
        if let Some(histogram) = series.get_mut(&key) {
            histogram.record(cookie.value_len());
        }
    }
}
