use serde::Deserialize;

use crate::args::PositiveUsize;

/// One cookie as extracted from an HTTP message by the capture layer.
#[derive(Debug, Clone, Deserialize)]
pub struct Cookie {
    pub name: String,
    pub value: String,
}

impl Cookie {
    #[must_use]
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_owned(),
            value: value.to_owned(),
        }
    }

    /// Byte length of the cookie value.
    #[must_use]
    pub fn value_len(&self) -> u64 {
        u64::try_from(self.value.len()).unwrap_or(u64::MAX)
    }
}

/// Cookies observed on one request/response exchange.
///
/// Handed to the pipeline once per captured exchange and consumed exactly
/// once by the aggregation task.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Observation {
    #[serde(default)]
    pub request: Vec<Cookie>,
    #[serde(default)]
    pub response: Vec<Cookie>,
}

impl Observation {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.request.is_empty() && self.response.is_empty()
    }

    /// Cookies on the exchange, both sides.
    #[must_use]
    pub fn cookie_count(&self) -> u64 {
        let total = self.request.len().saturating_add(self.response.len());
        u64::try_from(total).unwrap_or(u64::MAX)
    }

    /// Summed byte length of every cookie value on the exchange.
    #[must_use]
    pub fn cookie_bytes(&self) -> u64 {
        self.request
            .iter()
            .chain(self.response.iter())
            .map(Cookie::value_len)
            .fold(0u64, u64::saturating_add)
    }
}

/// Tunables for the aggregation pipeline.
#[derive(Debug, Clone, Copy)]
pub struct AnalyticsSettings {
    /// Bounded observation queue size; submissions beyond it are shed.
    pub queue_capacity: PositiveUsize,
}
