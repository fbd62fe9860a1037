//! Cookie metrics aggregation: ingress gate, aggregation task, metric
//! store, bar-to-bucket remapping, and report rendering.
mod aggregator;
mod bucketize;
mod histogram;
mod normalize;
mod render;
mod store;
mod types;


pub use aggregator::{CookieAnalytics, setup_cookie_analytics};
pub use bucketize::{Bucket, histogram_buckets};
pub use histogram::{Bar, ValueHistogram};
pub use normalize::normalize_cookie_name;
pub use render::render_report;
pub use store::CookieStore;
pub use types::{AnalyticsSettings, Cookie, Observation};
