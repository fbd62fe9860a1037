use serde::Deserialize;

/// On-disk configuration. Every field is optional; CLI flags win over file
/// values, file values win over built-in defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub queue_capacity: Option<usize>,
    pub report_every: Option<usize>,
}
