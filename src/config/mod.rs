//! Configuration loading and settings resolution.
mod types;

#[cfg(test)]
mod tests;

pub use types::ConfigFile;

use std::path::{Path, PathBuf};

use crate::args::{AnalyzerArgs, DEFAULT_QUEUE_CAPACITY, PositiveUsize};
use crate::error::{AppError, AppResult, ConfigError};
use crate::metrics::AnalyticsSettings;

/// Config filenames probed in the working directory when `--config` is not
/// given.
const DEFAULT_CONFIG_FILES: [&str; 2] = ["cookielens.toml", "cookielens.json"];

/// Fully resolved settings for one replay run.
#[derive(Debug)]
pub struct RunSettings {
    pub input: String,
    pub report_every: Option<PositiveUsize>,
    pub analytics: AnalyticsSettings,
}

/// Resolve CLI arguments and the optional config file into run settings.
///
/// # Errors
///
/// Returns an error when the config file cannot be read or parsed, or when
/// a config value fails validation.
pub fn resolve_settings(args: &AnalyzerArgs) -> AppResult<RunSettings> {
    let file = load_config(args.config.as_deref())?.unwrap_or_default();

    let queue_capacity = match args.queue_capacity {
        Some(value) => value,
        None => positive_field(
            "queue_capacity",
            file.queue_capacity.unwrap_or(DEFAULT_QUEUE_CAPACITY),
        )?,
    };

    let report_every = match args.report_every {
        Some(value) => Some(value),
        None => file
            .report_every
            .map(|raw| positive_field("report_every", raw))
            .transpose()?,
    };

    Ok(RunSettings {
        input: args.input.clone(),
        report_every,
        analytics: AnalyticsSettings { queue_capacity },
    })
}

/// Load a configuration file from the provided path or default locations.
///
/// # Errors
///
/// Returns an error when the config file cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> AppResult<Option<ConfigFile>> {
    if let Some(path) = path {
        return Ok(Some(load_config_file(Path::new(path))?));
    }

    for name in DEFAULT_CONFIG_FILES {
        let candidate = PathBuf::from(name);
        if candidate.exists() {
            return Ok(Some(load_config_file(&candidate)?));
        }
    }

    Ok(None)
}

pub(crate) fn load_config_file(path: &Path) -> AppResult<ConfigFile> {
    let content = std::fs::read_to_string(path).map_err(|err| {
        AppError::config(ConfigError::ReadConfig {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&content).map_err(|err| {
            AppError::config(ConfigError::ParseToml {
                path: path.to_path_buf(),
                source: err,
            })
        }),
        Some("json") => serde_json::from_str(&content).map_err(|err| {
            AppError::config(ConfigError::ParseJson {
                path: path.to_path_buf(),
                source: err,
            })
        }),
        Some(ext) => Err(AppError::config(ConfigError::UnsupportedExtension {
            ext: ext.to_owned(),
        })),
        None => Err(AppError::config(ConfigError::MissingExtension)),
    }
}

fn positive_field(field: &'static str, raw: usize) -> AppResult<PositiveUsize> {
    PositiveUsize::try_from(raw).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive { field, source: err })
    })
}
