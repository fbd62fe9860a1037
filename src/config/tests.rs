use super::{load_config_file, resolve_settings};
use clap::Parser;
use tempfile::tempdir;

use crate::args::AnalyzerArgs;
use crate::error::{AppError, AppResult, ConfigError};

fn parse_args(argv: &[&str]) -> AppResult<AnalyzerArgs> {
    Ok(AnalyzerArgs::try_parse_from(argv)?)
}

#[test]
fn parse_toml_config() -> AppResult<()> {
    let dir = tempdir().map_err(|err| AppError::config(format!("tempdir failed: {}", err)))?;
    let path = dir.path().join("cookielens.toml");
    let content = "queue_capacity = 500\nreport_every = 100\n";
    std::fs::write(&path, content)
        .map_err(|err| AppError::config(format!("write failed: {}", err)))?;

    let config = load_config_file(&path)?;
    if config.queue_capacity != Some(500) {
        return Err(AppError::config("Unexpected queue_capacity"));
    }
    if config.report_every != Some(100) {
        return Err(AppError::config("Unexpected report_every"));
    }
    Ok(())
}

#[test]
fn parse_json_config() -> AppResult<()> {
    let dir = tempdir().map_err(|err| AppError::config(format!("tempdir failed: {}", err)))?;
    let path = dir.path().join("cookielens.json");
    let content = r#"{ "queue_capacity": 500 }"#;
    std::fs::write(&path, content)
        .map_err(|err| AppError::config(format!("write failed: {}", err)))?;

    let config = load_config_file(&path)?;
    if config.queue_capacity != Some(500) {
        return Err(AppError::config("Unexpected queue_capacity"));
    }
    if config.report_every.is_some() {
        return Err(AppError::config("Expected report_every unset"));
    }
    Ok(())
}

#[test]
fn reject_unsupported_extension() -> AppResult<()> {
    let dir = tempdir().map_err(|err| AppError::config(format!("tempdir failed: {}", err)))?;
    let path = dir.path().join("cookielens.yaml");
    std::fs::write(&path, "queue_capacity: 500\n")
        .map_err(|err| AppError::config(format!("write failed: {}", err)))?;

    match load_config_file(&path) {
        Err(AppError::Config(ConfigError::UnsupportedExtension { ext })) => {
            if ext == "yaml" {
                Ok(())
            } else {
                Err(AppError::config(format!("Unexpected extension: {}", ext)))
            }
        }
        Err(other) => Err(AppError::config(format!("Unexpected error: {}", other))),
        Ok(_config) => Err(AppError::config("Expected an extension error")),
    }
}

#[test]
fn cli_wins_over_config_file() -> AppResult<()> {
    let dir = tempdir().map_err(|err| AppError::config(format!("tempdir failed: {}", err)))?;
    let path = dir.path().join("cookielens.toml");
    std::fs::write(&path, "queue_capacity = 9\n")
        .map_err(|err| AppError::config(format!("write failed: {}", err)))?;
    let path_arg = path.to_string_lossy().into_owned();

    let cli_args = parse_args(&[
        "cookielens",
        "exchanges.jsonl",
        "--queue-capacity",
        "5",
        "--config",
        &path_arg,
    ])?;
    let cli_settings = resolve_settings(&cli_args)?;
    if cli_settings.analytics.queue_capacity.get() != 5 {
        return Err(AppError::config("Expected the CLI value to win"));
    }

    let file_args = parse_args(&["cookielens", "exchanges.jsonl", "--config", &path_arg])?;
    let file_settings = resolve_settings(&file_args)?;
    if file_settings.analytics.queue_capacity.get() != 9 {
        return Err(AppError::config("Expected the file value to apply"));
    }
    Ok(())
}

#[test]
fn defaults_apply_without_config() -> AppResult<()> {
    let dir = tempdir().map_err(|err| AppError::config(format!("tempdir failed: {}", err)))?;
    let path = dir.path().join("empty.toml");
    std::fs::write(&path, "")
        .map_err(|err| AppError::config(format!("write failed: {}", err)))?;
    let path_arg = path.to_string_lossy().into_owned();

    let args = parse_args(&["cookielens", "-", "--config", &path_arg])?;
    let settings = resolve_settings(&args)?;
    if settings.analytics.queue_capacity.get() != crate::args::DEFAULT_QUEUE_CAPACITY {
        return Err(AppError::config("Expected the default queue capacity"));
    }
    if settings.report_every.is_some() {
        return Err(AppError::config("Expected no report interval"));
    }
    if settings.input != "-" {
        return Err(AppError::config("Expected stdin input"));
    }
    Ok(())
}

#[test]
fn reject_zero_queue_capacity_from_config() -> AppResult<()> {
    let dir = tempdir().map_err(|err| AppError::config(format!("tempdir failed: {}", err)))?;
    let path = dir.path().join("cookielens.toml");
    std::fs::write(&path, "queue_capacity = 0\n")
        .map_err(|err| AppError::config(format!("write failed: {}", err)))?;
    let path_arg = path.to_string_lossy().into_owned();

    let args = parse_args(&["cookielens", "-", "--config", &path_arg])?;
    match resolve_settings(&args) {
        Err(AppError::Config(ConfigError::FieldMustBePositive { field, .. })) => {
            if field == "queue_capacity" {
                Ok(())
            } else {
                Err(AppError::config(format!("Unexpected field: {}", field)))
            }
        }
        Err(other) => Err(AppError::config(format!("Unexpected error: {}", other))),
        Ok(_settings) => Err(AppError::config("Expected a validation error")),
    }
}
