//! Problem and configuration files.
//!
//! Problem files come in two layouts. The columnar layout carries shop
//! scalars, a `unit_count` and one array per furnace field, as service
//! clients send it. The structured layout carries a `shop` table and a
//! `units` list. The layout is detected from the presence of `unit_count`;
//! the format from the file extension.

use std::path::{Path, PathBuf};

use gasflow::{AllocationConfig, ConfigError, ParameterArrays, ProblemInstance, ValidationError};
use thiserror::Error;

/// Failure to turn a file into a validated problem or a configuration.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unsupported file extension for {0} (expected .json, .toml, .yaml or .yml)")]
    UnknownFormat(PathBuf),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid problem: {0}")]
    Validation(#[from] ValidationError),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
    Yaml,
}

fn format_of(path: &Path) -> Result<Format, InputError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        Some("yaml") | Some("yml") => Ok(Format::Yaml),
        _ => Err(InputError::UnknownFormat(path.to_path_buf())),
    }
}

fn read(path: &Path) -> Result<String, InputError> {
    std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses a problem document in `format`, in either layout, without
/// validating values.
fn parse_problem(contents: &str, format: Format) -> Result<ProblemInstance, InputError> {
    let problem = match format {
        Format::Json => {
            let value: serde_json::Value = serde_json::from_str(contents)?;
            if value.get("unit_count").is_some() {
                serde_json::from_value::<ParameterArrays>(value)?.into_instance()?
            } else {
                serde_json::from_value(value)?
            }
        }
        Format::Toml => {
            let table: toml::Table = toml::from_str(contents)?;
            if table.contains_key("unit_count") {
                toml::Value::Table(table)
                    .try_into::<ParameterArrays>()?
                    .into_instance()?
            } else {
                toml::Value::Table(table).try_into()?
            }
        }
        Format::Yaml => {
            let value: serde_yaml::Value = serde_yaml::from_str(contents)?;
            if value.get("unit_count").is_some() {
                serde_yaml::from_value::<ParameterArrays>(value)?.into_instance()?
            } else {
                serde_yaml::from_value(value)?
            }
        }
    };
    Ok(problem)
}

/// Reads and validates the problem at `path`.
pub fn load_problem(path: &Path) -> Result<ProblemInstance, InputError> {
    let format = format_of(path)?;
    let problem = parse_problem(&read(path)?, format)?;
    problem.validate()?;
    Ok(problem)
}

/// Reads the configuration at `path`, or the default search when `None`.
///
/// Without an explicit path, `gasflow.toml` in the working directory is used
/// if it parses; otherwise the defaults apply.
pub fn load_config(path: Option<&Path>) -> Result<AllocationConfig, InputError> {
    let Some(path) = path else {
        return Ok(AllocationConfig::load(gasflow::CONFIG_FILE).unwrap_or_default());
    };
    let config = match format_of(path)? {
        Format::Toml => AllocationConfig::from_toml_file(path)?,
        Format::Yaml => AllocationConfig::from_yaml_file(path)?,
        Format::Json => return Err(InputError::UnknownFormat(path.to_path_buf())),
    };
    Ok(config)
}
