use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::MetricsConfig;
use crate::errors::{CovmineError, Result};

/// Name of the configuration file searched for in the working directory and its ancestors
pub const CONFIG_FILE_NAME: &str = ".covmine.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

pub(crate) fn read_config_file(path: &Path) -> std::result::Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse and validate config from a TOML string
pub fn parse_config(contents: &str) -> Result<MetricsConfig> {
    let config = toml::from_str::<MetricsConfig>(contents).map_err(|e| {
        CovmineError::config(format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e), None)
    })?;
    config.validate()?;
    Ok(config)
}

/// Load a config file that is known to exist; every failure is reported.
pub fn load_config_from(path: &Path) -> Result<MetricsConfig> {
    let contents = read_config_file(path)
        .map_err(|e| CovmineError::io("Failed to read config file", path, e))?;

    parse_config(&contents).map_err(|e| match e {
        CovmineError::Config { message, .. } => {
            CovmineError::config(message, Some(path.to_path_buf()))
        }
        other => other,
    })
}

pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<MetricsConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{} in {}. Using defaults.", e, config_path.display());
            None
        }
    }
}

/// Only log actual errors, not "file not found"
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// `start` followed by its ancestors, at most `max_depth` directories
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for `.covmine.toml`.
pub fn load_config_in(start: PathBuf) -> MetricsConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            MetricsConfig::default()
        })
}

pub fn load_config() -> MetricsConfig {
    match std::env::current_dir() {
        Ok(dir) => load_config_in(dir),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            MetricsConfig::default()
        }
    }
}
