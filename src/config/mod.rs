//! Configuration.
//!
//! Settings come from `.covmine.toml`, searched in the working directory and
//! up to nine of its ancestors. A missing or invalid file yields
//! [`MetricsConfig::default`], which targets JVM projects.

mod core;
mod languages;
mod loader;

pub use self::core::{
    default_call_prefix, default_coverage_prefix, default_true, MetricPrefixes, MetricsConfig,
};
pub use languages::{default_assertion_marker, Language, LanguageProfile};
pub use loader::{
    directory_ancestors, load_config, load_config_from, load_config_in, parse_config,
    CONFIG_FILE_NAME,
};
