use serde::{Deserialize, Serialize};

use super::languages::{Language, LanguageProfile};
use crate::collection::CollectorKind;
use crate::core::{Granularity, NamingScheme, TestRule, UnitFactory};
use crate::coverage::{ClassAggregation, DependencySettings};
use crate::errors::{CovmineError, Result};

/// Root configuration structure for covmine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Language of the mined project
    #[serde(default)]
    pub language: Language,

    /// Emit method-level results
    #[serde(default = "default_true")]
    pub method_level: bool,

    /// Emit class/module-level results
    #[serde(default = "default_true")]
    pub class_level: bool,

    /// Metric-name prefixes
    #[serde(default)]
    pub prefixes: MetricPrefixes,

    /// Override of the language's assertion marker
    #[serde(default)]
    pub assertion_marker: Option<String>,

    /// Override of the language's test patterns
    #[serde(default)]
    pub test_patterns: Option<Vec<String>>,

    /// Override of the language's naming scheme
    #[serde(default)]
    pub naming: Option<NamingScheme>,

    /// Dependency-coverage settings
    #[serde(default)]
    pub dependency: DependencySettings,

    /// Class-level combination of call-graph coverage
    #[serde(default)]
    pub class_aggregation: ClassAggregation,

    /// Collectors to run; all collectors are run when absent
    #[serde(default)]
    pub collectors: Option<Vec<CollectorKind>>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            language: Language::default(),
            method_level: true,
            class_level: true,
            prefixes: MetricPrefixes::default(),
            assertion_marker: None,
            test_patterns: None,
            naming: None,
            dependency: DependencySettings::default(),
            class_aggregation: ClassAggregation::default(),
            collectors: None,
        }
    }
}

impl MetricsConfig {
    pub fn for_language(language: Language) -> Self {
        Self {
            language,
            ..Self::default()
        }
    }

    /// Language defaults with the configured overrides applied
    pub fn profile(&self) -> LanguageProfile {
        let mut profile = LanguageProfile::for_language(self.language);
        if let Some(marker) = &self.assertion_marker {
            profile.assertion_marker = marker.clone();
        }
        if let Some(patterns) = &self.test_patterns {
            profile.test_patterns = patterns.clone();
        }
        if let Some(naming) = self.naming {
            profile.naming = naming;
        }
        profile
    }

    pub fn test_rule(&self) -> Result<TestRule> {
        TestRule::from_patterns(&self.profile().test_patterns)
    }

    pub fn unit_factory(&self) -> UnitFactory {
        UnitFactory::new(self.profile().naming)
    }

    /// Granularities enabled by this configuration
    pub fn granularities(&self) -> Vec<Granularity> {
        let mut levels = Vec::new();
        if self.method_level {
            levels.push(Granularity::Method);
        }
        if self.class_level {
            levels.push(Granularity::Class);
        }
        levels
    }

    pub fn validate(&self) -> Result<()> {
        if !self.method_level && !self.class_level {
            return Err(CovmineError::config(
                "at least one of method_level and class_level must be enabled",
                None,
            ));
        }
        if self.prefixes.call.is_empty() || self.prefixes.coverage.is_empty() {
            return Err(CovmineError::config("metric prefixes must not be empty", None));
        }
        if self.profile().assertion_marker.is_empty() {
            return Err(CovmineError::config("assertion_marker must not be empty", None));
        }
        if self.profile().test_patterns.is_empty() {
            return Err(CovmineError::config("at least one test pattern is required", None));
        }
        self.test_rule().map(|_| ())
    }
}

/// Prefixes of the `<prefix>_tcov` and `<prefix>_tcov_met` metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricPrefixes {
    /// Call-graph coverage prefix
    #[serde(default = "default_call_prefix")]
    pub call: String,

    /// Direct coverage prefix
    #[serde(default = "default_coverage_prefix")]
    pub coverage: String,
}

impl Default for MetricPrefixes {
    fn default() -> Self {
        Self {
            call: default_call_prefix(),
            coverage: default_coverage_prefix(),
        }
    }
}

pub fn default_true() -> bool {
    true
}

pub fn default_call_prefix() -> String {
    "call".to_string()
}

pub fn default_coverage_prefix() -> String {
    "cov".to_string()
}
