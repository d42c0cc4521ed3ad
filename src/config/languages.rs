use crate::core::NamingScheme;
use crate::coverage::assertions::DEFAULT_ASSERTION_MARKER;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Source language of the mined repository.
///
/// The engine never branches on this value; it only selects the default
/// [`LanguageProfile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// JVM bytecode with dotted `package.Class.method` names
    #[default]
    #[serde(alias = "java")]
    Jvm,
    /// Python with `package.module:Class.method` names
    Python,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jvm => write!(f, "jvm"),
            Self::Python => write!(f, "python"),
        }
    }
}

/// Naming and test conventions of one language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageProfile {
    pub naming: NamingScheme,
    /// Regular expressions matched against the enclosing class/module FQN
    pub test_patterns: Vec<String>,
    /// Substring identifying assertion calls
    pub assertion_marker: String,
}

impl LanguageProfile {
    pub fn for_language(language: Language) -> Self {
        match language {
            Language::Jvm => Self::jvm(),
            Language::Python => Self::python(),
        }
    }

    pub fn jvm() -> Self {
        Self {
            naming: NamingScheme::jvm(),
            test_patterns: vec![
                r"(^|\.)Test\w*$".to_string(),
                r"\w(Test|Tests|TestCase)$".to_string(),
            ],
            assertion_marker: default_assertion_marker(),
        }
    }

    pub fn python() -> Self {
        Self {
            naming: NamingScheme::python(),
            test_patterns: vec![
                r"(^|\.)tests?(\.|$)".to_string(),
                r"(^|\.)test_\w*$".to_string(),
                r"\w_tests?$".to_string(),
            ],
            assertion_marker: default_assertion_marker(),
        }
    }
}

pub fn default_assertion_marker() -> String {
    DEFAULT_ASSERTION_MARKER.to_string()
}
