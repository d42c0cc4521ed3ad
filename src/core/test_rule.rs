//! Test-node identification.
//!
//! Which units are tests is decided outside the engine, by configuration. A
//! [`TestRule`] is either a set of regular expressions matched against the
//! unit's enclosing class/module FQN, or an explicit list of FQNs handed over
//! by a front end that already knows its tests (e.g. from annotations).

use super::unit::Unit;
use crate::errors::Result;
use regex::Regex;
use std::collections::HashSet;

#[derive(Debug, Clone)]
enum Matcher {
    Patterns(Vec<Regex>),
    Listed(HashSet<String>),
}

#[derive(Debug, Clone)]
pub struct TestRule {
    matcher: Matcher,
}

impl TestRule {
    /// Compile a pattern-based rule. Fails on the first invalid pattern.
    pub fn from_patterns<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let compiled = patterns
            .into_iter()
            .map(|p| Regex::new(p.as_ref()))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            matcher: Matcher::Patterns(compiled),
        })
    }

    /// Rule that treats exactly the listed FQNs (and units enclosed by them) as tests.
    pub fn listed<I, S>(fqns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            matcher: Matcher::Listed(fqns.into_iter().map(Into::into).collect()),
        }
    }

    pub fn is_test(&self, unit: &Unit) -> bool {
        match &self.matcher {
            Matcher::Patterns(patterns) => {
                let target = unit.enclosing_fqn();
                patterns.iter().any(|p| p.is_match(target))
            }
            Matcher::Listed(fqns) => {
                fqns.contains(unit.fqn()) || fqns.contains(unit.enclosing_fqn())
            }
        }
    }

    pub fn is_production(&self, unit: &Unit) -> bool {
        !self.is_test(unit)
    }
}
