//! Language-independent identity for code elements.
//!
//! A [`Unit`] is either a method (member of a class or module) or the class or
//! module itself. Both levels are identified by a fully-qualified name and an
//! optional file path. The enclosing class/module of a method is derived once,
//! when the unit is built, by the [`NamingScheme`] of the front end that
//! produced it; afterwards the engine only ever calls
//! [`Unit::enclosing_unit`] and never looks inside FQN strings.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Granularity level of a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// A method or function inside a class or module
    Method,
    /// A class (JVM) or module (Python)
    Class,
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Method => write!(f, "method"),
            Self::Class => write!(f, "class"),
        }
    }
}

/// Where a method FQN is cut to obtain its enclosing unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitPoint {
    /// Cut at the first separator (`pkg.mod:Class.method` -> `pkg.mod`)
    First,
    /// Cut at the last separator (`pkg.Class.method` -> `pkg.Class`)
    Last,
}

/// Pure projection from a method FQN to the FQN of its enclosing unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingScheme {
    pub separator: char,
    pub split: SplitPoint,
}

impl NamingScheme {
    /// `org.foo.Test1.test1` -> `org.foo.Test1`
    pub const fn jvm() -> Self {
        Self {
            separator: '.',
            split: SplitPoint::Last,
        }
    }

    /// `tests.test_module1:Module1Test.test` -> `tests.test_module1`
    pub const fn python() -> Self {
        Self {
            separator: ':',
            split: SplitPoint::First,
        }
    }

    /// Derive the enclosing unit FQN of a method FQN.
    ///
    /// A trailing parameter list (`m(java.lang.String)`) is ignored. An FQN
    /// without a separator (or with an empty head) encloses itself.
    pub fn enclosing_fqn<'a>(&self, fqn: &'a str) -> &'a str {
        let name = fqn.split_once('(').map_or(fqn, |(name, _)| name);
        let cut = match self.split {
            SplitPoint::First => name.split_once(self.separator),
            SplitPoint::Last => name.rsplit_once(self.separator),
        };

        cut.map(|(head, _)| head)
            .filter(|head| !head.is_empty())
            .unwrap_or(fqn)
    }
}

impl Default for NamingScheme {
    fn default() -> Self {
        Self::jvm()
    }
}

/// Immutable identity of a method or class/module.
///
/// Equality, ordering and hashing use `(fqn, file_path)` only, so two front
/// ends that produce the same FQN and path yield interchangeable units.
#[derive(Clone)]
pub struct Unit {
    fqn: Arc<str>,
    file: Option<Arc<Path>>,
    enclosing: Arc<str>,
    granularity: Granularity,
}

impl Unit {
    /// Build a method-level unit, deriving its enclosing unit with `scheme`.
    pub fn method(fqn: impl AsRef<str>, file: Option<PathBuf>, scheme: &NamingScheme) -> Self {
        let fqn = fqn.as_ref();
        let enclosing = scheme.enclosing_fqn(fqn);
        Self::with_enclosing(fqn, file, enclosing)
    }

    /// Build a method-level unit whose enclosing unit is already known.
    pub fn with_enclosing(
        fqn: impl AsRef<str>,
        file: Option<PathBuf>,
        enclosing: impl AsRef<str>,
    ) -> Self {
        Self {
            fqn: Arc::from(fqn.as_ref()),
            file: file.map(Arc::from),
            enclosing: Arc::from(enclosing.as_ref()),
            granularity: Granularity::Method,
        }
    }

    /// Build a class/module-level unit.
    pub fn class(fqn: impl AsRef<str>, file: Option<PathBuf>) -> Self {
        let fqn: Arc<str> = Arc::from(fqn.as_ref());
        Self {
            enclosing: Arc::clone(&fqn),
            fqn,
            file: file.map(Arc::from),
            granularity: Granularity::Class,
        }
    }

    pub fn fqn(&self) -> &str {
        &self.fqn
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// FQN of the enclosing class/module (the unit's own FQN at class level)
    pub fn enclosing_fqn(&self) -> &str {
        &self.enclosing
    }

    /// Project to the enclosing class/module. Idempotent for class-level units.
    pub fn enclosing_unit(&self) -> Unit {
        match self.granularity {
            Granularity::Class => self.clone(),
            Granularity::Method => Unit {
                fqn: Arc::clone(&self.enclosing),
                file: self.file.clone(),
                enclosing: Arc::clone(&self.enclosing),
                granularity: Granularity::Class,
            },
        }
    }

    /// Project to the requested granularity.
    pub fn at(&self, granularity: Granularity) -> Unit {
        match granularity {
            Granularity::Method => self.clone(),
            Granularity::Class => self.enclosing_unit(),
        }
    }

    pub(crate) fn path_buf(&self) -> Option<PathBuf> {
        self.file.as_deref().map(Path::to_path_buf)
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.fqn == other.fqn && self.file == other.file
    }
}

impl Eq for Unit {}

impl Hash for Unit {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.fqn.hash(state);
        self.file.hash(state);
    }
}

impl PartialOrd for Unit {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Unit {
    fn cmp(&self, other: &Self) -> Ordering {
        self.fqn
            .cmp(&other.fqn)
            .then_with(|| self.file.cmp(&other.file))
    }
}

impl fmt::Debug for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dbg = f.debug_struct("Unit");
        dbg.field("fqn", &self.fqn);
        if let Some(file) = &self.file {
            dbg.field("file", file);
        }
        dbg.field("granularity", &self.granularity).finish()
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fqn)
    }
}

/// Builds units for one front end using its naming scheme
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitFactory {
    scheme: NamingScheme,
}

impl UnitFactory {
    pub fn new(scheme: NamingScheme) -> Self {
        Self { scheme }
    }

    pub fn scheme(&self) -> &NamingScheme {
        &self.scheme
    }

    pub fn method(&self, fqn: impl AsRef<str>, file: Option<impl Into<PathBuf>>) -> Unit {
        Unit::method(fqn, file.map(Into::into), &self.scheme)
    }

    pub fn class(&self, fqn: impl AsRef<str>, file: Option<impl Into<PathBuf>>) -> Unit {
        Unit::class(fqn, file.map(Into::into))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_jvm_projection_cuts_member() {
        let scheme = NamingScheme::jvm();
        assert_eq!(scheme.enclosing_fqn("org.foo.t1.Test1.test1"), "org.foo.t1.Test1");
        assert_eq!(scheme.enclosing_fqn("Standalone"), "Standalone");
    }

    #[test]
    fn test_jvm_projection_ignores_parameter_list() {
        let unit = Unit::method("org.foo.C.m(java.lang.String)", None, &NamingScheme::jvm());
        assert_eq!(unit.enclosing_fqn(), "org.foo.C");

        let scheme = NamingScheme::jvm();
        assert_eq!(scheme.enclosing_fqn("org.foo.C.<init>()"), "org.foo.C");
        assert_eq!(scheme.enclosing_fqn("org.foo.C.m(int, java.util.List)"), "org.foo.C");
    }

    #[test]
    fn test_python_projection_cuts_module() {
        let scheme = NamingScheme::python();
        assert_eq!(
            scheme.enclosing_fqn("tests.test_module1:Module1Test.test"),
            "tests.test_module1"
        );
        assert_eq!(scheme.enclosing_fqn("tests.test_module1"), "tests.test_module1");
        assert_eq!(scheme.enclosing_fqn(":orphan"), ":orphan");
    }

    #[test]
    fn test_enclosing_unit_keeps_file_and_is_idempotent() {
        let unit = Unit::method(
            "org.foo.t2.Test2.test1",
            Some(PathBuf::from("src/main/java/org/foo/t2/Test2.java")),
            &NamingScheme::jvm(),
        );

        let class = unit.enclosing_unit();
        assert_eq!(class.fqn(), "org.foo.t2.Test2");
        assert_eq!(class.granularity(), Granularity::Class);
        assert_eq!(class.file_path(), unit.file_path());
        assert_eq!(class.enclosing_unit(), class);
    }

    #[test]
    fn test_equality_ignores_granularity_and_enclosing() {
        let a = Unit::with_enclosing("m.C", None, "m");
        let b = Unit::class("m.C", None);
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn test_path_participates_in_identity() {
        let a = Unit::class("tests.test1", Some(PathBuf::from("tests/test1.py")));
        let b = Unit::class("tests.test1", None);
        assert_ne!(a, b);
    }

    #[test]
    fn test_factory_uses_scheme() {
        let factory = UnitFactory::new(NamingScheme::python());
        let unit = factory.method("tests.test_module2:Module2Test.test2", Some("tests/test_module2.py"));
        assert_eq!(unit.enclosing_unit().fqn(), "tests.test_module2");
        assert_eq!(unit.at(Granularity::Method), unit);
    }
}
