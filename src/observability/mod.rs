//! Logging setup and per-thread collector context.
//!
//! Install a subscriber once at startup:
//!
//! ```no_run
//! use covmine::observability::init_tracing;
//!
//! init_tracing(tracing::Level::INFO);
//! ```
//!
//! Collectors mark what they are doing with guards:
//!
//! ```
//! use covmine::collection::CollectorKind;
//! use covmine::observability::{current_context, set_phase, CollectorPhase};
//!
//! let _phase = set_phase(CollectorPhase::Collecting(CollectorKind::DependencyCoverage));
//! assert_eq!(current_context().to_string(), "collecting:dependency_coverage");
//! ```

pub mod context;
mod logging;

pub use context::{
    current_context, reset_context, set_granularity, set_phase, CollectorContext, CollectorPhase,
    ContextGuard,
};
pub use logging::{init_test_tracing, init_tracing};
