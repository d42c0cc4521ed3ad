//! Thread-local collector context.
//!
//! Records which collector and granularity the current thread is working on.
//! The coordinator and the output writers read it on their error paths and
//! tag the error with it (see [`CovmineError::in_context`]). Each rayon worker
//! thread has its own context; guards restore the previous value on drop.
//!
//! [`CovmineError::in_context`]: crate::errors::CovmineError::in_context

use crate::collection::CollectorKind;
use crate::core::Granularity;
use std::cell::RefCell;
use std::fmt;

thread_local! {
    static CURRENT_CONTEXT: RefCell<CollectorContext> = const { RefCell::new(CollectorContext::new()) };
}

/// Context snapshot for the current thread.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectorContext {
    pub phase: Option<CollectorPhase>,
    pub granularity: Option<Granularity>,
}

impl CollectorContext {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: None,
            granularity: None,
        }
    }
}

impl fmt::Display for CollectorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.phase, self.granularity) {
            (Some(phase), Some(granularity)) => write!(f, "{phase} ({granularity})"),
            (Some(phase), None) => write!(f, "{phase}"),
            _ => write!(f, "idle"),
        }
    }
}

/// Stages of a metrics run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectorPhase {
    /// Building collector plans from configuration
    Planning,
    /// Running one collector
    Collecting(CollectorKind),
    /// Merging collector output into the shared result set
    Merging,
    /// Writing results through an output writer
    Writing,
}

impl fmt::Display for CollectorPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Planning => write!(f, "planning"),
            Self::Collecting(kind) => write!(f, "collecting:{kind}"),
            Self::Merging => write!(f, "merging"),
            Self::Writing => write!(f, "writing"),
        }
    }
}

/// Restores the previous context on drop.
pub struct ContextGuard {
    previous: CollectorContext,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        CURRENT_CONTEXT.with(|ctx| {
            *ctx.borrow_mut() = self.previous;
        });
    }
}

/// Set the current phase until the returned guard drops.
#[must_use]
pub fn set_phase(phase: CollectorPhase) -> ContextGuard {
    CURRENT_CONTEXT.with(|ctx| {
        let previous = *ctx.borrow();
        ctx.borrow_mut().phase = Some(phase);
        ContextGuard { previous }
    })
}

/// Set the current granularity until the returned guard drops.
#[must_use]
pub fn set_granularity(granularity: Granularity) -> ContextGuard {
    CURRENT_CONTEXT.with(|ctx| {
        let previous = *ctx.borrow();
        ctx.borrow_mut().granularity = Some(granularity);
        ContextGuard { previous }
    })
}

#[must_use]
pub fn current_context() -> CollectorContext {
    CURRENT_CONTEXT.with(|ctx| *ctx.borrow())
}

/// Reset the current thread's context to empty.
pub fn reset_context() {
    CURRENT_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = CollectorContext::new();
    });
}
