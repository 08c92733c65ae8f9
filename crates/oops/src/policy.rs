//! Policies for classifying and reporting composed errors.
//!
//! The library never logs or prints on its own. Applications install an
//! `ErrorPolicy` at their boundaries to decide how errors are surfaced:
//! - tracing logs
//! - terminal diagnostics
//! - custom telemetry
//!
//! Classification defaults to the severity of the error's diagnosis; errors
//! without one classify as `None`.
//!
//! Example
//! ```rust
//! use oops::{oops, ErrorPolicy, Severity, Error};
//!
//! struct PrintPolicy;
//! impl ErrorPolicy for PrintPolicy {
//!     fn emit(&self, e: &Error) { eprintln!("[{:?}] {e}", self.classify(e)); }
//! }
//!
//! let err = oops!("disk full", Severity::High.diag("volume /data"));
//! assert_eq!(PrintPolicy.classify(&err), Some(Severity::High));
//! ```
use crate::{Error, Severity};

pub trait ErrorPolicy: Send + Sync {
    /// Severity of `error`, if it carries one.
    fn classify(&self, error: &Error) -> Option<Severity> {
        error.diagnosis().map(|diagnosis| diagnosis.severity())
    }

    /// Report the error (log it, show it, count it, ...).
    fn emit(&self, error: &Error);
}

/// Classifies but never reports.
#[derive(Debug, Clone, Default)]
pub struct NoopPolicy;

impl ErrorPolicy for NoopPolicy {
    fn emit(&self, _error: &Error) {}
}

/// Reports through `tracing` at a level derived from the diagnosis.
///
/// | severity              | level |
/// |-----------------------|-------|
/// | Critical, High, unset | ERROR |
/// | Medium                | WARN  |
/// | Low                   | INFO  |
#[cfg(feature = "tracing")]
#[derive(Debug, Clone, Default)]
pub struct TracingPolicy;

#[cfg(feature = "tracing")]
impl ErrorPolicy for TracingPolicy {
    fn emit(&self, error: &Error) {
        use tracing::{Level, event};

        let label = error.label().map(ToString::to_string);
        let diagnosis = error.diagnosis().map(ToString::to_string);
        match self.classify(error) {
            Some(Severity::Low) => {
                event!(Level::INFO, error = %error, ?label, ?diagnosis, causes = error.causes().len())
            }
            Some(Severity::Medium) => {
                event!(Level::WARN, error = %error, ?label, ?diagnosis, causes = error.causes().len())
            }
            Some(Severity::High | Severity::Critical) | None => {
                event!(Level::ERROR, error = %error, ?label, ?diagnosis, causes = error.causes().len())
            }
        }
    }
}

/// Renders a `miette` report on stderr.
#[cfg(feature = "diagnostic")]
#[derive(Debug, Clone, Default)]
pub struct MiettePolicy;

#[cfg(feature = "diagnostic")]
impl ErrorPolicy for MiettePolicy {
    fn emit(&self, error: &Error) {
        let report = miette::Report::new(error.clone());
        eprintln!("{report:?}");
    }
}

/// A composite policy that delegates to multiple policies.
///
/// - classify: the highest severity among inner policies and the error's own.
/// - emit: every inner policy, in insertion order.
#[derive(Default)]
pub struct CombinedPolicy {
    policies: Vec<Box<dyn ErrorPolicy>>,
}

impl CombinedPolicy {
    pub fn new() -> Self {
        Self {
            policies: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            policies: Vec::with_capacity(capacity),
        }
    }

    /// Add a policy by value (boxed internally).
    pub fn push<P: ErrorPolicy + 'static>(mut self, policy: P) -> Self {
        self.policies.push(Box::new(policy));
        self
    }

    pub fn add_boxed(mut self, policy: Box<dyn ErrorPolicy>) -> Self {
        self.policies.push(policy);
        self
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}

impl ErrorPolicy for CombinedPolicy {
    fn classify(&self, error: &Error) -> Option<Severity> {
        let own = error.diagnosis().map(|diagnosis| diagnosis.severity());
        self.policies
            .iter()
            .map(|policy| policy.classify(error))
            .fold(own, Ord::max)
    }

    fn emit(&self, error: &Error) {
        for policy in &self.policies {
            policy.emit(error);
        }
    }
}
