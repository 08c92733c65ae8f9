use std::error::Error as StdError;

use crate::{Annotation, Error, ErrorPolicy, Severity, shared};

/// Extension trait for `Result` enabling policy-driven reporting without
/// contaminating control flow with side-effects.
///
/// Example
/// ```rust
/// use oops::{oops, policy::NoopPolicy, Result, ResultExt, Severity};
///
/// fn load() -> Result<()> {
///     Err(oops!("config missing", Severity::High.diag("expected ./app.toml")))
/// }
///
/// let r = load().report(&NoopPolicy); // still Err for the caller to handle
/// assert!(r.is_err());
/// ```
pub trait ResultExt<T> {
    /// If the result is an error, emit it through `policy`.
    fn report(self, policy: &impl ErrorPolicy) -> Self;

    /// Emit only errors the policy classifies at `min` or above.
    fn report_at_least(self, min: Severity, policy: &impl ErrorPolicy) -> Self;
}

impl<T> ResultExt<T> for Result<T, Error> {
    fn report(self, policy: &impl ErrorPolicy) -> Self {
        if let Err(ref e) = self {
            policy.emit(e);
        }
        self
    }

    fn report_at_least(self, min: Severity, policy: &impl ErrorPolicy) -> Self {
        if let Err(ref e) = self {
            if policy.classify(e).is_some_and(|severity| severity >= min) {
                policy.emit(e);
            }
        }
        self
    }
}

/// Replace a foreign error with a composed one that keeps it as first cause.
pub trait WrapErr<T> {
    fn wrap_err<I>(self, message: impl Into<String>, annotations: I) -> Result<T, Error>
    where
        I: IntoIterator<Item = Annotation>;
}

impl<T, E> WrapErr<T> for Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn wrap_err<I>(self, message: impl Into<String>, annotations: I) -> Result<T, Error>
    where
        I: IntoIterator<Item = Annotation>,
    {
        self.map_err(|err| {
            let cause = Annotation::Because(Some(shared(err)));
            Error::new(message, std::iter::once(cause).chain(annotations))
        })
    }
}
