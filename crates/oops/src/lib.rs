//! Structured error construction.
//!
//! [`Error::new`] takes a message plus a list of [`Annotation`]s (a categorical
//! [`Label`], underlying causes, a [`Diagnosis`] and caller-defined
//! [`Metadata`]) and allocates the smallest [`Shape`] able to hold them.
//! Every attached cause and label stays reachable by identity through
//! [`Error::is`], and composed errors can be found again by type through any
//! number of wrapping layers with [`find`].
//!
//! ```rust
//! use oops::{because, oops, shared, tag, Label, Severity, UNTAGGED};
//!
//! let not_found = Label::new("resource not found");
//! let io = shared(std::io::Error::other("disk unplugged"));
//!
//! let err = oops!(
//!     "user profile unavailable",
//!     tag(&not_found),
//!     because(io.clone()),
//!     Severity::High.diag("profile store is offline"),
//! );
//!
//! assert_eq!(err.to_string(), "user profile unavailable");
//! assert!(err.is(&not_found));
//! assert!(err.is(&*io));
//! assert!(!err.is(&*UNTAGGED));
//! ```
use std::sync::Arc;

pub mod annotation;
pub mod chain;
pub mod dispatch;
pub mod error;
pub mod label;
pub mod metadata;
pub mod policy;
pub mod present;
pub mod pretty;
pub mod result_ext;
pub mod select;
pub mod severity;

#[cfg(feature = "diagnostic")]
mod diagnostic;

// public exports
pub use annotation::{Annotation, WrapAs, because, metadata, tag};
pub use chain::{find, is, walk};
pub use dispatch::{DispatchTable, Handler, handle};
pub use error::Error;
pub use label::{Label, UNTAGGED};
pub use metadata::{Metadata, Nested};
pub use policy::ErrorPolicy;
pub use present::Presentation;
pub use result_ext::{ResultExt, WrapErr};
pub use select::Shape;
pub use severity::{Diagnosis, ParseSeverityError, Severity};

/// Shared, thread-safe handle to an arbitrary error.
///
/// Causes and dispatch keys are compared by allocation, so keep a clone of the
/// handle around to test for it later.
pub type SharedError = Arc<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Move `err` into a [`SharedError`].
pub fn shared<E>(err: E) -> SharedError
where
    E: std::error::Error + Send + Sync + 'static,
{
    Arc::new(err)
}

/// Build an [`Error`] from a message and any number of annotations.
///
/// Each annotation may be anything convertible into an [`Annotation`]:
/// `tag(..)`, `because(..)`, a [`Diagnosis`], a [`Label`], `metadata(..)`.
#[macro_export]
macro_rules! oops {
    ($msg:expr $(,)?) => {
        $crate::Error::msg($msg)
    };
    ($msg:expr, $($annotation:expr),+ $(,)?) => {
        $crate::Error::new($msg, [$($crate::Annotation::from($annotation)),+])
    };
}
