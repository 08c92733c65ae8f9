//! Flat, read-only view of an error for logs and transport.
use std::error::Error as StdError;
use std::fmt;

use crate::chain::find;
use crate::severity::UNSET;
use crate::{Error, UNTAGGED};

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Presentation {
    pub message: String,
    /// Resolved label; untagged errors render [`UNTAGGED`].
    pub label: String,
    /// First cause only.
    pub cause: Option<String>,
    /// `{severity: .., note: ".."}`, or `unset`.
    pub diagnosis: String,
    /// Debug rendering of the payload.
    pub metadata: Option<String>,
}

impl Presentation {
    pub fn of(err: &Error) -> Self {
        Self {
            message: err.message().to_string(),
            label: err.label().unwrap_or(&*UNTAGGED).to_string(),
            cause: err.cause().map(|cause| cause.to_string()),
            diagnosis: err
                .diagnosis()
                .map_or_else(|| UNSET.to_string(), |diagnosis| diagnosis.to_string()),
            metadata: err.metadata().map(|payload| format!("{payload:?}")),
        }
    }

    /// Present any error. The first composed [`Error`] reachable from `err`
    /// provides the fields; the message is always `err`'s own.
    pub fn describe(err: &(dyn StdError + 'static)) -> Self {
        match find::<Error>(err) {
            Some(composed) => Self {
                message: err.to_string(),
                ..Self::of(composed)
            },
            None => Self {
                message: err.to_string(),
                label: UNTAGGED.to_string(),
                cause: None,
                diagnosis: UNSET.to_string(),
                metadata: None,
            },
        }
    }
}

impl From<&Error> for Presentation {
    fn from(err: &Error) -> Self {
        Self::of(err)
    }
}

impl fmt::Display for Presentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "message={:?} label={:?} diagnosis={}",
            self.message, self.label, self.diagnosis
        )?;
        if let Some(cause) = &self.cause {
            write!(f, " cause={cause:?}")?;
        }
        if let Some(metadata) = &self.metadata {
            write!(f, " metadata={metadata}")?;
        }
        Ok(())
    }
}
