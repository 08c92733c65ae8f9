//! JSON rendering of [`Presentation`] views.
//!
//! Gated behind the `serde` feature so consumers that only need the
//! in-memory view don't pull serialization dependencies.

#![cfg(feature = "serde")]

use serde::Serialize;

use crate::{Error, Presentation};

/// Structured fields of an error for logging or transport.
pub trait PrettyDebug {
    type Fields<'a>: Serialize + 'a
    where
        Self: 'a;

    fn fields(&self) -> Self::Fields<'_>;

    /// Fields as a JSON value.
    fn to_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self.fields())
    }

    /// Fields as compact JSON.
    fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.fields())
    }

    /// Fields as pretty JSON (for logs or UI).
    fn pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.fields())
    }

    /// Emit a tracing event carrying the Display string and the JSON fields.
    #[cfg(feature = "tracing")]
    fn emit_tracing(&self, level: tracing::Level, message: &str)
    where
        Self: std::fmt::Display,
    {
        use tracing::{Level, event};

        let fields = self.to_json().unwrap_or_default();
        if level == Level::ERROR {
            event!(Level::ERROR, error = %self, fields = %fields, "{message}")
        } else if level == Level::WARN {
            event!(Level::WARN, error = %self, fields = %fields, "{message}")
        } else if level == Level::INFO {
            event!(Level::INFO, error = %self, fields = %fields, "{message}")
        } else if level == Level::DEBUG {
            event!(Level::DEBUG, error = %self, fields = %fields, "{message}")
        } else {
            event!(Level::TRACE, error = %self, fields = %fields, "{message}")
        }
    }
}

impl PrettyDebug for Error {
    type Fields<'a> = Presentation;

    fn fields(&self) -> Presentation {
        Presentation::of(self)
    }
}
