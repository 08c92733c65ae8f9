//! Severity scale and the [`Diagnosis`] annotation.
//!
//! The scale is ordered Low < Medium < High < Critical. An error without a
//! diagnosis has no severity at all, which is distinct from [`Severity::Low`].
use std::fmt;
use std::str::FromStr;

/// Rendered in place of a diagnosis that was never supplied.
pub const UNSET: &str = "unset";

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Minor issue with low impact or urgency.
    Low = 1,
    /// Needs attention but is not critical.
    Medium,
    /// Significant issue requiring prompt attention.
    High,
    /// Severe, system-impacting issue.
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Critical => "Critical",
        }
    }

    /// Attach `note` at this severity.
    pub fn diag(self, note: impl Into<String>) -> Diagnosis {
        Diagnosis::new(self, note)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown severity level: {0:?}")]
pub struct ParseSeverityError(String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Severity::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseSeverityError(s.to_string()))
    }
}

/// A note describing impact or urgency, at a given [`Severity`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Diagnosis {
    severity: Severity,
    note: String,
}

impl Diagnosis {
    pub fn new(severity: Severity, note: impl Into<String>) -> Self {
        Self {
            severity,
            note: note.into(),
        }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn note(&self) -> &str {
        &self.note
    }
}

impl fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{severity: {}, note: {:?}}}", self.severity, self.note)
    }
}
