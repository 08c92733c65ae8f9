//! `miette` integration: diagnosis severity maps onto report severity, the
//! diagnosis note becomes help text and the label becomes the code.
use std::fmt::Display;

use crate::{Error, Severity};

impl miette::Diagnostic for Error {
    fn code<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        self.label()
            .filter(|label| !label.is_untagged())
            .map(|label| Box::new(label) as Box<dyn Display + 'a>)
    }

    fn severity(&self) -> Option<miette::Severity> {
        self.diagnosis().map(|diagnosis| match diagnosis.severity() {
            Severity::Low => miette::Severity::Advice,
            Severity::Medium => miette::Severity::Warning,
            Severity::High | Severity::Critical => miette::Severity::Error,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        self.diagnosis()
            .map(|diagnosis| Box::new(diagnosis.note()) as Box<dyn Display + 'a>)
    }
}

#[cfg(test)]
mod tests {
    use miette::Diagnostic;

    use crate::{Label, Severity, oops, tag};

    #[test]
    fn diagnosis_drives_report_fields() {
        let label = Label::new("E_STORAGE");
        let err = oops!("write failed", tag(&label), Severity::Medium.diag("disk almost full"));
        assert_eq!(err.severity(), Some(miette::Severity::Warning));
        assert_eq!(err.code().map(|c| c.to_string()).as_deref(), Some("E_STORAGE"));
        assert_eq!(err.help().map(|h| h.to_string()).as_deref(), Some("disk almost full"));

        let plain = oops!("boom");
        assert!(plain.code().is_none());
        assert!(plain.severity().is_none());
    }
}
