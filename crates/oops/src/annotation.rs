//! Optional values accepted by [`Error::new`](crate::Error::new).
//!
//! Absent values (`None`) are legal everywhere and are dropped while the
//! error is assembled, never reported.
use std::sync::Arc;

use crate::{Diagnosis, Label, Metadata, SharedError};

#[derive(Clone, Debug)]
pub enum Annotation {
    /// Categorise the error. The first valid tag wins; `None` and
    /// [`UNTAGGED`](crate::UNTAGGED) are ignored.
    Tag(Option<Label>),
    /// Attach an underlying cause. Every valid cause is kept, in order.
    Because(Option<SharedError>),
    /// Attach a note and severity. The last one supplied wins.
    Diagnosis(Diagnosis),
    /// Attach a caller-defined payload. The first valid payload wins.
    Metadata(Option<Arc<dyn Metadata>>),
    /// Empty metadata marker; carries nothing and is always ignored.
    Marker,
}

pub fn tag(label: &Label) -> Annotation {
    Annotation::Tag(Some(label.clone()))
}

pub fn because(err: impl Into<Option<SharedError>>) -> Annotation {
    Annotation::Because(err.into())
}

pub fn metadata<M: Metadata>(payload: M) -> Annotation {
    Annotation::Metadata(Some(Arc::new(payload)))
}

impl From<Label> for Annotation {
    fn from(label: Label) -> Self {
        Annotation::Tag(Some(label))
    }
}

impl From<Diagnosis> for Annotation {
    fn from(diagnosis: Diagnosis) -> Self {
        Annotation::Diagnosis(diagnosis)
    }
}

/// How an arbitrary error should be attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WrapAs {
    Label,
    Cause,
}

impl WrapAs {
    pub fn wrap(self, err: SharedError) -> Annotation {
        match self {
            WrapAs::Label => Annotation::Tag(Some(Label::wrap(err))),
            WrapAs::Cause => Annotation::Because(Some(err)),
        }
    }
}
