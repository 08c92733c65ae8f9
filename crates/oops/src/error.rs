use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use crate::chain;
use crate::select::Selection;
use crate::{Annotation, Diagnosis, Label, Metadata, SharedError, Shape, UNTAGGED};

/// A composed error.
///
/// Its [`Shape`] is chosen once by [`Error::new`] and never changes, except
/// that [`Error::caused_by`] may promote a shape without causes to the one
/// that holds them.
#[derive(Clone, Debug)]
pub struct Error {
    message: String,
    repr: Repr,
}

#[derive(Clone, Debug)]
pub(crate) enum Repr {
    Plain,
    Standard(Box<Standard>),
    Meta(Arc<dyn Metadata>),
    Rich(Box<Standard>, Arc<dyn Metadata>),
}

#[derive(Clone, Debug)]
pub(crate) struct Standard {
    pub(crate) label: Label,
    pub(crate) causes: Vec<SharedError>,
    pub(crate) diagnosis: Option<Diagnosis>,
}

impl Standard {
    fn untagged(cause: SharedError) -> Box<Self> {
        Box::new(Self {
            label: UNTAGGED.clone(),
            causes: vec![cause],
            diagnosis: None,
        })
    }

    fn chain(&self) -> Vec<&(dyn StdError + 'static)> {
        let mut errs: Vec<&(dyn StdError + 'static)> = Vec::with_capacity(self.causes.len() + 1);
        errs.extend(self.causes.iter().map(as_dyn));
        errs.push(&self.label);
        errs
    }
}

fn as_dyn(err: &SharedError) -> &(dyn StdError + 'static) {
    &**err
}

impl Error {
    /// Compose an error from `message` and `annotations`.
    ///
    /// Invalid annotations are dropped silently; see [`crate::select`] for the
    /// merge rules and how the shape is picked.
    pub fn new(
        message: impl Into<String>,
        annotations: impl IntoIterator<Item = Annotation>,
    ) -> Self {
        Self {
            message: message.into(),
            repr: Selection::collect(annotations).into_repr(),
        }
    }

    /// Message-only error.
    pub fn msg(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            repr: Repr::Plain,
        }
    }

    /// The caller's message, verbatim.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn shape(&self) -> Shape {
        match self.repr {
            Repr::Plain => Shape::Plain,
            Repr::Standard(_) => Shape::Standard,
            Repr::Meta(_) => Shape::Meta,
            Repr::Rich(..) => Shape::Rich,
        }
    }

    /// Resolved label: the caller's, or [`UNTAGGED`].
    ///
    /// Metadata-only errors are not tagged at all and return `None`.
    pub fn label(&self) -> Option<&Label> {
        match &self.repr {
            Repr::Plain => Some(&*UNTAGGED),
            Repr::Standard(standard) | Repr::Rich(standard, _) => Some(&standard.label),
            Repr::Meta(_) => None,
        }
    }

    /// Whether a label other than [`UNTAGGED`] was supplied.
    pub fn is_tagged(&self) -> bool {
        self.label().is_some_and(|label| !label.is_untagged())
    }

    pub fn causes(&self) -> &[SharedError] {
        match self.standard() {
            Some(standard) => &standard.causes,
            None => &[],
        }
    }

    /// First attached cause.
    pub fn cause(&self) -> Option<&SharedError> {
        self.causes().first()
    }

    pub fn diagnosis(&self) -> Option<&Diagnosis> {
        self.standard().and_then(|standard| standard.diagnosis.as_ref())
    }

    pub fn metadata(&self) -> Option<&dyn Metadata> {
        match &self.repr {
            Repr::Meta(payload) | Repr::Rich(_, payload) => Some(&**payload),
            Repr::Plain | Repr::Standard(_) => None,
        }
    }

    /// Attached payload, if it is a `T`.
    pub fn data<T: 'static>(&self) -> Option<&T> {
        self.metadata().and_then(|payload| payload.downcast_ref::<T>())
    }

    /// Errors wrapped directly by this one, in order: causes, then the label,
    /// then whatever the payload exposes.
    ///
    /// A plain error exposes [`UNTAGGED`] so that every error which is not
    /// metadata-only can be tested for an explicit label the same way.
    pub fn chain(&self) -> Vec<&(dyn StdError + 'static)> {
        match &self.repr {
            Repr::Plain => {
                let untagged: &'static (dyn StdError + 'static) = &*UNTAGGED;
                vec![untagged]
            }
            Repr::Standard(standard) => standard.chain(),
            Repr::Meta(payload) => payload.nested().into_vec(),
            Repr::Rich(standard, payload) => {
                let mut errs = standard.chain();
                errs.extend(payload.nested().into_vec());
                errs
            }
        }
    }

    /// Whether `target` is this error or anything reachable through its chain.
    pub fn is(&self, target: &(dyn StdError + 'static)) -> bool {
        chain::is(self, target)
    }

    /// First error of type `T` reachable from this one, itself included.
    pub fn find<T: StdError + 'static>(&self) -> Option<&T> {
        chain::find(self)
    }

    /// Up to `depth` errors below this one, depth-first.
    ///
    /// # Panics
    ///
    /// If `depth` is zero.
    pub fn trace(&self, depth: usize) -> Vec<&(dyn StdError + 'static)> {
        assert!(depth > 0, "trace depth must be positive");
        chain::walk(self).skip(1).take(depth).collect()
    }

    /// Append `cause` after any existing causes.
    ///
    /// A plain error becomes standard and a metadata-only error becomes rich,
    /// both labelled [`UNTAGGED`].
    pub fn caused_by(mut self, cause: SharedError) -> Self {
        self.repr = match self.repr {
            Repr::Plain => Repr::Standard(Standard::untagged(cause)),
            Repr::Meta(payload) => Repr::Rich(Standard::untagged(cause), payload),
            Repr::Standard(mut standard) => {
                standard.causes.push(cause);
                Repr::Standard(standard)
            }
            Repr::Rich(mut standard, payload) => {
                standard.causes.push(cause);
                Repr::Rich(standard, payload)
            }
        };
        self
    }

    fn standard(&self) -> Option<&Standard> {
        match &self.repr {
            Repr::Standard(standard) | Repr::Rich(standard, _) => Some(standard),
            Repr::Plain | Repr::Meta(_) => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for Error {
    /// First link of [`Error::chain`] only. Walkers built on `source()` miss
    /// the label and any later causes; [`crate::is`] and [`crate::find`]
    /// cover the whole chain.
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.chain().into_iter().next()
    }
}
