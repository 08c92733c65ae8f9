//! Variant selection.
//!
//! Annotations are classified and merged into a selection, which then
//! decides the [`Shape`] of the composed error:
//!
//! | label / cause / diagnosis | metadata | shape              |
//! |---------------------------|----------|--------------------|
//! | none                      | none     | [`Shape::Plain`]    |
//! | none                      | some     | [`Shape::Meta`]     |
//! | any                       | none     | [`Shape::Standard`] |
//! | any                       | some     | [`Shape::Rich`]     |
//!
//! Merge rules: the first valid tag wins, causes accumulate in supplied
//! order, the last diagnosis wins and the first payload wins. A diagnosis on
//! its own is enough to select a standard shape.
use std::sync::Arc;

use crate::error::{Repr, Standard};
use crate::{Annotation, Diagnosis, Label, Metadata, SharedError, UNTAGGED};

/// Which fields a composed error carries. Fixed at construction.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Message only. Still identity-equal to [`UNTAGGED`] in its chain.
    Plain,
    /// Label, causes and an optional diagnosis.
    Standard,
    /// Message and a caller payload, nothing else.
    Meta,
    /// Standard fields plus a caller payload.
    Rich,
}

impl Shape {
    pub fn has_metadata(self) -> bool {
        matches!(self, Shape::Meta | Shape::Rich)
    }

    pub fn has_label(self) -> bool {
        matches!(self, Shape::Standard | Shape::Rich)
    }
}

#[derive(Default)]
pub(crate) struct Selection {
    label: Option<Label>,
    causes: Vec<SharedError>,
    diagnosis: Option<Diagnosis>,
    metadata: Option<Arc<dyn Metadata>>,
}

impl Selection {
    pub(crate) fn collect(annotations: impl IntoIterator<Item = Annotation>) -> Self {
        let mut selection = Self::default();
        for annotation in annotations {
            selection.apply(annotation);
        }
        selection
    }

    fn apply(&mut self, annotation: Annotation) {
        match annotation {
            Annotation::Tag(Some(label)) if !label.is_untagged() => {
                if self.label.is_none() {
                    self.label = Some(label);
                }
            }
            Annotation::Because(Some(cause)) => self.causes.push(cause),
            Annotation::Diagnosis(diagnosis) => self.diagnosis = Some(diagnosis),
            Annotation::Metadata(Some(payload)) => {
                if self.metadata.is_none() {
                    self.metadata = Some(payload);
                }
            }
            #[cfg(feature = "tracing")]
            dropped => tracing::trace!(annotation = ?dropped, "dropping empty annotation"),
            #[cfg(not(feature = "tracing"))]
            _ => {}
        }
    }

    fn is_internal(&self) -> bool {
        self.label.is_some() || !self.causes.is_empty() || self.diagnosis.is_some()
    }

    pub(crate) fn shape(&self) -> Shape {
        match (self.is_internal(), self.metadata.is_some()) {
            (false, false) => Shape::Plain,
            (false, true) => Shape::Meta,
            (true, false) => Shape::Standard,
            (true, true) => Shape::Rich,
        }
    }

    pub(crate) fn into_repr(self) -> Repr {
        let shape = self.shape();
        let Selection {
            label,
            causes,
            diagnosis,
            metadata,
        } = self;
        let standard = || {
            Box::new(Standard {
                label: label.unwrap_or_else(|| UNTAGGED.clone()),
                causes,
                diagnosis,
            })
        };
        match (shape, metadata) {
            (Shape::Meta, Some(payload)) => Repr::Meta(payload),
            (Shape::Standard, _) => Repr::Standard(standard()),
            (Shape::Rich, Some(payload)) => Repr::Rich(standard(), payload),
            _ => Repr::Plain,
        }
    }
}
