//! Categorical sentinels.
//!
//! A [`Label`] is compared strictly by identity: two labels created from the
//! same text are still different labels. Clones share the same identity.
use std::error::Error as StdError;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::SharedError;

lazy_static::lazy_static! {
    /// Label carried by every tagged error that was not given one explicitly.
    pub static ref UNTAGGED: Label = Label::new("untagged error label");
}

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct Sentinel(String);

#[derive(Clone)]
pub struct Label(SharedError);

impl Label {
    /// Create a fresh sentinel displaying `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self(Arc::new(Sentinel(text.into())))
    }

    /// Use an existing error as a label. The wrapped error keeps its identity,
    /// so walking a tagged error finds it as well.
    pub fn wrap(err: SharedError) -> Self {
        Self(err)
    }

    pub fn as_shared(&self) -> &SharedError {
        &self.0
    }

    pub fn is_untagged(&self) -> bool {
        *self == *UNTAGGED
    }

    /// The wrapped error, as the walk in [`crate::chain`] sees it.
    pub(crate) fn inner(&self) -> &(dyn StdError + 'static) {
        &*self.0
    }

    pub(crate) fn as_ptr(&self) -> *const (dyn StdError + 'static) {
        Arc::as_ptr(&self.0) as *const (dyn StdError + 'static)
    }

    fn address(&self) -> *const () {
        Arc::as_ptr(&self.0).cast::<()>()
    }
}

impl PartialEq for Label {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.as_ptr(), other.as_ptr())
    }
}

impl Eq for Label {}

impl Hash for Label {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address().hash(state);
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0, f)
    }
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Label").field(&self.0.to_string()).finish()
    }
}

impl StdError for Label {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_compare_by_identity_not_text() {
        let a = Label::new("not found");
        let b = Label::new("not found");
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn untagged_is_a_single_process_wide_value() {
        let first: &Label = &UNTAGGED;
        let second = UNTAGGED.clone();
        assert_eq!(*first, second);
        assert!(second.is_untagged());
        assert!(!Label::new("untagged error label").is_untagged());
    }

    #[test]
    fn wrapped_label_shares_the_error_allocation() {
        let io = crate::shared(std::io::Error::other("eof"));
        let label = Label::wrap(io.clone());
        assert!(Arc::ptr_eq(label.as_shared(), &io));
        assert_eq!(label.to_string(), "eof");
        assert_eq!(format!("{label:?}"), "Label(\"eof\")");
    }
}
