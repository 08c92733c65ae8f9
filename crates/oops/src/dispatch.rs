//! Translation of foreign errors into composed ones.
//!
//! A [`DispatchTable`] maps known error values, by identity, to pre-built
//! [`Error`]s. [`handle`] runs an ordered list of [`Handler`]s instead. In both
//! cases the original error is appended to the result as its last cause.
//!
//! Tables are filled before they are shared. Lookups take `&self` and are
//! safe from any number of threads; registration takes `&mut self`.
use std::error::Error as StdError;
use std::sync::Arc;

use fxhash::FxHashMap;

use crate::chain::{identity, same};
use crate::{Error, SharedError};

/// Recognises an error and produces its replacement.
pub trait Handler {
    fn handle(&self, err: &(dyn StdError + 'static)) -> Option<Error>;
}

impl<F> Handler for F
where
    F: Fn(&(dyn StdError + 'static)) -> Option<Error>,
{
    fn handle(&self, err: &(dyn StdError + 'static)) -> Option<Error> {
        self(err)
    }
}

/// Run `handlers` in order over `err`.
///
/// An absent error yields `None` without consulting any handler. An error
/// that is already composed passes through untouched, as does one no handler
/// recognises. Otherwise the first match wins and gets `err` as a cause.
pub fn handle(err: Option<SharedError>, handlers: &[&dyn Handler]) -> Option<SharedError> {
    let err = err?;
    if err.downcast_ref::<Error>().is_some() {
        return Some(err);
    }
    for handler in handlers {
        if let Some(composed) = handler.handle(&*err) {
            #[cfg(feature = "tracing")]
            tracing::debug!(error = %err, replacement = %composed, "handler matched");
            return Some(Arc::new(composed.caused_by(err)));
        }
    }
    #[cfg(feature = "tracing")]
    tracing::trace!(error = %err, handlers = handlers.len(), "no handler matched");
    Some(err)
}

#[derive(Clone, Debug)]
struct Entry {
    // Holding the key keeps its address from being reused.
    key: SharedError,
    error: Error,
}

/// Entries are bucketed by address; a hit also has to be [`same`] as the key,
/// so a key and a value stored at its start never collide.
#[derive(Clone, Debug, Default)]
pub struct DispatchTable {
    entries: FxHashMap<usize, Vec<Entry>>,
}

impl DispatchTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Map `key` to `error`, returning the error it replaces.
    pub fn insert(&mut self, key: SharedError, error: Error) -> Option<Error> {
        let bucket = self.entries.entry(address(&*key)).or_default();
        match bucket.iter_mut().find(|entry| same(&*entry.key, &*key)) {
            Some(entry) => Some(std::mem::replace(&mut entry.error, error)),
            None => {
                bucket.push(Entry { key, error });
                None
            }
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: SharedError, error: Error) -> Self {
        self.insert(key, error);
        self
    }

    pub fn get(&self, err: &(dyn StdError + 'static)) -> Option<&Error> {
        self.entries
            .get(&address(err))?
            .iter()
            .find(|entry| same(&*entry.key, err))
            .map(|entry| &entry.error)
    }

    pub fn contains(&self, err: &(dyn StdError + 'static)) -> bool {
        self.get(err).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.values().all(Vec::is_empty)
    }

    pub fn keys(&self) -> impl Iterator<Item = &SharedError> {
        self.entries.values().flatten().map(|entry| &entry.key)
    }

    /// Replace `err` with its mapped error, or return it unchanged.
    ///
    /// The stored error is cloned, so repeated lookups never accumulate causes.
    pub fn resolve(&self, err: SharedError) -> SharedError {
        match self.get(&*err) {
            Some(mapped) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(error = %err, replacement = %mapped, "dispatch hit");
                Arc::new(mapped.clone().caused_by(err))
            }
            None => {
                #[cfg(feature = "tracing")]
                tracing::trace!(error = %err, "dispatch miss");
                err
            }
        }
    }

    /// [`resolve`](Self::resolve) for an optional error. `None` never touches
    /// the table.
    pub fn handle(&self, err: Option<SharedError>) -> Option<SharedError> {
        err.map(|err| self.resolve(err))
    }
}

impl Handler for DispatchTable {
    fn handle(&self, err: &(dyn StdError + 'static)) -> Option<Error> {
        self.get(err).cloned()
    }
}

fn address(err: &(dyn StdError + 'static)) -> usize {
    identity(err).cast::<()>() as usize
}
