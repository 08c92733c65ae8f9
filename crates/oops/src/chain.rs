//! Identity walk and type-directed extraction over error trees.
//!
//! A composed [`Error`] branches into everything in [`Error::chain`]; any
//! other error continues through its `source()`. A [`Label`] branches the way
//! the error it wraps would. The walk is depth-first and starts with the error
//! itself.
//!
//! `source()` on a composed error yields only the first link of its chain, so
//! generic `source()` walkers see a single path. Use [`is`], [`find`] and
//! [`walk`] to reach every cause, label and payload error.
//!
//! Identity means the same value of the same concrete type: the data pointer
//! and the vtable must both match. An error and a field stored at its start
//! share an address but not a type, and are different errors. A [`Label`] is
//! identified by the error it wraps, so a label found in a chain matches the
//! caller's copy.
use std::error::Error as StdError;

use crate::{Error, Label};

pub struct Walk<'a> {
    stack: Vec<&'a (dyn StdError + 'static)>,
}

pub fn walk<'a>(err: &'a (dyn StdError + 'static)) -> Walk<'a> {
    Walk { stack: vec![err] }
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a (dyn StdError + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        self.stack.extend(branches(current).into_iter().rev());
        Some(current)
    }
}

fn branches<'a>(err: &'a (dyn StdError + 'static)) -> Vec<&'a (dyn StdError + 'static)> {
    let err = unlabel(err);
    match err.downcast_ref::<Error>() {
        Some(composed) => composed.chain(),
        None => err.source().into_iter().collect(),
    }
}

/// The error a label wraps, or `err` itself.
fn unlabel<'a>(err: &'a (dyn StdError + 'static)) -> &'a (dyn StdError + 'static) {
    match err.downcast_ref::<Label>() {
        Some(label) => label.inner(),
        None => err,
    }
}

pub(crate) fn identity(err: &(dyn StdError + 'static)) -> *const (dyn StdError + 'static) {
    match err.downcast_ref::<Label>() {
        Some(label) => label.as_ptr(),
        None => err,
    }
}

/// Whether `a` and `b` are the same error.
pub fn same(a: &(dyn StdError + 'static), b: &(dyn StdError + 'static)) -> bool {
    std::ptr::eq(identity(a), identity(b))
}

/// Whether `target` is `err` or reachable from it.
pub fn is(err: &(dyn StdError + 'static), target: &(dyn StdError + 'static)) -> bool {
    walk(err).any(|node| same(node, target))
}

/// First `T` reachable from `err`, `err` included. A label matches when
/// either it or the error it wraps is a `T`.
pub fn find<'a, T: StdError + 'static>(err: &'a (dyn StdError + 'static)) -> Option<&'a T> {
    walk(err).find_map(|node| node.downcast_ref::<T>().or_else(|| unlabel(node).downcast_ref::<T>()))
}
