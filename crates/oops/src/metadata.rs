//! Caller-defined payloads attached to an error.
//!
//! A payload decides which nested errors it exposes through
//! [`Metadata::nested`]: none, exactly one, or many. Whatever it exposes is
//! appended to the owning error's chain.
use std::any::Any;
use std::error::Error as StdError;
use std::fmt;

/// Object-safe access to the concrete payload type.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Errors exposed by a payload.
#[derive(Debug, Default)]
pub enum Nested<'a> {
    #[default]
    None,
    One(&'a (dyn StdError + 'static)),
    Many(Vec<&'a (dyn StdError + 'static)>),
}

impl<'a> Nested<'a> {
    pub fn into_vec(self) -> Vec<&'a (dyn StdError + 'static)> {
        match self {
            Nested::None => Vec::new(),
            Nested::One(err) => vec![err],
            Nested::Many(errs) => errs,
        }
    }
}

pub trait Metadata: AsAny + fmt::Debug + Send + Sync {
    fn nested(&self) -> Nested<'_> {
        Nested::None
    }
}

impl dyn Metadata {
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        AsAny::as_any(self).downcast_ref::<T>()
    }
}
