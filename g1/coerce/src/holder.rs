use std::any;
use std::fmt;

use snafu::prelude::*;

use crate::error::{Error, SetSnafu};
use crate::int::{self, Signed};

/// Holds a signed integer that is updated from strings.
///
/// This is meant to back a single command-line flag or configuration entry.  `set` takes
/// `&mut self`, and so sharing a holder across threads requires external synchronization.
#[derive(Clone)]
pub struct IntHolder<T> {
    item: T,
    type_name: &'static str,
}

impl<T> IntHolder<T>
where
    T: Signed,
{
    pub fn new(initial: T) -> Self {
        Self {
            item: initial,
            type_name: any::type_name::<T>(),
        }
    }

    pub fn item(&self) -> &T {
        &self.item
    }

    pub fn into_inner(self) -> T {
        self.item
    }

    /// Parses `value` and replaces the current item.
    ///
    /// The current item is left unchanged on error.
    pub fn set(&mut self, value: &str) -> Result<(), Error> {
        let item = int::parse::<T>(value)
            .inspect_err(|error| {
                tracing::debug!(type_name = self.type_name, %error, "reject value");
            })
            .context(SetSnafu {
                type_name: self.type_name,
            })?;
        self.item = item;
        Ok(())
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl<T> Default for IntHolder<T>
where
    T: Signed + Default,
{
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> From<T> for IntHolder<T>
where
    T: Signed,
{
    fn from(item: T) -> Self {
        Self::new(item)
    }
}

impl<T> fmt::Debug for IntHolder<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntHolder")
            .field("item", &self.item)
            .field("type_name", &self.type_name)
            .finish()
    }
}

impl<T> fmt::Display for IntHolder<T>
where
    T: Signed,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::string(&self.item))
    }
}
