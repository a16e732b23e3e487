//! Sequence helpers: absence checks, indexing, materialization and rendering.
//!
//! # Responsibility
//! - Extend every `Iterator` with single-pass helpers.
//! - Render possibly-absent items to text under a `NullItemHandling` policy.
//!
//! # Invariants
//! - Each helper consumes its iterator at most once, in order.
//! - Output order always equals input order; nothing is deduplicated.
//! - Under `NullItemHandling::Throw` no output is returned if any item is absent.

use crate::error::{ExtError, ExtResult};
use crate::line_ending::LineEndingStyle;
use crate::lock::acquire;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::io::Write;
use std::str::FromStr;
use std::sync::Mutex;

/// Policy for absent items when rendering a sequence to text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullItemHandling {
    /// Drop absent items.
    #[default]
    Remove,
    /// Keep absent items as absent (or empty, when joined).
    Include,
    /// Fail with `InvalidOperation` if any item is absent.
    Throw,
}

impl FromStr for NullItemHandling {
    type Err = ExtError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "remove" => Ok(Self::Remove),
            "include" => Ok(Self::Include),
            "throw" => Ok(Self::Throw),
            other => Err(ExtError::NotImplemented(format!(
                "unknown null item handling `{other}`"
            ))),
        }
    }
}

/// An item that may be absent.
///
/// Implemented for `Option<T>` and references to it, so both `into_iter()`
/// and `iter()` over a `Vec<Option<T>>` can be rendered.
pub trait Nullable {
    type Value: ?Sized;

    fn as_present(&self) -> Option<&Self::Value>;

    fn is_absent(&self) -> bool {
        self.as_present().is_none()
    }
}

impl<T> Nullable for Option<T> {
    type Value = T;

    fn as_present(&self) -> Option<&T> {
        self.as_ref()
    }
}

impl<N> Nullable for &N
where
    N: Nullable + ?Sized,
{
    type Value = N::Value;

    fn as_present(&self) -> Option<&N::Value> {
        (**self).as_present()
    }
}

/// Iterator adaptor yielding `(item, index)` pairs.
#[derive(Debug, Clone)]
pub struct WithIndex<I> {
    inner: I,
    next_index: usize,
}

impl<I: Iterator> Iterator for WithIndex<I> {
    type Item = (I::Item, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.inner.next()?;
        let index = self.next_index;
        self.next_index += 1;
        Some((item, index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

/// Extension methods available on every iterator.
pub trait IterExt: Iterator + Sized {
    /// Pairs every item with its zero-based position.
    fn with_index(self) -> WithIndex<Self> {
        WithIndex {
            inner: self,
            next_index: 0,
        }
    }

    /// Returns `true` if at least one item is absent. Empty input is `false`.
    fn any_absent(mut self) -> bool
    where
        Self::Item: Nullable,
    {
        self.any(|item| item.is_absent())
    }

    /// Materializes all items into a new `Vec`.
    fn to_collection(self) -> Vec<Self::Item> {
        self.collect()
    }

    /// Materializes all items while holding `lock`.
    fn to_collection_locked<L>(self, lock: &Mutex<L>) -> ExtResult<Vec<Self::Item>> {
        let _guard = acquire(lock, "to_collection")?;
        Ok(self.collect())
    }

    /// Applies `action` to every item while holding `lock`.
    fn for_each_locked<L, F>(self, lock: &Mutex<L>, action: F) -> ExtResult<()>
    where
        F: FnMut(Self::Item),
    {
        let _guard = acquire(lock, "for_each")?;
        self.for_each(action);
        Ok(())
    }

    /// Renders present items, dropping absent ones.
    fn to_string_items(self) -> Vec<String>
    where
        Self::Item: Nullable,
        <Self::Item as Nullable>::Value: Display,
    {
        self.filter_map(|item| item.as_present().map(ToString::to_string))
            .collect()
    }

    /// Renders items under `handling`.
    ///
    /// With `Include`, absent items stay `None` in the output.
    ///
    /// # Errors
    /// - `InvalidOperation` when `handling` is `Throw` and an item is absent.
    fn to_string_items_with(self, handling: NullItemHandling) -> ExtResult<Vec<Option<String>>>
    where
        Self::Item: Nullable,
        <Self::Item as Nullable>::Value: Display,
    {
        let mut rendered = Vec::new();
        for (item, index) in self.with_index() {
            match (item.as_present(), handling) {
                (Some(value), _) => rendered.push(Some(value.to_string())),
                (None, NullItemHandling::Remove) => {}
                (None, NullItemHandling::Include) => rendered.push(None),
                (None, NullItemHandling::Throw) => return Err(absent_item_error(index)),
            }
        }
        Ok(rendered)
    }

    /// Joins every item's text with `separator`.
    fn join_items(self, separator: &str) -> String
    where
        Self::Item: Display,
    {
        let mut joined = String::new();
        for (item, index) in self.with_index() {
            if index > 0 {
                joined.push_str(separator);
            }
            joined.push_str(&item.to_string());
        }
        joined
    }

    /// Joins possibly-absent items with `separator` under `handling`.
    ///
    /// With `Include`, absent items render as empty text: `["a", None, "b"]`
    /// joins to `"a,,b"`.
    ///
    /// # Errors
    /// - `InvalidOperation` when `handling` is `Throw` and an item is absent.
    fn join_nullable(self, separator: &str, handling: NullItemHandling) -> ExtResult<String>
    where
        Self::Item: Nullable,
        <Self::Item as Nullable>::Value: Display,
    {
        let rendered = self.to_string_items_with(handling)?;
        Ok(rendered
            .into_iter()
            .map(Option::unwrap_or_default)
            .join_items(separator))
    }

    /// Writes present items to `sink`, one per line, using the platform
    /// terminator. Absent items are skipped.
    fn write_items<W>(self, sink: &mut W) -> std::io::Result<()>
    where
        W: Write + ?Sized,
        Self::Item: Nullable,
        <Self::Item as Nullable>::Value: Display,
    {
        let terminator = LineEndingStyle::platform().terminator().unwrap_or("\n");
        for item in self {
            if let Some(value) = item.as_present() {
                write!(sink, "{value}{terminator}")?;
            }
        }
        Ok(())
    }

    /// [`IterExt::write_items`] to standard output.
    fn write_items_to_console(self) -> std::io::Result<()>
    where
        Self::Item: Nullable,
        <Self::Item as Nullable>::Value: Display,
    {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        self.write_items(&mut handle)?;
        handle.flush()
    }
}

impl<I: Iterator> IterExt for I {}

fn absent_item_error(index: usize) -> ExtError {
    ExtError::InvalidOperation(format!("sequence contains an absent item at index {index}"))
}
