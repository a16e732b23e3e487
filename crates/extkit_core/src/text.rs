//! Ordinal string predicates and affix transforms.
//!
//! Every comparison here is byte-exact: no locale-aware collation and no case
//! folding. The trait is implemented for anything that can be viewed as
//! `str`, so string newtypes get the same surface by implementing `AsRef<str>`.

use std::borrow::Cow;

/// Ordinal string helpers for `str`, `String` and string-like wrappers.
pub trait StrExt {
    fn starts_with_ordinal(&self, prefix: &str) -> bool;
    fn ends_with_ordinal(&self, suffix: &str) -> bool;
    fn contains_ordinal(&self, needle: &str) -> bool;

    /// Returns `self` without a trailing `suffix`, or `self` unchanged.
    ///
    /// An empty `self` or empty `suffix` is returned unchanged.
    fn remove_suffix(&self, suffix: &str) -> &str;

    /// Returns `self` without a leading `prefix`, or `self` unchanged.
    ///
    /// An empty `self` or empty `prefix` is returned unchanged.
    fn remove_prefix(&self, prefix: &str) -> &str;

    /// Replaces every non-overlapping occurrence of `old`, left to right.
    ///
    /// An empty `self` or empty `old` is borrowed back unchanged.
    fn replace_ordinal(&self, old: &str, new: &str) -> Cow<'_, str>;
}

impl<T> StrExt for T
where
    T: AsRef<str> + ?Sized,
{
    fn starts_with_ordinal(&self, prefix: &str) -> bool {
        self.as_ref().as_bytes().starts_with(prefix.as_bytes())
    }

    fn ends_with_ordinal(&self, suffix: &str) -> bool {
        self.as_ref().as_bytes().ends_with(suffix.as_bytes())
    }

    fn contains_ordinal(&self, needle: &str) -> bool {
        self.as_ref().contains(needle)
    }

    fn remove_suffix(&self, suffix: &str) -> &str {
        let value = self.as_ref();
        if value.is_empty() || suffix.is_empty() {
            return value;
        }
        value.strip_suffix(suffix).unwrap_or(value)
    }

    fn remove_prefix(&self, prefix: &str) -> &str {
        let value = self.as_ref();
        if value.is_empty() || prefix.is_empty() {
            return value;
        }
        value.strip_prefix(prefix).unwrap_or(value)
    }

    fn replace_ordinal(&self, old: &str, new: &str) -> Cow<'_, str> {
        let value = self.as_ref();
        if value.is_empty() || old.is_empty() {
            return Cow::Borrowed(value);
        }
        let mut matches = value.match_indices(old).peekable();
        if matches.peek().is_none() {
            return Cow::Borrowed(value);
        }
        let mut replaced = String::with_capacity(value.len());
        let mut copied_up_to = 0;
        for (start, found) in matches {
            replaced.push_str(&value[copied_up_to..start]);
            replaced.push_str(new);
            copied_up_to = start + found.len();
        }
        replaced.push_str(&value[copied_up_to..]);
        Cow::Owned(replaced)
    }
}
