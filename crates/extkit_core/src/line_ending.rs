//! Line terminator classification and normalization.
//!
//! # Responsibility
//! - Report which terminator conventions occur in a string.
//! - Rewrite every terminator to one target convention.
//!
//! # Invariants
//! - `\r\n` is always one Windows terminator, never a Mac one followed by a Unix one.
//! - Normalizing twice to the same style equals normalizing once.
//! - `Mixed` describes input; it is never accepted as a rewrite target.

use crate::error::{ExtError, ExtResult};
use log::debug;
use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

// Alternation order matters: leftmost-first matching takes `\r\n` before `\r`.
static TERMINATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\r\n|\r|\n").expect("valid terminator regex"));

/// Terminator convention found in, or requested for, a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineEndingStyle {
    /// No terminators at all.
    None,
    /// `\n`
    Unix,
    /// `\r\n`
    Windows,
    /// `\r`
    Mac,
    /// Two or more of the above in the same text.
    Mixed,
}

impl LineEndingStyle {
    /// Stable string id used by config values and `FromStr`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Unix => "unix",
            Self::Windows => "windows",
            Self::Mac => "mac",
            Self::Mixed => "mixed",
        }
    }

    /// Terminator text written for this style; `None` for `Mixed`.
    pub fn terminator(self) -> Option<&'static str> {
        match self {
            Self::None => Some(""),
            Self::Unix => Some("\n"),
            Self::Windows => Some("\r\n"),
            Self::Mac => Some("\r"),
            Self::Mixed => None,
        }
    }

    /// Convention of the compilation target.
    pub fn platform() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Unix
        }
    }
}

impl Display for LineEndingStyle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LineEndingStyle {
    type Err = ExtError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim();
        if normalized.is_empty() {
            return Err(ExtError::invalid_argument(
                "style",
                "line ending style must not be empty",
            ));
        }
        match normalized {
            "none" => Ok(Self::None),
            "unix" => Ok(Self::Unix),
            "windows" => Ok(Self::Windows),
            "mac" => Ok(Self::Mac),
            "mixed" => Ok(Self::Mixed),
            other => Err(ExtError::NotImplemented(format!(
                "unknown line ending style `{other}`"
            ))),
        }
    }
}

impl TryFrom<i32> for LineEndingStyle {
    type Error = ExtError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::Unix),
            2 => Ok(Self::Windows),
            3 => Ok(Self::Mac),
            4 => Ok(Self::Mixed),
            other => Err(ExtError::NotImplemented(format!(
                "unknown line ending style discriminant {other}"
            ))),
        }
    }
}

/// Classifies the terminators used in `input`.
///
/// Each form is only tested for presence. Empty input and input without any
/// terminator both report [`LineEndingStyle::None`].
pub fn determine_line_endings(input: &str) -> LineEndingStyle {
    let mut unix = false;
    let mut windows = false;
    let mut mac = false;

    for found in TERMINATOR_RE.find_iter(input) {
        match found.as_str() {
            "\r\n" => windows = true,
            "\r" => mac = true,
            _ => unix = true,
        }
        if [unix, windows, mac].iter().filter(|seen| **seen).count() > 1 {
            return LineEndingStyle::Mixed;
        }
    }

    match (unix, windows, mac) {
        (true, _, _) => LineEndingStyle::Unix,
        (_, true, _) => LineEndingStyle::Windows,
        (_, _, true) => LineEndingStyle::Mac,
        _ => LineEndingStyle::None,
    }
}

/// Rewrites every terminator in `input` to the one used by `style`.
///
/// `LineEndingStyle::None` deletes all terminators. Input is borrowed back
/// unchanged when it is empty, has no terminator, or already uses only the
/// target terminator.
///
/// # Errors
/// - `InvalidArgument` when `style` is `Mixed`.
pub fn normalize_line_endings(input: &str, style: LineEndingStyle) -> ExtResult<Cow<'_, str>> {
    let Some(terminator) = style.terminator() else {
        return Err(ExtError::invalid_argument(
            "style",
            "`mixed` is a classification result, not a normalization target",
        ));
    };
    Ok(rewrite_terminators(input, style, terminator))
}

/// Same as [`normalize_line_endings`], except a `Mixed` target is rewritten
/// as `Unix` instead of rejected.
///
/// Compatibility shim for callers that persisted `mixed` as a target style.
pub fn normalize_line_endings_legacy(input: &str, style: LineEndingStyle) -> Cow<'_, str> {
    let target = if style == LineEndingStyle::Mixed {
        debug!("event=line_ending_legacy_target module=line_ending status=ok from=mixed to=unix");
        LineEndingStyle::Unix
    } else {
        style
    };
    rewrite_terminators(input, target, target.terminator().unwrap_or("\n"))
}

fn rewrite_terminators<'a>(
    input: &'a str,
    target: LineEndingStyle,
    terminator: &str,
) -> Cow<'a, str> {
    let current = determine_line_endings(input);
    if current == LineEndingStyle::None || current == target {
        return Cow::Borrowed(input);
    }
    TERMINATOR_RE.replace_all(input, NoExpand(terminator))
}
