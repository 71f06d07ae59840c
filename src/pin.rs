//! Pinned revision extraction and substitution.
//!
//! A pin is a three-part match: literal prefix, the captured revision, and
//! literal suffix. Only the middle part is ever rewritten. Matching works on
//! raw bytes, so the rest of the file need not be valid UTF-8.

use crate::constants::{PIN_PREFIX, PIN_SUFFIX};
use regex::bytes::{Captures, Regex};
use std::borrow::Cow;

/// Compiled three-part pin pattern.
#[derive(Debug, Clone)]
pub struct PinPattern {
    re: Regex,
}

impl PinPattern {
    /// Builds a pattern from a prefix and suffix, both given as regex source.
    ///
    /// The revision in between is matched non-greedily, never crosses a `"`,
    /// and the whole match may span newlines.
    ///
    /// # Errors
    ///
    /// Returns the regex compilation error if either part is malformed.
    pub fn new(prefix: &str, suffix: &str) -> Result<Self, regex::Error> {
        let re = Regex::new(&format!(r#"(?s)({prefix})([^"]+?)({suffix})"#))?;
        Ok(Self { re })
    }

    /// Pattern for `import (fetchTarball "https://github.com/NixOS/nixpkgs/archive/<rev>.tar.gz")`.
    #[must_use]
    pub fn nixpkgs() -> Self {
        Self::new(PIN_PREFIX, PIN_SUFFIX).expect("Invalid nixpkgs pin pattern")
    }

    /// Returns the pinned revision, or `None` if the content has no pin.
    ///
    /// Callers that know which file they read turn `None` into
    /// `HeadbumpError::PatternNotFound`.
    #[must_use]
    pub fn extract<'a>(&self, content: &'a [u8]) -> Option<&'a [u8]> {
        self.re
            .captures(content)
            .and_then(|caps| caps.get(2))
            .map(|m| m.as_bytes())
    }

    /// Replaces every pinned revision with `version`, keeping prefix and suffix.
    ///
    /// Borrows the input when nothing matched.
    pub fn patch<'a>(&self, content: &'a [u8], version: &str) -> Cow<'a, [u8]> {
        self.re.replace_all(content, |caps: &Captures| {
            [&caps[1], version.as_bytes(), &caps[3]].concat()
        })
    }
}

impl Default for PinPattern {
    fn default() -> Self {
        Self::nixpkgs()
    }
}
