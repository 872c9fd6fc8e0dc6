//! `dir/<glob>` search patterns in the shape `FindFirstFile` expects.
//!
//! Only the two wildcards that call understands are supported:
//! - `*` matches any run of characters, including none
//! - `?` matches exactly one character
//!
//! Everything else matches literally. `*.*` is treated as match-all, the way
//! the windows search does for names without an extension.

use crate::fs::NAME_MAX;
use crate::util::path::{DIR_SEP_CHAR, is_separator, truncate_to};
use regex::bytes::{Regex, RegexBuilder};

/// The glob that matches every entry
pub const MATCH_ALL: &str = "*";

/// A directory plus a glob for its entries, stored as one `path<sep>glob` string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPattern {
    pattern: String,
    glob_start: usize,
}

impl SearchPattern {
    /// A pattern matching everything in `dir`.
    ///
    /// ```
    /// use assetio::util::{SearchPattern, DIR_SEP_CHAR};
    /// let pattern = SearchPattern::match_all("assets/gfx");
    /// assert_eq!(pattern.as_str(), format!("assets/gfx{DIR_SEP_CHAR}*"));
    /// assert!(pattern.is_match_all());
    /// ```
    #[must_use]
    pub fn match_all(dir: &str) -> Self {
        Self::build(dir, MATCH_ALL)
    }

    /**
     A pattern matching the entries of `dir` selected by `glob`.

     # Errors
     Returns [`IoError::InvalidPath`](crate::IoError::InvalidPath) when the glob contains a
     separator, the search only ever looks inside one directory.
    */
    pub fn new(dir: &str, glob: &str) -> crate::Result<Self> {
        if glob.bytes().any(is_separator) {
            return Err(crate::IoError::InvalidPath);
        }
        Ok(Self::build(dir, if glob.is_empty() { MATCH_ALL } else { glob }))
    }

    fn build(dir: &str, glob: &str) -> Self {
        // room for a separator, the wildcard and the NUL
        let mut pattern = String::with_capacity(NAME_MAX);
        pattern.push_str(truncate_to(dir, NAME_MAX - 3));
        if pattern
            .as_bytes()
            .last()
            .is_some_and(|&byte| !is_separator(byte))
        {
            pattern.push(DIR_SEP_CHAR);
        }
        let glob_start = pattern.len();
        let room = (NAME_MAX - 1).saturating_sub(glob_start);
        pattern.push_str(truncate_to(glob, room));
        Self {
            pattern,
            glob_start,
        }
    }

    /// The whole pattern, as handed to a native search
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// The directory part, trailing separator included, empty for the current directory
    #[inline]
    #[must_use]
    pub fn directory(&self) -> &str {
        &self.pattern[..self.glob_start]
    }

    /// The wildcard part after the directory
    #[inline]
    #[must_use]
    pub fn glob(&self) -> &str {
        &self.pattern[self.glob_start..]
    }

    /// Whether every entry matches (`*` or `*.*`)
    #[inline]
    #[must_use]
    pub fn is_match_all(&self) -> bool {
        matches!(self.glob(), "*" | "*.*")
    }

    /**
     Compiles the glob for backends that have to filter entries themselves.

     Returns `None` for match-all patterns so the caller can skip matching entirely.

     # Errors
     Returns an error if the generated expression fails to compile.
    */
    pub fn compile(&self) -> Result<Option<Regex>, regex::Error> {
        if self.is_match_all() {
            return Ok(None);
        }
        glob_to_regex(self.glob()).map(Some)
    }
}

impl core::fmt::Display for SearchPattern {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.pattern)
    }
}

/**
 Converts a `*`/`?` glob into an anchored byte regex.

 Both wildcards are allowed to run over bytes that aren't valid UTF-8, unix names are
 just bytes. `?` still takes a whole character when the name has a valid one there.

 # Errors
 Returns an error if the resulting expression fails to compile.

 # Examples
 ```
 let re = assetio::util::glob_to_regex("level?.json").unwrap();
 assert!(re.is_match(b"level1.json"));
 assert!(!re.is_match(b"level10.json"));
 ```
*/
pub fn glob_to_regex(glob: &str) -> Result<Regex, regex::Error> {
    let mut expr = String::with_capacity(glob.len() * 2 + 2);
    let mut utf8 = [0u8; 4];
    expr.push('^');
    for c in glob.chars() {
        match c {
            '*' => expr.push_str("(?s-u:.)*"),
            '?' => expr.push_str("(?:(?s:.)|(?s-u:.))"),
            literal => expr.push_str(&regex::escape(literal.encode_utf8(&mut utf8))),
        }
    }
    expr.push('$');
    RegexBuilder::new(&expr).build()
}
