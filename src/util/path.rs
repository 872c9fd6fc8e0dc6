/// Separator the host platform prefers
#[cfg(windows)]
pub const DIR_SEP: u8 = b'\\';
/// Separator the host platform prefers
#[cfg(not(windows))]
pub const DIR_SEP: u8 = b'/';

/// [`DIR_SEP`] as a `char`, for building strings
pub const DIR_SEP_CHAR: char = DIR_SEP as char;

// The separator every path gets rewritten away from.
const FOREIGN_SEP: u8 = if DIR_SEP == b'/' { b'\\' } else { b'/' };

/// Capacity of every path buffer, counting the terminating NUL as a C caller would.
pub const MAX_FILENAME_LENGTH: usize = 260;

/// Either separator style counts, callers hand us both.
#[inline]
#[must_use]
pub const fn is_separator(byte: u8) -> bool {
    byte == b'/' || byte == b'\\'
}

/// Rewrites every separator in `path` to [`DIR_SEP`], in place.
#[inline]
pub fn normalize_separators_bytes(path: &mut [u8]) {
    path.iter_mut()
        .filter(|byte| **byte == FOREIGN_SEP)
        .for_each(|byte| *byte = DIR_SEP);
}

/**
 Rewrites every separator in `path` to the platform separator, in place.

 A no-op on empty input, and idempotent.

 # Examples
 ```
 use assetio::util::{normalize_separators, DIR_SEP_CHAR};
 let mut path = String::from("gfx/sprites\\player.png");
 normalize_separators(&mut path);
 assert_eq!(path, format!("gfx{DIR_SEP_CHAR}sprites{DIR_SEP_CHAR}player.png"));
 ```
*/
#[inline]
pub fn normalize_separators(path: &mut String) {
    if path.is_empty() {
        return;
    }
    // SAFETY: one ASCII byte is swapped for another, the buffer stays valid UTF-8
    normalize_separators_bytes(unsafe { path.as_mut_vec() });
}

/**
 Joins `base` and `leaf` into the fixed buffer `out` and returns the content length.

 Exactly one separator is placed between the two (only when `base` is non-empty and
 doesn't already end in one), leading separators on `leaf` are dropped, and the result
 is normalized. The last byte of `out` is reserved for a terminating NUL, so at most
 `out.len() - 1` bytes of content are written; anything longer is silently cut.
 Nothing is ever written past `out.len()`.
*/
#[must_use]
pub fn join_path_into(out: &mut [u8], base: &[u8], leaf: &[u8]) -> usize {
    let Some(limit) = out.len().checked_sub(1) else {
        return 0;
    };

    let mut len = base.len().min(limit);
    out[..len].copy_from_slice(&base[..len]);

    if len > 0 && !is_separator(out[len - 1]) && len < limit {
        out[len] = DIR_SEP;
        len += 1;
    }

    let leaf_start = leaf
        .iter()
        .position(|&byte| !is_separator(byte))
        .unwrap_or(leaf.len());
    let leaf = &leaf[leaf_start..];

    let take = leaf.len().min(limit - len);
    out[len..len + take].copy_from_slice(&leaf[..take]);
    len += take;
    out[len] = 0;

    normalize_separators_bytes(&mut out[..len]);
    len
}

/**
 Joins two path segments, see [`join_path_into`] for the rules.

 `capacity` is the size of the buffer a C caller would have supplied, so the result
 holds at most `capacity - 1` bytes. A cut that lands inside a multi-byte character
 drops that whole character.

 # Examples
 ```
 use assetio::util::{join_path, DIR_SEP_CHAR};
 assert_eq!(join_path("assets/", "/music", 64), format!("assets{DIR_SEP_CHAR}music"));
 assert_eq!(join_path("assets", "music", 8), "assets".to_owned() + &DIR_SEP_CHAR.to_string());
 ```
*/
#[must_use]
pub fn join_path(base: &str, leaf: &str, capacity: usize) -> String {
    let mut buffer = vec![0u8; capacity];
    let len = join_path_into(&mut buffer, base.as_bytes(), leaf.as_bytes());
    buffer.truncate(len);
    into_valid_prefix(buffer)
}

/// Longest prefix of `s` that fits in `max` bytes without splitting a character.
#[inline]
#[must_use]
pub fn truncate_to(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Strips one leading `<prefix>/` or `<prefix>\` from `name`, if present.
#[inline]
#[must_use]
pub fn strip_data_prefix<'name>(name: &'name str, prefix: &str) -> &'name str {
    if prefix.is_empty() {
        return name;
    }
    match name.strip_prefix(prefix) {
        Some(rest) if rest.as_bytes().first().is_some_and(|&byte| is_separator(byte)) => &rest[1..],
        _ => name,
    }
}

/// Appends [`DIR_SEP`] unless `path` is empty or already ends in a separator.
#[inline]
pub fn ensure_trailing_separator(path: &mut String) {
    if path.as_bytes().last().is_some_and(|&byte| !is_separator(byte)) {
        path.push(DIR_SEP_CHAR);
    }
}

// Inputs are valid UTF-8, so only a truncated tail can be broken.
fn into_valid_prefix(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).unwrap_or_else(|err| {
        let valid = err.utf8_error().valid_up_to();
        let mut bytes = err.into_bytes();
        bytes.truncate(valid);
        String::from_utf8(bytes).unwrap_or_default()
    })
}
