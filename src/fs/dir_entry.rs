use crate::fs::NAME_MAX;
use crate::fs::search::FindData;
use core::fmt;

/**
 A single entry produced by a [`DirStream`](crate::fs::DirStream).

 Holds the entry's name, capped at `NAME_MAX - 1` bytes, and the platform's raw
 attribute value. The attribute is passed through uninterpreted: `d_type` on unix,
 `dwFileAttributes` on windows.

 Entries are owned, reading further from the stream never invalidates one.
*/
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct DirEntry {
    name: Box<[u8]>,
    attributes: u32,
}

impl DirEntry {
    #[inline]
    #[must_use]
    pub fn new(name: &[u8], attributes: u32) -> Self {
        let len = name.len().min(NAME_MAX - 1);
        Self {
            name: name[..len].into(),
            attributes,
        }
    }

    /// The entry's name as raw bytes
    #[inline]
    #[must_use]
    pub fn name(&self) -> &[u8] {
        &self.name
    }

    /**
     Returns the name as a `&str`.

     # Errors
     Returns [`Utf8Error`](core::str::Utf8Error) if the name is not valid UTF-8,
     which can happen with arbitrary unix names or a name cut inside a character.
    */
    #[inline]
    pub fn as_str(&self) -> core::result::Result<&str, core::str::Utf8Error> {
        core::str::from_utf8(&self.name)
    }

    /// Converts the name to a string, replacing invalid UTF-8 with `U+FFFD`
    #[inline]
    #[must_use]
    pub fn name_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.name)
    }

    #[inline]
    #[must_use]
    pub const fn attributes(&self) -> u32 {
        self.attributes
    }

    /// Names starting with a `.` count as hidden
    #[inline]
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.name.first() == Some(&b'.')
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.name.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }
}

/// `.` and `..`, the two entries a directory stream never reports.
#[inline]
pub(crate) fn is_dot_or_dot_dot(name: &[u8]) -> bool {
    matches!(name, b"." | b"..")
}

impl From<FindData> for DirEntry {
    #[inline]
    fn from(data: FindData) -> Self {
        if data.name.len() < NAME_MAX {
            return Self {
                name: data.name,
                attributes: data.attributes,
            };
        }
        Self::new(&data.name, data.attributes)
    }
}

impl core::ops::Deref for DirEntry {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &[u8] {
        &self.name
    }
}

impl AsRef<[u8]> for DirEntry {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.name
    }
}

impl fmt::Display for DirEntry {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name_lossy())
    }
}

impl fmt::Debug for DirEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DirEntry")
            .field("name", &self.name_lossy())
            .field("attributes", &format_args!("{:#x}", self.attributes))
            .finish()
    }
}
