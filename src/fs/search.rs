use crate::Result;
use crate::util::SearchPattern;

/// One match produced by a native search: the raw name plus the platform attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindData {
    pub(crate) name: Box<[u8]>,
    pub(crate) attributes: u32,
}

impl FindData {
    #[inline]
    #[must_use]
    pub fn new(name: &[u8], attributes: u32) -> Self {
        Self {
            name: name.into(),
            attributes,
        }
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &[u8] {
        &self.name
    }

    #[inline]
    #[must_use]
    pub const fn attributes(&self) -> u32 {
        self.attributes
    }
}

/**
 A native "find files matching a pattern" primitive.

 This is the shape of `FindFirstFile`/`FindNextFile`/`FindClose`: starting a search
 already yields the first match, and the search context is released separately.
 [`DirStream`](crate::fs::DirStream) builds a POSIX style directory stream on top of it.

 Implementations must release their native handle on drop as well, `find_close`
 only exists to report the close status.
*/
pub trait FileSearch: Sized {
    /**
     Starts a search, returning the context and the first match.

     The first match is `None` when the directory exists but nothing matches.

     # Errors
     Fails when the directory can't be searched (missing, not a directory, no access).
    */
    fn find_first(pattern: &SearchPattern) -> Result<(Self, Option<FindData>)>;

    /// Advances to the next match, `None` once the search is exhausted.
    fn find_next(&mut self) -> Option<FindData>;

    /**
     Releases the native search context.

     # Errors
     Returns the OS error if the native close call reports a failure.
    */
    fn find_close(self) -> Result<()>;
}
