use crate::fs::dir_entry::{DirEntry, is_dot_or_dot_dot};
use crate::fs::search::{FileSearch, FindData};
use crate::fs::NativeSearch;
use crate::util::SearchPattern;
use crate::{IoError, Result};
use log::{debug, warn};

/**
 A POSIX style directory stream built on a native pattern search.

 Reading follows `readdir` semantics: entries come back one at a time, `.` and `..`
 are skipped and `None` marks the end. Hidden entries are *not* filtered here.

 The search backend is chosen at compile time through [`NativeSearch`], the type
 parameter only exists so another [`FileSearch`] can be slotted in.

 # Examples
 ```no_run
 use assetio::fs::DirStream;

 let mut stream = DirStream::open("assets/levels")?;
 while let Some(entry) = stream.read() {
     println!("{entry}");
 }
 stream.close()?;
 # Ok::<(), assetio::IoError>(())
 ```
*/
#[derive(Debug)]
pub struct DirStream<S: FileSearch = NativeSearch> {
    /// `None` once a rewind failed to restart the search
    search: Option<S>,
    /// The match the search start produced, handed out by the first read
    pending: Option<FindData>,
    pattern: SearchPattern,
    first_read: bool,
}

impl DirStream {
    /**
     Opens a stream over every entry of `path`.

     # Errors
     Fails if the directory can't be searched. The failure is logged along with the
     pattern that was tried.
    */
    #[inline]
    pub fn open(path: &str) -> Result<Self> {
        Self::open_with(SearchPattern::match_all(path))
    }

    /**
     Opens a stream over the entries of `path` matching `glob`.

     # Errors
     Fails on a glob containing a separator or a directory that can't be searched.
    */
    #[inline]
    pub fn open_matching(path: &str, glob: &str) -> Result<Self> {
        Self::open_with(SearchPattern::new(path, glob)?)
    }
}

impl<S: FileSearch> DirStream<S> {
    /**
     Opens a stream from a prepared pattern.

     # Errors
     Returns the backend's error when the search can't be started.
    */
    pub fn open_with(pattern: SearchPattern) -> Result<Self> {
        match S::find_first(&pattern) {
            Ok((search, first)) => Ok(Self {
                search: Some(search),
                pending: first,
                pattern,
                first_read: true,
            }),
            Err(error) => {
                warn!(
                    "failed to open directory {:?} (pattern {pattern}): {error}",
                    pattern.directory()
                );
                Err(error)
            }
        }
    }

    /// Returns the next entry other than `.`/`..`, `None` when the stream is exhausted.
    pub fn read(&mut self) -> Option<DirEntry> {
        loop {
            let data = if self.first_read {
                self.first_read = false;
                self.pending.take()?
            } else {
                self.search.as_mut()?.find_next()?
            };

            if !is_dot_or_dot_dot(&data.name) {
                return Some(data.into());
            }
        }
    }

    /**
     Restarts the search from the beginning with the saved pattern.

     If the restart fails the stream stays exhausted, reads return `None` until the
     next successful rewind.
    */
    pub fn rewind(&mut self) {
        if let Some(search) = self.search.take() {
            if let Err(error) = search.find_close() {
                debug!("closing search {} before rewind: {error}", self.pattern);
            }
        }

        match S::find_first(&self.pattern) {
            Ok((search, first)) => {
                self.search = Some(search);
                self.pending = first;
                self.first_read = true;
            }
            Err(error) => {
                warn!("failed to restart search {}: {error}", self.pattern);
                self.pending = None;
                self.first_read = false;
            }
        }
    }

    /**
     Releases the native search.

     # Errors
     Returns the error reported by the native close call.
    */
    #[inline]
    pub fn close(self) -> Result<()> {
        self.search.map_or(Ok(()), S::find_close)
    }

    /// The pattern the stream searches with
    #[inline]
    #[must_use]
    pub const fn pattern(&self) -> &SearchPattern {
        &self.pattern
    }
}

impl<S: FileSearch> Iterator for DirStream<S> {
    type Item = DirEntry;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.read()
    }
}

/// Opens a directory stream, `None` (already logged) on failure.
#[inline]
#[must_use]
pub fn opendir(path: &str) -> Option<DirStream> {
    DirStream::open(path).ok()
}

/// Next visible entry, `.` and `..` skipped.
#[inline]
pub fn readdir<S: FileSearch>(stream: &mut DirStream<S>) -> Option<DirEntry> {
    stream.read()
}

/// Restarts the stream from its first entry.
#[inline]
pub fn rewinddir<S: FileSearch>(stream: &mut DirStream<S>) {
    stream.rewind();
}

/**
 Closes a stream returned by [`opendir`].

 # Errors
 Returns [`IoError::NullHandle`] when handed `None`, the equivalent of closing a null
 `DIR*`, otherwise whatever the native close reports.
*/
#[inline]
pub fn closedir<S: FileSearch>(stream: Option<DirStream<S>>) -> Result<()> {
    stream.ok_or(IoError::NullHandle)?.close()
}
