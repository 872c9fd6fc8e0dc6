use crate::Result;
use crate::fs::search::{FileSearch, FindData};
use crate::util::SearchPattern;
use core::ffi::{CStr, c_char};
use core::mem::ManuallyDrop;
use core::ptr::NonNull;
use libc::{DIR, dirent};
use regex::bytes::Regex;
use std::ffi::CString;

/**
 Pattern search emulated over libc's `opendir`/`readdir`/`closedir`.

 libc has no pattern matching of its own, so non match-all globs are compiled to a
 regex and applied to each name. `.` and `..` come through like any other match;
 the stream above filters them.
*/
#[derive(Debug)]
pub struct LibcSearch {
    /// Raw directory pointer from libc's `opendir()` wrapped in a nonnull
    dir: NonNull<DIR>,
    /// `None` for match-all patterns
    matcher: Option<Regex>,
}

impl LibcSearch {
    /// Reads the next raw entry, `None` at end of directory or on error (readdir semantics).
    #[inline]
    fn next_dirent(&mut self) -> Option<NonNull<dirent>> {
        // SAFETY: `self.dir` is a valid directory stream owned by this struct
        NonNull::new(unsafe { libc::readdir(self.dir.as_ptr()) })
    }
}

// d_type is missing from `struct dirent` on some systems (illumos/solaris), build.rs probes for it.
#[cfg(has_d_type)]
#[inline]
fn raw_attributes(entry: NonNull<dirent>) -> u32 {
    // SAFETY: the entry came straight from readdir and is valid until the next call
    u32::from(unsafe { (*entry.as_ptr()).d_type })
}

#[cfg(not(has_d_type))]
#[inline]
const fn raw_attributes(_entry: NonNull<dirent>) -> u32 {
    0 // DT_UNKNOWN
}

impl FileSearch for LibcSearch {
    fn find_first(pattern: &SearchPattern) -> Result<(Self, Option<FindData>)> {
        let dir = match pattern.directory() {
            "" => ".",
            dir => dir,
        };
        let c_path = CString::new(dir)?;
        let matcher = pattern.compile()?;

        // SAFETY: we are passing a null terminated directory to opendir
        let dir = unsafe { libc::opendir(c_path.as_ptr()) };
        let Some(dir) = NonNull::new(dir) else {
            return_os_error!()
        };

        let mut search = Self { dir, matcher };
        let first = search.find_next();
        Ok((search, first))
    }

    fn find_next(&mut self) -> Option<FindData> {
        loop {
            let entry = self.next_dirent()?;
            // SAFETY: d_name is NUL terminated inside an entry readdir just returned
            let name = unsafe {
                CStr::from_ptr((&raw const (*entry.as_ptr()).d_name).cast::<c_char>())
            }
            .to_bytes();

            if self
                .matcher
                .as_ref()
                .is_some_and(|matcher| !matcher.is_match(name))
            {
                continue;
            }
            return Some(FindData::new(name, raw_attributes(entry)));
        }
    }

    fn find_close(self) -> Result<()> {
        let mut this = ManuallyDrop::new(self);
        drop(this.matcher.take());
        // SAFETY: Drop is suppressed, so this is the one and only closedir for the stream
        if unsafe { libc::closedir(this.dir.as_ptr()) } != 0 {
            return_os_error!()
        }
        Ok(())
    }
}

impl Drop for LibcSearch {
    /// Closes the directory stream so the descriptor isn't leaked.
    #[inline]
    fn drop(&mut self) {
        // SAFETY: the stream is open, `find_close` skips this drop
        unsafe { libc::closedir(self.dir.as_ptr()) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(search: &mut LibcSearch, first: Option<FindData>) -> Vec<Vec<u8>> {
        let mut names: Vec<Vec<u8>> = first.into_iter().map(|data| data.name.to_vec()).collect();
        while let Some(data) = search.find_next() {
            names.push(data.name.to_vec());
        }
        names.sort();
        names
    }

    #[test]
    fn finds_every_entry_including_dots() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("a.txt"), "a").unwrap();
        std::fs::create_dir(tmp.path().join("sub")).unwrap();

        let pattern = SearchPattern::match_all(tmp.path().to_str().unwrap());
        let (mut search, first) = LibcSearch::find_first(&pattern).unwrap();
        let found = names(&mut search, first);
        assert_eq!(
            found,
            vec![b".".to_vec(), b"..".to_vec(), b"a.txt".to_vec(), b"sub".to_vec()]
        );
        search.find_close().unwrap();
    }

    #[test]
    fn filters_by_glob() {
        let tmp = tempfile::tempdir().unwrap();
        for name in ["one.json", "two.json", "three.png"] {
            std::fs::write(tmp.path().join(name), "").unwrap();
        }

        let pattern = SearchPattern::new(tmp.path().to_str().unwrap(), "*.json").unwrap();
        let (mut search, first) = LibcSearch::find_first(&pattern).unwrap();
        assert_eq!(
            names(&mut search, first),
            vec![b"one.json".to_vec(), b"two.json".to_vec()]
        );
    }

    #[test]
    fn empty_match_is_not_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let pattern = SearchPattern::new(tmp.path().to_str().unwrap(), "*.ogg").unwrap();
        let (mut search, first) = LibcSearch::find_first(&pattern).unwrap();
        assert!(first.is_none());
        assert!(search.find_next().is_none());
    }

    #[cfg(has_d_type)]
    #[test]
    fn passes_d_type_through() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join("sub")).unwrap();
        let pattern = SearchPattern::new(tmp.path().to_str().unwrap(), "sub").unwrap();
        let (_search, first) = LibcSearch::find_first(&pattern).unwrap();
        let first = first.unwrap();
        // tmpfs and ext4 both report it, DT_UNKNOWN (0) is still legal
        assert!(first.attributes == u32::from(libc::DT_DIR) || first.attributes == 0);
    }

    #[test]
    fn missing_directory_errors() {
        let pattern = SearchPattern::match_all("/definitely/not/a/real/dir");
        let err = LibcSearch::find_first(&pattern).unwrap_err();
        assert!(matches!(err, crate::IoError::InvalidPath));
    }
}
