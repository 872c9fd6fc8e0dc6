use crate::Result;
use crate::fs::search::{FileSearch, FindData};
use crate::util::SearchPattern;
use core::mem::ManuallyDrop;
use std::ffi::CString;
use windows_sys::Win32::Foundation::{ERROR_FILE_NOT_FOUND, GetLastError, HANDLE, INVALID_HANDLE_VALUE};
use windows_sys::Win32::Storage::FileSystem::{
    FindClose, FindFirstFileA, FindNextFileA, WIN32_FIND_DATAA,
};

/**
 Pattern search over the ANSI `FindFirstFileA`/`FindNextFileA`/`FindClose` calls.

 The OS does the pattern matching. A search whose pattern matched nothing keeps an
 invalid handle and simply reports exhaustion.
*/
pub struct FindFileSearch {
    handle: HANDLE,
    /// Scratch record the OS fills on every call
    data: WIN32_FIND_DATAA,
}

impl FindFileSearch {
    #[inline]
    fn is_open(&self) -> bool {
        !self.handle.is_null() && self.handle != INVALID_HANDLE_VALUE
    }

    #[allow(clippy::cast_sign_loss, trivial_numeric_casts)]
    fn current(&self) -> FindData {
        let name: Vec<u8> = self
            .data
            .cFileName
            .iter()
            .take_while(|&&c| c != 0)
            .map(|&c| c as u8)
            .collect();
        FindData::new(&name, self.data.dwFileAttributes)
    }
}

impl FileSearch for FindFileSearch {
    fn find_first(pattern: &SearchPattern) -> Result<(Self, Option<FindData>)> {
        let c_pattern = CString::new(pattern.as_str())?;
        // SAFETY: WIN32_FIND_DATAA is plain old data, all zeroes is a valid value
        let mut data: WIN32_FIND_DATAA = unsafe { core::mem::zeroed() };
        // SAFETY: the pattern is NUL terminated and `data` is writable
        let handle = unsafe { FindFirstFileA(c_pattern.as_ptr().cast(), &mut data) };

        let search = Self { handle, data };
        if search.is_open() {
            let first = search.current();
            return Ok((search, Some(first)));
        }

        // SAFETY: always safe
        let code = unsafe { GetLastError() };
        if code == ERROR_FILE_NOT_FOUND {
            // the directory is there, nothing in it matched
            return Ok((search, None));
        }
        #[allow(clippy::cast_possible_wrap)]
        let code = code as i32;
        Err(std::io::Error::from_raw_os_error(code).into())
    }

    fn find_next(&mut self) -> Option<FindData> {
        if !self.is_open() {
            return None;
        }
        // SAFETY: the handle is a live search and `data` is writable
        if unsafe { FindNextFileA(self.handle, &mut self.data) } == 0 {
            return None;
        }
        Some(self.current())
    }

    fn find_close(self) -> Result<()> {
        let this = ManuallyDrop::new(self);
        // SAFETY: Drop is suppressed, so the handle is closed exactly once
        if this.is_open() && unsafe { FindClose(this.handle) } == 0 {
            return_os_error!()
        }
        Ok(())
    }
}

impl Drop for FindFileSearch {
    fn drop(&mut self) {
        if self.is_open() {
            // SAFETY: the handle is live and `find_close` skips this drop
            unsafe { FindClose(self.handle) };
        }
    }
}
