//! Directory streams emulated over native "find files matching a pattern" searches.
//!
//! [`DirStream`] offers open/read/rewind/close with `readdir` semantics on every
//! platform. Underneath sits one [`FileSearch`] backend picked at compile time:
//! - unix: `opendir`/`readdir`/`closedir` from libc, glob matching done in process
//! - windows: `FindFirstFileA`/`FindNextFileA`/`FindClose`

mod dir_entry;
mod dir_stream;
mod search;

#[cfg(not(windows))]
mod unix;
#[cfg(windows)]
mod windows;

pub use dir_entry::DirEntry;
pub use dir_stream::{DirStream, closedir, opendir, readdir, rewinddir};
pub use search::{FileSearch, FindData};

#[cfg(not(windows))]
pub use unix::LibcSearch;
#[cfg(windows)]
pub use windows::FindFileSearch;

/// The longest entry name or search pattern the streams handle, terminator included.
pub const NAME_MAX: usize = 260;

/// The search backend for the target platform.
#[cfg(not(windows))]
pub type NativeSearch = LibcSearch;
/// The search backend for the target platform.
#[cfg(windows)]
pub type NativeSearch = FindFileSearch;
