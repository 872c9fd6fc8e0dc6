#[cfg(not(windows))]
use libc::{EACCES, EINVAL, ENAMETOOLONG, ENOENT, ENOTDIR};
use std::{fmt, io};

#[derive(Debug)]
/// An error type for directory stream and file operations.
///
/// The public asset operations (`resolve`, `list_files`, `read_file`...) turn these into
/// absent results after logging, the lower layers hand them back so callers can decide.
pub enum IoError {
    /// The path does not exist, or contains an interior NUL
    InvalidPath,
    NotADirectory,
    NameTooLong,
    /// `closedir` was handed a stream that was never opened
    NullHandle,
    AccessDenied(io::Error),
    BrokenPipe(io::Error),
    OSerror(io::Error),
    /// Not enough memory to hold a listing or file contents
    OutOfMemory(usize),
    PatternError(regex::Error),
}

impl From<io::Error> for IoError {
    fn from(error: io::Error) -> Self {
        if error.kind() == io::ErrorKind::BrokenPipe {
            return Self::BrokenPipe(error);
        }

        // map OS error codes to variants
        if let Some(code) = error.raw_os_error() {
            return Self::from_os_code(code, error);
        }

        Self::OSerror(error)
    }
}

impl IoError {
    #[cfg(not(windows))]
    fn from_os_code(code: i32, error: io::Error) -> Self {
        match code {
            EINVAL | ENOENT => Self::InvalidPath,
            ENOTDIR => Self::NotADirectory,
            ENAMETOOLONG => Self::NameTooLong,
            EACCES => Self::AccessDenied(error),
            _ => Self::OSerror(error),
        }
    }

    // windows reports through GetLastError, which shares no numbering with errno
    #[cfg(windows)]
    #[allow(clippy::cast_sign_loss)]
    fn from_os_code(code: i32, error: io::Error) -> Self {
        use windows_sys::Win32::Foundation::{
            ERROR_ACCESS_DENIED, ERROR_DIRECTORY, ERROR_FILE_NOT_FOUND, ERROR_FILENAME_EXCED_RANGE,
            ERROR_INVALID_NAME, ERROR_PATH_NOT_FOUND,
        };
        match code as u32 {
            ERROR_FILE_NOT_FOUND | ERROR_PATH_NOT_FOUND | ERROR_INVALID_NAME => Self::InvalidPath,
            ERROR_DIRECTORY => Self::NotADirectory,
            ERROR_FILENAME_EXCED_RANGE => Self::NameTooLong,
            ERROR_ACCESS_DENIED => Self::AccessDenied(error),
            _ => Self::OSerror(error),
        }
    }
}

impl From<regex::Error> for IoError {
    fn from(e: regex::Error) -> Self {
        Self::PatternError(e)
    }
}

impl From<std::ffi::NulError> for IoError {
    fn from(_: std::ffi::NulError) -> Self {
        Self::InvalidPath
    }
}

#[allow(clippy::pattern_type_mismatch)]
impl fmt::Display for IoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPath => write!(f, "Invalid path, no such file or directory"),
            Self::NotADirectory => write!(f, "Not a directory"),
            Self::NameTooLong => write!(f, "File name too long"),
            Self::NullHandle => write!(f, "Directory stream was never opened"),
            Self::AccessDenied(e) => write!(f, "Access denied: {e}"),
            Self::BrokenPipe(e) => write!(f, "Broken pipe: {e}"),
            Self::OSerror(e) => write!(f, "OS error: {e}"),
            Self::OutOfMemory(bytes) => write!(f, "Allocation of {bytes} bytes failed"),
            Self::PatternError(e) => write!(f, "Invalid search pattern: {e}"),
        }
    }
}

#[allow(clippy::pattern_type_mismatch)]
impl std::error::Error for IoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::AccessDenied(e) | Self::BrokenPipe(e) | Self::OSerror(e) => Some(e),
            Self::PatternError(e) => Some(e),
            _ => None,
        }
    }
}
