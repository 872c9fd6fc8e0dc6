use crate::IoError;
use crate::resolve::{AssetResolver, PathProbe};
use crate::util::{MAX_FILENAME_LENGTH, normalize_separators, truncate_to};
use log::{debug, error, warn};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};

/**
 Reads a whole asset into memory, followed by a terminating `0` byte.

 The file is found through the resolver. For a file of `n` bytes the buffer holds
 `n + 1` bytes. If the file shrinks between sizing and reading, the terminator goes
 right after the bytes that were actually read.

 Returns `None` (after logging) when the name can't be resolved, the file can't be
 opened or read, or the buffer can't be allocated.
*/
pub fn read_file<P: PathProbe>(resolver: &AssetResolver<'_, P>, filename: &str) -> Option<Vec<u8>> {
    let Some(path) = resolver.resolve(filename) else {
        warn!("read_file: could not resolve {filename:?}");
        return None;
    };
    debug!("read {filename:?} -> {path}");

    let mut file = match File::open(path.as_path()) {
        Ok(file) => file,
        Err(err) => {
            warn!("read_file: open failed for {path}: {err}");
            return None;
        }
    };

    // the resolver accepts directories, their seek offsets are not a size
    match file.metadata() {
        Ok(meta) if meta.is_file() => {}
        Ok(_) => {
            warn!("read_file: {path} is not a regular file");
            return None;
        }
        Err(err) => {
            warn!("read_file: could not stat {path}: {err}");
            return None;
        }
    }

    let length = match file.seek(SeekFrom::End(0)).and_then(|len| {
        file.seek(SeekFrom::Start(0))?;
        Ok(len)
    }) {
        Ok(len) => len,
        Err(err) => {
            warn!("read_file: could not size {path}: {err}");
            return None;
        }
    };
    let Ok(size) = usize::try_from(length) else {
        error!("read_file: {path} is too large to load ({length} bytes)");
        return None;
    };

    let mut buffer: Vec<u8> = Vec::new();
    if buffer.try_reserve_exact(size + 1).is_err() {
        error!("read_file: {} for {path}", IoError::OutOfMemory(size + 1));
        return None;
    }

    let read = match file.take(length).read_to_end(&mut buffer) {
        Ok(read) => read,
        Err(err) => {
            warn!("read_file: reading {path} failed: {err}");
            return None;
        }
    };
    if read < size {
        debug!("read_file: short read on {path}, {read} of {size} bytes");
    }
    buffer.push(0);
    debug!("read ok: {size} bytes ({read} actually read)");
    Some(buffer)
}

/// [`read_file`] decoded as text, without the trailing `0`. Invalid UTF-8 is replaced.
pub fn read_text<P: PathProbe>(resolver: &AssetResolver<'_, P>, filename: &str) -> Option<String> {
    let mut bytes = read_file(resolver, filename)?;
    bytes.pop();
    Some(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    })
}

/// Separator normalized copy of a literal path, capped like the buffers it replaces.
fn literal_path(filename: &str) -> String {
    let mut fixed = truncate_to(filename, MAX_FILENAME_LENGTH - 1).to_owned();
    normalize_separators(&mut fixed);
    fixed
}

/**
 Writes `data` (nothing when `None`) and a newline to `filename`, replacing the file.

 The path is taken literally, relative to the working directory, it never goes
 through the resolver. Returns `false` (after logging) if the file can't be created
 or written.
*/
pub fn write_file(filename: &str, data: Option<&str>) -> bool {
    let fixed = literal_path(filename);

    let mut file = match File::create(&fixed) {
        Ok(file) => file,
        Err(err) => {
            warn!("write_file: open failed for {fixed:?}: {err}");
            return false;
        }
    };

    if let Err(err) = writeln!(file, "{}", data.unwrap_or_default()) {
        warn!("write_file: writing {fixed:?} failed: {err}");
        return false;
    }
    true
}

/// Whether `filename` names a regular file. Unlike resolution, a directory doesn't count.
#[must_use]
pub fn file_exists(filename: &str) -> bool {
    let fixed = literal_path(filename);
    std::fs::metadata(fixed).is_ok_and(|meta| meta.is_file())
}
