use crate::IoError;
use crate::fs::{DirStream, FileSearch};
use crate::resolve::{AssetResolver, PathProbe};
use crate::util::MAX_FILENAME_LENGTH;
use log::{error, warn};

/**
 The sorted, non-hidden entry names of a directory.

 An empty list means the directory was found and had nothing to show, a missing
 directory gives no list at all.
*/
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileList {
    names: Vec<String>,
}

impl FileList {
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, String> {
        self.names.iter()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    #[inline]
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.names
    }
}

impl core::ops::Index<usize> for FileList {
    type Output = str;

    #[inline]
    fn index(&self, index: usize) -> &str {
        &self.names[index]
    }
}

impl IntoIterator for FileList {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.names.into_iter()
    }
}

impl<'list> IntoIterator for &'list FileList {
    type Item = &'list String;
    type IntoIter = core::slice::Iter<'list, String>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.names.iter()
    }
}

/**
 Lists the non-hidden entries of an asset directory, sorted byte-wise.

 `dir` goes through the resolver first. Returns `None` when it can't be resolved or
 opened, or when memory for the list runs out.
*/
pub fn list_files<P: PathProbe>(resolver: &AssetResolver<'_, P>, dir: &str) -> Option<FileList> {
    let Some(path) = resolver.resolve(dir) else {
        warn!("list_files: could not resolve dir {dir:?}");
        return None;
    };
    let stream = DirStream::open(&path).ok()?;
    collect_names(stream)
}

/// [`list_files`] restricted to entries matching `glob` (`*` and `?` wildcards).
pub fn list_files_matching<P: PathProbe>(
    resolver: &AssetResolver<'_, P>,
    dir: &str,
    glob: &str,
) -> Option<FileList> {
    let Some(path) = resolver.resolve(dir) else {
        warn!("list_files: could not resolve dir {dir:?}");
        return None;
    };
    let stream = DirStream::open_matching(&path, glob).ok()?;
    collect_names(stream)
}

/**
 Two pass collection: count the visible entries, reserve exactly that much, rewind
 and copy. The stream is closed on every path out.
*/
pub(crate) fn collect_names<S: FileSearch>(mut stream: DirStream<S>) -> Option<FileList> {
    let count = stream.by_ref().filter(|entry| !entry.is_hidden()).count();

    let mut names: Vec<String> = Vec::new();
    if names.try_reserve_exact(count).is_err() {
        error!(
            "list_files: {} for {}",
            IoError::OutOfMemory(count * size_of::<String>()),
            stream.pattern()
        );
        close_quietly(stream);
        return None;
    }

    if count > 0 {
        stream.rewind();
        while names.len() < count {
            let Some(entry) = stream.read() else {
                break;
            };
            if entry.is_hidden() {
                continue;
            }

            let bounded = &entry.name()[..entry.len().min(MAX_FILENAME_LENGTH - 1)];
            let mut name = String::new();
            if name.try_reserve_exact(bounded.len()).is_err() {
                error!(
                    "list_files: {} for a name in {}",
                    IoError::OutOfMemory(bounded.len()),
                    stream.pattern()
                );
                close_quietly(stream);
                return None;
            }
            name.push_str(&String::from_utf8_lossy(bounded));
            names.push(name);
        }
    }

    close_quietly(stream);

    if names.len() > 1 {
        names.sort_unstable();
    }
    Some(FileList { names })
}

fn close_quietly<S: FileSearch>(stream: DirStream<S>) {
    let pattern = stream.pattern().clone();
    if let Err(err) = stream.close() {
        warn!("closing {pattern} failed: {err}");
    }
}
