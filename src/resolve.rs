//! Turns a logical asset name into a path that exists on disk.
//!
//! Build layouts differ between targets, and callers pass names that may or may not
//! already carry the data sub-directory prefix, so a fixed list of candidate
//! locations is tried in order and the first one that exists wins.

use crate::util::{
    DIR_SEP_CHAR, MAX_FILENAME_LENGTH, join_path, normalize_separators, strip_data_prefix,
    truncate_to,
};
use core::fmt;
use log::{debug, error};
use std::path::Path;

/// The candidate locations, in the order [`AssetResolver::resolve`] tries them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateKind {
    /// The name as the caller gave it, separators normalized
    AsGiven,
    /// `<root>/<name>`
    AssetRoot,
    /// `<root>/<data>/<name>`
    DataPrefixed,
    /// `<root>/<name>` with a leading `<data>/` removed from the name
    PrefixStripped,
    /// `<root>` and `<name>` glued by plain concatenation, then normalized
    Concatenated,
}

impl CandidateKind {
    /// Every candidate, in the order they are tried
    pub const ALL: [Self; 5] = [
        Self::AsGiven,
        Self::AssetRoot,
        Self::DataPrefixed,
        Self::PrefixStripped,
        Self::Concatenated,
    ];

    /// Short name used in resolver logs
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::AsGiven => "as-is",
            Self::AssetRoot => "asset root",
            Self::DataPrefixed => "asset root + data",
            Self::PrefixStripped => "asset root + strip",
            Self::Concatenated => "asset root + norm",
        }
    }
}

impl fmt::Display for CandidateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A path that existed when it was resolved, and the candidate that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    path: String,
    kind: CandidateKind,
}

impl Resolution {
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.path
    }

    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        Path::new(&self.path)
    }

    #[inline]
    #[must_use]
    pub const fn kind(&self) -> CandidateKind {
        self.kind
    }

    #[inline]
    #[must_use]
    pub fn into_string(self) -> String {
        self.path
    }
}

impl core::ops::Deref for Resolution {
    type Target = str;

    #[inline]
    fn deref(&self) -> &str {
        &self.path
    }
}

impl AsRef<Path> for Resolution {
    #[inline]
    fn as_ref(&self) -> &Path {
        self.as_path()
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// Decides whether a candidate path exists.
pub trait PathProbe {
    /// True when `path` names something on disk
    fn exists(&self, path: &str) -> bool;
}

/// `stat` based probe, files and directories both count.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatProbe;

impl PathProbe for StatProbe {
    #[inline]
    fn exists(&self, path: &str) -> bool {
        !path.is_empty() && std::fs::metadata(path).is_ok()
    }
}

impl<P: PathProbe + ?Sized> PathProbe for &P {
    #[inline]
    fn exists(&self, path: &str) -> bool {
        (**self).exists(path)
    }
}

/**
 Resolves logical asset names against an asset root.

 # Examples
 ```no_run
 use assetio::AssetResolver;

 let resolver = AssetResolver::new("../assets", "data");
 if let Some(found) = resolver.resolve("data/music/title.ogg") {
     println!("{found} ({})", found.kind());
 }
 ```
*/
#[derive(Debug, Clone)]
pub struct AssetResolver<'ctx, P = StatProbe> {
    root: &'ctx str,
    data_subdir: &'ctx str,
    probe: P,
}

impl<'ctx> AssetResolver<'ctx> {
    #[inline]
    #[must_use]
    pub const fn new(root: &'ctx str, data_subdir: &'ctx str) -> Self {
        Self::with_probe(root, data_subdir, StatProbe)
    }
}

impl<'ctx, P: PathProbe> AssetResolver<'ctx, P> {
    #[inline]
    #[must_use]
    pub const fn with_probe(root: &'ctx str, data_subdir: &'ctx str, probe: P) -> Self {
        Self {
            root,
            data_subdir,
            probe,
        }
    }

    /// The asset root every relative candidate is built on
    #[inline]
    #[must_use]
    pub const fn root(&self) -> &'ctx str {
        self.root
    }

    /// Logical data directory name, tried under the root and stripped from names
    #[inline]
    #[must_use]
    pub const fn data_subdir(&self) -> &'ctx str {
        self.data_subdir
    }

    /**
     Builds every candidate path for `filename`, in resolution order.

     Nothing touches the filesystem. Each path fits in `MAX_FILENAME_LENGTH - 1` bytes.
    */
    #[must_use]
    pub fn candidates(&self, filename: &str) -> [(CandidateKind, String); 5] {
        const CAP: usize = MAX_FILENAME_LENGTH;

        let mut as_given = truncate_to(filename, CAP - 1).to_owned();
        normalize_separators(&mut as_given);

        let mut prefixed = format!("{}{DIR_SEP_CHAR}{filename}", self.data_subdir);
        normalize_separators(&mut prefixed);

        let stripped = strip_data_prefix(filename, self.data_subdir);

        let concat = format!("{}/{filename}", self.root);
        let mut concat = truncate_to(&concat, CAP - 1).to_owned();
        normalize_separators(&mut concat);

        [
            (CandidateKind::AsGiven, as_given),
            (CandidateKind::AssetRoot, join_path(self.root, filename, CAP)),
            (
                CandidateKind::DataPrefixed,
                join_path(self.root, truncate_to(&prefixed, CAP - 1), CAP),
            ),
            (CandidateKind::PrefixStripped, join_path(self.root, stripped, CAP)),
            (CandidateKind::Concatenated, concat),
        ]
    }

    /// Returns the first candidate for `filename` that exists, logging every path tried when none does.
    pub fn resolve(&self, filename: &str) -> Option<Resolution> {
        debug!("lookup {filename:?}");
        let candidates = self.candidates(filename);

        for (kind, path) in &candidates {
            debug!("  try {:<18}: {path}", kind.label());
            if self.probe.exists(path) {
                debug!("  found {kind}");
                return Some(Resolution {
                    path: path.clone(),
                    kind: *kind,
                });
            }
        }

        let tried: Vec<&str> = candidates.iter().map(|(_, path)| path.as_str()).collect();
        error!("asset not found for {filename:?}, tried: {tried:?}");
        None
    }
}
