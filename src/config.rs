use crate::list::{FileList, list_files};
use crate::resolve::{AssetResolver, Resolution};
use crate::util::{DIR_SEP_CHAR, MAX_FILENAME_LENGTH, is_separator, join_path};
use crate::{IoError, Result};

/// Asset root compiled in by build.rs (`ASSETIO_DATA_DIR` at build time, else `../assets`)
pub const DEFAULT_ASSET_ROOT: &str = env!("ASSETIO_DEFAULT_DATA_DIR");
/// The logical sub-directory callers may or may not prefix asset names with
pub const DEFAULT_DATA_SUBDIR: &str = "data";
/// Runtime override for the asset root
pub const ASSET_ROOT_ENV: &str = "ASSETIO_DATA_DIR";
/// Leaf name of the default save directories
pub const SAVE_DIR_NAME: &str = "waterCloset";

/**
 Application wide settings, built once at startup and passed to whatever needs them.

 Holds the asset root and data sub-directory the resolver works against, the
 save directory candidates, and the save directory chosen by
 [`create_save_folder`](crate::create_save_folder).

 # Examples
 ```
 use assetio::AppContext;

 let ctx = AppContext::builder()
     .asset_root("game/assets")
     .data_subdir("data")
     .save_candidates(["saves"])
     .build()
     .unwrap();
 assert_eq!(ctx.asset_root(), "game/assets");
 assert_eq!(ctx.save_dir(), "");
 ```
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppContext {
    pub(crate) asset_root: String,
    pub(crate) data_subdir: String,
    pub(crate) save_dir: String,
    pub(crate) save_candidates: Vec<String>,
}

impl AppContext {
    #[inline]
    #[must_use]
    pub fn builder() -> AppContextBuilder {
        AppContextBuilder::new()
    }

    /// Defaults, with the asset root taken from `ASSETIO_DATA_DIR` when it is set and non-empty.
    #[must_use]
    pub fn from_env() -> Self {
        let mut ctx = Self::default();
        if let Some(root) = std::env::var(ASSET_ROOT_ENV).ok().filter(|root| !root.is_empty()) {
            ctx.asset_root = root;
        }
        ctx
    }

    #[inline]
    #[must_use]
    pub fn asset_root(&self) -> &str {
        &self.asset_root
    }

    #[inline]
    #[must_use]
    pub fn data_subdir(&self) -> &str {
        &self.data_subdir
    }

    /// The chosen save directory with its trailing separator, empty for the working directory
    #[inline]
    #[must_use]
    pub fn save_dir(&self) -> &str {
        &self.save_dir
    }

    #[inline]
    #[must_use]
    pub fn save_candidates(&self) -> &[String] {
        &self.save_candidates
    }

    #[inline]
    pub(crate) fn set_save_dir(&mut self, dir: String) {
        self.save_dir = dir;
    }

    #[inline]
    #[must_use]
    pub fn resolver(&self) -> AssetResolver<'_> {
        AssetResolver::new(&self.asset_root, &self.data_subdir)
    }

    #[inline]
    pub fn resolve(&self, filename: &str) -> Option<Resolution> {
        self.resolver().resolve(filename)
    }

    #[inline]
    pub fn list_files(&self, dir: &str) -> Option<FileList> {
        list_files(&self.resolver(), dir)
    }

    #[inline]
    pub fn read_file(&self, filename: &str) -> Option<Vec<u8>> {
        crate::file::read_file(&self.resolver(), filename)
    }

    /// `name` inside the save directory (or the working directory before one is chosen).
    #[must_use]
    pub fn save_path(&self, name: &str) -> String {
        join_path(&self.save_dir, name, MAX_FILENAME_LENGTH)
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self {
            asset_root: DEFAULT_ASSET_ROOT.to_owned(),
            data_subdir: DEFAULT_DATA_SUBDIR.to_owned(),
            save_dir: String::new(),
            save_candidates: default_save_candidates(),
        }
    }
}

/// Per user data directories first, then a dot directory in the home directory.
#[cfg(not(windows))]
#[must_use]
pub fn default_save_candidates() -> Vec<String> {
    let mut candidates = Vec::with_capacity(3);
    if let Some(data_home) = std::env::var("XDG_DATA_HOME").ok().filter(|dir| !dir.is_empty()) {
        candidates.push(format!("{data_home}{DIR_SEP_CHAR}{SAVE_DIR_NAME}"));
    }
    if let Some(home) = env_home::env_home_dir() {
        let home = home.to_string_lossy();
        candidates.push(format!("{home}/.local/share/{SAVE_DIR_NAME}"));
        candidates.push(format!("{home}/.{SAVE_DIR_NAME}"));
    }
    candidates
}

/// `%APPDATA%` first, then the console style partitions.
#[cfg(windows)]
#[must_use]
pub fn default_save_candidates() -> Vec<String> {
    let mut candidates = Vec::with_capacity(3);
    if let Some(app_data) = std::env::var("APPDATA").ok().filter(|dir| !dir.is_empty()) {
        candidates.push(format!("{app_data}{DIR_SEP_CHAR}{SAVE_DIR_NAME}"));
    }
    candidates.push(format!("T:\\{SAVE_DIR_NAME}"));
    candidates.push("E:\\WaterCloset".to_owned());
    candidates
}

/// Builder for [`AppContext`], unset fields fall back to [`AppContext::default`].
#[derive(Debug, Clone, Default)]
pub struct AppContextBuilder {
    asset_root: Option<String>,
    data_subdir: Option<String>,
    save_candidates: Option<Vec<String>>,
}

impl AppContextBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    /// Set the directory assets are resolved against
    pub fn asset_root<S: AsRef<str>>(mut self, root: S) -> Self {
        self.asset_root = Some(root.as_ref().into());
        self
    }

    #[must_use]
    /// Set the logical data sub-directory name, defaults to `data`
    pub fn data_subdir<S: AsRef<str>>(mut self, subdir: S) -> Self {
        self.data_subdir = Some(subdir.as_ref().into());
        self
    }

    #[must_use]
    /// Replace the save directory candidates, tried in the given order
    pub fn save_candidates<I, S>(mut self, candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.save_candidates = Some(
            candidates
                .into_iter()
                .map(|candidate| candidate.as_ref().to_owned())
                .collect(),
        );
        self
    }

    /**
     Builds the context.

     # Errors
     Returns [`IoError::InvalidPath`] if the data sub-directory is more than one path
     component.
    */
    pub fn build(self) -> Result<AppContext> {
        let defaults = AppContext::default();
        let data_subdir = self.data_subdir.unwrap_or(defaults.data_subdir);
        if data_subdir.bytes().any(is_separator) {
            return Err(IoError::InvalidPath);
        }

        Ok(AppContext {
            asset_root: self.asset_root.unwrap_or(defaults.asset_root),
            data_subdir,
            save_dir: String::new(),
            save_candidates: self.save_candidates.unwrap_or(defaults.save_candidates),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_falls_back_to_defaults() {
        let ctx = AppContext::builder().build().unwrap();
        assert_eq!(ctx, AppContext::default());
        assert_eq!(ctx.asset_root(), DEFAULT_ASSET_ROOT);
        assert_eq!(ctx.data_subdir(), DEFAULT_DATA_SUBDIR);
    }

    #[test]
    fn builder_overrides() {
        let ctx = AppContext::builder()
            .asset_root("/srv/game")
            .data_subdir("res")
            .save_candidates(["a", "b"])
            .build()
            .unwrap();
        assert_eq!(ctx.asset_root(), "/srv/game");
        assert_eq!(ctx.data_subdir(), "res");
        assert_eq!(ctx.save_candidates(), ["a", "b"]);
    }

    #[test]
    fn multi_component_data_subdir_is_rejected() {
        let err = AppContext::builder().data_subdir("a/b").build().unwrap_err();
        assert!(matches!(err, IoError::InvalidPath));
    }

    #[test]
    fn save_path_uses_working_directory_until_chosen() {
        let mut ctx = AppContext::builder().build().unwrap();
        assert_eq!(ctx.save_path("slot1.sav"), "slot1.sav");

        ctx.set_save_dir(format!("saves{DIR_SEP_CHAR}"));
        assert_eq!(ctx.save_path("slot1.sav"), format!("saves{DIR_SEP_CHAR}slot1.sav"));
    }

    #[test]
    fn context_resolves_against_its_root() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join("data")).unwrap();
        std::fs::write(tmp.path().join("data").join("font.ttf"), "ttf").unwrap();

        let ctx = AppContext::builder()
            .asset_root(tmp.path().to_str().unwrap())
            .build()
            .unwrap();
        let found = ctx.resolve("font.ttf").unwrap();
        assert!(found.as_path().ends_with("font.ttf"));
        assert_eq!(ctx.read_file("font.ttf").unwrap(), b"ttf\0");
        assert_eq!(ctx.list_files("data").unwrap().as_slice(), ["font.ttf"]);
    }
}
