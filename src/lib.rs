/*!
 Asset path resolution, portable directory streams and file access for game builds
 that move between desktop and console style targets.

 This library provides:
 - Separator normalization and bounded path joining
 - A `readdir` style [`DirStream`] over each platform's native pattern search
 - An [`AssetResolver`] that tries an ordered list of candidate locations for a name
 - Sorted directory listings that skip hidden entries
 - Whole-file reads, literal writes and save directory selection

 Failures in the asset operations are logged through the `log` facade and surface as
 `None`/`false`, nothing here terminates the process.

 # Examples
 ```no_run
 use assetio::AppContext;

 let mut ctx = AppContext::from_env();
 assetio::create_save_folder(&mut ctx);

 if let Some(levels) = ctx.list_files("levels") {
     for level in &levels {
         let bytes = ctx.read_file(&format!("levels/{level}"));
         println!("{level}: {:?} bytes", bytes.map(|b| b.len() - 1));
     }
 }
 assert!(assetio::write_file(&ctx.save_path("last_run.txt"), Some("ok")));
 ```
*/
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_inline_in_public_items)]
#![allow(clippy::implicit_return)]
#![allow(clippy::pub_use)]

#[macro_use]
mod macros;

mod config;
mod error;
mod file;
pub mod fs;
mod list;
mod resolve;
mod save;
pub mod util;

pub use config::{
    ASSET_ROOT_ENV, AppContext, AppContextBuilder, DEFAULT_ASSET_ROOT, DEFAULT_DATA_SUBDIR,
    SAVE_DIR_NAME, default_save_candidates,
};
pub use error::IoError;
pub use file::{file_exists, read_file, read_text, write_file};
pub use fs::{DirEntry, DirStream};
pub use list::{FileList, list_files, list_files_matching};
pub use resolve::{AssetResolver, CandidateKind, PathProbe, Resolution, StatProbe};
pub use save::{PROBE_FILE, create_save_folder};

/// Result alias for the fallible layers of the crate.
pub type Result<T> = core::result::Result<T, IoError>;

#[cfg(test)]
mod test;
