use crate::config::AppContext;
use crate::util::{MAX_FILENAME_LENGTH, ensure_trailing_separator, truncate_to};
use log::{info, warn};
use std::io::{self, Write as _};

/// Scratch file written and removed to check that a directory accepts writes
pub const PROBE_FILE: &str = "__probe__.tmp";

/// Creates the leaf directory, an existing one is fine.
fn make_dir(path: &str) -> io::Result<()> {
    match std::fs::create_dir(path) {
        Err(err) if err.kind() != io::ErrorKind::AlreadyExists => Err(err),
        _ => Ok(()),
    }
}

fn probe_writable(dir: &str) -> io::Result<()> {
    let probe = format!("{dir}{PROBE_FILE}");
    std::fs::File::create(&probe)?.write_all(b"x")?;
    std::fs::remove_file(&probe)
}

/**
 Picks the save directory: the first candidate of `ctx` that can be created and
 written to.

 The winner, with a trailing separator, is stored in the context. When every
 candidate fails the save directory is left empty, meaning the working directory,
 and `false` is returned.
*/
pub fn create_save_folder(ctx: &mut AppContext) -> bool {
    let mut chosen = None;

    for candidate in ctx.save_candidates() {
        let mut path = truncate_to(candidate, MAX_FILENAME_LENGTH - 2).to_owned();

        if let Err(err) = make_dir(&path) {
            info!("failed to create save dir {path:?} ({err}), trying next...");
            continue;
        }

        ensure_trailing_separator(&mut path);

        if let Err(err) = probe_writable(&path) {
            info!("save dir not writable: {path:?} ({err}), trying next...");
            continue;
        }

        chosen = Some(path);
        break;
    }

    match chosen {
        Some(dir) => {
            info!("save dir = {dir}");
            ctx.set_save_dir(dir);
            true
        }
        None => {
            warn!("all save dir candidates failed, saving to the current directory");
            ctx.set_save_dir(String::new());
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::DIR_SEP_CHAR;

    fn ctx_with(candidates: &[String]) -> AppContext {
        AppContext::builder().save_candidates(candidates).build().unwrap()
    }

    #[test]
    fn picks_first_creatable_candidate() {
        let tmp = tempfile::tempdir().unwrap();
        let bad = tmp.path().join("missing").join("deep").to_string_lossy().into_owned();
        let good = tmp.path().join("saves").to_string_lossy().into_owned();
        let later = tmp.path().join("later").to_string_lossy().into_owned();

        let mut ctx = ctx_with(&[bad, good.clone(), later.clone()]);
        assert!(create_save_folder(&mut ctx));
        assert_eq!(ctx.save_dir(), format!("{good}{DIR_SEP_CHAR}"));
        assert!(std::path::Path::new(&good).is_dir());
        assert!(!std::path::Path::new(&later).exists());
        assert!(!std::path::Path::new(&good).join(PROBE_FILE).exists());
    }

    #[test]
    fn existing_directory_is_accepted() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().to_string_lossy().into_owned();
        let mut ctx = ctx_with(&[dir.clone()]);
        assert!(create_save_folder(&mut ctx));
        assert!(ctx.save_dir().starts_with(&dir));
    }

    #[test]
    fn total_failure_falls_back_to_working_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("a_file");
        std::fs::write(&file, "").unwrap();
        // a regular file where the directory should go, and a missing parent
        let blocked = file.to_string_lossy().into_owned();
        let orphan = tmp.path().join("no").join("parent").to_string_lossy().into_owned();

        let mut ctx = ctx_with(&[blocked, orphan]);
        ctx.set_save_dir("stale/".to_owned());
        assert!(!create_save_folder(&mut ctx));
        assert_eq!(ctx.save_dir(), "");
    }
}
