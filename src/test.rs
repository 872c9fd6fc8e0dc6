#[cfg(test)]
mod tests {
    use crate::fs::{DirStream, closedir, opendir, readdir, rewinddir};
    use crate::util::{DIR_SEP_CHAR, join_path, normalize_separators};
    use crate::{
        AppContext, AssetResolver, CandidateKind, IoError, create_save_folder, file_exists,
        list_files, read_file, write_file,
    };
    use std::fs;
    use std::path::Path;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn path_str(path: &Path) -> &str {
        path.to_str().expect("temp paths are UTF-8")
    }

    /// An asset root laid out like a deployed build: `<root>/data/...`
    fn asset_tree() -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        let data = tmp.path().join("data");
        fs::create_dir_all(data.join("levels")).unwrap();
        fs::create_dir_all(data.join("empty")).unwrap();
        fs::write(data.join("foo.txt"), "foo").unwrap();
        fs::write(data.join("levels").join("b.json"), "{}").unwrap();
        fs::write(data.join("levels").join("a.json"), "{}").unwrap();
        fs::write(data.join("levels").join(".hidden"), "").unwrap();
        tmp
    }

    #[test]
    fn join_has_single_separator_at_seam() {
        for (base, leaf) in [("gfx", "ship.png"), ("gfx/", "ship.png"), ("gfx", "/ship.png"), ("gfx\\", "\\\\ship.png")] {
            let joined = join_path(base, leaf, 64);
            assert_eq!(joined, format!("gfx{DIR_SEP_CHAR}ship.png"), "{base:?} + {leaf:?}");
        }
    }

    #[test]
    fn normalize_is_idempotent() {
        for input in ["a/b\\c", "", "\\\\server\\share", "plain", "mixed/\\/"] {
            let mut once = input.to_owned();
            normalize_separators(&mut once);
            let mut twice = once.clone();
            normalize_separators(&mut twice);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn prefix_forms_converge_on_disk() {
        init_logging();
        let tmp = asset_tree();
        let root = path_str(tmp.path());
        let resolver = AssetResolver::new(root, "data");

        let plain = resolver.resolve("foo.txt").unwrap();
        let prefixed = resolver.resolve("data/foo.txt").unwrap();
        assert_eq!(plain.as_str(), prefixed.as_str());
        assert_eq!(fs::read_to_string(&plain).unwrap(), "foo");
    }

    #[test]
    fn existing_literal_path_is_returned_unchanged() {
        let tmp = asset_tree();
        let literal = tmp.path().join("data").join("foo.txt");
        let resolver = AssetResolver::new("/somewhere/else", "data");
        let found = resolver.resolve(path_str(&literal)).unwrap();
        assert_eq!(found.kind(), CandidateKind::AsGiven);
        assert_eq!(found.as_path(), literal);
    }

    #[test]
    fn resolver_accepts_directories_file_exists_does_not() {
        let tmp = asset_tree();
        let root = path_str(tmp.path());
        let resolver = AssetResolver::new(root, "data");

        let dir = resolver.resolve("levels").unwrap();
        assert!(dir.as_path().is_dir());
        assert!(!file_exists(dir.as_str()));
        assert!(file_exists(resolver.resolve("foo.txt").unwrap().as_str()));
    }

    #[test]
    fn listing_matches_the_documented_example() {
        init_logging();
        let tmp = asset_tree();
        let root = path_str(tmp.path());
        let resolver = AssetResolver::new(root, "data");

        let list = list_files(&resolver, "levels").unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.as_slice(), ["a.json", "b.json"]);

        let empty = list_files(&resolver, "empty").unwrap();
        assert_eq!(empty.len(), 0);
        assert!(list_files(&resolver, "nowhere").is_none());
    }

    #[test]
    fn read_file_is_length_plus_terminator() {
        let tmp = asset_tree();
        let root = path_str(tmp.path());
        let resolver = AssetResolver::new(root, "data");

        let content = vec![7u8; 4097];
        fs::write(tmp.path().join("data").join("blob.bin"), &content).unwrap();
        let buffer = read_file(&resolver, "blob.bin").unwrap();
        assert_eq!(buffer.len(), content.len() + 1);
        assert_eq!(&buffer[..content.len()], content.as_slice());
        assert_eq!(buffer[content.len()], 0);
    }

    #[test]
    fn write_is_literal_not_asset_relative() {
        let tmp = asset_tree();
        let target = tmp.path().join("out.txt");
        assert!(write_file(path_str(&target), Some("hi")));
        assert_eq!(fs::read_to_string(&target).unwrap(), "hi\n");
        assert!(!tmp.path().join("data").join("out.txt").exists());
    }

    #[test]
    fn posix_style_stream_round() {
        let tmp = asset_tree();
        let levels = tmp.path().join("data").join("levels");

        let mut stream = opendir(path_str(&levels)).unwrap();
        let mut first: Vec<String> = core::iter::from_fn(|| readdir(&mut stream))
            .map(|entry| entry.to_string())
            .collect();
        first.sort();
        assert_eq!(first, [".hidden", "a.json", "b.json"]);

        rewinddir(&mut stream);
        let mut second: Vec<String> = stream.by_ref().map(|entry| entry.to_string()).collect();
        second.sort();
        assert_eq!(first, second);

        closedir(Some(stream)).unwrap();
        assert!(opendir(path_str(&tmp.path().join("missing"))).is_none());
        assert!(matches!(closedir::<crate::fs::NativeSearch>(None), Err(IoError::NullHandle)));
    }

    #[test]
    fn stream_on_a_file_fails() {
        let tmp = asset_tree();
        let file = tmp.path().join("data").join("foo.txt");
        assert!(DirStream::open(path_str(&file)).is_err());
    }

    #[test]
    fn context_drives_everything() {
        init_logging();
        let tmp = asset_tree();
        let saves = tmp.path().join("saves");
        let mut ctx = AppContext::builder()
            .asset_root(path_str(tmp.path()))
            .save_candidates([path_str(&saves)])
            .build()
            .unwrap();

        assert!(create_save_folder(&mut ctx));
        let slot = ctx.save_path("slot1.sav");
        assert!(write_file(&slot, Some("level=3")));
        assert!(file_exists(&slot));
        assert!(Path::new(&slot).starts_with(&saves));

        assert_eq!(ctx.list_files("levels").unwrap().len(), 2);
        assert_eq!(ctx.read_file("data/foo.txt").unwrap(), b"foo\0");
    }
}
