mod path;
mod pattern;

pub use path::{
    DIR_SEP, DIR_SEP_CHAR, MAX_FILENAME_LENGTH, ensure_trailing_separator, is_separator,
    join_path, join_path_into, normalize_separators, normalize_separators_bytes,
    strip_data_prefix, truncate_to,
};
pub use pattern::{MATCH_ALL, SearchPattern, glob_to_regex};
