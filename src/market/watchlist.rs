//! User watch-list: display names in, sticker id set out.

use crate::market::stickers::StickerDirectory;
use crate::{Result, WatchError};
use std::collections::HashSet;
use std::path::Path;
use tracing::warn;

/// Read a watch-list file: one sticker name per line. Blank lines and
/// `#`-prefixed comment lines are ignored.
pub fn load_watchlist(path: &Path) -> Result<Vec<String>> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        WatchError::Config(format!(
            "Failed to read watch-list {}: {}",
            path.display(),
            e
        ))
    })?;

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

/// Resolve watch-list names to the sticker id set.
///
/// Pure function of its inputs, computed once at startup. Names the
/// directory does not know are dropped; an empty input resolves to an empty
/// set, meaning nothing will ever match.
pub fn resolve(names: &[String], directory: &StickerDirectory) -> HashSet<String> {
    let ids = directory.resolve_names(names);
    let dropped = names.len() - ids.len();
    if dropped > 0 {
        warn!(
            dropped,
            resolved = ids.len(),
            "Some watch-list names are not in the sticker directory"
        );
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn directory() -> StickerDirectory {
        StickerDirectory::from_json(
            r#"{"stickers": [
                {"id": "77", "name": "Known"},
                {"id": "88", "name": "Other | Event 2014"}
            ]}"#,
        )
        .unwrap()
    }

    #[test]
    fn loads_names_skipping_blanks_and_comments() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# favourites").unwrap();
        writeln!(file, "Known").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  Other | Event 2014  ").unwrap();

        let names = load_watchlist(file.path()).unwrap();

        assert_eq!(names, vec!["Known", "Other | Event 2014"]);
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let result = load_watchlist(Path::new("/nonexistent/watchlist.txt"));
        assert!(matches!(result, Err(WatchError::Config(_))));
    }

    #[test]
    fn unknown_names_are_dropped() {
        let names = vec!["Ghost".to_string(), "Known".to_string()];
        let ids = resolve(&names, &directory());

        assert_eq!(ids, HashSet::from(["77".to_string()]));
    }

    #[test]
    fn empty_watchlist_resolves_to_empty_set() {
        assert!(resolve(&[], &directory()).is_empty());
    }
}
