//! `.styluaignore` handling.
//!
//! A workspace may carry a `.styluaignore` file at its root listing
//! gitignore-style patterns for files formatting should skip. No file means
//! nothing is ignored; an unreadable or unparsable file is reported and
//! treated the same way (fail open).

use std::path::Path;

use ignore::gitignore::GitignoreBuilder;

/// Conventional ignore-file name, looked up at the workspace root.
pub const IGNORE_FILE: &str = ".styluaignore";

/// Whether `file` should be skipped according to the workspace's ignore
/// file. Errors are logged and fail open.
pub fn is_ignored(workspace_root: &Path, file: &Path) -> bool {
    let ignore_file = workspace_root.join(IGNORE_FILE);
    if !ignore_file.is_file() {
        return false;
    }

    let mut builder = GitignoreBuilder::new(workspace_root);
    if let Some(e) = builder.add(&ignore_file) {
        log::warn!("failed to read {}: {}", ignore_file.display(), e);
        return false;
    }
    let gitignore = match builder.build() {
        Ok(gitignore) => gitignore,
        Err(e) => {
            log::warn!("failed to parse {}: {}", ignore_file.display(), e);
            return false;
        }
    };

    // Match relative to the workspace root, the way git would.
    let relative = file.strip_prefix(workspace_root).unwrap_or(file);
    gitignore
        .matched_path_or_any_parents(relative, false)
        .is_ignore()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_no_ignore_file_means_not_ignored() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!is_ignored(dir.path(), &dir.path().join("init.lua")));
    }

    #[test]
    fn test_pattern_match() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(IGNORE_FILE), "vendor/\n*.gen.lua\n").unwrap();

        assert!(is_ignored(dir.path(), &dir.path().join("vendor/lib.lua")));
        assert!(is_ignored(dir.path(), &dir.path().join("src/types.gen.lua")));
        assert!(!is_ignored(dir.path(), &dir.path().join("src/main.lua")));
    }

    #[test]
    fn test_negation() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(IGNORE_FILE), "*.lua\n!keep.lua\n").unwrap();

        assert!(is_ignored(dir.path(), &dir.path().join("drop.lua")));
        assert!(!is_ignored(dir.path(), &dir.path().join("keep.lua")));
    }

    #[test]
    fn test_absolute_path_under_root() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(IGNORE_FILE), "scratch.lua\n").unwrap();

        let absolute = dir.path().join("scratch.lua");
        assert!(is_ignored(dir.path(), &absolute));
    }
}
