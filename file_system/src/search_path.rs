//! Resolution of file search paths such as `../logs/*.log` or `src`.
//!
//! A search path is split into an absolute, normalized directory and a file
//! name pattern. Wildcards (`*`, `?`, `[...]`) are accepted in the last
//! segment only; matching itself is delegated to the `glob` crate.

use std::path::{Component, Path, PathBuf};

use glob::{MatchOptions, Pattern};

use crate::error::FileSystemError;

const MATCH_ALL: &str = "*";
const WILDCARD_CHARS: [char; 3] = ['*', '?', '['];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPath {
    /// Absolute directory without `.`/`..` segments or wildcards.
    pub directory: PathBuf,
    /// File name pattern matched against the entries of `directory`.
    pub pattern: String,
}

impl SearchPath {
    pub fn has_wildcards(&self) -> bool {
        contains_wildcard(&self.pattern)
    }

    /// Lists the regular files in `directory` matching `pattern`, sorted.
    pub fn find_files(&self) -> Result<Vec<PathBuf>, FileSystemError> {
        let escaped_directory = Pattern::escape(&self.directory.to_string_lossy());
        let full_pattern = Path::new(&escaped_directory).join(&self.pattern);
        let full_pattern = full_pattern.to_string_lossy();

        let options = MatchOptions {
            case_sensitive: cfg!(not(windows)),
            require_literal_separator: true,
            require_literal_leading_dot: false,
        };
        let paths = glob::glob_with(&full_pattern, options).map_err(|e| {
            FileSystemError::InvalidPattern {
                pattern: self.pattern.clone(),
                message: e.to_string(),
            }
        })?;

        let mut files: Vec<PathBuf> = paths
            .filter_map(|entry| match entry {
                Ok(path) if path.is_file() => Some(path),
                Ok(_) => None,
                Err(e) => {
                    tracing::debug!("Skipping unreadable search result: {}", e);
                    None
                }
            })
            .collect();
        files.sort();

        tracing::debug!(
            "Search path {} matched {} file(s)",
            self,
            files.len()
        );
        Ok(files)
    }
}

impl std::fmt::Display for SearchPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.directory.join(&self.pattern).display())
    }
}

/// Resolves `spec` against `base` into a directory and a file name pattern.
///
/// # Errors
/// * `FileSystemError::EmptySearchPath` if `spec` is blank
/// * `FileSystemError::WildcardInDirectory` if a directory segment has wildcards
/// * `FileSystemError::InvalidPattern` if the last segment is not a valid pattern
/// * `FileSystemError::Io` if `base` cannot be made absolute
pub fn resolve_search_path(base: &Path, spec: &str) -> Result<SearchPath, FileSystemError> {
    let spec = spec.trim();
    if spec.is_empty() {
        return Err(FileSystemError::EmptySearchPath);
    }

    let spec_path = Path::new(spec);
    let components: Vec<Component> = spec_path.components().collect();
    let (last, parents) = match components.split_last() {
        Some(split) => split,
        None => return Err(FileSystemError::EmptySearchPath),
    };
    if parents
        .iter()
        .any(|component| contains_wildcard(&component.as_os_str().to_string_lossy()))
    {
        return Err(FileSystemError::WildcardInDirectory(spec.to_string()));
    }

    let base = std::path::absolute(base).map_err(|source| FileSystemError::Io {
        path: base.to_path_buf(),
        source,
    })?;

    let last_segment = last.as_os_str().to_string_lossy().to_string();
    let search_path = if contains_wildcard(&last_segment) {
        let parent = spec_path.parent().unwrap_or_else(|| Path::new(""));
        SearchPath {
            directory: normalize(&base.join(parent)),
            pattern: last_segment,
        }
    } else {
        let full_path = normalize(&base.join(spec_path));
        if full_path.is_dir() {
            SearchPath {
                directory: full_path,
                pattern: MATCH_ALL.to_string(),
            }
        } else {
            match (full_path.parent(), full_path.file_name()) {
                (Some(parent), Some(file_name)) => SearchPath {
                    directory: parent.to_path_buf(),
                    pattern: Pattern::escape(&file_name.to_string_lossy()),
                },
                // the root itself, which is_dir() would normally have caught
                _ => SearchPath {
                    directory: full_path,
                    pattern: MATCH_ALL.to_string(),
                },
            }
        }
    };

    Pattern::new(&search_path.pattern).map_err(|e| FileSystemError::InvalidPattern {
        pattern: search_path.pattern.clone(),
        message: e.to_string(),
    })?;

    tracing::trace!("Resolved search path '{}' to {}", spec, search_path);
    Ok(search_path)
}

fn contains_wildcard(segment: &str) -> bool {
    segment.contains(WILDCARD_CHARS)
}

/// Removes `.` and `..` segments without touching the file system.
/// `..` at the root stays at the root.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => normalized.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                let at_root = normalized.parent().is_none();
                if !at_root {
                    normalized.pop();
                }
            }
            Component::Normal(segment) => normalized.push(segment),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;
    use utils::test_utils::create_tree;

    #[test]
    fn test_wildcard_in_last_segment() {
        let temp_dir = tempdir().unwrap();
        let base = temp_dir.path().join("project");
        fs::create_dir_all(&base).unwrap();

        let search_path = resolve_search_path(&base, "../logs/*.log").unwrap();
        assert_eq!(search_path.directory, temp_dir.path().join("logs"));
        assert_eq!(search_path.pattern, "*.log");
        assert!(search_path.has_wildcards());
    }

    #[test]
    fn test_existing_directory_matches_everything() {
        let temp_dir = tempdir().unwrap();
        create_tree(temp_dir.path(), &["src/main.rs"]).unwrap();

        let search_path = resolve_search_path(temp_dir.path(), "./src/").unwrap();
        assert_eq!(search_path.directory, temp_dir.path().join("src"));
        assert_eq!(search_path.pattern, "*");
    }

    #[test]
    fn test_literal_file_name() {
        let temp_dir = tempdir().unwrap();
        let search_path = resolve_search_path(temp_dir.path(), "a/./b/../notes.txt").unwrap();
        assert_eq!(search_path.directory, temp_dir.path().join("a"));
        assert_eq!(search_path.pattern, "notes.txt");
        assert!(!search_path.has_wildcards());
    }

    #[test]
    fn test_absolute_spec_ignores_base() {
        let temp_dir = tempdir().unwrap();
        let spec = temp_dir.path().join("*.txt");
        let search_path =
            resolve_search_path(Path::new("/somewhere/else"), &spec.to_string_lossy()).unwrap();
        assert_eq!(search_path.directory, temp_dir.path());
        assert_eq!(search_path.pattern, "*.txt");
    }

    #[test]
    fn test_rejected_specs() {
        let temp_dir = tempdir().unwrap();
        assert!(matches!(
            resolve_search_path(temp_dir.path(), "   "),
            Err(FileSystemError::EmptySearchPath)
        ));
        assert!(matches!(
            resolve_search_path(temp_dir.path(), "src/*/main.rs"),
            Err(FileSystemError::WildcardInDirectory(_))
        ));
        assert!(matches!(
            resolve_search_path(temp_dir.path(), "[.txt"),
            Err(FileSystemError::InvalidPattern { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_normalize_does_not_climb_above_root() {
        assert_eq!(normalize(Path::new("/../../etc/./hosts")), PathBuf::from("/etc/hosts"));
        assert_eq!(normalize(Path::new("/a/b/../c")), PathBuf::from("/a/c"));
    }

    #[test]
    fn test_find_files() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        create_tree(
            root,
            &["logs/b.log", "logs/a.log", "logs/readme.txt", "logs/old.log/", "logs/nested/c.log"],
        )
        .unwrap();

        let search_path = resolve_search_path(root, "logs/*.log").unwrap();
        let files = search_path.find_files().unwrap();
        assert_eq!(
            files,
            vec![root.join("logs").join("a.log"), root.join("logs").join("b.log")]
        );
    }

    #[test]
    fn test_find_files_with_literal_name() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        create_tree(root, &["docs/[draft].md", "docs/d.md"]).unwrap();

        let search_path = resolve_search_path(root, "docs/[draft].md");
        // brackets are a wildcard class, not a literal name
        assert!(search_path.unwrap().has_wildcards());

        let search_path = resolve_search_path(&root.join("docs"), "d.md").unwrap();
        assert_eq!(search_path.find_files().unwrap(), vec![root.join("docs").join("d.md")]);

        let missing = resolve_search_path(root, "docs/missing.md").unwrap();
        assert!(missing.find_files().unwrap().is_empty());
    }
}
