use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Creates files below `root`, one per relative path, with parent directories.
///
/// Paths ending with `/` create an empty directory instead.
pub fn create_tree(root: &Path, entries: &[&str]) -> io::Result<Vec<PathBuf>> {
    let mut created = Vec::with_capacity(entries.len());
    for entry in entries {
        let path = root.join(entry.trim_end_matches('/'));
        if entry.ends_with('/') {
            fs::create_dir_all(&path)?;
        } else {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, format!("content of {}", entry))?;
        }
        created.push(path);
    }
    Ok(created)
}

/// Lists all regular files below `root`, sorted.
pub fn list_files(root: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    collect_files(root, &mut files)?;
    files.sort();
    Ok(files)
}

fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            collect_files(&entry.path(), files)?;
        } else {
            files.push(entry.path());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_create_tree() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        create_tree(root, &["a.txt", "sub/b.txt", "empty/"]).unwrap();

        assert!(root.join("empty").is_dir());
        let files = list_files(root).unwrap();
        assert_eq!(files, vec![root.join("a.txt"), root.join("sub").join("b.txt")]);
        assert_eq!(
            fs::read_to_string(root.join("sub").join("b.txt")).unwrap(),
            "content of sub/b.txt"
        );
    }
}
