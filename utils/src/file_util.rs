use std::{
    fs::{self, Permissions},
    io,
    path::Path,
};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

#[cfg(unix)]
const OWNER_WRITE: u32 = 0o200;
#[cfg(unix)]
const ALL_WRITE: u32 = 0o222;

/// Returns true if the file at `path` is read-only.
///
/// On Unix a file counts as read-only when the owner write bit is clear.
pub fn is_read_only(path: &Path) -> io::Result<bool> {
    let permissions = fs::metadata(path)?.permissions();
    Ok(permissions_read_only(&permissions))
}

/// Sets or clears the read-only attribute of a single file.
///
/// Only the read-only bit changes, every other attribute is written back as it was.
/// Returns true if the attribute was changed, false if it already had the wanted value.
pub fn set_read_only(path: &Path, read_only: bool) -> io::Result<bool> {
    let mut permissions = fs::metadata(path)?.permissions();
    if permissions_read_only(&permissions) == read_only {
        return Ok(false);
    }
    apply_read_only(&mut permissions, read_only);
    fs::set_permissions(path, permissions)?;
    tracing::trace!(path = %path.display(), read_only, "changed read-only attribute");
    Ok(true)
}

/// Removes the read-only attribute from a file if it's set.
pub fn clear_read_only(path: &Path) -> io::Result<bool> {
    set_read_only(path, false)
}

/// Sets or clears the read-only attribute on every file below `dir`.
///
/// Directories are traversed but never modified and symbolic links are skipped.
/// Returns the number of files whose attribute changed.
pub fn set_read_only_recursive(dir: &Path, read_only: bool) -> io::Result<usize> {
    let mut changed = 0;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            changed += set_read_only_recursive(&entry.path(), read_only)?;
        } else if file_type.is_file() && set_read_only(&entry.path(), read_only)? {
            changed += 1;
        }
    }
    Ok(changed)
}

#[cfg(unix)]
fn permissions_read_only(permissions: &Permissions) -> bool {
    permissions.mode() & OWNER_WRITE == 0
}

#[cfg(not(unix))]
fn permissions_read_only(permissions: &Permissions) -> bool {
    permissions.readonly()
}

#[cfg(unix)]
fn apply_read_only(permissions: &mut Permissions, read_only: bool) {
    let mode = permissions.mode();
    let mode = if read_only {
        mode & !ALL_WRITE
    } else {
        mode | OWNER_WRITE
    };
    permissions.set_mode(mode);
}

// Windows keeps hidden, archive and the other attributes when only the
// read-only flag of the fetched permissions is flipped.
#[cfg(not(unix))]
#[allow(clippy::permissions_set_readonly_false)]
fn apply_read_only(permissions: &mut Permissions, read_only: bool) {
    permissions.set_readonly(read_only);
}
