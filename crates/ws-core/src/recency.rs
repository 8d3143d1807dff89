//! Recency order over workspaces.
//!
//! Recency is the directory mtime, not atime and not an access log. Anything
//! that modifies the directory entry (creating or removing a file directly
//! inside it) makes the workspace look more recently used.

use std::env;
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::WorkspaceError;
use crate::repository::{self, WorkspaceRecord, WorkspaceRoot};

/// Order `records` oldest first by `access_time`.
///
/// Equal mtimes fall back to creation time and then nonce, so the order never
/// depends on directory enumeration order.
#[must_use]
pub fn sorted_by_access(mut records: Vec<WorkspaceRecord>) -> Vec<WorkspaceRecord> {
    records.sort_by(|a, b| {
        a.access_time
            .cmp(&b.access_time)
            .then_with(|| a.creation_time.cmp(&b.creation_time))
            .then_with(|| a.nonce.cmp(&b.nonce))
    });
    records
}

/// List every workspace under `root` in recency order.
///
/// # Errors
///
/// Returns an error if the root cannot be read.
pub fn read_recency_sorted(root: &WorkspaceRoot) -> Result<Vec<WorkspaceRecord>, WorkspaceError> {
    Ok(sorted_by_access(repository::list_all(root)?))
}

/// Index in `sequence` of the workspace whose directory is `cwd`.
///
/// The workspace is identified by the base name of `cwd`, so `cwd` must be a
/// workspace directory itself, not something below it.
///
/// # Errors
///
/// - [`WorkspaceError::NotInWorkspace`] if `cwd` is not strictly below `root`.
/// - [`WorkspaceError::MalformedName`] if the base name of `cwd` is not a
///   workspace name.
/// - [`WorkspaceError::WorkspaceNotFound`] if no record in `sequence` has that
///   name (for example, it was removed after the listing was taken).
pub fn locate_current(
    root: &WorkspaceRoot,
    sequence: &[WorkspaceRecord],
    cwd: &Path,
) -> Result<usize, WorkspaceError> {
    let not_in_workspace = || WorkspaceError::NotInWorkspace {
        cwd: cwd.to_path_buf(),
    };

    let relative = relative_to_root(root.path(), cwd).ok_or_else(not_in_workspace)?;
    let Some(Component::Normal(base)) = relative.components().next_back() else {
        return Err(not_in_workspace());
    };
    let name = base
        .to_str()
        .ok_or_else(|| WorkspaceError::malformed(&base.to_string_lossy()))?;

    repository::position_by_name(sequence, name)?.ok_or_else(|| {
        WorkspaceError::WorkspaceNotFound {
            name: name.to_string(),
        }
    })
}

/// [`locate_current`] for the process's working directory.
///
/// # Errors
///
/// Returns [`WorkspaceError::CurrentDir`] if the working directory cannot be
/// determined, otherwise as [`locate_current`].
pub fn locate_process_current(
    root: &WorkspaceRoot,
    sequence: &[WorkspaceRecord],
) -> Result<usize, WorkspaceError> {
    let cwd = env::current_dir().map_err(WorkspaceError::CurrentDir)?;
    locate_current(root, sequence, &cwd)
}

/// `cwd` relative to `root`, comparing literal paths first and canonical
/// paths second so symlinked homes still match.
fn relative_to_root(root: &Path, cwd: &Path) -> Option<PathBuf> {
    if let Ok(relative) = cwd.strip_prefix(root) {
        return Some(relative.to_path_buf());
    }

    let root = fs::canonicalize(root).ok()?;
    let cwd = fs::canonicalize(cwd).ok()?;
    cwd.strip_prefix(&root).ok().map(Path::to_path_buf)
}
