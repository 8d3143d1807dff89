//! Workspace directories on disk.
//!
//! The repository never deletes anything and never changes the process's
//! working directory. Two concurrent `create_new` calls are kept apart only by
//! the exclusive create of the unique-directory primitive; no lock is taken.

use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use crate::codec;
use crate::config::RootSettings;
use crate::error::WorkspaceError;

/// Number of random characters in a freshly generated nonce.
const NONCE_LEN: usize = 6;

/// The directory holding every workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceRoot {
    path: PathBuf,
}

impl WorkspaceRoot {
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// One workspace directory, reconstructed from its name and metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceRecord {
    /// Creation time embedded in the name, whole seconds, UTC.
    pub creation_time: DateTime<Utc>,
    /// Uniqueness token embedded in the name.
    pub nonce: String,
    /// Directory mtime; the recency signal.
    pub access_time: DateTime<Utc>,
    /// Path of the owning root.
    pub root: PathBuf,
}

impl WorkspaceRecord {
    /// Directory name, `encode(creation_time, nonce)`.
    #[must_use]
    pub fn name(&self) -> String {
        codec::encode(self.creation_time, &self.nonce)
    }

    /// Absolute path when the root is absolute.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.root.join(self.name())
    }

    /// Time since the last recorded access, never negative.
    #[must_use]
    pub fn elapsed_since_access(&self, now: DateTime<Utc>) -> Duration {
        (now - self.access_time).max(Duration::zero())
    }

    /// Decode `name` and stat `root/name`.
    fn read(root: &WorkspaceRoot, name: &str) -> Result<Self, WorkspaceError> {
        let (creation_time, nonce) = codec::decode(name)?;
        let path = root.path.join(name);
        let modified = fs::metadata(&path)
            .and_then(|meta| meta.modified())
            .map_err(|source| WorkspaceError::Stat { path, source })?;

        Ok(Self {
            creation_time,
            nonce,
            access_time: DateTime::<Utc>::from(modified),
            root: root.path.clone(),
        })
    }
}

/// Make sure `path` exists as a directory. Calling this repeatedly is harmless.
///
/// # Errors
///
/// Returns [`WorkspaceError::RootNotDirectory`] if something other than a
/// directory sits at `path`, or [`WorkspaceError::RootCreate`] if it cannot be
/// inspected or created.
pub fn ensure_root(path: impl Into<PathBuf>) -> Result<WorkspaceRoot, WorkspaceError> {
    let path = path.into();
    match fs::metadata(&path) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => return Err(WorkspaceError::RootNotDirectory { path }),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(&path).map_err(|source| WorkspaceError::RootCreate {
                path: path.clone(),
                source,
            })?;
            debug!(root = %path.display(), "created workspace root");
        }
        Err(source) => return Err(WorkspaceError::RootCreate { path, source }),
    }
    Ok(WorkspaceRoot { path })
}

/// Resolve the root from `settings` and make sure it exists.
///
/// # Errors
///
/// Returns [`WorkspaceError::HomeDirUnresolved`] if the root depends on a home
/// directory that is not known, or any error from [`ensure_root`].
pub fn ensure_system_root(settings: &RootSettings) -> Result<WorkspaceRoot, WorkspaceError> {
    let path = settings
        .root_path()
        .ok_or(WorkspaceError::HomeDirUnresolved)?;
    ensure_root(path)
}

/// Every workspace under `root`, in enumeration order.
///
/// Entries that are not directories are ignored. Directories whose names do
/// not decode, or that cannot be stat'ed, are skipped with a warning.
///
/// # Errors
///
/// Returns [`WorkspaceError::ReadRoot`] only if the root itself cannot be read.
pub fn list_all(root: &WorkspaceRoot) -> Result<Vec<WorkspaceRecord>, WorkspaceError> {
    let entries = fs::read_dir(&root.path).map_err(|source| WorkspaceError::ReadRoot {
        path: root.path.clone(),
        source,
    })?;

    let mut records = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(root = %root.path.display(), error = %err, "error reading workspace entry");
                continue;
            }
        };

        if !entry.file_type().is_ok_and(|ty| ty.is_dir()) {
            continue;
        }

        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            warn!(root = %root.path.display(), dir = ?file_name, "skipping non UTF-8 directory");
            continue;
        };

        match WorkspaceRecord::read(root, name) {
            Ok(record) => records.push(record),
            Err(err) => {
                warn!(root = %root.path.display(), dir = name, error = ?err, "skipping directory");
            }
        }
    }

    debug!(root = %root.path.display(), count = records.len(), "listed workspaces");
    Ok(records)
}

/// Create a new, uniquely named workspace directory stamped with the current time.
///
/// # Errors
///
/// Returns [`WorkspaceError::CreateWorkspace`] if the directory cannot be
/// created, or [`WorkspaceError::MalformedName`] if the created name does not
/// decode (which would mean the nonce generator produced a `.`).
pub fn create_new(root: &WorkspaceRoot) -> Result<WorkspaceRecord, WorkspaceError> {
    create_at(root, Utc::now())
}

fn create_at(root: &WorkspaceRoot, now: DateTime<Utc>) -> Result<WorkspaceRecord, WorkspaceError> {
    let creation_time = codec::truncate_to_seconds(now);
    let prefix = codec::pattern_prefix(creation_time);

    let dir = tempfile::Builder::new()
        .prefix(&prefix)
        .rand_bytes(NONCE_LEN)
        .tempdir_in(&root.path)
        .map_err(|source| WorkspaceError::CreateWorkspace {
            path: root.path.clone(),
            source,
        })?
        .keep();

    let name = dir
        .file_name()
        .and_then(OsStr::to_str)
        .ok_or_else(|| WorkspaceError::malformed(&dir.to_string_lossy()))?;
    let (_, nonce) = codec::decode(name)?;

    debug!(path = %dir.display(), "created workspace");
    Ok(WorkspaceRecord {
        creation_time,
        nonce,
        access_time: creation_time,
        root: root.path.clone(),
    })
}

/// Find the record whose name is `name`.
///
/// # Errors
///
/// Returns [`WorkspaceError::MalformedName`] if `name` is not a workspace name.
pub fn find_by_name<'a>(
    records: &'a [WorkspaceRecord],
    name: &str,
) -> Result<Option<&'a WorkspaceRecord>, WorkspaceError> {
    Ok(position_by_name(records, name)?.and_then(|index| records.get(index)))
}

/// Index of the record whose name is `name`.
///
/// Names are compared as decoded `(creation_time, nonce)` pairs.
///
/// # Errors
///
/// Returns [`WorkspaceError::MalformedName`] if `name` is not a workspace name.
pub fn position_by_name(
    records: &[WorkspaceRecord],
    name: &str,
) -> Result<Option<usize>, WorkspaceError> {
    let (creation_time, nonce) = codec::decode(name)?;
    Ok(records
        .iter()
        .position(|record| record.creation_time == creation_time && record.nonce == nonce))
}
