//! Moving through the recency order.
//!
//! Positions are indices into a sequence from
//! [`sorted_by_access`](crate::recency::sorted_by_access): `0` is the oldest
//! workspace, `len - 1` the most recent. Stepping past either end is an error,
//! there is no wraparound and no clamping.

use crate::error::WorkspaceError;
use crate::repository::WorkspaceRecord;

/// Relative position from the current workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// One step older.
    Previous,
    /// The current workspace itself.
    Current,
    /// One step newer.
    Next,
}

/// The most recently used workspace.
///
/// # Errors
///
/// Returns [`WorkspaceError::EmptyWorkspaceSet`] if there are no workspaces.
pub fn most_recent(sequence: &[WorkspaceRecord]) -> Result<&WorkspaceRecord, WorkspaceError> {
    sequence.last().ok_or(WorkspaceError::EmptyWorkspaceSet)
}

/// The workspace used just before the one at `index`.
///
/// # Errors
///
/// Returns [`WorkspaceError::AtOldestBoundary`] if `index` is the oldest.
pub fn previous(
    sequence: &[WorkspaceRecord],
    index: usize,
) -> Result<&WorkspaceRecord, WorkspaceError> {
    let Some(prev) = index.checked_sub(1) else {
        return Err(WorkspaceError::AtOldestBoundary);
    };
    current(sequence, prev)
}

/// The workspace used just after the one at `index`.
///
/// # Errors
///
/// Returns [`WorkspaceError::AtNewestBoundary`] if `index` is the newest.
pub fn next(sequence: &[WorkspaceRecord], index: usize) -> Result<&WorkspaceRecord, WorkspaceError> {
    let newer = index
        .checked_add(1)
        .filter(|&i| i < sequence.len())
        .ok_or(WorkspaceError::AtNewestBoundary)?;
    current(sequence, newer)
}

/// The workspace at `index`.
///
/// # Errors
///
/// Returns [`WorkspaceError::WorkspaceNotFound`] if `index` is out of range,
/// which cannot happen for an index from
/// [`locate_current`](crate::recency::locate_current) on the same sequence.
pub fn current(
    sequence: &[WorkspaceRecord],
    index: usize,
) -> Result<&WorkspaceRecord, WorkspaceError> {
    sequence
        .get(index)
        .ok_or_else(|| WorkspaceError::WorkspaceNotFound {
            name: format!("#{}", index.saturating_add(1)),
        })
}

/// Step from `index` in `direction`.
///
/// # Errors
///
/// Returns the boundary error for `direction` when stepping off either end.
pub fn step(
    sequence: &[WorkspaceRecord],
    index: usize,
    direction: Direction,
) -> Result<&WorkspaceRecord, WorkspaceError> {
    match direction {
        Direction::Previous => previous(sequence, index),
        Direction::Current => current(sequence, index),
        Direction::Next => next(sequence, index),
    }
}
