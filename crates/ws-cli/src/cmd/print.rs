use anyhow::Result;
use std::io::Write;
use std::path::Path;
use ws_core::{Direction, WorkspaceRoot, navigator, recency};

use crate::output;

/// Execute `ws_internal print_recent_workspace`.
///
/// # Errors
///
/// Returns [`ws_core::WorkspaceError::EmptyWorkspaceSet`] when there are no
/// workspaces, or an error if the root cannot be read.
pub fn run_print_recent(root: &WorkspaceRoot, out: &mut dyn Write) -> Result<()> {
    let workspaces = recency::read_recency_sorted(root)?;
    let recent = navigator::most_recent(&workspaces)?;
    output::write_path(out, &recent.path())?;
    Ok(())
}

/// Execute `ws_internal print_{current,next,prev}_workspace` from `cwd`.
///
/// # Errors
///
/// Returns an error if `cwd` is not inside a known workspace, or if stepping
/// in `direction` would move past the oldest or newest workspace.
pub fn run_print_relative(
    root: &WorkspaceRoot,
    direction: Direction,
    cwd: &Path,
    out: &mut dyn Write,
) -> Result<()> {
    let workspaces = recency::read_recency_sorted(root)?;
    let index = recency::locate_current(root, &workspaces, cwd)?;
    let target = navigator::step(&workspaces, index, direction)?;
    output::write_path(out, &target.path())?;
    Ok(())
}

/// Execute `ws_internal print_workspace_root`.
///
/// # Errors
///
/// Returns an error if stdout is closed.
pub fn run_print_root(root: &WorkspaceRoot, out: &mut dyn Write) -> Result<()> {
    output::write_path(out, root.path())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use std::fs;
    use std::path::PathBuf;
    use ws_core::{WorkspaceError, repository};

    struct Fixture {
        tmp: tempfile::TempDir,
        root: WorkspaceRoot,
    }

    impl Fixture {
        fn new() -> Self {
            let tmp = tempfile::TempDir::new().expect("tempdir");
            let root = repository::ensure_root(tmp.path().join("ws")).expect("root");
            Self { tmp, root }
        }

        fn workspace(&self, name: &str, mtime_secs: i64) -> PathBuf {
            let path = self.root.path().join(name);
            fs::create_dir(&path).expect("mkdir");
            let mtime: DateTime<Utc> = Utc.timestamp_opt(mtime_secs, 0).single().expect("ts");
            fs::File::open(&path)
                .and_then(|dir| dir.set_modified(mtime.into()))
                .expect("set mtime");
            path
        }

        fn relative(&self, direction: Direction, cwd: &Path) -> Result<String> {
            let mut buf = Vec::new();
            run_print_relative(&self.root, direction, cwd, &mut buf)?;
            Ok(String::from_utf8(buf)?)
        }
    }

    fn line(path: &Path) -> String {
        format!("{}\n", path.display())
    }

    fn workspace_error(err: &anyhow::Error) -> Option<&WorkspaceError> {
        err.downcast_ref::<WorkspaceError>()
    }

    #[test]
    fn recent_is_latest_mtime() {
        let fx = Fixture::new();
        fx.workspace("2026-01-01_00:00:00.a", 300);
        let b = fx.workspace("2026-01-02_00:00:00.b", 900);
        fx.workspace("2026-01-03_00:00:00.c", 600);

        let mut buf = Vec::new();
        run_print_recent(&fx.root, &mut buf).expect("recent");
        assert_eq!(String::from_utf8(buf).expect("utf8"), line(&b));
    }

    #[test]
    fn recent_without_workspaces_fails() {
        let fx = Fixture::new();
        let err = run_print_recent(&fx.root, &mut Vec::new()).expect_err("empty");
        assert!(matches!(
            workspace_error(&err),
            Some(WorkspaceError::EmptyWorkspaceSet)
        ));
    }

    #[test]
    fn navigates_between_neighbours() {
        let fx = Fixture::new();
        let a = fx.workspace("2026-01-01_00:00:00.a", 100);
        let b = fx.workspace("2026-01-01_01:00:00.b", 200);
        let c = fx.workspace("2026-01-01_02:00:00.c", 300);

        assert_eq!(fx.relative(Direction::Previous, &b).expect("prev"), line(&a));
        assert_eq!(fx.relative(Direction::Next, &b).expect("next"), line(&c));
        assert_eq!(fx.relative(Direction::Current, &b).expect("current"), line(&b));
    }

    #[test]
    fn workspace_subdirectory_is_not_a_workspace() {
        let fx = Fixture::new();
        let a = fx.workspace("2026-01-01_00:00:00.a", 100);
        let src = a.join("src");
        fs::create_dir(&src).expect("mkdir");

        let err = fx.relative(Direction::Current, &src).expect_err("subdirectory");
        assert!(matches!(
            workspace_error(&err),
            Some(WorkspaceError::MalformedName { .. })
        ));
    }

    #[test]
    fn stepping_past_either_end_fails() {
        let fx = Fixture::new();
        let a = fx.workspace("2026-01-01_00:00:00.a", 100);
        let b = fx.workspace("2026-01-01_01:00:00.b", 200);

        let err = fx.relative(Direction::Previous, &a).expect_err("oldest");
        assert!(matches!(
            workspace_error(&err),
            Some(WorkspaceError::AtOldestBoundary)
        ));

        let err = fx.relative(Direction::Next, &b).expect_err("newest");
        assert!(matches!(
            workspace_error(&err),
            Some(WorkspaceError::AtNewestBoundary)
        ));
    }

    #[test]
    fn outside_root_fails() {
        let fx = Fixture::new();
        fx.workspace("2026-01-01_00:00:00.a", 100);

        let err = fx
            .relative(Direction::Current, fx.tmp.path())
            .expect_err("outside");
        assert!(matches!(
            workspace_error(&err),
            Some(WorkspaceError::NotInWorkspace { .. })
        ));
    }

    #[test]
    fn root_is_printed_verbatim() {
        let fx = Fixture::new();
        let mut buf = Vec::new();
        run_print_root(&fx.root, &mut buf).expect("root");
        assert_eq!(String::from_utf8(buf).expect("utf8"), line(fx.root.path()));
    }
}
