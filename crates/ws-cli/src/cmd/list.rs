use anyhow::Result;
use chrono::{DateTime, Utc};
use std::io::Write;
use ws_core::{WorkspaceRecord, WorkspaceRoot, recency};

use crate::output;

/// Execute `ws_internal list_workspaces`.
///
/// Prints `<rank> <name> <elapsed>` per workspace, least recently used first,
/// with ranks starting at 1. An empty root prints nothing.
///
/// # Errors
///
/// Returns an error if the root cannot be read or stdout is closed.
pub fn run_list(root: &WorkspaceRoot, now: DateTime<Utc>, out: &mut dyn Write) -> Result<()> {
    let workspaces = recency::read_recency_sorted(root)?;
    write_listing(out, &workspaces, now)?;
    Ok(())
}

fn write_listing(
    out: &mut dyn Write,
    workspaces: &[WorkspaceRecord],
    now: DateTime<Utc>,
) -> std::io::Result<()> {
    for (rank, ws) in (1..).zip(workspaces) {
        writeln!(
            out,
            "{rank} {} {}",
            ws.name(),
            output::format_elapsed(ws.elapsed_since_access(now))
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use std::fs;
    use ws_core::repository;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).single().expect("valid timestamp")
    }

    fn make_workspace(root: &WorkspaceRoot, name: &str, mtime: DateTime<Utc>) {
        let path = root.path().join(name);
        fs::create_dir(&path).expect("mkdir");
        fs::File::open(&path)
            .and_then(|dir| dir.set_modified(mtime.into()))
            .expect("set mtime");
    }

    #[test]
    fn lists_in_recency_order_with_ranks() {
        let tmp = tempfile::TempDir::new().expect("tempdir");
        let root = repository::ensure_root(tmp.path()).expect("root");
        let now = at(1_800_000_000);
        make_workspace(&root, "2026-01-01_00:00:00.new", now - Duration::minutes(5));
        make_workspace(
            &root,
            "2026-01-02_00:00:00.old",
            now - Duration::days(1) - Duration::hours(2),
        );

        let mut buf = Vec::new();
        run_list(&root, now, &mut buf).expect("list");

        let text = String::from_utf8(buf).expect("utf8");
        assert_eq!(
            text,
            "1 2026-01-02_00:00:00.old 1 days 2 hours 0 min 0 secs\n\
             2 2026-01-01_00:00:00.new 0 days 0 hours 5 min 0 secs\n"
        );
    }

    #[test]
    fn skips_malformed_entries() {
        let tmp = tempfile::TempDir::new().expect("tempdir");
        let root = repository::ensure_root(tmp.path()).expect("root");
        let now = at(1_800_000_000);
        make_workspace(&root, "2026-01-01_00:00:00.ok", now);
        make_workspace(&root, "downloads", now);

        let mut buf = Vec::new();
        run_list(&root, now, &mut buf).expect("list");

        let text = String::from_utf8(buf).expect("utf8");
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("1 2026-01-01_00:00:00.ok "));
    }

    #[test]
    fn empty_root_prints_nothing() {
        let tmp = tempfile::TempDir::new().expect("tempdir");
        let root = repository::ensure_root(tmp.path()).expect("root");

        let mut buf = Vec::new();
        run_list(&root, at(0), &mut buf).expect("list");
        assert!(buf.is_empty());
    }
}
