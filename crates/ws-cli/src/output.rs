//! Plain-text output shared by every subcommand.
//!
//! stdout carries exactly what the shell function consumes: one bare path, one
//! listing line per workspace, or the activation script. Errors go to stderr as
//! `<prog>: <message>` with an optional `hint:` line.

use chrono::Duration;
use std::io::{self, Write};
use std::path::Path;
use ws_core::WorkspaceError;

const SECS_PER_MIN: i64 = 60;
const SECS_PER_HOUR: i64 = 60 * SECS_PER_MIN;
const SECS_PER_DAY: i64 = 24 * SECS_PER_HOUR;

/// Write a path followed by a newline.
pub fn write_path(w: &mut dyn Write, path: &Path) -> io::Result<()> {
    writeln!(w, "{}", path.display())
}

/// Format a duration as `"<d> days <h> hours <m> min <s> secs"`.
///
/// Sub-second remainders are dropped and negative durations render as zero.
pub fn format_elapsed(elapsed: Duration) -> String {
    let mut secs = elapsed.num_seconds().max(0);
    let days = secs / SECS_PER_DAY;
    secs %= SECS_PER_DAY;
    let hours = secs / SECS_PER_HOUR;
    secs %= SECS_PER_HOUR;
    let mins = secs / SECS_PER_MIN;
    secs %= SECS_PER_MIN;

    format!("{days} days {hours} hours {mins} min {secs} secs")
}

/// Render a fatal error to `w`.
///
/// The full context chain goes on one line. When a [`WorkspaceError`] is
/// somewhere in the chain its hint, if any, follows on a second line.
pub fn render_error(w: &mut dyn Write, prog: &str, err: &anyhow::Error) {
    let hint = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<WorkspaceError>())
        .and_then(|ws_err| {
            tracing::debug!(code = %ws_err.code(), kind = ws_err.code().message(), "fatal error");
            ws_err.hint()
        });

    // Nothing sensible to do if stderr itself is gone.
    let _ = writeln!(w, "{prog}: {err:#}");
    if let Some(hint) = hint {
        let _ = writeln!(w, "hint: {hint}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context as _;

    #[test]
    fn elapsed_zero() {
        assert_eq!(format_elapsed(Duration::zero()), "0 days 0 hours 0 min 0 secs");
    }

    #[test]
    fn elapsed_splits_into_units() {
        let d = Duration::days(2) + Duration::hours(3) + Duration::minutes(4) + Duration::seconds(5);
        assert_eq!(format_elapsed(d), "2 days 3 hours 4 min 5 secs");
    }

    #[test]
    fn elapsed_drops_subseconds_and_negatives() {
        assert_eq!(
            format_elapsed(Duration::milliseconds(59_999)),
            "0 days 0 hours 0 min 59 secs"
        );
        assert_eq!(
            format_elapsed(Duration::seconds(-30)),
            "0 days 0 hours 0 min 0 secs"
        );
    }

    #[test]
    fn write_path_appends_newline() {
        let mut buf = Vec::new();
        write_path(&mut buf, Path::new("/home/alice/ws/x")).expect("write");
        assert_eq!(buf, b"/home/alice/ws/x\n");
    }

    #[test]
    fn render_error_includes_hint_for_workspace_errors() {
        let err = anyhow::Error::new(WorkspaceError::EmptyWorkspaceSet);
        let mut buf = Vec::new();
        render_error(&mut buf, "ws_internal", &err);

        let text = String::from_utf8(buf).expect("utf8");
        assert_eq!(
            text,
            "ws_internal: there are currently no workspaces\nhint: Create a workspace with `ws new`.\n"
        );
    }

    #[test]
    fn render_error_finds_workspace_error_under_context() {
        let err = Err::<(), _>(WorkspaceError::EmptyWorkspaceSet)
            .context("printing recent workspace")
            .expect_err("error");
        let mut buf = Vec::new();
        render_error(&mut buf, "ws_internal", &err);

        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.starts_with(
            "ws_internal: printing recent workspace: there are currently no workspaces\n"
        ));
        assert!(text.contains("hint: "));
    }

    #[test]
    fn render_error_without_hint_is_one_line() {
        let err = anyhow::Error::new(WorkspaceError::AtNewestBoundary);
        let mut buf = Vec::new();
        render_error(&mut buf, "ws_internal", &err);

        let text = String::from_utf8(buf).expect("utf8");
        assert_eq!(
            text,
            "ws_internal: the current workspace is the newest workspace\n"
        );
    }
}
