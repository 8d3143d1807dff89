//! Workspace directory names.
//!
//! A name is the UTC creation time formatted as `YYYY-MM-DD_HH:MM:SS`, a `.`,
//! and an opaque nonce:
//!
//! ```text
//! 2026-03-14_09:26:53.Xk3Qz9
//! ```
//!
//! The nonce must not contain `.`; the creation path only ever produces
//! alphanumeric nonces, so this is a precondition rather than something
//! checked on encode.

use chrono::{DateTime, NaiveDateTime, SubsecRound, Utc};

use crate::error::WorkspaceError;

const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const NONCE_SEPARATOR: char = '.';

/// Format `creation_time` (truncated to whole seconds) and `nonce` as a
/// workspace directory name.
#[must_use]
pub fn encode(creation_time: DateTime<Utc>, nonce: &str) -> String {
    format!("{}{NONCE_SEPARATOR}{nonce}", format_time(creation_time))
}

/// The name prefix shared by every workspace created in the same second,
/// including the trailing separator. Used to seed unique directory creation.
#[must_use]
pub fn pattern_prefix(creation_time: DateTime<Utc>) -> String {
    encode(creation_time, "")
}

/// Parse a workspace directory name back into its creation time and nonce.
///
/// # Errors
///
/// Returns [`WorkspaceError::MalformedName`] when the name does not split into
/// exactly two `.`-separated parts, or the first part is not a time in the
/// canonical format.
pub fn decode(name: &str) -> Result<(DateTime<Utc>, String), WorkspaceError> {
    let mut parts = name.split(NONCE_SEPARATOR);
    let (Some(time_part), Some(nonce), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(WorkspaceError::malformed(name));
    };

    let creation_time =
        NaiveDateTime::parse_from_str(&time_part.replace('_', " "), DATE_TIME_FORMAT)
            .map_err(|_| WorkspaceError::malformed(name))?
            .and_utc();

    // chrono accepts unpadded fields; only the canonical spelling decodes so
    // that every decoded name re-encodes to itself.
    if format_time(creation_time) != time_part {
        return Err(WorkspaceError::malformed(name));
    }

    Ok((creation_time, nonce.to_string()))
}

/// Truncate a timestamp to the precision stored in workspace names.
#[must_use]
pub fn truncate_to_seconds(time: DateTime<Utc>) -> DateTime<Utc> {
    time.trunc_subsecs(0)
}

fn format_time(time: DateTime<Utc>) -> String {
    time.format(DATE_TIME_FORMAT).to_string().replace(' ', "_")
}
