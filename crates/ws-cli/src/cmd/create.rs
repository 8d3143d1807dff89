use anyhow::Result;
use std::io::Write;
use ws_core::{WorkspaceRoot, repository};

use crate::output;

/// Execute `ws_internal create_new_workspace`: create a workspace and print
/// its path. The shell function does the `cd`.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or stdout is closed.
pub fn run_create(root: &WorkspaceRoot, out: &mut dyn Write) -> Result<()> {
    let record = repository::create_new(root)?;
    output::write_path(out, &record.path())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prints_path_of_new_directory() {
        let tmp = tempfile::TempDir::new().expect("tempdir");
        let root = repository::ensure_root(tmp.path()).expect("root");

        let mut buf = Vec::new();
        run_create(&root, &mut buf).expect("create");

        let printed = String::from_utf8(buf).expect("utf8");
        let path = std::path::Path::new(printed.trim_end_matches('\n'));
        assert!(path.is_dir());
        assert_eq!(path.parent(), Some(tmp.path()));
        assert!(printed.ends_with('\n'));
    }
}
