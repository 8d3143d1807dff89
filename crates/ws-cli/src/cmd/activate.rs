use anyhow::Result;
use std::io::Write;

/// Shell function wrapping `ws_internal`, for bash and zsh.
const SHELL_SCRIPT: &str = include_str!("../shell/ws.sh");

/// Execute `ws_internal activate`: print the shell integration script.
///
/// # Errors
///
/// Returns an error if stdout is closed.
pub fn run_activate(out: &mut dyn Write) -> Result<()> {
    out.write_all(SHELL_SCRIPT.as_bytes())?;
    Ok(())
}
