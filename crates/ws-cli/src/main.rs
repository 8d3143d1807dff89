#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{Parser, Subcommand};
use std::env;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use ws_core::config::RootSettings;
use ws_core::{Direction, WorkspaceError, WorkspaceRoot, repository};

#[derive(Parser, Debug)]
#[command(
    name = "ws_internal",
    author,
    version,
    about = "ws internal: workspace bookkeeping behind the `ws` shell function",
    long_about = None,
    after_help = "Load the shell function with:\n    eval \"$(ws_internal activate)\""
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
#[command(rename_all = "snake_case")]
enum Commands {
    #[command(
        about = "Create a new workspace",
        long_about = "Create a new workspace under the root and print its absolute path."
    )]
    CreateNewWorkspace,

    #[command(
        about = "List workspaces, least recently used first",
        long_about = "Print one `<rank> <name> <elapsed>` line per workspace, ordered by directory mtime."
    )]
    ListWorkspaces,

    #[command(about = "Print the most recently used workspace")]
    PrintRecentWorkspace,

    #[command(about = "Print the workspace containing the working directory")]
    PrintCurrentWorkspace,

    #[command(about = "Print the next newer workspace")]
    PrintNextWorkspace,

    #[command(about = "Print the next older workspace")]
    PrintPrevWorkspace,

    #[command(about = "Print the workspace root directory")]
    PrintWorkspaceRoot,

    #[command(
        about = "Print the shell integration script",
        after_help = "EXAMPLES:\n    # Add to ~/.bashrc or ~/.zshrc\n    eval \"$(ws_internal activate)\""
    )]
    Activate,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("WS_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "ws=debug,warn"
        } else {
            "ws=warn,error"
        })
    });

    let format = env::var("WS_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    // stdout carries the path the shell function cd's into; logs stay off it.
    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(io::stderr))
                .init();
        }
    }
}

fn resolve_root() -> anyhow::Result<WorkspaceRoot> {
    let settings = RootSettings::from_env()?;
    let root = repository::ensure_system_root(&settings)?;
    debug!(root = %root.path().display(), "resolved workspace root");
    Ok(root)
}

fn run(command: Commands, out: &mut dyn Write) -> anyhow::Result<()> {
    match command {
        Commands::CreateNewWorkspace => cmd::create::run_create(&resolve_root()?, out),
        Commands::ListWorkspaces => {
            cmd::list::run_list(&resolve_root()?, chrono::Utc::now(), out)
        }
        Commands::PrintRecentWorkspace => cmd::print::run_print_recent(&resolve_root()?, out),
        Commands::PrintCurrentWorkspace => print_relative(Direction::Current, out),
        Commands::PrintNextWorkspace => print_relative(Direction::Next, out),
        Commands::PrintPrevWorkspace => print_relative(Direction::Previous, out),
        Commands::PrintWorkspaceRoot => cmd::print::run_print_root(&resolve_root()?, out),
        Commands::Activate => cmd::activate::run_activate(out),
    }
}

fn print_relative(direction: Direction, out: &mut dyn Write) -> anyhow::Result<()> {
    let root = resolve_root()?;
    let cwd = env::current_dir().map_err(WorkspaceError::CurrentDir)?;
    cmd::print::run_print_relative(&root, direction, &cwd, out)
}

fn main() -> ExitCode {
    init_tracing();

    // Usage errors exit here with clap's status 2.
    let cli = Cli::parse();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = run(cli.command, &mut out).and_then(|()| out.flush().map_err(Into::into));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::render_error(&mut io::stderr().lock(), "ws_internal", &err);
            ExitCode::FAILURE
        }
    }
}
