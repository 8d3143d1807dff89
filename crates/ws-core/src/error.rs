use std::fmt;
use std::io;
use std::path::PathBuf;

/// Machine-readable error codes, stable across releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    HomeDirUnresolved,
    RootUnavailable,
    FilesystemIo,
    MalformedName,
    NotInWorkspace,
    WorkspaceNotFound,
    EmptyWorkspaceSet,
    AtOldestBoundary,
    AtNewestBoundary,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::HomeDirUnresolved => "E1001",
            Self::RootUnavailable => "E1002",
            Self::FilesystemIo => "E1003",
            Self::MalformedName => "E2001",
            Self::NotInWorkspace => "E2002",
            Self::WorkspaceNotFound => "E2003",
            Self::EmptyWorkspaceSet => "E3001",
            Self::AtOldestBoundary => "E3002",
            Self::AtNewestBoundary => "E3003",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::HomeDirUnresolved => "Home directory not defined",
            Self::RootUnavailable => "Workspace root unavailable",
            Self::FilesystemIo => "Filesystem operation failed",
            Self::MalformedName => "Malformed workspace name",
            Self::NotInWorkspace => "Not inside a workspace",
            Self::WorkspaceNotFound => "Workspace not found",
            Self::EmptyWorkspaceSet => "No workspaces",
            Self::AtOldestBoundary => "Oldest workspace reached",
            Self::AtNewestBoundary => "Newest workspace reached",
        }
    }

    /// Optional remediation hint surfaced after the error message.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::HomeDirUnresolved => Some("Set HOME, or set WS_ROOT to an absolute path."),
            Self::RootUnavailable => {
                Some("Check that the workspace root is a writable directory.")
            }
            Self::FilesystemIo => Some("Check disk space and permissions."),
            Self::MalformedName | Self::NotInWorkspace => {
                Some("Change into a workspace first, e.g. with `ws recent`.")
            }
            Self::WorkspaceNotFound => {
                Some("The workspace may have been removed; run `ws list` to see what is left.")
            }
            Self::EmptyWorkspaceSet => Some("Create a workspace with `ws new`."),
            Self::AtOldestBoundary | Self::AtNewestBoundary => None,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Every failure the core can report. None of them are retried.
#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    #[error("the user home directory is not defined")]
    HomeDirUnresolved,

    #[error("workspace root {} exists but is not a directory", path.display())]
    RootNotDirectory { path: PathBuf },

    #[error("failed to create workspace root {}", path.display())]
    RootCreate { path: PathBuf, source: io::Error },

    #[error("failed to read workspaces in {}", path.display())]
    ReadRoot { path: PathBuf, source: io::Error },

    #[error("failed to stat {}", path.display())]
    Stat { path: PathBuf, source: io::Error },

    #[error("failed to create new workspace directory in {}", path.display())]
    CreateWorkspace { path: PathBuf, source: io::Error },

    #[error("failed to obtain the working directory")]
    CurrentDir(#[source] io::Error),

    #[error("misformatted workspace name: {name}")]
    MalformedName { name: String },

    #[error("the current working directory {} is not in a workspace", cwd.display())]
    NotInWorkspace { cwd: PathBuf },

    #[error("failed to find workspace {name}")]
    WorkspaceNotFound { name: String },

    #[error("there are currently no workspaces")]
    EmptyWorkspaceSet,

    #[error("the oldest workspace has been reached")]
    AtOldestBoundary,

    #[error("the current workspace is the newest workspace")]
    AtNewestBoundary,
}

impl WorkspaceError {
    /// Machine-readable code associated with this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::HomeDirUnresolved => ErrorCode::HomeDirUnresolved,
            Self::RootNotDirectory { .. } | Self::RootCreate { .. } => ErrorCode::RootUnavailable,
            Self::ReadRoot { .. }
            | Self::Stat { .. }
            | Self::CreateWorkspace { .. }
            | Self::CurrentDir(_) => ErrorCode::FilesystemIo,
            Self::MalformedName { .. } => ErrorCode::MalformedName,
            Self::NotInWorkspace { .. } => ErrorCode::NotInWorkspace,
            Self::WorkspaceNotFound { .. } => ErrorCode::WorkspaceNotFound,
            Self::EmptyWorkspaceSet => ErrorCode::EmptyWorkspaceSet,
            Self::AtOldestBoundary => ErrorCode::AtOldestBoundary,
            Self::AtNewestBoundary => ErrorCode::AtNewestBoundary,
        }
    }

    /// Optional remediation hint for the user.
    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        self.code().hint()
    }

    pub(crate) fn malformed(name: &str) -> Self {
        Self::MalformedName {
            name: name.to_string(),
        }
    }
}
