//! ws-core library.
//!
//! Workspaces are directories under a single root, named
//! `YYYY-MM-DD_HH:MM:SS.<nonce>`. This crate encodes and decodes those names,
//! enumerates and creates workspace directories, orders them by filesystem
//! modification time, and navigates that order.
//!
//! # Conventions
//!
//! - **Errors**: Core operations return [`WorkspaceError`]; configuration
//!   loading uses `anyhow::Result` with path context.
//! - **Logging**: Use `tracing` macros (`warn!`, `debug!`, `trace!`). Nothing in
//!   this crate prints or exits; the binary owns stdout, stderr, and the exit code.

pub mod codec;
pub mod config;
pub mod error;
pub mod navigator;
pub mod recency;
pub mod repository;

pub use error::{ErrorCode, WorkspaceError};
pub use navigator::Direction;
pub use repository::{WorkspaceRecord, WorkspaceRoot};
