//! Launchpad Git - Git operations for release automation
//!
//! This crate provides commit history, tag lookup and per-commit changed
//! file queries backed by libgit2.

mod commits;
mod repository;
mod tags;
pub mod types;
mod vcs;

pub use repository::{GitRepo, Result};
pub use types::{CommitInfo, TagInfo};
pub use vcs::GitWorkdir;
