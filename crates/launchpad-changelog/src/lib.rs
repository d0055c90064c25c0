//! Launchpad Changelog - Package-aware changelog sections
//!
//! This crate attributes commits to the workspace packages they touched and
//! groups rendered changelog lines into per-package sections.

pub mod mapper;
pub mod partition;

pub use mapper::{packages_from_paths, AffectedPackages, CommitPackageMapper};
pub use partition::{
    bucket_key, default_line, partition, render_flat, ChangelogPartitioner, MONOREPO_BUCKET,
};
