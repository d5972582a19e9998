// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Repo gateway (component A): the single seam between analysis and the
//! underlying git repository / working tree.

mod git2_backend;
mod overlay;
mod rename;
mod vendor;

use std::path::{Path, PathBuf};

use crate::error::{AnalysisError, ReadError};
use crate::model::ChangeStatus;

pub use git2_backend::Git2Gateway;
pub use overlay::FilesystemOverlayGateway;
pub use rename::expand_braced_rename;

/// One delta reported by a tree-to-tree diff, before categorization.
#[derive(Debug, Clone)]
pub struct RawChange {
    pub path: PathBuf,
    pub old_path: Option<PathBuf>,
    pub status: ChangeStatus,
    pub additions: u32,
    pub deletions: u32,
}

/// The seam every component reads the repository through. `list_changed`
/// and `read_at` are the only operations that touch git directly; every
/// other module depends on this trait, never on `git2` itself.
pub trait RepoGateway: Send + Sync {
    fn list_changed(&self, base: &str, head: &str) -> Result<Vec<RawChange>, AnalysisError>;

    fn read_at(&self, reference: &str, path: &Path) -> Result<Vec<u8>, ReadError>;

    /// Prefers `main`, falls back to `master`, otherwise returns `main`.
    fn default_base(&self) -> String;

    /// Every tracked file under the repo root, honoring `.gitignore` and
    /// vendor/build/VCS exclusions, in a stable (sorted) order.
    fn enumerate_all_files(&self) -> Result<Vec<PathBuf>, AnalysisError>;
}
