// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::{Path, PathBuf};

use git2::{BranchType, Delta, DiffFindOptions, DiffOptions, Patch, Repository};
use ignore::WalkBuilder;

use crate::error::{AnalysisError, ReadError};
use crate::model::ChangeStatus;

use super::vendor::is_excluded;
use super::{RawChange, RepoGateway};

/// Ref resolution, default-branch detection, and blob reads are all done
/// directly through `git2` — no subprocess, no working-tree dependency.
pub struct Git2Gateway {
    repo: Repository,
    root: PathBuf,
}

impl Git2Gateway {
    pub fn open(path: &Path) -> Result<Self, AnalysisError> {
        let repo = Repository::discover(path)
            .map_err(|_| AnalysisError::NotARepository(path.to_path_buf()))?;
        let root = repo
            .workdir()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| path.to_path_buf());
        Ok(Self { repo, root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve_tree<'a>(&'a self, reference: &str) -> Result<git2::Tree<'a>, AnalysisError> {
        let obj = self
            .repo
            .revparse_single(reference)
            .map_err(|e| AnalysisError::BadRef {
                reference: reference.to_string(),
                source: e.into(),
            })?;
        let commit = obj.peel_to_commit().map_err(|e| AnalysisError::BadRef {
            reference: reference.to_string(),
            source: e.into(),
        })?;
        commit.tree().map_err(|e| AnalysisError::BadRef {
            reference: reference.to_string(),
            source: e.into(),
        })
    }

    fn map_status(delta: Delta) -> ChangeStatus {
        match delta {
            Delta::Added => ChangeStatus::Added,
            Delta::Deleted => ChangeStatus::Deleted,
            Delta::Renamed => ChangeStatus::Renamed,
            Delta::Copied => ChangeStatus::Copied,
            _ => {
                tracing::debug!(?delta, "unexpected delta status, treating as modified");
                ChangeStatus::Modified
            }
        }
    }
}

impl RepoGateway for Git2Gateway {
    fn list_changed(&self, base: &str, head: &str) -> Result<Vec<RawChange>, AnalysisError> {
        let base_tree = self.resolve_tree(base)?;
        let head_tree = self.resolve_tree(head)?;

        let mut opts = DiffOptions::new();
        opts.include_untracked(false);

        let mut diff = self
            .repo
            .diff_tree_to_tree(Some(&base_tree), Some(&head_tree), Some(&mut opts))
            .map_err(|e| AnalysisError::BadRef {
                reference: format!("{base}..{head}"),
                source: e.into(),
            })?;

        let mut find_opts = DiffFindOptions::new();
        find_opts.renames(true).copies(true);
        let _ = diff.find_similar(Some(&mut find_opts));

        let mut changes = Vec::new();
        for (idx, delta) in diff.deltas().enumerate() {
            let status = Self::map_status(delta.status());
            let path = delta
                .new_file()
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_default();
            let old_path = delta.old_file().path().map(Path::to_path_buf);
            let old_path = match status {
                ChangeStatus::Renamed | ChangeStatus::Copied => old_path,
                _ => None,
            };

            let (additions, deletions) = match Patch::from_diff(&diff, idx) {
                Ok(Some(patch)) => {
                    let (_, add, del) = patch.line_stats().unwrap_or((0, 0, 0));
                    (add as u32, del as u32)
                }
                _ => (0, 0),
            };

            changes.push(RawChange { path, old_path, status, additions, deletions });
        }

        tracing::debug!(count = changes.len(), "diffed {base}..{head}");
        Ok(changes)
    }

    fn read_at(&self, reference: &str, path: &Path) -> Result<Vec<u8>, ReadError> {
        let tree = self.resolve_tree(reference).map_err(|_| ReadError::NotFound(path.to_path_buf()))?;
        let entry = tree
            .get_path(path)
            .map_err(|_| ReadError::NotFound(path.to_path_buf()))?;
        let object = entry
            .to_object(&self.repo)
            .map_err(|e| ReadError::Unreadable { path: path.to_path_buf(), message: e.to_string() })?;
        let blob = object
            .as_blob()
            .ok_or_else(|| ReadError::Unreadable {
                path: path.to_path_buf(),
                message: "not a blob".to_string(),
            })?;
        Ok(blob.content().to_vec())
    }

    fn default_base(&self) -> String {
        for candidate in ["main", "master"] {
            if self.repo.find_branch(candidate, BranchType::Local).is_ok() {
                return candidate.to_string();
            }
        }
        for candidate in ["origin/main", "origin/master"] {
            if self.repo.find_branch(candidate, BranchType::Remote).is_ok() {
                return candidate.to_string();
            }
        }
        "main".to_string()
    }

    fn enumerate_all_files(&self) -> Result<Vec<PathBuf>, AnalysisError> {
        let root = self.root.clone();
        let mut files = Vec::new();
        for entry in WalkBuilder::new(&self.root)
            .hidden(false)
            .git_ignore(true)
            .filter_entry(move |e| {
                e.path()
                    .strip_prefix(&root)
                    .map(|rel| rel.as_os_str().is_empty() || !is_excluded(rel))
                    .unwrap_or(true)
            })
            .build()
        {
            let Ok(entry) = entry else { continue };
            if entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                if let Ok(rel) = entry.path().strip_prefix(&self.root) {
                    files.push(rel.to_path_buf());
                }
            }
        }
        files.sort();
        Ok(files)
    }
}
