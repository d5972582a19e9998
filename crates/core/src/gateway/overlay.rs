// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::{Path, PathBuf};

use crate::error::{AnalysisError, ReadError};
use crate::file_reader::read_file;

use super::{RawChange, RepoGateway};

/// Wraps any gateway and serves `read_at(head, path)` from the working
/// tree directly when the file is present there, falling back to the
/// wrapped gateway otherwise. Saves a tree lookup for the common case
/// where the analysis is run against a checked-out working copy at HEAD.
pub struct FilesystemOverlayGateway<G: RepoGateway> {
    inner: G,
    root: PathBuf,
    head_ref: String,
}

impl<G: RepoGateway> FilesystemOverlayGateway<G> {
    pub fn new(inner: G, root: impl Into<PathBuf>, head_ref: impl Into<String>) -> Self {
        Self { inner, root: root.into(), head_ref: head_ref.into() }
    }
}

impl<G: RepoGateway> RepoGateway for FilesystemOverlayGateway<G> {
    fn list_changed(&self, base: &str, head: &str) -> Result<Vec<RawChange>, AnalysisError> {
        self.inner.list_changed(base, head)
    }

    fn read_at(&self, reference: &str, path: &Path) -> Result<Vec<u8>, ReadError> {
        if reference == self.head_ref {
            let candidate = self.root.join(path);
            if let Ok(content) = read_file(&candidate) {
                return Ok(content.as_bytes().to_vec());
            }
        }
        self.inner.read_at(reference, path)
    }

    fn default_base(&self) -> String {
        self.inner.default_base()
    }

    fn enumerate_all_files(&self) -> Result<Vec<PathBuf>, AnalysisError> {
        self.inner.enumerate_all_files()
    }
}
