// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test-only in-memory gateway, shared by unit tests across modules so
//! they don't each need a throwaway git repository.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{AnalysisError, ReadError};
use crate::gateway::RawChange;
use crate::gateway::RepoGateway;

#[derive(Default)]
pub(crate) struct InMemoryGateway {
    pub base_files: HashMap<PathBuf, String>,
    pub head_files: HashMap<PathBuf, String>,
    pub all_files: Vec<PathBuf>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base(mut self, path: &str, content: &str) -> Self {
        self.base_files.insert(PathBuf::from(path), content.to_string());
        self
    }

    pub fn with_head(mut self, path: &str, content: &str) -> Self {
        self.head_files.insert(PathBuf::from(path), content.to_string());
        self.all_files.push(PathBuf::from(path));
        self
    }
}

impl RepoGateway for InMemoryGateway {
    fn list_changed(&self, _base: &str, _head: &str) -> Result<Vec<RawChange>, AnalysisError> {
        Ok(Vec::new())
    }

    fn read_at(&self, reference: &str, path: &Path) -> Result<Vec<u8>, ReadError> {
        let map = if reference == "base" { &self.base_files } else { &self.head_files };
        map.get(path)
            .map(|s| s.as_bytes().to_vec())
            .ok_or_else(|| ReadError::NotFound(path.to_path_buf()))
    }

    fn default_base(&self) -> String {
        "base".to_string()
    }

    fn enumerate_all_files(&self) -> Result<Vec<PathBuf>, AnalysisError> {
        let mut files = self.all_files.clone();
        files.sort();
        Ok(files)
    }
}
