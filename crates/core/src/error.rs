// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error taxonomy for PR impact analysis.
//!
//! Two tiers, per the design's error-handling policy: fatal preflight
//! errors that abort analysis before any subsystem runs, and per-file
//! failures that are absorbed locally so one corrupt file can't mask
//! valid signals elsewhere in the PR.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors, surfaced to the caller. Abort the whole analysis.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("{0} is not a git repository")]
    NotARepository(PathBuf),

    #[error("failed to resolve ref '{reference}': {source}")]
    BadRef {
        reference: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("analysis was cancelled")]
    Cancelled,
}

/// A single-file read failure during a repo-wide scan (consumer scan, doc
/// scan). Recoverable: the file contributes nothing to that pass.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("{0} not found at ref")]
    NotFound(PathBuf),
    #[error("failed to read {path}: {message}")]
    Unreadable { path: PathBuf, message: String },
}

/// A recoverable failure while analyzing one file, absorbed locally.
///
/// Accumulated on `PRAnalysis::warnings` for structured logging by the
/// caller; a single entry never aborts the surrounding pass.
#[derive(Debug, Clone)]
pub struct PerFileFailure {
    pub path: PathBuf,
    pub message: String,
}

impl PerFileFailure {
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self { path: path.into(), message: message.into() }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
