// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Library primitives for analyzing the impact of a pull request: which
//! files changed, which exported symbols broke, which changes shipped
//! without a matching test, which documentation now refers to something
//! that no longer exists, how far the change radiates through the import
//! graph, and a single risk score folding all of the above together.
//!
//! [`analyze_pr`] is the entry point; everything else is exposed so a
//! caller can run individual passes directly.

mod analysis;
mod breaking;
mod cancel;
mod categorize;
mod config;
mod coverage;
mod diff;
mod docstale;
mod error;
mod exports;
mod file_reader;
mod gateway;
mod importgraph;
mod model;
mod risk;
mod signature;
mod summary;

#[cfg(test)]
pub(crate) mod testutil;

pub use analysis::analyze_pr;
pub use breaking::detect_breaking_changes;
pub use cancel::CancellationToken;
pub use categorize::{categorize, detect_language};
pub use config::{AnalysisOptions, FileConfig, defaults, discover_config_path, load_config};
pub use coverage::{FilesystemOracle, PathOracle, candidate_test_paths, check_coverage};
pub use diff::assemble as assemble_changed_files;
pub use docstale::check_doc_staleness;
pub use error::{AnalysisError, PerFileFailure, ReadError};
pub use exports::{
    ExportDiff, ReexportResolver, diff_exports, extract_exports, extract_exports_with_resolver,
};
pub use gateway::{
    FilesystemOverlayGateway, Git2Gateway, RawChange, RepoGateway, expand_braced_rename,
};
pub use importgraph::impact::compute_impact_graph;
pub use importgraph::reverse::{ReverseDepCache, ReverseDependencyMap, build_reverse_dependency_map};
pub use model::{
    BreakingChange, BreakingChangeType, ChangeStatus, ChangedFile, CoverageGap,
    DocStalenessReport, ExportedSymbol, FileCategory, FileExports, ImpactEdge, ImpactEdgeKind,
    ImpactGraph, PRAnalysis, RiskAssessment, RiskFactor, RiskLevel, Severity, StaleReference,
    SymbolKind, TestCoverageReport,
};
pub use risk::assess_risk;
pub use signature::{SignatureDiff, diff_signatures};
pub use summary::summarize;
