// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Analysis orchestrator (component M): wires the repo gateway through
//! every checker into one `analyze_pr` entry point. The four independent
//! passes (breaking changes, coverage, doc staleness, impact graph) run
//! concurrently via `rayon::join`, each isolated behind `catch_unwind` so
//! a panic in one never takes down the others.

use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::Arc;

use crate::breaking::{self, BreakingChange};
use crate::cancel::CancellationToken;
use crate::config::{self, AnalysisOptions};
use crate::coverage::{self, FilesystemOracle, PathOracle};
use crate::docstale;
use crate::error::{AnalysisError, PerFileFailure};
use crate::gateway::{FilesystemOverlayGateway, Git2Gateway, RepoGateway};
use crate::importgraph::impact::compute_impact_graph;
use crate::importgraph::reverse::ReverseDepCache;
use crate::model::{DocStalenessReport, FileCategory, ImpactGraph, PRAnalysis, TestCoverageReport};
use crate::risk;
use crate::summary::summarize;

fn run_breaking(
    changed_files: &[crate::model::ChangedFile],
    gateway: &dyn RepoGateway,
    base_ref: &str,
    head_ref: &str,
    reverse_map: &crate::importgraph::reverse::ReverseDependencyMap,
) -> (Vec<BreakingChange>, Vec<PerFileFailure>) {
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        breaking::detect_breaking_changes(changed_files, gateway, base_ref, head_ref, reverse_map)
    }));
    result.unwrap_or_else(|_| {
        tracing::warn!("breaking-change pass panicked, continuing without its results");
        (Vec::new(), vec![PerFileFailure::new(PathBuf::from("."), "breaking-change pass panicked")])
    })
}

fn run_coverage(
    changed_files: &[crate::model::ChangedFile],
    oracle: &dyn PathOracle,
) -> TestCoverageReport {
    let result = panic::catch_unwind(AssertUnwindSafe(|| coverage::check_coverage(changed_files, oracle)));
    result.unwrap_or_else(|_| {
        tracing::warn!("coverage pass panicked, continuing without its results");
        TestCoverageReport::default()
    })
}

fn run_docstale(
    changed_files: &[crate::model::ChangedFile],
    gateway: &dyn RepoGateway,
    base_ref: &str,
    head_ref: &str,
    generic_names: &[String],
) -> (DocStalenessReport, Vec<PerFileFailure>) {
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        docstale::check_doc_staleness(changed_files, gateway, base_ref, head_ref, generic_names)
    }));
    result.unwrap_or_else(|_| {
        tracing::warn!("doc-staleness pass panicked, continuing without its results");
        (DocStalenessReport::default(), vec![PerFileFailure::new(PathBuf::from("."), "doc-staleness pass panicked")])
    })
}

fn run_impact(
    changed_source_files: &[PathBuf],
    reverse_map: &crate::importgraph::reverse::ReverseDependencyMap,
    max_depth: u32,
) -> ImpactGraph {
    let result =
        panic::catch_unwind(AssertUnwindSafe(|| compute_impact_graph(changed_source_files, reverse_map, max_depth)));
    result.unwrap_or_else(|_| {
        tracing::warn!("impact-graph pass panicked, continuing without its results");
        ImpactGraph::default()
    })
}

/// Resolves configuration, diffs `base`..`head`, runs every checker, and
/// folds the results into a [`PRAnalysis`] plus a short human summary.
pub fn analyze_pr(options: &AnalysisOptions, cancel: &CancellationToken) -> Result<(PRAnalysis, String), AnalysisError> {
    let inner = Git2Gateway::open(&options.repo_path)?;
    let root = inner.root().to_path_buf();

    let mut opts = options.clone();
    if let Some(config_path) = config::discover_config_path(&root) {
        if let Ok(file_config) = config::load_config(&config_path) {
            opts.apply_file_config(file_config);
        } else {
            tracing::warn!(path = %config_path.display(), "found pr-impact.toml but failed to parse it, using defaults");
        }
    }

    let head_ref = opts.head_branch.clone().unwrap_or_else(|| "HEAD".to_string());
    let gateway: FilesystemOverlayGateway<Git2Gateway> =
        FilesystemOverlayGateway::new(inner, root.clone(), head_ref.clone());
    let base_ref = opts.base_branch.clone().unwrap_or_else(|| gateway.default_base());

    if cancel.is_cancelled() {
        return Err(AnalysisError::Cancelled);
    }

    let raw_changes = gateway.list_changed(&base_ref, &head_ref)?;
    let changed_files = crate::diff::assemble(raw_changes);

    let cache = opts.reverse_dep_cache.clone().unwrap_or_else(|| Arc::new(ReverseDepCache::new()));
    let reverse_map = cache.get_or_build(&gateway, &head_ref, cancel)?;

    let source_paths: Vec<PathBuf> = changed_files
        .iter()
        .filter(|f| f.category == FileCategory::Source)
        .map(|f| f.path.clone())
        .collect();
    let oracle = FilesystemOracle::new(root.clone());

    let ((breaking_out, coverage_out), (docstale_out, impact_out)) = rayon::join(
        || {
            rayon::join(
                || {
                    if opts.skip_breaking {
                        (Vec::new(), Vec::new())
                    } else {
                        run_breaking(&changed_files, &gateway, &base_ref, &head_ref, &reverse_map)
                    }
                },
                || {
                    if opts.skip_coverage {
                        TestCoverageReport::default()
                    } else {
                        run_coverage(&changed_files, &oracle)
                    }
                },
            )
        },
        || {
            rayon::join(
                || {
                    if opts.skip_docs {
                        (DocStalenessReport::default(), Vec::new())
                    } else {
                        run_docstale(&changed_files, &gateway, &base_ref, &head_ref, &opts.generic_symbol_names)
                    }
                },
                || run_impact(&source_paths, &reverse_map, opts.max_depth),
            )
        },
    );

    let (breaking_changes, mut warnings) = breaking_out;
    let (doc_staleness, docstale_warnings) = docstale_out;
    warnings.extend(docstale_warnings);

    let risk = risk::assess_risk(&breaking_changes, &coverage_out, &changed_files, &doc_staleness, &impact_out);

    let analysis = PRAnalysis {
        changed_files,
        breaking_changes,
        coverage: coverage_out,
        doc_staleness,
        impact: impact_out,
        risk,
        warnings,
    };
    let summary = summarize(&analysis);
    Ok((analysis, summary))
}
