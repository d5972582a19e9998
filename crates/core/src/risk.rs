// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Risk aggregator (component L): six weighted factors folded into a
//! single 0-100 score and a bucketed [`RiskLevel`].

use crate::config::defaults;
use crate::model::{
    BreakingChange, ChangedFile, DocStalenessReport, FileCategory, ImpactGraph, RiskAssessment,
    RiskFactor, RiskLevel, Severity, TestCoverageReport,
};

fn breaking_change_score(breaking_changes: &[BreakingChange]) -> u8 {
    if breaking_changes.iter().any(|b| b.severity == Severity::High) {
        100
    } else if breaking_changes.iter().any(|b| b.severity == Severity::Medium) {
        60
    } else if breaking_changes.iter().any(|b| b.severity == Severity::Low) {
        30
    } else {
        0
    }
}

fn breaking_change_details(breaking_changes: &[BreakingChange]) -> Option<String> {
    if breaking_changes.is_empty() {
        return None;
    }
    let high = breaking_changes.iter().filter(|b| b.severity == Severity::High).count();
    let medium = breaking_changes.iter().filter(|b| b.severity == Severity::Medium).count();
    let low = breaking_changes.iter().filter(|b| b.severity == Severity::Low).count();
    Some(format!("{high} high, {medium} medium, {low} low"))
}

fn untested_change_score(coverage: &TestCoverageReport) -> u8 {
    let ratio = coverage.coverage_ratio.clamp(0.0, 1.0);
    (((1.0 - ratio) * 100.0).round() as i64).clamp(0, 100) as u8
}

fn diff_size_score(changed_files: &[ChangedFile]) -> u8 {
    let total: u32 = changed_files.iter().map(ChangedFile::total_lines).sum();
    if total < defaults::LARGE_DIFF_MEDIUM_LINES {
        0
    } else if total < defaults::LARGE_DIFF_HIGH_LINES {
        50
    } else if total <= defaults::LARGE_DIFF_MAX_LINES {
        80
    } else {
        100
    }
}

fn doc_staleness_score(report: &DocStalenessReport) -> u8 {
    ((report.stale_references.len() as u32) * 20).min(100) as u8
}

fn config_change_score(changed_files: &[ChangedFile]) -> u8 {
    let configs: Vec<&ChangedFile> =
        changed_files.iter().filter(|f| f.category == FileCategory::Config).collect();
    if configs.is_empty() {
        return 0;
    }
    let critical = configs.iter().any(|f| {
        let path = f.path.to_string_lossy();
        defaults::CI_CRITICAL_CONFIG_PATTERNS.iter().any(|p| path.contains(p))
    });
    if critical { 100 } else { 50 }
}

fn blast_radius_score(impact: &ImpactGraph) -> u8 {
    ((impact.indirectly_affected.len() as u32) * 10).min(100) as u8
}

fn level_for(score: u8) -> RiskLevel {
    if score <= defaults::RISK_LOW_MAX {
        RiskLevel::Low
    } else if score <= defaults::RISK_MEDIUM_MAX {
        RiskLevel::Medium
    } else if score <= defaults::RISK_HIGH_MAX {
        RiskLevel::High
    } else {
        RiskLevel::Critical
    }
}

pub fn assess_risk(
    breaking_changes: &[BreakingChange],
    coverage: &TestCoverageReport,
    changed_files: &[ChangedFile],
    doc_staleness: &DocStalenessReport,
    impact: &ImpactGraph,
) -> RiskAssessment {
    let total_lines: u32 = changed_files.iter().map(ChangedFile::total_lines).sum();
    let configs_touched = changed_files.iter().filter(|f| f.category == FileCategory::Config).count();

    let factors = [
        RiskFactor {
            name: "breaking_changes",
            score: breaking_change_score(breaking_changes),
            weight: 0.30,
            description: "Presence and severity of breaking export changes".to_string(),
            details: breaking_change_details(breaking_changes),
        },
        RiskFactor {
            name: "untested_changes",
            score: untested_change_score(coverage),
            weight: 0.25,
            description: "Share of changed source files without matching test changes".to_string(),
            details: Some(format!(
                "{}/{} changed source files covered",
                coverage.source_files_with_test_changes, coverage.changed_source_files
            )),
        },
        RiskFactor {
            name: "diff_size",
            score: diff_size_score(changed_files),
            weight: 0.15,
            description: "Total lines added and removed across the PR".to_string(),
            details: Some(format!("{total_lines} lines across {} files", changed_files.len())),
        },
        RiskFactor {
            name: "doc_staleness",
            score: doc_staleness_score(doc_staleness),
            weight: 0.10,
            description: "Documentation referencing removed or renamed code".to_string(),
            details: (!doc_staleness.stale_references.is_empty())
                .then(|| format!("{} stale reference(s)", doc_staleness.stale_references.len())),
        },
        RiskFactor {
            name: "config_changes",
            score: config_change_score(changed_files),
            weight: 0.10,
            description: "Changes to CI/build-critical configuration files".to_string(),
            details: (configs_touched > 0).then(|| format!("{configs_touched} config file(s) touched")),
        },
        RiskFactor {
            name: "blast_radius",
            score: blast_radius_score(impact),
            weight: 0.10,
            description: "Number of files indirectly affected through imports".to_string(),
            details: (!impact.indirectly_affected.is_empty())
                .then(|| format!("{} file(s) indirectly affected", impact.indirectly_affected.len())),
        },
    ];

    let weighted: f64 = factors.iter().map(|f| f.score as f64 * f.weight).sum();
    let score = weighted.round().clamp(0.0, 100.0) as u8;
    let level = level_for(score);

    RiskAssessment { score, level, factors }
}

#[cfg(test)]
#[path = "risk_tests.rs"]
mod tests;
