// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Short human summary string builder. Serialization into Markdown, JSON,
//! or any other wire format stays the caller's responsibility; this is
//! just the one-line digest `analyze_pr` hands back alongside the
//! structured aggregate.

use crate::model::{PRAnalysis, RiskLevel};

fn risk_label(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Low => "low",
        RiskLevel::Medium => "medium",
        RiskLevel::High => "high",
        RiskLevel::Critical => "critical",
    }
}

pub fn summarize(analysis: &PRAnalysis) -> String {
    let file_count = analysis.changed_files.len();
    let additions: u32 = analysis.changed_files.iter().map(|f| f.additions).sum();
    let deletions: u32 = analysis.changed_files.iter().map(|f| f.deletions).sum();
    let breaking_count = analysis.breaking_changes.len();
    let coverage_gaps = analysis.coverage.gaps.len();

    format!(
        "{file_count} file{files_plural} changed (+{additions}/-{deletions}), \
{breaking_count} breaking change{breaking_plural}, \
{coverage_gaps} coverage gap{gaps_plural}, \
risk {score}/100 ({level})",
        files_plural = if file_count == 1 { "" } else { "s" },
        breaking_plural = if breaking_count == 1 { "" } else { "s" },
        gaps_plural = if coverage_gaps == 1 { "" } else { "s" },
        score = analysis.risk.score,
        level = risk_label(analysis.risk.level),
    )
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::model::{ChangeStatus, ChangedFile, FileCategory, RiskAssessment, RiskFactor, TestCoverageReport};

    use super::*;

    fn factor(name: &'static str) -> RiskFactor {
        RiskFactor { name, score: 0, weight: 1.0 / 6.0, description: String::new(), details: None }
    }

    fn empty_analysis() -> PRAnalysis {
        PRAnalysis {
            changed_files: vec![ChangedFile {
                path: PathBuf::from("src/a.ts"),
                old_path: None,
                status: ChangeStatus::Modified,
                additions: 10,
                deletions: 2,
                language: "typescript".to_string(),
                category: FileCategory::Source,
            }],
            breaking_changes: Vec::new(),
            coverage: TestCoverageReport::default(),
            doc_staleness: Default::default(),
            impact: Default::default(),
            risk: RiskAssessment {
                score: 12,
                level: RiskLevel::Low,
                factors: [factor("a"), factor("b"), factor("c"), factor("d"), factor("e"), factor("f")],
            },
            warnings: Vec::new(),
        }
    }

    #[test]
    fn includes_every_headline_figure() {
        let analysis = empty_analysis();
        let text = summarize(&analysis);
        assert!(text.contains("1 file changed"));
        assert!(text.contains("+10/-2"));
        assert!(text.contains("0 breaking changes"));
        assert!(text.contains("risk 12/100 (low)"));
    }

    #[test]
    fn pluralizes_singular_counts() {
        let mut analysis = empty_analysis();
        analysis.breaking_changes.push(crate::model::BreakingChange {
            file_path: PathBuf::from("src/a.ts"),
            symbol_name: "thing".to_string(),
            before: "before".to_string(),
            after: None,
            consumers: Vec::new(),
            severity: crate::model::Severity::High,
            change_type: crate::model::BreakingChangeType::RemovedExport,
        });
        let text = summarize(&analysis);
        assert!(text.contains("1 breaking change,"));
    }
}
