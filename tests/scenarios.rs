//! End-to-end scenarios run against throwaway git repositories, each one
//! mirroring a quantified invariant from the design notes.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "scenarios/fixtures.rs"]
mod fixtures;

use std::path::PathBuf;

use fixtures::Fixture;
use pr_impact_core::{AnalysisOptions, BreakingChangeType, CancellationToken, RiskLevel, Severity, analyze_pr};

/// Surfaces the crate's `tracing` output (per-file warnings, cache builds)
/// when a scenario is run with `--nocapture`; harmless to call more than
/// once since a later `try_init` is simply ignored.
fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn options_for(fixture: &Fixture, base: git2::Oid) -> AnalysisOptions {
    let mut options = AnalysisOptions::new(fixture.root());
    options.base_branch = Some(base.to_string());
    options
}

/// S1 — removed export with a single consumer: one `removed_export`
/// breaking change at high severity, consumer list naming the importer.
#[test]
fn s1_removed_export_single_consumer() {
    init_tracing();
    let fixture = Fixture::init();
    fixture.write("src/lib.ts", "export function foo() {}\nexport function bar() {}\n");
    fixture.write("src/app.ts", "import { bar } from './lib';\n");
    let base = fixture.commit("base");

    fixture.write("src/lib.ts", "export function foo() {}\n");
    fixture.commit("head");

    let options = options_for(&fixture, base);
    let cancel = CancellationToken::new();
    let (analysis, _) = analyze_pr(&options, &cancel).expect("analyze s1");

    assert_eq!(analysis.breaking_changes.len(), 1);
    let change = &analysis.breaking_changes[0];
    assert_eq!(change.change_type, BreakingChangeType::RemovedExport);
    assert_eq!(change.severity, Severity::High);
    assert_eq!(change.symbol_name, "bar");
    assert_eq!(change.consumers, vec![PathBuf::from("src/app.ts")]);
}

/// S2 — renamed function within a file: one `renamed_export` at low
/// severity, no spurious `removed_export` for the old name.
#[test]
fn s2_renamed_function_within_file() {
    init_tracing();
    let fixture = Fixture::init();
    fixture.write("src/lib.ts", "export function oldName(x: number): number {\n  return x;\n}\n");
    let base = fixture.commit("base");

    fixture.write("src/lib.ts", "export function newName(x: number): number {\n  return x;\n}\n");
    fixture.commit("head");

    let options = options_for(&fixture, base);
    let cancel = CancellationToken::new();
    let (analysis, _) = analyze_pr(&options, &cancel).expect("analyze s2");

    assert_eq!(analysis.breaking_changes.len(), 1);
    let change = &analysis.breaking_changes[0];
    assert_eq!(change.change_type, BreakingChangeType::RenamedExport);
    assert_eq!(change.severity, Severity::Low);
    assert_eq!(change.before, "oldName");
    assert_eq!(change.symbol_name, "newName");
}

/// S3 — signature change: one `changed_signature` at medium severity,
/// with a structural "parameter count changed" detail.
#[test]
fn s3_signature_change() {
    init_tracing();
    let fixture = Fixture::init();
    fixture.write("src/lib.ts", "export function calc(a: number): number {\n  return a;\n}\n");
    let base = fixture.commit("base");

    fixture.write("src/lib.ts", "export function calc(a: number, b: number): number {\n  return a + b;\n}\n");
    fixture.commit("head");

    let options = options_for(&fixture, base);
    let cancel = CancellationToken::new();
    let (analysis, _) = analyze_pr(&options, &cancel).expect("analyze s3");

    assert_eq!(analysis.breaking_changes.len(), 1);
    let change = &analysis.breaking_changes[0];
    assert_eq!(change.change_type, BreakingChangeType::ChangedSignature);
    assert_eq!(change.severity, Severity::Medium);
    assert!(change.before.contains("parameter count changed from 1 to 2"), "{}", change.before);
}

/// S4 — deleted source file still referenced in docs: two stale
/// references against the same doc line, one for the path and one for
/// the symbol it used to export.
#[test]
fn s4_deleted_file_referenced_in_docs() {
    init_tracing();
    let fixture = Fixture::init();
    fixture.write("src/old.ts", "export function doThing() {}\n");
    fixture.write("README.md", "See src/old.ts for doThing usage.\n");
    let base = fixture.commit("base");

    fixture.remove("src/old.ts");
    fixture.commit("head");

    let options = options_for(&fixture, base);
    let cancel = CancellationToken::new();
    let (analysis, _) = analyze_pr(&options, &cancel).expect("analyze s4");

    let on_line_one: Vec<_> = analysis.doc_staleness.stale_references.iter().filter(|r| r.line == 1).collect();
    assert_eq!(on_line_one.len(), 2);
    assert!(on_line_one.iter().any(|r| r.reference == "src/old.ts" && r.reason == "referenced file was deleted"));
    assert!(
        on_line_one
            .iter()
            .any(|r| r.reference == "doThing" && r.reason.contains("referenced symbol was removed from src/old.ts"))
    );
}

/// S5 — impact graph with two levels: depth 1 stops after the direct
/// importer, depth 2 reaches the transitive one.
#[test]
fn s5_impact_graph_two_levels() {
    init_tracing();
    let fixture = Fixture::init();
    fixture.write("src/c.ts", "export function c() {}\n");
    fixture.write("src/b.ts", "import { c } from './c';\n");
    fixture.write("src/a.ts", "import { b } from './b';\n");
    let base = fixture.commit("base");

    fixture.write("src/c.ts", "export function c() {\n  return 1;\n}\n");
    fixture.commit("head");

    let mut options = options_for(&fixture, base);
    options.max_depth = 1;
    let cancel = CancellationToken::new();
    let (analysis, _) = analyze_pr(&options, &cancel).expect("analyze s5 depth 1");

    assert_eq!(analysis.impact.directly_changed, vec![PathBuf::from("src/c.ts")]);
    assert_eq!(analysis.impact.indirectly_affected, vec![PathBuf::from("src/b.ts")]);
    assert_eq!(analysis.impact.edges.len(), 1);
    assert_eq!(analysis.impact.edges[0].from, PathBuf::from("src/b.ts"));
    assert_eq!(analysis.impact.edges[0].to, PathBuf::from("src/c.ts"));

    options.max_depth = 2;
    let (analysis, _) = analyze_pr(&options, &cancel).expect("analyze s5 depth 2");
    assert!(analysis.impact.indirectly_affected.contains(&PathBuf::from("src/a.ts")));
    assert!(analysis.impact.indirectly_affected.contains(&PathBuf::from("src/b.ts")));
}

/// S6 — full-risk PR: every factor saturates its bucket, so the weighted
/// score rounds to 100 and the level is critical.
#[test]
fn s6_full_risk_pr() {
    init_tracing();
    let fixture = Fixture::init();

    let base_body: String = (0..20).map(|i| format!("line {i} of the original implementation\n")).collect();
    fixture.write("src/core.ts", &format!("export function core() {{\n{base_body}}}\n"));
    let other_body: String = (0..20).map(|i| format!("line {i} of a second large file\n")).collect();
    fixture.write("src/other.ts", &format!("export function other() {{\n{other_body}}}\n"));

    fixture.write("src/removed.ts", "export function killer() {}\n");
    fixture.write("README.md", "See src/removed.ts for killer usage.\n");

    fixture.write(".github/workflows/ci.yml", "name: ci\non: [push]\n");

    for n in 0..10 {
        fixture.write(&format!("src/importer{n}.ts"), &format!("import {{ core }} from './core';\nexport const ref{n} = core;\n"));
    }

    let base = fixture.commit("base");

    let head_body: String = (0..700).map(|i| format!("line {i} of the rewritten implementation\n")).collect();
    fixture.write("src/core.ts", &format!("export function core() {{\n{head_body}}}\n"));
    let other_head_body: String = (0..700).map(|i| format!("line {i} of a rewritten second file\n")).collect();
    fixture.write("src/other.ts", &format!("export function other() {{\n{other_head_body}}}\n"));
    fixture.remove("src/removed.ts");
    fixture.write(".github/workflows/ci.yml", "name: ci\non: [push, pull_request]\n");
    fixture.commit("head");

    let options = options_for(&fixture, base);
    let cancel = CancellationToken::new();
    let (analysis, _) = analyze_pr(&options, &cancel).expect("analyze s6");

    assert!(analysis.breaking_changes.iter().any(|c| c.severity == Severity::High));
    assert_eq!(analysis.coverage.coverage_ratio, 0.0);
    assert!(analysis.doc_staleness.stale_references.len() >= 5);
    assert!(analysis.impact.indirectly_affected.len() >= 10);
    assert_eq!(analysis.risk.score, 100);
    assert_eq!(analysis.risk.level, RiskLevel::Critical);
}
