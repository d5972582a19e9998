use crate::importgraph::reverse::ReverseDependencyMap;
use crate::model::ChangeStatus;
use crate::testutil::InMemoryGateway;

use super::*;

fn changed_file(path: &str, status: ChangeStatus, old_path: Option<&str>) -> ChangedFile {
    ChangedFile {
        path: std::path::PathBuf::from(path),
        old_path: old_path.map(std::path::PathBuf::from),
        status,
        additions: 1,
        deletions: 1,
        language: "typescript".to_string(),
        category: crate::model::FileCategory::Source,
    }
}

#[test]
fn deleted_file_reports_every_export_as_high_severity() {
    let gateway = InMemoryGateway::new().with_base("src/old.ts", "export function doThing() {}\n");
    let reverse = ReverseDependencyMap::from_edges(vec![(
        std::path::PathBuf::from("src/old.ts"),
        std::path::PathBuf::from("src/consumer.ts"),
    )]);
    let files = vec![changed_file("src/old.ts", ChangeStatus::Deleted, None)];

    let (changes, warnings) = detect_breaking_changes(&files, &gateway, "base", "head", &reverse);
    assert!(warnings.is_empty());
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].severity, Severity::High);
    assert_eq!(changes[0].change_type, BreakingChangeType::RemovedExport);
    assert_eq!(changes[0].consumers, vec![std::path::PathBuf::from("src/consumer.ts")]);
}

#[test]
fn modified_file_detects_signature_change() {
    let gateway = InMemoryGateway::new()
        .with_base("src/a.ts", "export function add(a: number): number { return a; }\n")
        .with_head("src/a.ts", "export function add(a: string): number { return 0; }\n");
    let reverse = ReverseDependencyMap::from_edges(vec![]);
    let files = vec![changed_file("src/a.ts", ChangeStatus::Modified, None)];

    let (changes, _) = detect_breaking_changes(&files, &gateway, "base", "head", &reverse);
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].change_type, BreakingChangeType::ChangedSignature);
    assert_eq!(changes[0].severity, Severity::Medium);
}

#[test]
fn modified_file_infers_rename_between_removed_and_added() {
    let gateway = InMemoryGateway::new()
        .with_base("src/a.ts", "export function oldName(a: number): number { return a; }\n")
        .with_head("src/a.ts", "export function newName(a: number): number { return a; }\n");
    let reverse = ReverseDependencyMap::from_edges(vec![]);
    let files = vec![changed_file("src/a.ts", ChangeStatus::Modified, None)];

    let (changes, _) = detect_breaking_changes(&files, &gateway, "base", "head", &reverse);
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].change_type, BreakingChangeType::RenamedExport);
    assert_eq!(changes[0].severity, Severity::Low);
    assert_eq!(changes[0].before, "oldName");
    assert_eq!(changes[0].after.as_deref(), Some("newName"));
}

#[test]
fn renamed_file_with_unchanged_exports_reports_path_only_rename() {
    let gateway = InMemoryGateway::new()
        .with_base("src/old.ts", "export function thing(): void {}\n")
        .with_head("src/new.ts", "export function thing(): void {}\n");
    let reverse = ReverseDependencyMap::from_edges(vec![]);
    let files = vec![changed_file("src/new.ts", ChangeStatus::Renamed, Some("src/old.ts"))];

    let (changes, _) = detect_breaking_changes(&files, &gateway, "base", "head", &reverse);
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].change_type, BreakingChangeType::RenamedExport);
    assert_eq!(changes[0].severity, Severity::Low);
    assert_eq!(changes[0].symbol_name, "thing");
}

#[test]
fn renamed_file_dropping_a_symbol_reports_removed_export() {
    let gateway = InMemoryGateway::new()
        .with_base("src/old.ts", "export function thing(): void {}\nexport function other(): void {}\n")
        .with_head("src/new.ts", "export function thing(): void {}\n");
    let reverse = ReverseDependencyMap::from_edges(vec![(
        std::path::PathBuf::from("src/old.ts"),
        std::path::PathBuf::from("src/consumer.ts"),
    )]);
    let files = vec![changed_file("src/new.ts", ChangeStatus::Renamed, Some("src/old.ts"))];

    let (changes, _) = detect_breaking_changes(&files, &gateway, "base", "head", &reverse);
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].symbol_name, "other");
    assert_eq!(changes[0].change_type, BreakingChangeType::RemovedExport);
    assert_eq!(changes[0].severity, Severity::High);
    assert!(changes[0].after.is_none());
    assert_eq!(changes[0].consumers, vec![std::path::PathBuf::from("src/consumer.ts")]);
}

#[test]
fn added_file_never_produces_breaking_changes() {
    let gateway = InMemoryGateway::new().with_head("src/new.ts", "export function thing(): void {}\n");
    let reverse = ReverseDependencyMap::from_edges(vec![]);
    let files = vec![changed_file("src/new.ts", ChangeStatus::Added, None)];

    let (changes, _) = detect_breaking_changes(&files, &gateway, "base", "head", &reverse);
    assert!(changes.is_empty());
}

#[test]
fn unreadable_file_produces_warning_not_abort() {
    let gateway = InMemoryGateway::new();
    let reverse = ReverseDependencyMap::from_edges(vec![]);
    let files = vec![changed_file("src/missing.ts", ChangeStatus::Deleted, None)];

    let (changes, warnings) = detect_breaking_changes(&files, &gateway, "base", "head", &reverse);
    assert!(changes.is_empty());
    assert_eq!(warnings.len(), 1);
}

#[test]
fn non_analyzable_extension_is_skipped() {
    let gateway = InMemoryGateway::new().with_base("src/data.json", "{}\n");
    let reverse = ReverseDependencyMap::from_edges(vec![]);
    let files = vec![changed_file("src/data.json", ChangeStatus::Deleted, None)];

    let (changes, warnings) = detect_breaking_changes(&files, &gateway, "base", "head", &reverse);
    assert!(changes.is_empty());
    assert!(warnings.is_empty());
}
