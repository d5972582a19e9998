use std::collections::HashSet;
use std::path::PathBuf;

use crate::model::ChangeStatus;

use super::*;

struct FixedOracle(HashSet<PathBuf>);

impl PathOracle for FixedOracle {
    fn exists(&self, path: &Path) -> bool {
        self.0.contains(path)
    }
}

fn source_file(path: &str) -> ChangedFile {
    ChangedFile {
        path: PathBuf::from(path),
        old_path: None,
        status: ChangeStatus::Modified,
        additions: 5,
        deletions: 1,
        language: "typescript".to_string(),
        category: FileCategory::Source,
    }
}

fn test_file(path: &str) -> ChangedFile {
    ChangedFile {
        path: PathBuf::from(path),
        old_path: None,
        status: ChangeStatus::Modified,
        additions: 2,
        deletions: 0,
        language: "typescript".to_string(),
        category: FileCategory::Test,
    }
}

#[test]
fn candidate_paths_cover_siblings_and_top_level_mirror() {
    let candidates = candidate_test_paths(Path::new("src/utils/parser.ts"));
    assert!(candidates.contains(&PathBuf::from("src/utils/parser.test.ts")));
    assert!(candidates.contains(&PathBuf::from("src/utils/__tests__/parser.ts")));
    assert!(candidates.contains(&PathBuf::from("test/utils/parser.ts")));
    assert!(candidates.contains(&PathBuf::from("tests/utils/parser.js")));
}

#[test]
fn covered_when_existing_test_was_also_changed() {
    let oracle = FixedOracle(HashSet::from([PathBuf::from("src/utils/parser.test.ts")]));
    let files = vec![source_file("src/utils/parser.ts"), test_file("src/utils/parser.test.ts")];
    let report = check_coverage(&files, &oracle);
    assert_eq!(report.changed_source_files, 1);
    assert_eq!(report.source_files_with_test_changes, 1);
    assert_eq!(report.coverage_ratio, 1.0);
    assert!(report.gaps[0].test_file_exists);
    assert!(report.gaps[0].test_file_changed);
}

#[test]
fn gap_when_test_exists_but_was_not_touched() {
    let oracle = FixedOracle(HashSet::from([PathBuf::from("src/utils/parser.test.ts")]));
    let files = vec![source_file("src/utils/parser.ts")];
    let report = check_coverage(&files, &oracle);
    assert_eq!(report.source_files_with_test_changes, 0);
    assert!(report.gaps[0].test_file_exists);
    assert!(!report.gaps[0].test_file_changed);
}

#[test]
fn gap_when_no_test_file_exists_at_all() {
    let oracle = FixedOracle(HashSet::new());
    let files = vec![source_file("src/utils/parser.ts")];
    let report = check_coverage(&files, &oracle);
    assert!(!report.gaps[0].test_file_exists);
    assert_eq!(report.coverage_ratio, 0.0);
}

#[test]
fn no_source_changes_yields_full_ratio() {
    let oracle = FixedOracle(HashSet::new());
    let report = check_coverage(&[], &oracle);
    assert_eq!(report.changed_source_files, 0);
    assert_eq!(report.coverage_ratio, 1.0);
}
