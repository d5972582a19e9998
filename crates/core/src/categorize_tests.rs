use std::path::Path;

use super::*;

#[test]
fn test_precedence_beats_source() {
    assert_eq!(categorize(Path::new("src/utils.test.ts")), FileCategory::Test);
    assert_eq!(categorize(Path::new("src/__tests__/utils.ts")), FileCategory::Test);
}

#[test]
fn basename_starting_with_test_is_test() {
    assert_eq!(categorize(Path::new("src/testHelpers.ts")), FileCategory::Test);
}

#[test]
fn doc_precedence_beats_config_and_source() {
    assert_eq!(categorize(Path::new("docs/guide.md")), FileCategory::Doc);
    assert_eq!(categorize(Path::new("README.md")), FileCategory::Doc);
}

#[test]
fn config_files_detected() {
    assert_eq!(categorize(Path::new("package.json")), FileCategory::Config);
    assert_eq!(categorize(Path::new(".github/workflows/ci.yml")), FileCategory::Config);
    assert_eq!(categorize(Path::new("Dockerfile")), FileCategory::Config);
    assert_eq!(categorize(Path::new("webpack.config.js")), FileCategory::Config);
}

#[test]
fn plain_source_files() {
    assert_eq!(categorize(Path::new("src/utils.ts")), FileCategory::Source);
    assert_eq!(categorize(Path::new("src/main.rs")), FileCategory::Source);
}

#[test]
fn unknown_extension_is_other() {
    assert_eq!(categorize(Path::new("assets/logo.svg")), FileCategory::Other);
}

#[test]
fn language_detection() {
    assert_eq!(detect_language(Path::new("src/a.tsx")), "typescript");
    assert_eq!(detect_language(Path::new("src/a.py")), "python");
    assert_eq!(detect_language(Path::new("Dockerfile")), "dockerfile");
    assert_eq!(detect_language(Path::new("assets/logo.svg")), "unknown");
}
