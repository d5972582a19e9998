// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! File categorizer and language detector (component B). Precedence is
//! fixed: test, then doc, then config, then source, then other.

use std::path::Path;

use crate::model::FileCategory;

const TEST_DIR_SEGMENTS: &[&str] = &["__tests__", "test", "tests"];
const DOC_DIR_SEGMENTS: &[&str] = &["doc", "docs"];
const DOC_EXTENSIONS: &[&str] = &["md", "mdx", "rst", "txt"];
const CONFIG_DIR_SEGMENTS: &[&str] = &[".github"];
const CONFIG_BASENAMES: &[&str] = &[
    "package.json",
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "Cargo.toml",
    "Cargo.lock",
    "tsconfig.json",
    "Dockerfile",
    "Makefile",
    ".eslintrc",
    ".prettierrc",
];
const CONFIG_PREFIXES: &[&str] = &[".eslintrc", ".prettierrc", "docker-compose", ".env"];
const CONFIG_SUFFIXES: &[&str] = &[".config.js", ".config.ts", ".config.mjs"];
const SOURCE_EXTENSIONS: &[&str] = &[
    "ts", "tsx", "js", "jsx", "mjs", "cjs", "py", "rb", "go", "rs", "java", "c", "cc", "cpp", "h",
    "hpp", "cs", "php",
];

/// Returns `true` when `path` has a path segment equal (case-sensitively)
/// to one of `segments`.
fn has_dir_segment(path: &Path, segments: &[&str]) -> bool {
    path.components().any(|c| {
        c.as_os_str()
            .to_str()
            .map(|s| segments.contains(&s))
            .unwrap_or(false)
    })
}

fn basename(path: &Path) -> Option<&str> {
    path.file_name().and_then(|n| n.to_str())
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|e| e.to_str())
}

fn is_test_path(path: &Path) -> bool {
    if has_dir_segment(path, TEST_DIR_SEGMENTS) {
        return true;
    }
    match basename(path) {
        Some(name) => {
            let lower = name.to_ascii_lowercase();
            lower.contains(".test.") || lower.contains(".spec.") || lower.starts_with("test")
        }
        None => false,
    }
}

fn is_doc_path(path: &Path) -> bool {
    if has_dir_segment(path, DOC_DIR_SEGMENTS) {
        return true;
    }
    extension(path)
        .map(|e| DOC_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

fn is_config_path(path: &Path) -> bool {
    if has_dir_segment(path, CONFIG_DIR_SEGMENTS) {
        return true;
    }
    let Some(name) = basename(path) else { return false };
    if CONFIG_BASENAMES.contains(&name) {
        return true;
    }
    if CONFIG_PREFIXES.iter().any(|p| name.starts_with(p)) {
        return true;
    }
    CONFIG_SUFFIXES.iter().any(|s| name.ends_with(s))
}

fn is_source_path(path: &Path) -> bool {
    extension(path)
        .map(|e| SOURCE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

pub fn categorize(path: &Path) -> FileCategory {
    if is_test_path(path) {
        FileCategory::Test
    } else if is_doc_path(path) {
        FileCategory::Doc
    } else if is_config_path(path) {
        FileCategory::Config
    } else if is_source_path(path) {
        FileCategory::Source
    } else {
        FileCategory::Other
    }
}

/// Maps a file's extension/basename to a human-facing language tag, e.g.
/// `typescript`, `python`, `dockerfile`, falling back to `unknown`.
pub fn detect_language(path: &Path) -> String {
    if let Some(name) = basename(path) {
        match name {
            "Dockerfile" => return "dockerfile".to_string(),
            "Makefile" => return "makefile".to_string(),
            _ => {}
        }
    }
    let tag = match extension(path).map(|e| e.to_ascii_lowercase()).as_deref() {
        Some("ts") | Some("tsx") => "typescript",
        Some("js") | Some("jsx") | Some("mjs") | Some("cjs") => "javascript",
        Some("py") => "python",
        Some("rb") => "ruby",
        Some("go") => "go",
        Some("rs") => "rust",
        Some("java") => "java",
        Some("c") => "c",
        Some("cc") | Some("cpp") | Some("hpp") => "cpp",
        Some("h") => "c",
        Some("cs") => "csharp",
        Some("php") => "php",
        Some("md") | Some("mdx") => "markdown",
        Some("json") => "json",
        Some("toml") => "toml",
        Some("yaml") | Some("yml") => "yaml",
        _ => "unknown",
    };
    tag.to_string()
}

#[cfg(test)]
#[path = "categorize_tests.rs"]
mod tests;
