// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Breaking-change detector (component G). Drives the export extractor
//! and differ across modified, deleted, and renamed source files, infers
//! renamed symbols, and attaches consumer paths from the reverse-dep
//! index.

use std::path::Path;

use crate::error::PerFileFailure;
use crate::exports::{diff_exports, extract_exports};
use crate::gateway::RepoGateway;
use crate::importgraph::reverse::ReverseDependencyMap;
use crate::model::{BreakingChange, BreakingChangeType, ChangeStatus, ChangedFile, ExportedSymbol, FileExports, Severity};
use crate::signature::diff_signatures;

const ANALYZABLE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx"];

fn is_analyzable(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| ANALYZABLE_EXTENSIONS.contains(&e))
        .unwrap_or(false)
}

fn consumers_of(reverse_map: &ReverseDependencyMap, path: &Path) -> Vec<std::path::PathBuf> {
    reverse_map.importers_of(path).to_vec()
}

/// Reads `path` at `reference` through the gateway, returning `None` (and
/// recording a warning) if the read fails. Errors reading one file never
/// abort the surrounding pass.
fn try_read(
    gateway: &dyn RepoGateway,
    reference: &str,
    path: &Path,
    warnings: &mut Vec<PerFileFailure>,
) -> Option<String> {
    match gateway.read_at(reference, path) {
        Ok(bytes) => match String::from_utf8(bytes) {
            Ok(text) => Some(text),
            Err(_) => {
                warnings.push(PerFileFailure::new(path, "file is not valid UTF-8, skipped"));
                None
            }
        },
        Err(e) => {
            warnings.push(PerFileFailure::new(path, format!("unreadable: {e}")));
            None
        }
    }
}

fn signature_of(symbol: &ExportedSymbol) -> Option<&str> {
    symbol.signature.as_deref()
}

fn removed_export_change(
    file_path: &Path,
    symbol: &ExportedSymbol,
    reverse_map: &ReverseDependencyMap,
) -> BreakingChange {
    BreakingChange {
        file_path: file_path.to_path_buf(),
        symbol_name: symbol.name.clone(),
        before: symbol.signature.clone().unwrap_or_else(|| symbol.name.clone()),
        after: None,
        consumers: consumers_of(reverse_map, file_path),
        severity: Severity::High,
        change_type: BreakingChangeType::RemovedExport,
    }
}

/// Processes a deleted file: every exported symbol it carried at base is a
/// removed export, at high severity.
fn process_deleted(
    gateway: &dyn RepoGateway,
    base_ref: &str,
    path: &Path,
    reverse_map: &ReverseDependencyMap,
    warnings: &mut Vec<PerFileFailure>,
    out: &mut Vec<BreakingChange>,
) {
    let Some(content) = try_read(gateway, base_ref, path, warnings) else { return };
    let exports = extract_exports(&content, path);
    for symbol in &exports.symbols {
        out.push(removed_export_change(path, symbol, reverse_map));
    }
}

/// Processes a rename: an old-side symbol still present at the new
/// location under the same `(name, kind)` is a path-only rename (low
/// severity); an old-side symbol no longer present at the new location
/// is a real removal (high severity), reported against the new path for
/// consumer lookup purposes.
fn process_renamed(
    gateway: &dyn RepoGateway,
    base_ref: &str,
    head_ref: &str,
    old_path: &Path,
    new_path: &Path,
    reverse_map: &ReverseDependencyMap,
    warnings: &mut Vec<PerFileFailure>,
    out: &mut Vec<BreakingChange>,
) {
    let Some(base_content) = try_read(gateway, base_ref, old_path, warnings) else { return };
    let base_exports = extract_exports(&base_content, old_path);

    let head_exports = match try_read(gateway, head_ref, new_path, warnings) {
        Some(text) => extract_exports(&text, new_path),
        None => FileExports::new(new_path.to_path_buf()),
    };

    for symbol in &base_exports.symbols {
        match head_exports.find(symbol.is_default, &symbol.name) {
            Some(_) => out.push(BreakingChange {
                file_path: new_path.to_path_buf(),
                symbol_name: symbol.name.clone(),
                before: old_path.display().to_string(),
                after: Some(new_path.display().to_string()),
                consumers: consumers_of(reverse_map, old_path),
                severity: Severity::Low,
                change_type: BreakingChangeType::RenamedExport,
            }),
            None => out.push(BreakingChange {
                file_path: new_path.to_path_buf(),
                symbol_name: symbol.name.clone(),
                before: symbol.signature.clone().unwrap_or_else(|| symbol.name.clone()),
                after: None,
                consumers: consumers_of(reverse_map, old_path),
                severity: Severity::High,
                change_type: BreakingChangeType::RemovedExport,
            }),
        }
    }
}

/// Processes a modification: full export diff, rename inference within
/// the removed/added sets, then kind/signature change classification for
/// the remainder.
fn process_modified(
    gateway: &dyn RepoGateway,
    base_ref: &str,
    head_ref: &str,
    base_path: &Path,
    head_path: &Path,
    reverse_map: &ReverseDependencyMap,
    warnings: &mut Vec<PerFileFailure>,
    out: &mut Vec<BreakingChange>,
) {
    let Some(base_content) = try_read(gateway, base_ref, base_path, warnings) else { return };
    let Some(head_content) = try_read(gateway, head_ref, head_path, warnings) else { return };

    let base_exports = extract_exports(&base_content, base_path);
    let head_exports = extract_exports(&head_content, head_path);
    let diff = diff_exports(&base_exports, &head_exports);

    let mut removed = diff.removed;
    let mut added = diff.added;

    // Rename inference: pair a removed symbol with an added symbol of the
    // same kind whose signature comparison reports no change.
    let mut renamed_pairs = Vec::new();
    removed.retain(|r| {
        if let Some(idx) = added.iter().position(|a| {
            a.kind == r.kind && a.is_default == r.is_default && !diff_signatures(signature_of(r), signature_of(a)).changed
        }) {
            renamed_pairs.push((r.clone(), added.remove(idx)));
            false
        } else {
            true
        }
    });

    for (before, after) in &renamed_pairs {
        out.push(BreakingChange {
            file_path: head_path.to_path_buf(),
            symbol_name: after.name.clone(),
            before: before.name.clone(),
            after: Some(after.name.clone()),
            consumers: consumers_of(reverse_map, base_path),
            severity: Severity::Low,
            change_type: BreakingChangeType::RenamedExport,
        });
    }

    for symbol in &removed {
        out.push(removed_export_change(head_path, symbol, reverse_map));
    }

    for (before, after) in &diff.modified {
        if before.kind != after.kind {
            out.push(BreakingChange {
                file_path: head_path.to_path_buf(),
                symbol_name: after.name.clone(),
                before: format!("{:?}", before.kind),
                after: Some(format!("{:?}", after.kind)),
                consumers: consumers_of(reverse_map, base_path),
                severity: Severity::Medium,
                change_type: BreakingChangeType::ChangedType,
            });
            continue;
        }
        let sig_diff = diff_signatures(signature_of(before), signature_of(after));
        if sig_diff.changed {
            out.push(BreakingChange {
                file_path: head_path.to_path_buf(),
                symbol_name: after.name.clone(),
                before: sig_diff.details.clone(),
                after: after.signature.clone(),
                consumers: consumers_of(reverse_map, base_path),
                severity: Severity::Medium,
                change_type: BreakingChangeType::ChangedSignature,
            });
        }
    }
}

/// Runs the breaking-change detector over all analyzable modified,
/// deleted, and renamed source files in `changed_files`.
pub fn detect_breaking_changes(
    changed_files: &[ChangedFile],
    gateway: &dyn RepoGateway,
    base_ref: &str,
    head_ref: &str,
    reverse_map: &ReverseDependencyMap,
) -> (Vec<BreakingChange>, Vec<PerFileFailure>) {
    let mut out = Vec::new();
    let mut warnings = Vec::new();

    for file in changed_files {
        if !is_analyzable(&file.path) {
            continue;
        }
        match file.status {
            ChangeStatus::Deleted => {
                process_deleted(gateway, base_ref, &file.path, reverse_map, &mut warnings, &mut out);
            }
            ChangeStatus::Renamed => {
                let old_path = file.old_path.as_deref().unwrap_or(&file.path);
                process_renamed(
                    gateway, base_ref, head_ref, old_path, &file.path, reverse_map, &mut warnings, &mut out,
                );
            }
            ChangeStatus::Modified => {
                let base_path = file.old_path.as_deref().unwrap_or(&file.path);
                process_modified(
                    gateway, base_ref, head_ref, base_path, &file.path, reverse_map, &mut warnings, &mut out,
                );
            }
            ChangeStatus::Added | ChangeStatus::Copied => {}
        }
    }

    (out, warnings)
}

#[cfg(test)]
#[path = "breaking_tests.rs"]
mod tests;
