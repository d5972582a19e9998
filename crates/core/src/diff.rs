// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Diff assembler (component C): turns gateway [`RawChange`] deltas into
//! categorized, language-tagged [`ChangedFile`] records.

use crate::categorize::{categorize, detect_language};
use crate::gateway::RawChange;
use crate::model::{ChangeStatus, ChangedFile};

pub fn assemble(raw_changes: Vec<RawChange>) -> Vec<ChangedFile> {
    raw_changes
        .into_iter()
        .map(|raw| {
            // A gateway backend that reports renames without separating old
            // and new paths upfront (e.g. one still holding a brace-folded
            // spec) is normalized here: any change carrying a distinct
            // old_path is a rename regardless of the status it arrived with.
            let status = match (&raw.status, &raw.old_path) {
                (ChangeStatus::Modified, Some(old)) if *old != raw.path => ChangeStatus::Renamed,
                (status, _) => *status,
            };
            let language = detect_language(&raw.path);
            let category = categorize(&raw.path);
            ChangedFile {
                path: raw.path,
                old_path: raw.old_path,
                status,
                additions: raw.additions,
                deletions: raw.deletions,
                language,
                category,
            }
        })
        .collect()
}
