// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Normalizes the brace-folded rename paths some porcelain diff output
//! uses for renames confined to a shared directory, e.g.
//! `src/{old => new}/file.ts` or `src/a/{b => c}.ts`. `git2`'s diff API
//! never produces these (it gives clean old/new paths directly), but a
//! subprocess-backed gateway parsing `git diff --name-status -M` output
//! would, so the expansion lives here as a pure, independently testable
//! function any such backend can call.

/// Expands a single brace-folded rename spec into `(old_path, new_path)`.
/// Specs without a `{... => ...}` segment are returned unchanged on both
/// sides (a plain rename with no shared prefix/suffix).
pub fn expand_braced_rename(spec: &str) -> (String, String) {
    let Some(open) = spec.find('{') else {
        return (spec.to_string(), spec.to_string());
    };
    let Some(close_rel) = spec[open..].find('}') else {
        return (spec.to_string(), spec.to_string());
    };
    let close = open + close_rel;

    let prefix = &spec[..open];
    let inner = &spec[open + 1..close];
    let suffix = &spec[close + 1..];

    let Some(arrow) = inner.find("=>") else {
        return (spec.to_string(), spec.to_string());
    };
    let from = inner[..arrow].trim();
    let to = inner[arrow + 2..].trim();

    let old_path = collapse_double_slashes(&format!("{prefix}{from}{suffix}"));
    let new_path = collapse_double_slashes(&format!("{prefix}{to}{suffix}"));
    (old_path, new_path)
}

fn collapse_double_slashes(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut prev_slash = false;
    for c in path.chars() {
        if c == '/' {
            if prev_slash {
                continue;
            }
            prev_slash = true;
        } else {
            prev_slash = false;
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_directory_rename() {
        let (old, new) = expand_braced_rename("src/{old => new}/file.ts");
        assert_eq!(old, "src/old/file.ts");
        assert_eq!(new, "src/new/file.ts");
    }

    #[test]
    fn expands_basename_rename() {
        let (old, new) = expand_braced_rename("src/a/{b.ts => c.ts}");
        assert_eq!(old, "src/a/b.ts");
        assert_eq!(new, "src/a/c.ts");
    }

    #[test]
    fn passes_through_plain_rename() {
        let (old, new) = expand_braced_rename("src/old-name.ts => src/new-name.ts");
        assert_eq!(old, "src/old-name.ts => src/new-name.ts");
        assert_eq!(new, "src/old-name.ts => src/new-name.ts");
    }

    #[test]
    fn collapses_empty_prefix_segment() {
        let (old, new) = expand_braced_rename("{old => new}/file.ts");
        assert_eq!(old, "old/file.ts");
        assert_eq!(new, "new/file.ts");
    }
}
