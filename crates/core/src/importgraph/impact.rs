// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Impact graph (component K): bounded, level-synchronous BFS over the
//! reverse-dependency index starting from the directly changed source
//! files.

use std::collections::HashSet;
use std::path::PathBuf;

use crate::model::{ImpactEdge, ImpactEdgeKind, ImpactGraph};

use super::reverse::ReverseDependencyMap;

pub fn compute_impact_graph(
    changed_source_files: &[PathBuf],
    reverse_map: &ReverseDependencyMap,
    max_depth: u32,
) -> ImpactGraph {
    let directly_changed: Vec<PathBuf> = changed_source_files.to_vec();
    let mut visited: HashSet<PathBuf> = directly_changed.iter().cloned().collect();
    let mut indirectly_affected = Vec::new();
    let mut edges = Vec::new();

    let mut frontier = directly_changed.clone();
    let mut depth = 0u32;
    while depth < max_depth && !frontier.is_empty() {
        let mut next_frontier = Vec::new();
        for file in &frontier {
            for importer in reverse_map.importers_of(file) {
                if visited.contains(importer) {
                    continue;
                }
                visited.insert(importer.clone());
                edges.push(ImpactEdge {
                    from: importer.clone(),
                    to: file.clone(),
                    kind: ImpactEdgeKind::Imports,
                });
                indirectly_affected.push(importer.clone());
                next_frontier.push(importer.clone());
            }
        }
        frontier = next_frontier;
        depth += 1;
    }

    ImpactGraph { directly_changed, indirectly_affected, edges }
}

#[cfg(test)]
#[path = "impact_tests.rs"]
mod tests;
