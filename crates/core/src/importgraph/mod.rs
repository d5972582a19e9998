// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Reverse-dependency index (component H) and impact graph (component K).

pub mod impact;
pub mod reverse;

pub use impact::compute_impact_graph;
pub use reverse::{ReverseDepCache, ReverseDependencyMap, build_reverse_dependency_map};
