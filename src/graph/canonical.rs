//! Edge canonicalization: collapse reciprocal and symmetric duplicates into
//! one correctly-oriented, styled edge per unordered node pair per
//! relationship family.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::catalog::{Catalog, EdgeType, EdgeWeight};
use crate::model::{Edge, Link};

/// Rendering annotation for a canonicalized edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeStyle {
    /// Draw a double-headed arrow instead of a directed one.
    pub bidirectional: bool,
    pub weight: EdgeWeight,
}

/// Reduce a traversal result to one representative edge per unordered node
/// pair and relationship family.
///
/// Within each pair group every distinct type is resolved once:
/// - symmetric types collapse to a single bidirectional edge;
/// - when both directions of a reciprocal pair are present, only the
///   lower-priority-ranked type is emitted, in its recorded direction;
/// - a reciprocal type whose counterpart is absent passes through unchanged
///   (incomplete authoring is a curation concern, not an error);
/// - a type with no defined reciprocal that appears in both directions is an
///   independently authored symmetric duplicate and collapses to one
///   bidirectional edge;
/// - everything else is emitted as-is.
///
/// Output order is deterministic for a given input but not otherwise
/// specified; callers needing a particular order must sort.
pub fn canonicalize(edges: &HashSet<Edge>, catalog: &Catalog) -> Vec<(Edge, EdgeStyle)> {
    // Group by unordered endpoint pair, in sorted order for determinism.
    let mut groups: BTreeMap<(Link, Link), Vec<&Edge>> = BTreeMap::new();
    for edge in edges {
        let key = if edge.source <= edge.target {
            (edge.source.clone(), edge.target.clone())
        } else {
            (edge.target.clone(), edge.source.clone())
        };
        groups.entry(key).or_default().push(edge);
    }

    let mut result = Vec::new();
    for group in groups.values_mut() {
        group.sort_by_key(|e| (e.edge_type, e.source.clone(), e.target.clone()));
        let lookup: HashMap<(EdgeType, &Link, &Link), &Edge> = group
            .iter()
            .map(|e| ((e.edge_type, &e.source, &e.target), *e))
            .collect();
        let mut used: HashSet<EdgeType> = HashSet::new();

        for edge in group.iter() {
            let etype = edge.edge_type;
            if used.contains(&etype) {
                continue;
            }
            let style = |bidirectional| EdgeStyle {
                bidirectional,
                weight: catalog.weight(etype),
            };

            if catalog.is_symmetric(etype) {
                used.insert(etype);
                result.push(((*edge).clone(), style(true)));
            } else if let Some(reciprocal) = catalog.reciprocal(etype) {
                match lookup.get(&(reciprocal, &edge.target, &edge.source)) {
                    Some(counterpart) => {
                        // Both directions present: the lower rank is canonical.
                        let rank = catalog.priority_rank(etype).unwrap_or(usize::MAX);
                        let counter_rank =
                            catalog.priority_rank(reciprocal).unwrap_or(usize::MAX);
                        if rank < counter_rank {
                            log::debug!(
                                "Canonical direction {} over {}",
                                edge,
                                counterpart
                            );
                            used.insert(etype);
                            used.insert(reciprocal);
                            result.push(((*edge).clone(), style(false)));
                        }
                        // Higher rank: skip silently, the counterpart emits.
                    }
                    None => {
                        // Counterpart not authored: pass through.
                        used.insert(etype);
                        result.push(((*edge).clone(), style(false)));
                    }
                }
            } else if lookup.contains_key(&(etype, &edge.target, &edge.source)) {
                // Same type in both directions with no defined reciprocal.
                used.insert(etype);
                result.push(((*edge).clone(), style(true)));
            } else {
                used.insert(etype);
                result.push(((*edge).clone(), style(false)));
            }
        }
    }
    result
}
