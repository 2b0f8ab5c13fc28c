//! BFS traversal over the edges table.

use std::collections::{HashSet, VecDeque};

use crate::error::Result;
use crate::model::{Direction, Edge, Link, TypeFilter};
use crate::store::GraphStore;

/// Breadth-first expansion from `start`, collecting every edge reachable
/// under the direction, type filter, and depth bound.
///
/// Expansion is deduplicated per node, so traversal terminates on cyclic
/// graphs even with `max_depth = None`; a node is expanded at the shortest
/// depth it is first reached. `max_depth = Some(n)` expands nodes at depth
/// less than `n`, so `Some(1)` yields exactly the focal node's incident
/// edges. Edges keep their recorded orientation.
pub fn traverse(
    store: &GraphStore,
    start: &Link,
    direction: Direction,
    filter: &TypeFilter,
    max_depth: Option<usize>,
) -> Result<HashSet<Edge>> {
    let mut visited: HashSet<Link> = HashSet::new();
    let mut collected: HashSet<Edge> = HashSet::new();
    let mut queue: VecDeque<(Link, usize)> = VecDeque::new();
    queue.push_back((start.clone(), 0));

    while let Some((node, depth)) = queue.pop_front() {
        if let Some(max) = max_depth {
            if depth >= max {
                continue;
            }
        }
        if !visited.insert(node.clone()) {
            continue;
        }

        for edge in store.adjacency(&node, direction, filter)? {
            if collected.contains(&edge) {
                continue;
            }
            // Found via outgoing adjacency: continue at the target; via
            // incoming adjacency: continue at the source.
            let next = edge.other_endpoint(&node).clone();
            collected.insert(edge);
            if !visited.contains(&next) {
                queue.push_back((next, depth + 1));
            }
        }
    }

    log::debug!(
        "Traversal from {} collected {} edges ({} nodes expanded)",
        start,
        collected.len(),
        visited.len()
    );
    Ok(collected)
}
