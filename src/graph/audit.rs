//! Reciprocal audit: report edges whose defined counterpart was never
//! authored. Read-only; fixing the records is the curation layer's job.

use std::collections::HashSet;

use crate::catalog::{Catalog, EdgeType};
use crate::error::Result;
use crate::model::{Edge, Link};
use crate::store::GraphStore;

/// Scan the whole store for edges with a defined reciprocal that is absent
/// in the opposite direction. Returns each offending edge with the type the
/// missing counterpart should have.
pub fn missing_reciprocals(
    store: &GraphStore,
    catalog: &Catalog,
) -> Result<Vec<(Edge, EdgeType)>> {
    let edges = store.all_edges()?;
    let existing: HashSet<(&Link, &Link, EdgeType)> = edges
        .iter()
        .map(|e| (&e.source, &e.target, e.edge_type))
        .collect();

    let mut missing = Vec::new();
    for edge in &edges {
        let Some(reciprocal) = catalog.reciprocal(edge.edge_type) else {
            continue;
        };
        if !existing.contains(&(&edge.target, &edge.source, reciprocal)) {
            log::debug!(
                "Missing reciprocal: {} needs {} {} {}",
                edge,
                edge.target,
                reciprocal,
                edge.source
            );
            missing.push((edge.clone(), reciprocal));
        }
    }
    Ok(missing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn edge(source: &str, target: &str, edge_type: EdgeType) -> Edge {
        Edge::new(
            source.parse().unwrap(),
            target.parse().unwrap(),
            edge_type,
            Vec::new(),
        )
    }

    fn store_with(edges: &[Edge]) -> (GraphStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = GraphStore::new(temp_dir.path().join("test.db"));
        let migrations_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("migrations");
        store.migrate(&migrations_dir).unwrap();
        for e in edges {
            store.put_edge(e).unwrap();
        }
        (store, temp_dir)
    }

    #[test]
    fn test_reports_missing_counterpart() {
        let (store, _temp) = store_with(&[edge("person/a", "person/b", EdgeType::ParentOf)]);
        let missing = missing_reciprocals(&store, &Catalog::builtin()).unwrap();
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].0.edge_type, EdgeType::ParentOf);
        assert_eq!(missing[0].1, EdgeType::ChildOf);
    }

    #[test]
    fn test_complete_pair_is_clean() {
        let (store, _temp) = store_with(&[
            edge("person/a", "person/b", EdgeType::ParentOf),
            edge("person/b", "person/a", EdgeType::ChildOf),
        ]);
        let missing = missing_reciprocals(&store, &Catalog::builtin()).unwrap();
        assert!(missing.is_empty());
    }

    #[test]
    fn test_symmetric_type_needs_both_directions() {
        let (store, _temp) = store_with(&[edge("person/a", "person/b", EdgeType::MarriedTo)]);
        let missing = missing_reciprocals(&store, &Catalog::builtin()).unwrap();
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].1, EdgeType::MarriedTo);
    }

    #[test]
    fn test_types_without_reciprocal_ignored() {
        let (store, _temp) = store_with(&[edge("person/a", "place/ur", EdgeType::BornIn)]);
        let missing = missing_reciprocals(&store, &Catalog::builtin()).unwrap();
        assert!(missing.is_empty());
    }
}
