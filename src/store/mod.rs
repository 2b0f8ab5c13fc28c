//! Persisted directed multigraph store over SQLite.
//!
//! The store is a read-mostly cache populated by full rebuild. Each operation
//! opens its own WAL-mode connection, so concurrent readers are safe without
//! shared state; writers are expected to be serialized against readers by the
//! orchestrating layer.

pub mod migrate;

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{GraphError, Result};
use crate::model::{Direction, Edge, Link, NodeRecord, TypeFilter};

/// WAL for concurrent readers, NORMAL sync for speed, memory temp store.
const PRAGMAS: &str = "PRAGMA journal_mode = WAL; \
     PRAGMA synchronous = NORMAL; \
     PRAGMA foreign_keys = ON; \
     PRAGMA temp_store = MEMORY;";

/// Graph store handle. Holds only the database path; connections are opened
/// per operation.
pub struct GraphStore {
    path: PathBuf,
}

impl GraphStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Self {
        Self {
            path: db_path.as_ref().to_path_buf(),
        }
    }

    /// Execute a closure with a freshly opened, pragma-configured connection.
    pub fn with_connection<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T>,
    {
        let mut conn = Connection::open(&self.path).map_err(GraphError::Database)?;
        conn.execute_batch(PRAGMAS)?;
        f(&mut conn)
    }

    /// Apply pending schema migrations from `migrations_dir`.
    pub fn migrate(&self, migrations_dir: &Path) -> Result<()> {
        self.with_connection(|conn| migrate::run_migrations(conn, migrations_dir))
    }

    /// Idempotent upsert of one per-language node row.
    pub fn put_node(&self, node: &NodeRecord) -> Result<()> {
        self.with_connection(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO nodes (id, type, lang, name, name_disambiguous) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    node.link.entity_id(),
                    node.link.entity_type(),
                    node.lang,
                    node.name,
                    node.name_disambiguous
                ],
            )?;
            Ok(())
        })
    }

    /// Idempotent upsert of an edge. Writing an edge that already exists by
    /// `(source, target, type)` merges its reference list instead of
    /// appending a duplicate row.
    pub fn put_edge(&self, edge: &Edge) -> Result<()> {
        self.with_connection(|conn| upsert_edge(conn, edge))
    }

    /// Full-graph rebuild: drop all content and reinsert in one transaction.
    /// Duplicate edges within the batch are merged per the upsert rule.
    pub fn rebuild(&self, nodes: &[NodeRecord], edges: &[Edge]) -> Result<()> {
        self.with_connection(|conn| {
            let tx = conn.transaction()?;
            tx.execute("DELETE FROM edges", [])?;
            tx.execute("DELETE FROM nodes", [])?;
            for node in nodes {
                tx.execute(
                    "INSERT OR REPLACE INTO nodes (id, type, lang, name, name_disambiguous) \
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![
                        node.link.entity_id(),
                        node.link.entity_type(),
                        node.lang,
                        node.name,
                        node.name_disambiguous
                    ],
                )?;
            }
            for edge in edges {
                upsert_edge(&tx, edge)?;
            }
            tx.commit()?;
            log::info!(
                "Store rebuilt: {} node rows, {} edges",
                nodes.len(),
                edges.len()
            );
            Ok(())
        })
    }

    /// Edges incident to `link` in the given direction, filtered by type.
    ///
    /// `Both` returns the union of outgoing and incoming edges without
    /// transforming their recorded orientation. A query against an unknown
    /// node returns an empty collection, not an error.
    pub fn adjacency(
        &self,
        link: &Link,
        direction: Direction,
        filter: &TypeFilter,
    ) -> Result<Vec<Edge>> {
        self.with_connection(|conn| {
            let mut edges = Vec::new();
            if matches!(direction, Direction::Outgoing | Direction::Both) {
                query_incident(conn, "source", link, filter, &mut edges)?;
            }
            if matches!(direction, Direction::Incoming | Direction::Both) {
                query_incident(conn, "target", link, filter, &mut edges)?;
            }
            if direction == Direction::Both {
                // Self-loops come back from both halves of the union.
                let mut seen = std::collections::HashSet::new();
                edges.retain(|e| {
                    seen.insert((e.source.clone(), e.target.clone(), e.edge_type))
                });
            }
            Ok(edges)
        })
    }

    /// Display name for a node in the given language; `None` when the node
    /// or language row is absent (fallback is the caller's decision).
    pub fn display_name(&self, link: &Link, lang: &str) -> Result<Option<String>> {
        self.with_connection(|conn| {
            let name = conn
                .query_row(
                    "SELECT name FROM nodes WHERE id = ?1 AND type = ?2 AND lang = ?3",
                    params![link.entity_id(), link.entity_type(), lang],
                    |row| row.get::<_, String>(0),
                )
                .optional()?;
            Ok(name)
        })
    }

    /// Every edge in the store. Used by the reciprocal audit.
    pub fn all_edges(&self) -> Result<Vec<Edge>> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare("SELECT source, target, type, refs FROM edges")?;
            let rows = stmt.query_map([], row_to_tuple)?;
            let mut edges = Vec::new();
            for row in rows {
                edges.push(tuple_to_edge(row?)?);
            }
            Ok(edges)
        })
    }
}

fn upsert_edge(conn: &Connection, edge: &Edge) -> Result<()> {
    let source = edge.source.to_string();
    let target = edge.target.to_string();
    let existing: Option<String> = conn
        .query_row(
            "SELECT refs FROM edges WHERE source = ?1 AND target = ?2 AND type = ?3",
            params![source, target, edge.edge_type.as_str()],
            |row| row.get(0),
        )
        .optional()?;

    match existing {
        Some(json) => {
            let mut merged = edge.clone();
            merged.refs = decode_refs(&json)?;
            merged.merge_refs(&edge.refs);
            conn.execute(
                "UPDATE edges SET refs = ?4 WHERE source = ?1 AND target = ?2 AND type = ?3",
                params![source, target, edge.edge_type.as_str(), encode_refs(&merged.refs)?],
            )?;
        }
        None => {
            conn.execute(
                "INSERT INTO edges (source, target, type, refs) VALUES (?1, ?2, ?3, ?4)",
                params![source, target, edge.edge_type.as_str(), encode_refs(&edge.refs)?],
            )?;
        }
    }
    Ok(())
}

fn query_incident(
    conn: &Connection,
    column: &str,
    link: &Link,
    filter: &TypeFilter,
    out: &mut Vec<Edge>,
) -> Result<()> {
    let mut sql = format!(
        "SELECT source, target, type, refs FROM edges WHERE {} = ?1",
        column
    );
    let mut params: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(link.to_string())];
    if let TypeFilter::Only(types) = filter {
        let mut names: Vec<&str> = types.iter().map(|t| t.as_str()).collect();
        names.sort_unstable();
        let placeholders = names.iter().map(|_| "?").collect::<Vec<_>>().join(",");
        sql.push_str(&format!(" AND type IN ({})", placeholders));
        for name in names {
            params.push(Box::new(name.to_string()));
        }
    }

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(rusqlite::params_from_iter(params), row_to_tuple)?;
    for row in rows {
        out.push(tuple_to_edge(row?)?);
    }
    Ok(())
}

type EdgeRow = (String, String, String, String);

fn row_to_tuple(row: &rusqlite::Row<'_>) -> rusqlite::Result<EdgeRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

fn tuple_to_edge((source, target, edge_type, refs): EdgeRow) -> Result<Edge> {
    Ok(Edge::new(
        source.parse()?,
        target.parse()?,
        edge_type.parse()?,
        decode_refs(&refs)?,
    ))
}

fn encode_refs(refs: &[String]) -> Result<String> {
    serde_json::to_string(refs).map_err(|e| GraphError::Parse(format!("refs encode: {}", e)))
}

fn decode_refs(json: &str) -> Result<Vec<String>> {
    serde_json::from_str(json).map_err(|e| GraphError::Parse(format!("refs decode: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::EdgeType;
    use tempfile::TempDir;

    fn test_store() -> (GraphStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = GraphStore::new(temp_dir.path().join("test.db"));
        let migrations_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("migrations");
        store.migrate(&migrations_dir).unwrap();
        (store, temp_dir)
    }

    fn link(s: &str) -> Link {
        s.parse().unwrap()
    }

    fn edge(source: &str, target: &str, edge_type: EdgeType, refs: &[&str]) -> Edge {
        Edge::new(
            link(source),
            link(target),
            edge_type,
            refs.iter().map(|r| r.to_string()).collect(),
        )
    }

    #[test]
    fn test_put_edge_merges_refs_on_duplicate() {
        let (store, _temp) = test_store();
        store
            .put_edge(&edge("person/a", "person/b", EdgeType::ParentOf, &["gen:1"]))
            .unwrap();
        store
            .put_edge(&edge(
                "person/a",
                "person/b",
                EdgeType::ParentOf,
                &["gen:2", "gen:1"],
            ))
            .unwrap();

        let edges = store
            .adjacency(&link("person/a"), Direction::Outgoing, &TypeFilter::All)
            .unwrap();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].refs, vec!["gen:1".to_string(), "gen:2".to_string()]);
    }

    #[test]
    fn test_adjacency_directions() {
        let (store, _temp) = test_store();
        store
            .put_edge(&edge("person/a", "person/b", EdgeType::ParentOf, &[]))
            .unwrap();
        store
            .put_edge(&edge("person/c", "person/a", EdgeType::Blessed, &[]))
            .unwrap();

        let out = store
            .adjacency(&link("person/a"), Direction::Outgoing, &TypeFilter::All)
            .unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].target, link("person/b"));

        let inc = store
            .adjacency(&link("person/a"), Direction::Incoming, &TypeFilter::All)
            .unwrap();
        assert_eq!(inc.len(), 1);
        // Incoming edges keep their recorded orientation
        assert_eq!(inc[0].source, link("person/c"));
        assert_eq!(inc[0].target, link("person/a"));

        let both = store
            .adjacency(&link("person/a"), Direction::Both, &TypeFilter::All)
            .unwrap();
        assert_eq!(both.len(), 2);
    }

    #[test]
    fn test_adjacency_type_filter() {
        let (store, _temp) = test_store();
        store
            .put_edge(&edge("person/a", "person/b", EdgeType::ParentOf, &[]))
            .unwrap();
        store
            .put_edge(&edge("person/a", "place/ur", EdgeType::ResidentOf, &[]))
            .unwrap();

        let filter = TypeFilter::from_names(["parent-of"]).unwrap();
        let edges = store
            .adjacency(&link("person/a"), Direction::Both, &filter)
            .unwrap();
        assert_eq!(edges.len(), 1);
        assert!(edges.iter().all(|e| e.edge_type == EdgeType::ParentOf));
    }

    #[test]
    fn test_missing_node_returns_empty() {
        let (store, _temp) = test_store();
        let edges = store
            .adjacency(
                &link("person/does-not-exist"),
                Direction::Both,
                &TypeFilter::All,
            )
            .unwrap();
        assert!(edges.is_empty());
    }

    #[test]
    fn test_self_loop_not_duplicated_on_both() {
        let (store, _temp) = test_store();
        store
            .put_edge(&edge("group/israel", "group/israel", EdgeType::OriginOf, &[]))
            .unwrap();
        let edges = store
            .adjacency(&link("group/israel"), Direction::Both, &TypeFilter::All)
            .unwrap();
        assert_eq!(edges.len(), 1);
    }

    #[test]
    fn test_rebuild_clears_prior_content() {
        let (store, _temp) = test_store();
        store
            .put_edge(&edge("person/a", "person/b", EdgeType::ParentOf, &[]))
            .unwrap();
        store
            .put_node(&NodeRecord {
                link: link("person/a"),
                lang: "en".into(),
                name: "Old".into(),
                name_disambiguous: None,
            })
            .unwrap();

        let nodes = vec![NodeRecord {
            link: link("person/c"),
            lang: "en".into(),
            name: "New".into(),
            name_disambiguous: None,
        }];
        // Duplicate edge in the batch merges refs rather than erroring
        let edges = vec![
            edge("person/c", "person/d", EdgeType::MarriedTo, &["a"]),
            edge("person/c", "person/d", EdgeType::MarriedTo, &["b"]),
        ];
        store.rebuild(&nodes, &edges).unwrap();

        assert!(store
            .adjacency(&link("person/a"), Direction::Both, &TypeFilter::All)
            .unwrap()
            .is_empty());
        assert_eq!(store.display_name(&link("person/a"), "en").unwrap(), None);

        let rebuilt = store
            .adjacency(&link("person/c"), Direction::Outgoing, &TypeFilter::All)
            .unwrap();
        assert_eq!(rebuilt.len(), 1);
        assert_eq!(rebuilt[0].refs, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_display_name_lookup() {
        let (store, _temp) = test_store();
        store
            .put_node(&NodeRecord {
                link: link("person/abraham"),
                lang: "en".into(),
                name: "Abraham".into(),
                name_disambiguous: Some("Abraham (patriarch)".into()),
            })
            .unwrap();

        assert_eq!(
            store.display_name(&link("person/abraham"), "en").unwrap(),
            Some("Abraham".to_string())
        );
        assert_eq!(
            store.display_name(&link("person/abraham"), "es").unwrap(),
            None
        );
        assert_eq!(store.display_name(&link("person/nobody"), "en").unwrap(), None);
    }
}
