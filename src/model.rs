//! Value types for the graph subsystem: node identity (`Link`), the directed
//! typed `Edge`, the store's `NodeRecord` row, and the query-contract enums.

use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::catalog::EdgeType;
use crate::error::{GraphError, Result};

/// Composite node identity: `entity_type/entity_id`, case-normalized.
///
/// The only thing the graph subsystem knows about a node. Display names and
/// other attributes live in the curation layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Link {
    entity_type: String,
    entity_id: String,
}

impl Link {
    pub fn new(entity_type: &str, entity_id: &str) -> Self {
        Self {
            entity_type: entity_type.trim().to_lowercase(),
            entity_id: entity_id.trim().to_lowercase(),
        }
    }

    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.entity_type, self.entity_id)
    }
}

impl FromStr for Link {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once('/') {
            Some((entity_type, entity_id))
                if !entity_type.trim().is_empty()
                    && !entity_id.trim().is_empty()
                    && !entity_id.contains('/') =>
            {
                Ok(Link::new(entity_type, entity_id))
            }
            _ => Err(GraphError::InvalidLink(s.to_string())),
        }
    }
}

impl Serialize for Link {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Link {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A typed, directed relationship between two node identities.
///
/// Identity (equality, hashing) is `(source, target, edge_type)`; the `refs`
/// payload is opaque to traversal and canonicalization and is merged, never
/// duplicated, when the same edge is written twice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub source: Link,
    pub target: Link,
    #[serde(rename = "type")]
    pub edge_type: EdgeType,
    /// Ordered opaque citation tokens, pass-through payload.
    #[serde(default)]
    pub refs: Vec<String>,
}

impl Edge {
    pub fn new(source: Link, target: Link, edge_type: EdgeType, refs: Vec<String>) -> Self {
        Self {
            source,
            target,
            edge_type,
            refs,
        }
    }

    /// Merge another reference list into this edge's, preserving first-seen
    /// order and dropping duplicates.
    pub fn merge_refs(&mut self, refs: &[String]) {
        for r in refs {
            if !self.refs.contains(r) {
                self.refs.push(r.clone());
            }
        }
    }

    /// The endpoint that is not `link`. For a self-loop, returns the target.
    pub fn other_endpoint(&self, link: &Link) -> &Link {
        if &self.source == link {
            &self.target
        } else {
            &self.source
        }
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        (&self.source, &self.target, self.edge_type)
            == (&other.source, &other.target, other.edge_type)
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.source.hash(state);
        self.target.hash(state);
        self.edge_type.hash(state);
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.source, self.edge_type, self.target)
    }
}

/// One per-language display row for a node, supplied by the external loader.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRecord {
    pub link: Link,
    pub lang: String,
    pub name: String,
    #[serde(default)]
    pub name_disambiguous: Option<String>,
}

/// Which incident edges an adjacency query returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Outgoing,
    Incoming,
    Both,
}

impl FromStr for Direction {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "out" => Ok(Direction::Outgoing),
            "in" => Ok(Direction::Incoming),
            "both" => Ok(Direction::Both),
            other => Err(GraphError::Parse(format!(
                "invalid direction '{}', expected out, in, or both",
                other
            ))),
        }
    }
}

/// Relationship-type filter for adjacency and traversal queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeFilter {
    All,
    Only(HashSet<EdgeType>),
}

impl TypeFilter {
    /// Build a filter from raw type identifiers. Unknown identifiers are a
    /// rejected-input error, never a silent empty filter.
    pub fn from_names<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut types = HashSet::new();
        for name in names {
            types.insert(name.as_ref().parse::<EdgeType>()?);
        }
        if types.is_empty() {
            Ok(TypeFilter::All)
        } else {
            Ok(TypeFilter::Only(types))
        }
    }

    pub fn matches(&self, edge_type: EdgeType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(types) => types.contains(&edge_type),
        }
    }
}

impl From<&[EdgeType]> for TypeFilter {
    fn from(types: &[EdgeType]) -> Self {
        if types.is_empty() {
            TypeFilter::All
        } else {
            TypeFilter::Only(types.iter().copied().collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_parse_and_display() {
        let link: Link = "person/abraham".parse().unwrap();
        assert_eq!(link.entity_type(), "person");
        assert_eq!(link.entity_id(), "abraham");
        assert_eq!(link.to_string(), "person/abraham");
    }

    #[test]
    fn test_link_case_normalized() {
        let link: Link = "Person/Abraham".parse().unwrap();
        assert_eq!(link.to_string(), "person/abraham");
        assert_eq!(link, Link::new("PERSON", "abraham"));
    }

    #[test]
    fn test_link_rejects_malformed() {
        assert!("abraham".parse::<Link>().is_err());
        assert!("person/".parse::<Link>().is_err());
        assert!("/abraham".parse::<Link>().is_err());
        assert!("person/a/b".parse::<Link>().is_err());
    }

    #[test]
    fn test_link_serde_as_string() {
        let link: Link = "place/ur".parse().unwrap();
        let json = serde_json::to_string(&link).unwrap();
        assert_eq!(json, "\"place/ur\"");
        let back: Link = serde_json::from_str(&json).unwrap();
        assert_eq!(back, link);
    }

    #[test]
    fn test_edge_identity_ignores_refs() {
        let a: Link = "person/a".parse().unwrap();
        let b: Link = "person/b".parse().unwrap();
        let e1 = Edge::new(a.clone(), b.clone(), EdgeType::ParentOf, vec!["x".into()]);
        let e2 = Edge::new(a, b, EdgeType::ParentOf, vec!["y".into()]);
        assert_eq!(e1, e2);
        let set: HashSet<Edge> = [e1, e2].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_edge_merge_refs_preserves_order_and_dedups() {
        let a: Link = "person/a".parse().unwrap();
        let b: Link = "person/b".parse().unwrap();
        let mut e = Edge::new(a, b, EdgeType::MarriedTo, vec!["gen:2".into()]);
        e.merge_refs(&["gen:3".to_string(), "gen:2".to_string()]);
        assert_eq!(e.refs, vec!["gen:2".to_string(), "gen:3".to_string()]);
    }

    #[test]
    fn test_edge_json_shape() {
        let json = r#"{"source":"person/a","target":"person/b","type":"married-to"}"#;
        let e: Edge = serde_json::from_str(json).unwrap();
        assert_eq!(e.edge_type, EdgeType::MarriedTo);
        assert!(e.refs.is_empty());
    }

    #[test]
    fn test_type_filter_rejects_unknown() {
        let err = TypeFilter::from_names(["parent-of", "not-a-real-type"]).unwrap_err();
        assert!(matches!(err, GraphError::UnknownEdgeType(_)));
    }

    #[test]
    fn test_type_filter_matches() {
        let filter = TypeFilter::from_names(["parent-of"]).unwrap();
        assert!(filter.matches(EdgeType::ParentOf));
        assert!(!filter.matches(EdgeType::ChildOf));
        assert!(TypeFilter::All.matches(EdgeType::Cited));
    }
}
