//! Relationship type catalog: reciprocal mappings, canonical-direction
//! priority, and per-type render weight.
//!
//! The catalog is an immutable value built and validated once at startup and
//! injected into traversal and canonicalization. Tests construct synthetic
//! catalogs through the same validated constructor.

mod types;

pub use types::{EdgeCategory, EdgeType};

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};

/// Visual weight of a rendered edge. `Thick` is reserved; no built-in type
/// currently maps to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeWeight {
    Default,
    Thin,
    Thick,
}

/// The relationship type catalog.
///
/// Holds the reciprocal table (which types represent the same real-world
/// relationship when held in opposite directions), the total priority order
/// over those types (lower rank wins as the canonical direction), and the
/// render weight per type.
#[derive(Debug, Clone)]
pub struct Catalog {
    reciprocals: HashMap<EdgeType, EdgeType>,
    /// Rank within the reciprocal table's declaration order.
    priority: HashMap<EdgeType, usize>,
    /// Declaration order, exposed for callers needing the full list.
    priority_order: Vec<EdgeType>,
    weights: HashMap<EdgeType, EdgeWeight>,
}

impl Catalog {
    /// Build a catalog from an ordered reciprocal table and the set of
    /// thin-weight types.
    ///
    /// `reciprocal_table` declaration order defines the priority ranks.
    /// Fails if the table is not internally consistent: every entry
    /// `A -> B` must be matched by `B -> A` (self-mapping entries are the
    /// symmetric types), and no type may be declared twice. This is a fatal
    /// startup error, not a per-call error.
    pub fn new(reciprocal_table: &[(EdgeType, EdgeType)], thin: &[EdgeType]) -> Result<Self> {
        let mut reciprocals = HashMap::new();
        let mut priority = HashMap::new();
        let mut priority_order = Vec::with_capacity(reciprocal_table.len());

        for (rank, (a, b)) in reciprocal_table.iter().enumerate() {
            if reciprocals.insert(*a, *b).is_some() {
                return Err(GraphError::Catalog(format!(
                    "duplicate reciprocal entry for '{}'",
                    a
                )));
            }
            priority.insert(*a, rank);
            priority_order.push(*a);
        }

        // Rule: map[A] = B implies map[B] = A (symmetric types self-map).
        for (a, b) in &reciprocals {
            match reciprocals.get(b) {
                Some(back) if back == a => {}
                Some(back) => {
                    return Err(GraphError::Catalog(format!(
                        "broken reciprocal pair: '{}' -> '{}' but '{}' -> '{}'",
                        a, b, b, back
                    )));
                }
                None => {
                    return Err(GraphError::Catalog(format!(
                        "one-way reciprocal mapping: '{}' -> '{}' has no reverse entry",
                        a, b
                    )));
                }
            }
        }

        let mut weights: HashMap<EdgeType, EdgeWeight> = EdgeType::ALL
            .into_iter()
            .map(|t| (t, EdgeWeight::Default))
            .collect();
        for t in thin {
            weights.insert(*t, EdgeWeight::Thin);
        }

        Ok(Self {
            reciprocals,
            priority,
            priority_order,
            weights,
        })
    }

    /// The production catalog, taken from the curated reference dataset.
    ///
    /// The table is declared in canonical-direction-first order: for each
    /// asymmetric pair the preferred direction comes first, so its rank is
    /// lower and it wins when both directions of a relationship are authored.
    pub fn builtin() -> Self {
        use EdgeType::*;
        let table = [
            (ParentOf, ChildOf),
            (ChildOf, ParentOf),
            (AncestorOf, DescendantOf),
            (DescendantOf, AncestorOf),
            (LeaderOf, LedBy),
            (LedBy, LeaderOf),
            (ResidentOf, AssociatedWith),
            (AssociatedWith, ResidentOf),
            (AllyOf, AllyOf),
            (EnemyOf, EnemyOf),
            (MarriedTo, MarriedTo),
            (ContemporaryOf, ContemporaryOf),
            (WorkedWith, WorkedWith),
            (NameMatches, NameMatches),
            (MentionedWith, MentionedWith),
        ];
        let thin = [AncestorOf, DescendantOf, AssociatedWith, Visited];
        // The built-in tables are mutual by construction.
        Self::new(&table, &thin).expect("built-in catalog must validate")
    }

    /// The reciprocal of `edge_type`, or `None` when the type has no defined
    /// counterpart. A symmetric type returns itself.
    pub fn reciprocal(&self, edge_type: EdgeType) -> Option<EdgeType> {
        self.reciprocals.get(&edge_type).copied()
    }

    /// Whether the type is its own reciprocal (e.g. `married-to`).
    pub fn is_symmetric(&self, edge_type: EdgeType) -> bool {
        self.reciprocal(edge_type) == Some(edge_type)
    }

    /// Rank in the canonical-direction priority order; `None` for types
    /// outside the reciprocal table. Lower rank wins.
    pub fn priority_rank(&self, edge_type: EdgeType) -> Option<usize> {
        self.priority.get(&edge_type).copied()
    }

    /// All types participating in reciprocal relationships, in priority order.
    pub fn reciprocal_types(&self) -> &[EdgeType] {
        &self.priority_order
    }

    /// Render weight for the type, computed at catalog construction.
    pub fn weight(&self, edge_type: EdgeType) -> EdgeWeight {
        self.weights
            .get(&edge_type)
            .copied()
            .unwrap_or(EdgeWeight::Default)
    }
}
