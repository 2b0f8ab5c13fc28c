//! Graph engine: bounded BFS traversal over the store and reciprocal edge
//! canonicalization of the resulting edge set.

mod audit;
mod canonical;
mod traversal;

pub use audit::missing_reciprocals;
pub use canonical::{canonicalize, EdgeStyle};
pub use traversal::traverse;
