pub mod catalog;
pub mod config;
pub mod error;
pub mod graph;
pub mod model;
pub mod store;

pub use catalog::{Catalog, EdgeCategory, EdgeType, EdgeWeight};
pub use config::Config;
pub use error::{GraphError, Result};
pub use graph::{canonicalize, missing_reciprocals, traverse, EdgeStyle};
pub use model::{Direction, Edge, Link, NodeRecord, TypeFilter};
pub use store::GraphStore;
