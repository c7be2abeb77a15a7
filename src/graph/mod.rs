//! The canonical node/edge representation and its structural queries.

pub mod edge;
pub mod model;
pub mod node;
pub mod snapshot;

pub use edge::*;
pub use model::*;
pub use node::*;
pub use snapshot::*;
