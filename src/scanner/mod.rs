mod directory;
mod tree;

pub use directory::TreeScanner;
pub use tree::{NodeId, NodeKind, PathNode, PathTree};
