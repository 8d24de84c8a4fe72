use std::path::{Path, PathBuf};

pub type NodeId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Dir,
}

/// One filesystem entry in the snapshot.
#[derive(Debug, Clone)]
pub struct PathNode {
    /// Component name. The root node's name is the last component of the
    /// scanned path (empty only for a filesystem root).
    pub name: String,
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    /// Child ids in scan order (directories only).
    pub children: Vec<NodeId>,
}

/// Read-only arena snapshot of a scanned tree.
///
/// Built once per invocation; classification, planning, and the rename pass
/// all work against this snapshot rather than re-reading the filesystem, so
/// validation and execution stay consistent.
#[derive(Debug, Clone)]
pub struct PathTree {
    root_path: PathBuf,
    nodes: Vec<PathNode>,
}

impl PathTree {
    pub const ROOT: NodeId = 0;

    #[must_use]
    pub fn new(root_path: PathBuf, kind: NodeKind) -> Self {
        let name = root_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            root_path,
            nodes: vec![PathNode {
                name,
                kind,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn add_child(&mut self, parent: NodeId, name: &str, kind: NodeKind) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(PathNode {
            name: name.to_string(),
            kind,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent].children.push(id);
        id
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> &PathNode {
        &self.nodes[id]
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn ids(&self) -> std::ops::Range<NodeId> {
        0..self.nodes.len()
    }

    #[must_use]
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// Absolute path of a node in the snapshot (original names, regardless of
    /// any renames applied later).
    #[must_use]
    pub fn path_of(&self, id: NodeId) -> PathBuf {
        let mut names = Vec::new();
        let mut current = id;
        while let Some(parent) = self.nodes[current].parent {
            names.push(self.nodes[current].name.as_str());
            current = parent;
        }

        let mut path = self.root_path.clone();
        for name in names.iter().rev() {
            path.push(name);
        }
        path
    }

    /// Node ids with every child listed before its parent; the root comes
    /// last. This is the execution order for renames: a node's rename happens
    /// while all its ancestors still carry their original paths.
    #[must_use]
    pub fn post_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        self.collect_post_order(Self::ROOT, &mut order);
        order
    }

    fn collect_post_order(&self, id: NodeId, order: &mut Vec<NodeId>) {
        for &child in &self.nodes[id].children {
            self.collect_post_order(child, order);
        }
        order.push(id);
    }

    /// A directory is empty when its subtree contains no files; directories
    /// holding only other empty directories count as empty.
    #[must_use]
    pub fn is_empty_dir(&self, id: NodeId) -> bool {
        match self.nodes[id].kind {
            NodeKind::File => false,
            NodeKind::Dir => self.nodes[id]
                .children
                .iter()
                .all(|&child| self.is_empty_dir(child)),
        }
    }
}

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tests;
