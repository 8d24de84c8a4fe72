mod name;

pub use name::compute_new_name;

use std::collections::HashMap;
use std::path::PathBuf;

use crate::config::RuleSet;
use crate::scanner::{NodeId, PathTree};

/// One planned rename in execution order. Both paths are valid at execution
/// time: children are renamed before their parents, so every ancestor
/// component of `new_path` still carries its original name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedRename {
    pub node: NodeId,
    pub original_path: PathBuf,
    pub new_path: PathBuf,
    pub new_name: String,
}

/// Sibling entries whose computed names coincide. None of them is renamed;
/// silently picking a winner would merge distinct entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collision {
    pub directory: PathBuf,
    pub target_name: String,
    pub original_paths: Vec<PathBuf>,
}

/// Ordered rename plan computed from the snapshot before any mutation.
#[derive(Debug, Clone, Default)]
pub struct RenamePlan {
    /// Renames, deepest entries first.
    pub renames: Vec<PlannedRename>,
    pub collisions: Vec<Collision>,
}

impl RenamePlan {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.renames.is_empty() && self.collisions.is_empty()
    }

    #[must_use]
    pub fn has_collisions(&self) -> bool {
        !self.collisions.is_empty()
    }
}

/// Computes a [`RenamePlan`] for a snapshot.
pub struct Planner<'a> {
    rules: &'a RuleSet,
}

impl<'a> Planner<'a> {
    #[must_use]
    pub const fn new(rules: &'a RuleSet) -> Self {
        Self { rules }
    }

    #[must_use]
    pub fn plan(&self, tree: &PathTree) -> RenamePlan {
        let mut plan = RenamePlan::default();
        let mut new_names: HashMap<NodeId, String> = HashMap::new();

        for id in tree.ids() {
            if !tree.node(id).children.is_empty() || id == PathTree::ROOT {
                self.plan_directory(tree, id, &mut new_names, &mut plan.collisions);
            }
        }
        self.plan_root(tree, &mut new_names);

        for id in tree.post_order() {
            let Some(new_name) = new_names.get(&id) else {
                continue;
            };
            let original_path = tree.path_of(id);
            let Some(parent) = original_path.parent() else {
                continue;
            };
            plan.renames.push(PlannedRename {
                node: id,
                original_path: original_path.clone(),
                new_path: parent.join(new_name),
                new_name: new_name.clone(),
            });
        }

        plan
    }

    /// Compute candidate names for the children of one directory and resolve
    /// sibling collisions. Dropping a colliding candidate re-occupies its
    /// original name, which can itself collide with another candidate, so the
    /// resolution iterates to a fix point (each round drops at least one
    /// candidate).
    fn plan_directory(
        &self,
        tree: &PathTree,
        dir: NodeId,
        new_names: &mut HashMap<NodeId, String>,
        collisions: &mut Vec<Collision>,
    ) {
        for &child in &tree.node(dir).children {
            if let Some(candidate) = self.candidate_name(tree, child) {
                new_names.insert(child, candidate);
            }
        }

        loop {
            let mut occupants: HashMap<&str, Vec<NodeId>> = HashMap::new();
            for &child in &tree.node(dir).children {
                let final_name = new_names
                    .get(&child)
                    .map_or(tree.node(child).name.as_str(), String::as_str);
                occupants.entry(final_name).or_default().push(child);
            }

            let Some((name, ids)) = occupants
                .into_iter()
                .filter(|(_, ids)| ids.len() > 1 && ids.iter().any(|id| new_names.contains_key(id)))
                .min_by_key(|(_, ids)| ids[0])
            else {
                break;
            };

            collisions.push(Collision {
                directory: tree.path_of(dir),
                target_name: name.to_string(),
                original_paths: ids.iter().map(|&id| tree.path_of(id)).collect(),
            });
            for id in ids {
                new_names.remove(&id);
            }
        }
    }

    /// The scan root has no visible siblings, so its rename is planned
    /// without collision detection; the executor's target-exists guard
    /// catches an on-disk conflict.
    fn plan_root(&self, tree: &PathTree, new_names: &mut HashMap<NodeId, String>) {
        if let Some(candidate) = self.candidate_name(tree, PathTree::ROOT) {
            new_names.insert(PathTree::ROOT, candidate);
        }
    }

    fn candidate_name(&self, tree: &PathTree, id: NodeId) -> Option<String> {
        let node = tree.node(id);
        if node.name.is_empty() || self.rules.is_excluded(&tree.path_of(id)) {
            return None;
        }

        let candidate = compute_new_name(&node.name, self.rules);
        if candidate == node.name || candidate.is_empty() {
            return None;
        }
        // A separator in the result would move the entry instead of renaming it.
        if candidate.contains('/') || candidate.contains(std::path::MAIN_SEPARATOR) {
            return None;
        }
        Some(candidate)
    }
}

#[cfg(test)]
#[path = "planner_tests.rs"]
mod tests;
