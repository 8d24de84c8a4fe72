use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::RuleSet;
use crate::output::ApplyProgress;
use crate::planner::RenamePlan;
use crate::scanner::{NodeId, NodeKind, PathTree};

/// Filesystem mutations behind a trait so plan execution is testable without
/// touching a real disk.
pub trait FileOps {
    /// Rename a single entry. Must be atomic.
    ///
    /// # Errors
    /// Returns the underlying IO error.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Remove one empty directory.
    ///
    /// # Errors
    /// Returns the underlying IO error.
    fn remove_dir(&self, path: &Path) -> io::Result<()>;

    fn exists(&self, path: &Path) -> bool;
}

/// Real filesystem implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileOps;

impl FileOps for RealFileOps {
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        std::fs::rename(from, to)
    }

    fn remove_dir(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_dir(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedRename {
    pub node: NodeId,
    pub from: PathBuf,
    pub to: PathBuf,
}

/// One mutation that could not be carried out. The run continues; failures
/// surface in the final report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameFailure {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct ApplyOutcome {
    pub applied: Vec<AppliedRename>,
    pub failures: Vec<RenameFailure>,
}

impl ApplyOutcome {
    /// Current component name per successfully renamed node.
    #[must_use]
    pub fn new_names(&self) -> HashMap<NodeId, String> {
        self.applied
            .iter()
            .filter_map(|rename| {
                rename
                    .to
                    .file_name()
                    .map(|name| (rename.node, name.to_string_lossy().into_owned()))
            })
            .collect()
    }
}

/// Executes a rename plan, deepest entries first.
pub struct PlanExecutor<'a, O: FileOps> {
    ops: &'a O,
}

impl<'a, O: FileOps> PlanExecutor<'a, O> {
    #[must_use]
    pub const fn new(ops: &'a O) -> Self {
        Self { ops }
    }

    /// Apply every planned rename. A failed rename is recorded and skipped;
    /// siblings and ancestors proceed. Descendants of a failed directory were
    /// already processed, which is safe since they were renamed in place.
    #[must_use]
    pub fn apply(&self, plan: &RenamePlan, progress: &ApplyProgress) -> ApplyOutcome {
        let mut outcome = ApplyOutcome::default();

        for planned in &plan.renames {
            if self.ops.exists(&planned.new_path) {
                outcome.failures.push(RenameFailure {
                    path: planned.original_path.clone(),
                    reason: format!("target already exists: {}", planned.new_path.display()),
                });
            } else {
                match self.ops.rename(&planned.original_path, &planned.new_path) {
                    Ok(()) => outcome.applied.push(AppliedRename {
                        node: planned.node,
                        from: planned.original_path.clone(),
                        to: planned.new_path.clone(),
                    }),
                    Err(err) => outcome.failures.push(RenameFailure {
                        path: planned.original_path.clone(),
                        reason: err.to_string(),
                    }),
                }
            }
            progress.inc();
        }

        outcome
    }
}

/// Removes directories that hold no files, bottom-up, so removing a child
/// can empty its parent within the same pass.
pub struct EmptyDirPruner<'a, O: FileOps> {
    ops: &'a O,
}

impl<'a, O: FileOps> EmptyDirPruner<'a, O> {
    #[must_use]
    pub const fn new(ops: &'a O) -> Self {
        Self { ops }
    }

    #[must_use]
    pub fn prune(
        &self,
        tree: &PathTree,
        rules: &RuleSet,
        new_names: &HashMap<NodeId, String>,
    ) -> (Vec<PathBuf>, Vec<RenameFailure>) {
        let mut removed = Vec::new();
        let mut failures = Vec::new();

        for id in tree.post_order() {
            if tree.node(id).kind != NodeKind::Dir || !tree.is_empty_dir(id) {
                continue;
            }
            if contains_excluded(tree, rules, id) {
                continue;
            }

            let path = current_path(tree, new_names, id);
            match self.ops.remove_dir(&path) {
                Ok(()) => removed.push(path),
                Err(err) => failures.push(RenameFailure {
                    path,
                    reason: err.to_string(),
                }),
            }
        }

        (removed, failures)
    }
}

/// Absolute path of a node after the applied renames in `new_names`.
#[must_use]
pub fn current_path(
    tree: &PathTree,
    new_names: &HashMap<NodeId, String>,
    id: NodeId,
) -> PathBuf {
    let mut names = Vec::new();
    let mut current = id;
    while let Some(parent) = tree.node(current).parent {
        let name = new_names
            .get(&current)
            .cloned()
            .unwrap_or_else(|| tree.node(current).name.clone());
        names.push(name);
        current = parent;
    }

    let mut path = new_names.get(&PathTree::ROOT).map_or_else(
        || tree.root_path().to_path_buf(),
        |root_name| {
            tree.root_path()
                .parent()
                .map_or_else(|| PathBuf::from(root_name), |parent| parent.join(root_name))
        },
    );
    for name in names.iter().rev() {
        path.push(name);
    }
    path
}

fn contains_excluded(tree: &PathTree, rules: &RuleSet, id: NodeId) -> bool {
    if rules.is_excluded(&tree.path_of(id)) {
        return true;
    }
    tree.node(id)
        .children
        .iter()
        .any(|&child| contains_excluded(tree, rules, child))
}

#[cfg(test)]
#[path = "walker_tests.rs"]
mod tests;
