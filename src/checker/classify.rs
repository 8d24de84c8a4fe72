use rayon::prelude::*;

use crate::config::{ActiveChecks, RuleSet};
use crate::scanner::{NodeId, NodeKind, PathTree};

use super::{CharOccurrence, Finding, FindingKind};

/// Classifies snapshot nodes against the rule set for the selected checks.
///
/// Excluded paths produce no findings; exclusion covers the node and its
/// whole subtree, but the subtree stays in the snapshot so path resolution
/// for siblings and parents is unaffected.
pub struct PathClassifier<'a> {
    rules: &'a RuleSet,
    checks: ActiveChecks,
}

impl<'a> PathClassifier<'a> {
    #[must_use]
    pub const fn new(rules: &'a RuleSet, checks: ActiveChecks) -> Self {
        Self { rules, checks }
    }

    /// Classify every node of the snapshot, in node order.
    #[must_use]
    pub fn classify_tree(&self, tree: &PathTree) -> Vec<Finding> {
        tree.ids()
            .into_par_iter()
            .flat_map(|id| self.classify(tree, id))
            .collect()
    }

    #[must_use]
    pub fn classify(&self, tree: &PathTree, id: NodeId) -> Vec<Finding> {
        let path = tree.path_of(id);
        if self.rules.is_excluded(&path) {
            return Vec::new();
        }

        let node = tree.node(id);
        let path_string = path.display().to_string();
        let mut findings = Vec::new();

        if self.checks.invalid_characters {
            let occurrences = self.scan_component(&path_string, &node.name);
            if !occurrences.is_empty() {
                findings.push(Finding {
                    path: path.clone(),
                    kind: FindingKind::InvalidCharacters { occurrences },
                });
            }
        }

        if self.checks.path_length {
            let length = path_string.chars().count();
            if length > self.rules.max_path_length {
                findings.push(Finding {
                    path: path.clone(),
                    kind: FindingKind::PathTooLong {
                        length,
                        limit: self.rules.max_path_length,
                    },
                });
            }
        }

        if self.checks.empty_dirs && node.kind == NodeKind::Dir && tree.is_empty_dir(id) {
            findings.push(Finding {
                path,
                kind: FindingKind::EmptyDirectory,
            });
        }

        findings
    }

    /// Scan the node's own component name (the last component of
    /// `path_string`); separators and ancestor components are reported on
    /// their own nodes. Positions index into the full path string.
    fn scan_component(&self, path_string: &str, name: &str) -> Vec<CharOccurrence> {
        let offset = path_string.chars().count() - name.chars().count();
        name.chars()
            .enumerate()
            .filter(|(_, c)| self.rules.invalid_characters.contains(c))
            .map(|(index, character)| CharOccurrence {
                character,
                position: offset + index,
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "classify_tests.rs"]
mod tests;
