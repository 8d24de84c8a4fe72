use std::collections::HashMap;
use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{ArchiveToolsError, Result};

use super::{NodeId, NodeKind, PathTree};

/// Builds a [`PathTree`] snapshot from a live directory scan.
///
/// Entries are visited in file-name order so snapshots, plans, and reports
/// are deterministic. Unreadable entries are skipped; the scan target itself
/// must be readable.
#[derive(Debug, Default, Clone, Copy)]
pub struct TreeScanner;

impl TreeScanner {
    /// Scan a file or directory into a snapshot.
    ///
    /// # Errors
    /// Fails if the scan target cannot be resolved or read.
    pub fn scan(&self, root: &Path) -> Result<PathTree> {
        let canonical = dunce::canonicalize(root).map_err(|source| ArchiveToolsError::Scan {
            path: root.to_path_buf(),
            source,
        })?;

        let metadata = fs::metadata(&canonical).map_err(|source| ArchiveToolsError::Scan {
            path: canonical.clone(),
            source,
        })?;

        let kind = if metadata.is_dir() {
            NodeKind::Dir
        } else {
            NodeKind::File
        };
        let mut tree = PathTree::new(canonical.clone(), kind);
        if kind == NodeKind::File {
            return Ok(tree);
        }

        let mut dir_ids: HashMap<_, NodeId> = HashMap::new();
        dir_ids.insert(canonical.clone(), PathTree::ROOT);

        let walker = WalkDir::new(&canonical).sort_by_file_name().into_iter();
        for entry in walker.filter_map(std::result::Result::ok) {
            if entry.depth() == 0 {
                continue;
            }
            let Some(parent_path) = entry.path().parent() else {
                continue;
            };
            let Some(&parent_id) = dir_ids.get(parent_path) else {
                continue;
            };

            let name = entry.file_name().to_string_lossy().into_owned();
            let kind = if entry.file_type().is_dir() {
                NodeKind::Dir
            } else {
                NodeKind::File
            };
            let id = tree.add_child(parent_id, &name, kind);
            if kind == NodeKind::Dir {
                dir_ids.insert(entry.into_path(), id);
            }
        }

        Ok(tree)
    }
}

#[cfg(test)]
#[path = "directory_tests.rs"]
mod tests;
