use std::path::PathBuf;

/// One invalid character and where it sits in the reported path string
/// (character index, used for inline highlighting).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharOccurrence {
    pub character: char,
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FindingKind {
    InvalidCharacters { occurrences: Vec<CharOccurrence> },
    PathTooLong { length: usize, limit: usize },
    EmptyDirectory,
    RenameCollision { target_name: String },
    RenameFailed { reason: String },
}

/// One issue detected on one path. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub path: PathBuf,
    pub kind: FindingKind,
}

impl Finding {
    #[must_use]
    pub const fn kind_label(&self) -> &'static str {
        match self.kind {
            FindingKind::InvalidCharacters { .. } => "invalid_character",
            FindingKind::PathTooLong { .. } => "path_too_long",
            FindingKind::EmptyDirectory => "empty_dir",
            FindingKind::RenameCollision { .. } => "rename_collision",
            FindingKind::RenameFailed { .. } => "rename_failed",
        }
    }

    /// Human-readable detail, also used as the CSV `detail` column.
    #[must_use]
    pub fn detail(&self) -> String {
        match &self.kind {
            FindingKind::InvalidCharacters { occurrences } => {
                let parts: Vec<_> = occurrences
                    .iter()
                    .map(|occ| format!("{:?} at {}", occ.character, occ.position))
                    .collect();
                format!("invalid characters: {}", parts.join(", "))
            }
            FindingKind::PathTooLong { length, limit } => {
                format!(
                    "path length {length} exceeds limit {limit} by {}",
                    length - limit
                )
            }
            FindingKind::EmptyDirectory => "directory contains no files".to_string(),
            FindingKind::RenameCollision { target_name } => {
                format!("several entries would be renamed to {target_name:?}")
            }
            FindingKind::RenameFailed { reason } => reason.clone(),
        }
    }
}
