use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexSet;

use crate::error::{ArchiveToolsError, Result};
use crate::filesystem::FileSystemRegistry;

use super::model::{RenameRule, RuleSet};
use super::parser::{self, RawConfig};

/// Replacement used when the configuration does not define one.
pub const DEFAULT_REPLACEMENT: &str = "_";

/// Builds an immutable [`RuleSet`] from a target file system preset and an
/// optional configuration file.
#[derive(Debug)]
pub struct RuleSetLoader {
    registry: FileSystemRegistry,
    base_dir: PathBuf,
}

impl RuleSetLoader {
    /// Loader anchored at the current working directory, against which
    /// relative `[exclude]` entries are resolved.
    ///
    /// # Errors
    /// Returns an error if the current directory cannot be determined.
    pub fn new() -> Result<Self> {
        Ok(Self::with_base_dir(std::env::current_dir()?))
    }

    #[must_use]
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self {
            registry: FileSystemRegistry::default(),
            base_dir,
        }
    }

    /// Load the rule set for `fs_name`, merging `config_path` over the
    /// built-in preset when given.
    ///
    /// # Errors
    /// Fails on an unknown file system identifier, an unreadable or malformed
    /// configuration file, a rename pattern that does not compile, or a
    /// replacement string that reintroduces an invalid character.
    pub fn load(&self, fs_name: &str, config_path: Option<&Path>) -> Result<RuleSet> {
        let raw = match config_path {
            Some(path) => {
                let content =
                    fs::read_to_string(path).map_err(|source| ArchiveToolsError::FileRead {
                        path: path.to_path_buf(),
                        source,
                    })?;
                parser::parse(&content)?
            }
            None => RawConfig::default(),
        };

        self.build(fs_name, &raw)
    }

    fn build(&self, fs_name: &str, raw: &RawConfig) -> Result<RuleSet> {
        let preset = self
            .registry
            .get(fs_name)
            .ok_or_else(|| ArchiveToolsError::UnknownFileSystem(fs_name.to_string()))?;

        for section in &raw.file_systems {
            if self.registry.get(&section.name).is_none() {
                return Err(ArchiveToolsError::UnknownFileSystem(section.name.clone()));
            }
        }

        let overrides = raw
            .file_systems
            .iter()
            .find(|section| section.name.eq_ignore_ascii_case(fs_name));

        let mut invalid_characters: IndexSet<char> = overrides
            .and_then(|section| section.special_characters.as_deref())
            .map_or_else(
                || preset.special_characters.iter().copied().collect(),
                |chars| chars.chars().collect(),
            );

        let max_path_length = overrides
            .and_then(|section| section.max_path_length)
            .unwrap_or(preset.max_path_length);

        if let Some(extra) = &raw.special_characters.extra {
            invalid_characters.extend(extra.chars());
        }

        let replacement = raw
            .special_characters
            .replacement
            .clone()
            .unwrap_or_else(|| DEFAULT_REPLACEMENT.to_string());

        if let Some(character) = replacement
            .chars()
            .find(|c| invalid_characters.contains(c))
        {
            return Err(ArchiveToolsError::UnsafeReplacement {
                replacement,
                character,
            });
        }

        let rename_rules = raw
            .replace
            .iter()
            .map(|rule| {
                RenameRule::compile(
                    &rule.pattern,
                    &rule.replacement,
                    rule.case_insensitive,
                    rule.accent_insensitive,
                )
            })
            .collect::<Result<Vec<_>>>()?;

        let excluded_paths = raw
            .exclude
            .iter()
            .map(|entry| self.normalize_exclude(entry))
            .collect();

        Ok(RuleSet {
            max_path_length,
            invalid_characters,
            replacement,
            rename_rules,
            excluded_paths,
        })
    }

    /// Anchor a relative exclude entry at the base directory and canonicalize
    /// it when the path exists. Nonexistent entries are kept lexically so a
    /// stale exclude line never aborts the run.
    fn normalize_exclude(&self, entry: &str) -> PathBuf {
        let path = Path::new(entry);
        let anchored = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        };
        dunce::canonicalize(&anchored).unwrap_or(anchored)
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
