use std::path::{Path, PathBuf};

use indexmap::IndexSet;
use regex::{Regex, RegexBuilder};

use crate::error::{ArchiveToolsError, Result};
use crate::fold::fold_accents;

/// Immutable rule set driving one invocation.
///
/// Loaded once from the target file system preset merged with the
/// configuration file, then passed explicitly to every component.
#[derive(Debug, Clone)]
pub struct RuleSet {
    /// Maximum full-path length in characters.
    pub max_path_length: usize,

    /// Characters forbidden in path component names, in declaration order.
    pub invalid_characters: IndexSet<char>,

    /// Replacement string for invalid characters. Validated at load time to
    /// contain no invalid character itself.
    pub replacement: String,

    /// Rename rules, applied in declared order.
    pub rename_rules: Vec<RenameRule>,

    /// Normalized absolute paths excluded from validation.
    pub excluded_paths: IndexSet<PathBuf>,
}

impl RuleSet {
    /// A path is excluded if it equals, or is a descendant of, an excluded
    /// entry.
    #[must_use]
    pub fn is_excluded(&self, path: &Path) -> bool {
        self.excluded_paths
            .iter()
            .any(|excluded| path.starts_with(excluded))
    }
}

/// One compiled pattern/replacement rule from the `[replace]` section.
#[derive(Debug, Clone)]
pub struct RenameRule {
    pub pattern: String,
    pub replacement: String,
    pub case_insensitive: bool,
    pub accent_insensitive: bool,
    regex: Regex,
}

impl RenameRule {
    /// Compile a rule. Accent-insensitive rules are compiled from the
    /// accent-folded pattern and matched against accent-folded names.
    ///
    /// # Errors
    /// Returns `InvalidPattern` if the pattern does not compile.
    pub fn compile(
        pattern: &str,
        replacement: &str,
        case_insensitive: bool,
        accent_insensitive: bool,
    ) -> Result<Self> {
        let source = if accent_insensitive {
            fold_accents(pattern)
        } else {
            pattern.to_string()
        };

        let regex = RegexBuilder::new(&source)
            .case_insensitive(case_insensitive)
            .build()
            .map_err(|source| ArchiveToolsError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;

        Ok(Self {
            pattern: pattern.to_string(),
            replacement: replacement.to_string(),
            case_insensitive,
            accent_insensitive,
            regex,
        })
    }

    #[must_use]
    pub const fn regex(&self) -> &Regex {
        &self.regex
    }
}

/// Which checks an invocation runs, resolved from the `-e`/`+e`/`-i`/`-l`
/// selection flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveChecks {
    pub invalid_characters: bool,
    pub path_length: bool,
    pub empty_dirs: bool,
}

impl ActiveChecks {
    /// Default selection: invalid characters and path length.
    #[must_use]
    pub const fn defaults() -> Self {
        Self {
            invalid_characters: true,
            path_length: true,
            empty_dirs: false,
        }
    }

    /// Resolve the selection flags. Any of `-i`/`-l`/`-e` selects exactly the
    /// named checks; `+e` adds empty-directory checks on top of whatever is
    /// selected (the defaults when nothing else is).
    #[must_use]
    pub const fn from_flags(
        invalid_characters: bool,
        path_length: bool,
        empty_dirs: bool,
        add_empty_dirs: bool,
    ) -> Self {
        let mut checks = if invalid_characters || path_length || empty_dirs {
            Self {
                invalid_characters,
                path_length,
                empty_dirs,
            }
        } else {
            Self::defaults()
        };

        if add_empty_dirs {
            checks.empty_dirs = true;
        }

        checks
    }
}

impl Default for ActiveChecks {
    fn default() -> Self {
        Self::defaults()
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
