#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the archivetools binary.
#[macro_export]
macro_rules! archivetools {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("archivetools"))
    };
}

/// Creates a temporary directory with test fixtures for integration tests.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    /// Creates a new test fixture with an empty temp directory.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a file with the given content in the temp directory.
    pub fn create_file(&self, relative_path: &str, content: &str) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    /// Creates a directory in the temp directory.
    pub fn create_dir(&self, relative_path: &str) {
        let path = self.dir.path().join(relative_path);
        fs::create_dir_all(&path).expect("Failed to create directory");
    }

    /// Writes a configuration file and returns its path.
    pub fn write_config(&self, content: &str) -> PathBuf {
        let path = self.dir.path().join("archivetools.cfg");
        fs::write(&path, content).expect("Failed to write config");
        path
    }

    /// Returns the path to the temp directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Whether an entry exists relative to the temp directory.
    pub fn exists(&self, relative_path: &str) -> bool {
        self.dir.path().join(relative_path).exists()
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration collapsing runs of underscores, as in the documentation.
pub const COLLAPSE_UNDERSCORES_CONFIG: &str = r"
[replace]
(_){2,} = _
";

/// Configuration with a short path length limit to trigger findings.
pub const SHORT_LIMIT_CONFIG: &str = r"
[windows]
max_path_length = 40
";
