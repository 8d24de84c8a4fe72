mod loader;
mod model;
mod parser;

pub use loader::{DEFAULT_REPLACEMENT, RuleSetLoader};
pub use model::{ActiveChecks, RenameRule, RuleSet};
pub use parser::{RawConfig, RawFileSystemSection, RawRenameRule, RawSpecialCharacters};
