mod classify;
mod finding;

pub use classify::PathClassifier;
pub use finding::{CharOccurrence, Finding, FindingKind};
