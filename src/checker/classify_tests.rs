use std::path::PathBuf;

use indexmap::IndexSet;

use super::*;
use crate::config::{ActiveChecks, RuleSet};
use crate::scanner::{NodeKind, PathTree};

fn windows_rules() -> RuleSet {
    RuleSet {
        max_path_length: 260,
        invalid_characters: "<>:/\\|?*".chars().collect::<IndexSet<_>>(),
        replacement: "_".to_string(),
        rename_rules: Vec::new(),
        excluded_paths: IndexSet::new(),
    }
}

fn tree_with_file(name: &str) -> (PathTree, usize) {
    let mut tree = PathTree::new(PathBuf::from("/base"), NodeKind::Dir);
    let id = tree.add_child(PathTree::ROOT, name, NodeKind::File);
    (tree, id)
}

#[test]
fn clean_name_produces_no_findings() {
    let rules = windows_rules();
    let classifier = PathClassifier::new(&rules, ActiveChecks::defaults());
    let (tree, id) = tree_with_file("report.txt");
    assert!(classifier.classify(&tree, id).is_empty());
}

#[test]
fn invalid_characters_are_positioned_in_the_path() {
    let rules = windows_rules();
    let classifier = PathClassifier::new(&rules, ActiveChecks::defaults());
    let (tree, id) = tree_with_file("a<b>.txt");

    let findings = classifier.classify(&tree, id);
    assert_eq!(findings.len(), 1);
    let FindingKind::InvalidCharacters { occurrences } = &findings[0].kind else {
        panic!("expected invalid characters finding");
    };

    // "/base/" is 6 characters, so '<' sits at 7 and '>' at 9.
    assert_eq!(occurrences.len(), 2);
    assert_eq!(occurrences[0].character, '<');
    assert_eq!(occurrences[0].position, 7);
    assert_eq!(occurrences[1].character, '>');
    assert_eq!(occurrences[1].position, 9);
}

#[test]
fn separators_in_ancestors_are_not_reported_on_children() {
    let rules = windows_rules();
    let classifier = PathClassifier::new(&rules, ActiveChecks::defaults());

    let mut tree = PathTree::new(PathBuf::from("/base"), NodeKind::Dir);
    let bad_dir = tree.add_child(PathTree::ROOT, "bad<dir", NodeKind::Dir);
    let child = tree.add_child(bad_dir, "clean.txt", NodeKind::File);

    assert_eq!(classifier.classify(&tree, bad_dir).len(), 1);
    assert!(classifier.classify(&tree, child).is_empty());
}

#[test]
fn path_length_reports_overage() {
    let mut rules = windows_rules();
    rules.max_path_length = 20;
    let classifier = PathClassifier::new(&rules, ActiveChecks::defaults());
    let (tree, id) = tree_with_file("a-rather-long-name.txt");

    let findings = classifier.classify(&tree, id);
    let too_long = findings
        .iter()
        .find(|f| matches!(f.kind, FindingKind::PathTooLong { .. }))
        .expect("expected a path length finding");
    let FindingKind::PathTooLong { length, limit } = too_long.kind else {
        unreachable!()
    };
    assert_eq!(limit, 20);
    assert_eq!(length, "/base/a-rather-long-name.txt".chars().count());
}

#[test]
fn empty_dirs_reported_only_when_selected() {
    let rules = windows_rules();
    let mut tree = PathTree::new(PathBuf::from("/base"), NodeKind::Dir);
    let empty = tree.add_child(PathTree::ROOT, "empty", NodeKind::Dir);

    let defaults = PathClassifier::new(&rules, ActiveChecks::defaults());
    assert!(defaults.classify(&tree, empty).is_empty());

    let with_empty = PathClassifier::new(&rules, ActiveChecks::from_flags(false, false, true, false));
    let findings = with_empty.classify(&tree, empty);
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].kind, FindingKind::EmptyDirectory);
}

#[test]
fn nested_empty_dirs_each_get_a_finding() {
    let rules = windows_rules();
    let checks = ActiveChecks::from_flags(false, false, true, false);
    let classifier = PathClassifier::new(&rules, checks);

    let mut tree = PathTree::new(PathBuf::from("/base"), NodeKind::Dir);
    let outer = tree.add_child(PathTree::ROOT, "outer", NodeKind::Dir);
    let _inner = tree.add_child(outer, "inner", NodeKind::Dir);

    let findings = classifier.classify_tree(&tree);
    assert_eq!(findings.len(), 3); // root, outer, inner are all empty
}

#[test]
fn excluded_paths_produce_no_findings() {
    let mut rules = windows_rules();
    rules.excluded_paths.insert(PathBuf::from("/base/skip"));
    let classifier = PathClassifier::new(&rules, ActiveChecks::defaults());

    let mut tree = PathTree::new(PathBuf::from("/base"), NodeKind::Dir);
    let skip = tree.add_child(PathTree::ROOT, "skip", NodeKind::Dir);
    let inside = tree.add_child(skip, "bad<name", NodeKind::File);
    let sibling = tree.add_child(PathTree::ROOT, "also<bad", NodeKind::File);

    assert!(classifier.classify(&tree, inside).is_empty());
    assert_eq!(classifier.classify(&tree, sibling).len(), 1);
}

#[test]
fn classify_tree_aggregates_in_node_order() {
    let rules = windows_rules();
    let classifier = PathClassifier::new(&rules, ActiveChecks::defaults());

    let mut tree = PathTree::new(PathBuf::from("/base"), NodeKind::Dir);
    tree.add_child(PathTree::ROOT, "one<", NodeKind::File);
    tree.add_child(PathTree::ROOT, "two>", NodeKind::File);

    let findings = classifier.classify_tree(&tree);
    assert_eq!(findings.len(), 2);
    assert!(findings[0].path.ends_with("one<"));
    assert!(findings[1].path.ends_with("two>"));
}
