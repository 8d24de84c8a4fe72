use regex::NoExpand;

use crate::config::{RenameRule, RuleSet};
use crate::fold::fold_accents_with_map;

/// Compute the compliant name for one path component.
///
/// Invalid characters are replaced in a single pass (a replacement is never
/// re-scanned), then every rename rule is applied in declared order, the
/// output of each feeding the next.
#[must_use]
pub fn compute_new_name(name: &str, rules: &RuleSet) -> String {
    let mut result = replace_invalid_characters(name, rules);
    for rule in &rules.rename_rules {
        result = apply_rule(rule, &result);
    }
    result
}

fn replace_invalid_characters(name: &str, rules: &RuleSet) -> String {
    if !name
        .chars()
        .any(|c| rules.invalid_characters.contains(&c))
    {
        return name.to_string();
    }

    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if rules.invalid_characters.contains(&c) {
            out.push_str(&rules.replacement);
        } else {
            out.push(c);
        }
    }
    out
}

/// Apply one rule. The replacement text is inserted literally; matched text
/// is discarded, so folding only ever affects what the pattern sees.
pub(crate) fn apply_rule(rule: &RenameRule, name: &str) -> String {
    if rule.accent_insensitive {
        apply_accent_folded(rule, name)
    } else {
        rule.regex()
            .replace_all(name, NoExpand(&rule.replacement))
            .into_owned()
    }
}

/// Match against the accent-folded name and splice replacements back into
/// the original through the fold offset map, so accents outside the matched
/// ranges survive untouched.
fn apply_accent_folded(rule: &RenameRule, name: &str) -> String {
    let (folded, map) = fold_accents_with_map(name);

    let mut result = String::new();
    let mut consumed = 0;
    for found in rule.regex().find_iter(&folded) {
        let start = map[found.start()];
        let end = map[found.end()];
        if start < consumed {
            continue;
        }
        result.push_str(&name[consumed..start]);
        result.push_str(&rule.replacement);
        consumed = end;
    }
    result.push_str(&name[consumed..]);
    result
}

#[cfg(test)]
#[path = "name_tests.rs"]
mod tests;
