use super::*;

#[test]
fn empty_input_parses_to_defaults() {
    let config = parse("").unwrap();
    assert_eq!(config, RawConfig::default());
}

#[test]
fn parses_documented_default_config() {
    let content = r#"
[windows]
special_characters = <>:/\|?*
max_path_length = 260

[special_characters]
extra = ""
replacement = _

[replace]

[exclude]
"#;
    let config = parse(content).unwrap();

    assert_eq!(config.file_systems.len(), 1);
    let windows = &config.file_systems[0];
    assert_eq!(windows.name, "windows");
    assert_eq!(windows.special_characters.as_deref(), Some(r"<>:/\|?*"));
    assert_eq!(windows.max_path_length, Some(260));

    assert_eq!(config.special_characters.extra.as_deref(), Some(""));
    assert_eq!(config.special_characters.replacement.as_deref(), Some("_"));
    assert!(config.replace.is_empty());
    assert!(config.exclude.is_empty());
}

#[test]
fn comments_and_blank_lines_are_skipped() {
    let content = "# leading comment\n\n[special_characters]\n; other comment\nextra = !\n";
    let config = parse(content).unwrap();
    assert_eq!(config.special_characters.extra.as_deref(), Some("!"));
}

#[test]
fn entry_outside_section_is_rejected() {
    let err = parse("extra = !\n").unwrap_err();
    assert!(err.to_string().contains("line 1"));
}

#[test]
fn unknown_key_is_rejected_with_line_number() {
    let err = parse("[special_characters]\nbogus = 1\n").unwrap_err();
    assert!(err.to_string().contains("line 2"));
    assert!(err.to_string().contains("bogus"));
}

#[test]
fn bad_max_path_length_is_rejected() {
    let err = parse("[windows]\nmax_path_length = many\n").unwrap_err();
    assert!(err.to_string().contains("max_path_length"));
}

#[test]
fn replace_rule_with_flags() {
    let config = parse("[replace]\n(_){2,} = _ NO_CASE NO_ACCENT\n").unwrap();
    assert_eq!(config.replace.len(), 1);
    let rule = &config.replace[0];
    assert_eq!(rule.pattern, "(_){2,}");
    assert_eq!(rule.replacement, "_");
    assert!(rule.case_insensitive);
    assert!(rule.accent_insensitive);
}

#[test]
fn replace_rule_flags_in_any_order() {
    let config = parse("[replace]\nfoo = bar NO_ACCENT NO_CASE\n").unwrap();
    let rule = &config.replace[0];
    assert!(rule.case_insensitive);
    assert!(rule.accent_insensitive);
}

#[test]
fn replace_rule_without_flags() {
    let config = parse("[replace]\ndraft = final\n").unwrap();
    let rule = &config.replace[0];
    assert_eq!(rule.pattern, "draft");
    assert_eq!(rule.replacement, "final");
    assert!(!rule.case_insensitive);
    assert!(!rule.accent_insensitive);
}

#[test]
fn quoted_replacement_keeps_flag_words() {
    let config = parse("[replace]\nx = \"y NO_CASE\"\n").unwrap();
    let rule = &config.replace[0];
    assert_eq!(rule.replacement, "y NO_CASE");
    assert!(!rule.case_insensitive);
}

#[test]
fn flag_must_be_a_standalone_token() {
    let config = parse("[replace]\nx = y_NO_CASE\n").unwrap();
    let rule = &config.replace[0];
    assert_eq!(rule.replacement, "y_NO_CASE");
    assert!(!rule.case_insensitive);
}

#[test]
fn replace_rule_without_separator_is_rejected() {
    let err = parse("[replace]\njust-a-pattern\n").unwrap_err();
    assert!(err.to_string().contains("rename rule"));
}

#[test]
fn replace_rule_with_empty_pattern_is_rejected() {
    let err = parse("[replace]\n = x\n").unwrap_err();
    assert!(err.to_string().contains("empty pattern"));
}

#[test]
fn exclude_lines_are_collected_in_order() {
    let config = parse("[exclude]\n/abs/path\nrelative/dir\n").unwrap();
    assert_eq!(config.exclude, vec!["/abs/path", "relative/dir"]);
}

#[test]
fn multiple_sections_can_interleave() {
    let content = "[exclude]\na\n[replace]\nx = y\n[exclude]\nb\n";
    let config = parse(content).unwrap();
    assert_eq!(config.exclude, vec!["a", "b"]);
    assert_eq!(config.replace.len(), 1);
}
