use crate::error::{ArchiveToolsError, Result};

/// Parsed configuration file, before merging with file system presets.
///
/// The format is sectioned key-value text. Values are taken verbatim (so
/// `special_characters = <>:/\|?*` needs no quoting); surrounding double
/// quotes are stripped, which is how an empty value is spelled (`extra = ""`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawConfig {
    /// `[windows]`-style sections overriding a file system preset.
    pub file_systems: Vec<RawFileSystemSection>,

    /// The `[special_characters]` section.
    pub special_characters: RawSpecialCharacters,

    /// Rules from the `[replace]` section, in file order.
    pub replace: Vec<RawRenameRule>,

    /// Paths from the `[exclude]` section, one per line.
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFileSystemSection {
    pub name: String,
    pub special_characters: Option<String>,
    pub max_path_length: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSpecialCharacters {
    pub extra: Option<String>,
    pub replacement: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRenameRule {
    pub pattern: String,
    pub replacement: String,
    pub case_insensitive: bool,
    pub accent_insensitive: bool,
}

enum Section {
    None,
    FileSystem(usize),
    SpecialCharacters,
    Replace,
    Exclude,
}

const NO_CASE_FLAG: &str = "NO_CASE";
const NO_ACCENT_FLAG: &str = "NO_ACCENT";

/// Parse configuration text.
///
/// # Errors
/// Returns `Config` errors with line numbers for malformed lines, unknown
/// keys, and rename rules without a `=` separator.
pub fn parse(content: &str) -> Result<RawConfig> {
    let mut config = RawConfig::default();
    let mut section = Section::None;

    for (index, raw_line) in content.lines().enumerate() {
        let line = raw_line.trim();
        let line_no = index + 1;

        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if let Some(name) = parse_section_header(line) {
            section = enter_section(&mut config, name);
            continue;
        }

        match section {
            Section::None => {
                return Err(ArchiveToolsError::Config(format!(
                    "line {line_no}: entry outside of any section"
                )));
            }
            Section::FileSystem(idx) => {
                parse_file_system_entry(&mut config.file_systems[idx], line, line_no)?;
            }
            Section::SpecialCharacters => {
                parse_special_characters_entry(&mut config.special_characters, line, line_no)?;
            }
            Section::Replace => config.replace.push(parse_rename_rule(line, line_no)?),
            Section::Exclude => config.exclude.push(line.to_string()),
        }
    }

    Ok(config)
}

fn parse_section_header(line: &str) -> Option<&str> {
    line.strip_prefix('[')?.strip_suffix(']')
}

fn enter_section(config: &mut RawConfig, name: &str) -> Section {
    match name {
        "special_characters" => Section::SpecialCharacters,
        "replace" => Section::Replace,
        "exclude" => Section::Exclude,
        fs_name => {
            config.file_systems.push(RawFileSystemSection {
                name: fs_name.to_string(),
                special_characters: None,
                max_path_length: None,
            });
            Section::FileSystem(config.file_systems.len() - 1)
        }
    }
}

fn split_key_value(line: &str, line_no: usize) -> Result<(&str, &str)> {
    line.split_once('=')
        .map(|(key, value)| (key.trim(), value.trim()))
        .ok_or_else(|| {
            ArchiveToolsError::Config(format!("line {line_no}: expected `key = value`"))
        })
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

fn parse_file_system_entry(
    section: &mut RawFileSystemSection,
    line: &str,
    line_no: usize,
) -> Result<()> {
    let (key, value) = split_key_value(line, line_no)?;
    match key {
        "special_characters" => section.special_characters = Some(unquote(value).to_string()),
        "max_path_length" => {
            let parsed = value.parse().map_err(|_| {
                ArchiveToolsError::Config(format!(
                    "line {line_no}: max_path_length must be a positive integer, got {value:?}"
                ))
            })?;
            section.max_path_length = Some(parsed);
        }
        unknown => {
            return Err(ArchiveToolsError::Config(format!(
                "line {line_no}: unknown key {unknown:?} in [{}] section",
                section.name
            )));
        }
    }
    Ok(())
}

fn parse_special_characters_entry(
    section: &mut RawSpecialCharacters,
    line: &str,
    line_no: usize,
) -> Result<()> {
    let (key, value) = split_key_value(line, line_no)?;
    match key {
        "extra" => section.extra = Some(unquote(value).to_string()),
        "replacement" => section.replacement = Some(unquote(value).to_string()),
        unknown => {
            return Err(ArchiveToolsError::Config(format!(
                "line {line_no}: unknown key {unknown:?} in [special_characters] section"
            )));
        }
    }
    Ok(())
}

/// Parse one `[replace]` line: `<pattern> = <replacement> [NO_CASE] [NO_ACCENT]`.
///
/// Flags are recognized at the end of the line, in any order. A quoted
/// replacement is taken literally, so `"a NO_CASE"` keeps the words.
fn parse_rename_rule(line: &str, line_no: usize) -> Result<RawRenameRule> {
    let (pattern, right) = line.split_once('=').ok_or_else(|| {
        ArchiveToolsError::Config(format!(
            "line {line_no}: rename rule must be `<pattern> = <replacement>`"
        ))
    })?;

    let pattern = pattern.trim();
    if pattern.is_empty() {
        return Err(ArchiveToolsError::Config(format!(
            "line {line_no}: rename rule has an empty pattern"
        )));
    }

    let mut rest = right.trim();
    let mut case_insensitive = false;
    let mut accent_insensitive = false;

    if !(rest.starts_with('"') && rest.ends_with('"') && rest.len() >= 2) {
        loop {
            if let Some(stripped) = strip_flag(rest, NO_CASE_FLAG)
                && !case_insensitive
            {
                case_insensitive = true;
                rest = stripped;
            } else if let Some(stripped) = strip_flag(rest, NO_ACCENT_FLAG)
                && !accent_insensitive
            {
                accent_insensitive = true;
                rest = stripped;
            } else {
                break;
            }
        }
    }

    Ok(RawRenameRule {
        pattern: pattern.to_string(),
        replacement: unquote(rest).to_string(),
        case_insensitive,
        accent_insensitive,
    })
}

/// Strip a trailing flag token. The flag must stand alone: either the whole
/// remaining text, or preceded by whitespace.
fn strip_flag<'a>(rest: &'a str, flag: &str) -> Option<&'a str> {
    let stripped = rest.strip_suffix(flag)?;
    if stripped.is_empty() || stripped.ends_with(char::is_whitespace) {
        Some(stripped.trim_end())
    } else {
        None
    }
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
