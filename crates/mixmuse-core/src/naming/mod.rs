//! Musical naming suggestions
//!
//! Proposes music-themed renames for identifiers led by a generic procedural
//! verb (`process_data -> orchestrateData`) and summarizes the naming
//! conventions of a snippet. Nothing here rewrites source code.
//!
//! Suggestions travel as plain text, one `original -> suggested` pair per
//! line. [`parse_suggestions`] turns that text back into records.

pub mod theme;

use crate::analysis::parser::SourceParser;
use mixmuse_shared::{CaseStyle, NamingStats, NamingSuggestions, RenameProposal};
use std::collections::HashSet;

/// Separator between the original and the suggested name
pub const DELIMITER: &str = " -> ";

/// Naming suggester
pub struct NamingSuggester;

impl NamingSuggester {
    /// Text-formatted rename proposals for `symbols` that occur in `code`.
    ///
    /// With no symbols, the snippet's own function names are used.
    pub fn suggest_names<S: AsRef<str>>(code: &str, symbols: &[S]) -> NamingSuggestions {
        NamingSuggestions {
            suggestions: format_suggestions(&Self::proposals(code, symbols)),
        }
    }

    /// Rename proposals in symbol order, deduplicated
    pub fn proposals<S: AsRef<str>>(code: &str, symbols: &[S]) -> Vec<RenameProposal> {
        let parsed = SourceParser::parse(code);
        let present: HashSet<&str> = parsed.identifiers().collect();

        let candidates: Vec<String> = if symbols.is_empty() {
            parsed
                .function_sites()
                .into_iter()
                .filter_map(|site| site.name)
                .collect()
        } else {
            symbols.iter().map(|s| s.as_ref().trim().to_string()).collect()
        };

        let mut seen = HashSet::new();
        let mut proposals = Vec::new();

        for symbol in candidates {
            if symbol.is_empty() || !present.contains(symbol.as_str()) || !seen.insert(symbol.clone()) {
                continue;
            }
            if let Some(suggested) = theme_identifier(&symbol) {
                proposals.push(RenameProposal::new(symbol, suggested));
            }
        }

        proposals
    }

    /// Naming statistics over the snippet's function definitions
    pub fn analyze_naming_patterns(code: &str) -> NamingStats {
        let sites = SourceParser::parse(code).function_sites();
        let mut stats = NamingStats {
            total_functions: sites.len(),
            ..Default::default()
        };

        for name in sites.iter().filter_map(|site| site.name.as_deref()) {
            stats.named_functions += 1;

            match case_style(name.trim_matches('_')) {
                Some(CaseStyle::Snake | CaseStyle::Lower) => stats.snake_case_functions += 1,
                Some(CaseStyle::Camel) => stats.camel_case_functions += 1,
                Some(CaseStyle::Pascal) => stats.pascal_case_functions += 1,
                _ => stats.other_case_functions += 1,
            }

            if split_words(name)
                .first()
                .is_some_and(|word| theme::is_musical_verb(word))
            {
                stats.themed_functions += 1;
            }
            if theme_identifier(name).is_some() {
                stats.themeable_functions += 1;
            }
        }

        stats.dominant_convention = dominant_convention(&stats);
        stats
    }
}

/// Render proposals in the line-oriented text format
pub fn format_suggestions(proposals: &[RenameProposal]) -> String {
    proposals
        .iter()
        .map(|p| format!("{}{}{}", p.original, DELIMITER, p.suggested))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse the line-oriented text format; malformed lines are skipped
pub fn parse_suggestions(text: &str) -> Vec<RenameProposal> {
    text.lines()
        .filter_map(|line| line.split_once(DELIMITER))
        .map(|(original, suggested)| (original.trim(), suggested.trim()))
        .filter(|(original, suggested)| !original.is_empty() && !suggested.is_empty())
        .map(|(original, suggested)| RenameProposal::new(original, suggested))
        .collect()
}

/// Music-themed rename for one identifier, or `None` if it has no generic
/// leading verb.
///
/// Casing follows the input: snake, camel and single-word names come back in
/// camelCase, PascalCase stays Pascal and SCREAMING_SNAKE stays screaming.
/// Leading and trailing underscores are kept. Dunder names are left alone.
pub fn theme_identifier(ident: &str) -> Option<String> {
    if !is_identifier(ident) {
        return None;
    }
    if ident.len() > 4 && ident.starts_with("__") && ident.ends_with("__") {
        return None;
    }

    let core = ident.trim_matches('_');
    if core.is_empty() {
        return None;
    }
    let start = ident.len() - ident.trim_start_matches('_').len();
    let (prefix, suffix) = (&ident[..start], &ident[start + core.len()..]);

    let words = split_words(core);
    let verb = theme::themed_verb(words.first()?)?;

    let mut themed = vec![verb.to_string()];
    themed.extend(
        words[1..]
            .iter()
            .map(|word| theme::themed_noun(word).map_or_else(|| word.clone(), str::to_string)),
    );

    let rendered = match case_style(core) {
        Some(CaseStyle::Pascal) => themed.iter().map(|w| capitalize(w)).collect::<String>(),
        Some(CaseStyle::ScreamingSnake) => themed.join("_").to_ascii_uppercase(),
        _ => camel_case(&themed),
    };

    let suggested = format!("{prefix}{rendered}{suffix}");
    (suggested != ident).then_some(suggested)
}

/// Lowercase words of an identifier, split on underscores and case changes.
///
/// Acronyms stay together: `parseHTTPResponse` -> `parse`, `http`, `response`.
pub fn split_words(ident: &str) -> Vec<String> {
    let mut words = Vec::new();

    for part in ident.split('_').filter(|p| !p.is_empty()) {
        let chars: Vec<char> = part.chars().collect();
        let mut current = String::new();

        for (i, &c) in chars.iter().enumerate() {
            if i > 0 && c.is_uppercase() {
                let prev = chars[i - 1];
                let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
                let boundary = prev.is_lowercase()
                    || prev.is_ascii_digit()
                    || (prev.is_uppercase() && next_is_lower);
                if boundary && !current.is_empty() {
                    words.push(std::mem::take(&mut current).to_lowercase());
                }
            }
            current.push(c);
        }

        if !current.is_empty() {
            words.push(current.to_lowercase());
        }
    }

    words
}

/// Casing convention of an identifier without surrounding underscores
pub fn case_style(ident: &str) -> Option<CaseStyle> {
    let first = ident.chars().next()?;
    let has_upper = ident.chars().any(char::is_uppercase);
    let has_lower = ident.chars().any(char::is_lowercase);

    let style = if ident.contains('_') {
        match (has_upper, has_lower) {
            (true, false) => CaseStyle::ScreamingSnake,
            (false, _) => CaseStyle::Snake,
            (true, true) => CaseStyle::Mixed,
        }
    } else if first.is_lowercase() {
        if has_upper { CaseStyle::Camel } else { CaseStyle::Lower }
    } else if first.is_uppercase() {
        if has_lower { CaseStyle::Pascal } else { CaseStyle::ScreamingSnake }
    } else {
        CaseStyle::Mixed
    };

    Some(style)
}

fn is_identifier(ident: &str) -> bool {
    let mut chars = ident.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn camel_case(words: &[String]) -> String {
    let mut out = String::new();
    for (i, word) in words.iter().enumerate() {
        if i == 0 {
            out.push_str(word);
        } else {
            out.push_str(&capitalize(word));
        }
    }
    out
}

/// Most common of snake, camel and Pascal; ties go to the earlier one
fn dominant_convention(stats: &NamingStats) -> Option<CaseStyle> {
    [
        (CaseStyle::Snake, stats.snake_case_functions),
        (CaseStyle::Camel, stats.camel_case_functions),
        (CaseStyle::Pascal, stats.pascal_case_functions),
    ]
    .into_iter()
    .fold(None, |best: Option<(CaseStyle, usize)>, (style, count)| match best {
        Some((_, top)) if top >= count => best,
        _ if count > 0 => Some((style, count)),
        _ => best,
    })
    .map(|(style, _)| style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn suggest(code: &str, symbols: &[&str]) -> String {
        NamingSuggester::suggest_names(code, symbols).suggestions
    }

    #[test]
    fn test_process_data_becomes_orchestrate() {
        let out = suggest("def process_data():\n    ...\n", &["process_data"]);
        assert_eq!(out, "process_data -> orchestrateData");
    }

    #[test]
    fn test_known_renames() {
        let cases = [
            ("calculate_sum", "harmonizeValues"),
            ("validate_input", "tuneParameters"),
            ("get_user", "composeUser"),
            ("save_data", "arrangeData"),
            ("check_status", "tuneStatus"),
            ("update_record", "harmonizeRecord"),
            ("delete_item", "resolveItem"),
        ];
        for (original, expected) in cases {
            assert_eq!(theme_identifier(original).as_deref(), Some(expected), "{original}");
        }
    }

    #[test]
    fn test_case_preservation() {
        assert_eq!(theme_identifier("processData").as_deref(), Some("orchestrateData"));
        assert_eq!(theme_identifier("ProcessData").as_deref(), Some("OrchestrateData"));
        assert_eq!(theme_identifier("PROCESS_DATA").as_deref(), Some("ORCHESTRATE_DATA"));
        assert_eq!(theme_identifier("process").as_deref(), Some("orchestrate"));
        assert_eq!(theme_identifier("_get_user").as_deref(), Some("_composeUser"));
        assert_eq!(theme_identifier("getHTTPResponse").as_deref(), Some("composeHttpResponse"));
    }

    #[test]
    fn test_identifiers_left_alone() {
        assert_eq!(theme_identifier("__init__"), None);
        assert_eq!(theme_identifier("user_data"), None);
        assert_eq!(theme_identifier("orchestrateData"), None);
        assert_eq!(theme_identifier("___"), None);
        assert_eq!(theme_identifier("9lives"), None);
        assert_eq!(theme_identifier("self.process"), None);
        assert_eq!(theme_identifier(""), None);
    }

    #[test]
    fn test_themed_names_are_stable() {
        let once = theme_identifier("validate_input").unwrap();
        assert_eq!(theme_identifier(&once), None);
    }

    #[test]
    fn test_noun_only_themed_after_verb() {
        assert_eq!(theme_identifier("sum_input"), None);
        assert_eq!(theme_identifier("run_queue_timer").as_deref(), Some("performPlaylistMetronome"));
    }

    #[test]
    fn test_empty_code_has_no_suggestions() {
        assert!(NamingSuggester::suggest_names("", &["process_data"]).is_empty());
    }

    #[test]
    fn test_symbols_missing_from_code_are_skipped() {
        let out = suggest("def process_data():\n    pass\n", &["save_data", "process_data"]);
        assert_eq!(out, "process_data -> orchestrateData");
    }

    #[test]
    fn test_symbols_only_in_comments_are_skipped() {
        let out = suggest("# save_data\nx = 1\n", &["save_data"]);
        assert_eq!(out, "");
    }

    #[test]
    fn test_unmatched_and_duplicate_symbols() {
        let code = "def get_user(): pass\ndef helper(): pass\n";
        let out = suggest(code, &["get_user", "helper", "get_user", "  "]);
        assert_eq!(out, "get_user -> composeUser");
    }

    #[test]
    fn test_multiple_lines_keep_symbol_order() {
        let code = "function saveData() {}\nfunction loadData() {}\n";
        let out = suggest(code, &["loadData", "saveData"]);
        assert_eq!(out, "loadData -> composeData\nsaveData -> arrangeData");
        for line in out.lines() {
            assert_eq!(line.matches(DELIMITER).count(), 1);
        }
    }

    #[test]
    fn test_empty_symbols_fall_back_to_definitions() {
        let code = "def calculate_sum(a, b):\n    return a + b\n\ndef helper():\n    pass\n";
        let empty: [&str; 0] = [];
        assert_eq!(suggest(code, &empty), "calculate_sum -> harmonizeValues");
    }

    #[test]
    fn test_parse_suggestions() {
        let text = "process_data -> orchestrateData\nnot a pair\n\nsave_data -> arrangeData";
        assert_eq!(
            parse_suggestions(text),
            vec![
                RenameProposal::new("process_data", "orchestrateData"),
                RenameProposal::new("save_data", "arrangeData"),
            ]
        );
        assert!(parse_suggestions("").is_empty());
    }

    #[test]
    fn test_format_then_parse_preserves_proposals() {
        let proposals = NamingSuggester::proposals(
            "def get_user(): pass\ndef save_data(): pass\n",
            &["get_user", "save_data"],
        );
        assert_eq!(parse_suggestions(&format_suggestions(&proposals)), proposals);
    }

    #[test]
    fn test_split_words() {
        assert_eq!(split_words("process_data"), vec!["process", "data"]);
        assert_eq!(split_words("parseHTTPResponse"), vec!["parse", "http", "response"]);
        assert_eq!(split_words("Track2Mix"), vec!["track2", "mix"]);
        assert_eq!(split_words("__init__"), vec!["init"]);
        assert!(split_words("").is_empty());
    }

    #[test]
    fn test_case_style() {
        assert_eq!(case_style("process_data"), Some(CaseStyle::Snake));
        assert_eq!(case_style("processData"), Some(CaseStyle::Camel));
        assert_eq!(case_style("ProcessData"), Some(CaseStyle::Pascal));
        assert_eq!(case_style("PROCESS_DATA"), Some(CaseStyle::ScreamingSnake));
        assert_eq!(case_style("process"), Some(CaseStyle::Lower));
        assert_eq!(case_style("Process_data"), Some(CaseStyle::Mixed));
        assert_eq!(case_style(""), None);
    }

    #[test]
    fn test_naming_stats() {
        let code = r#"
def get_user(user_id):
    pass

def orchestrate_data():
    pass

def helperFunction():
    pass

square = lambda x: x * x
"#;
        let stats = NamingSuggester::analyze_naming_patterns(code);
        assert_eq!(stats.total_functions, 4);
        assert_eq!(stats.named_functions, 3);
        assert_eq!(stats.snake_case_functions, 2);
        assert_eq!(stats.camel_case_functions, 1);
        assert_eq!(stats.themed_functions, 1);
        assert_eq!(stats.themeable_functions, 1);
        assert_eq!(stats.dominant_convention, Some(CaseStyle::Snake));
    }

    #[test]
    fn test_naming_stats_empty() {
        let stats = NamingSuggester::analyze_naming_patterns("");
        assert_eq!(stats, NamingStats::default());
        assert!(!stats.should_surface());
    }

    #[test]
    fn test_naming_stats_ignore_hashes_and_else_branches() {
        let code = "my %h = (name => 1, age => 3);\n$m = array($k => $v);\nif ($x) {\n    a();\n}\nelseif ($z) {\n    b();\n}\n";
        let stats = NamingSuggester::analyze_naming_patterns(code);
        assert_eq!(stats, NamingStats::default());
        assert!(!stats.should_surface());
    }
}
