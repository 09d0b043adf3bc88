//! Plain-language improvement hints derived from code metrics

use mixmuse_shared::{ChangeKind, CodeAnalysis, EditChange, NamingStats};

pub const SIMPLIFY_SCORE: f64 = 0.7;
pub const REFACTOR_SCORE: f64 = 0.6;
pub const MANY_LOOPS: usize = 5;
pub const MANY_FUNCTIONS: usize = 10;
pub const FEW_FUNCTIONS: usize = 3;
pub const LONG_FILE_LINES: usize = 100;

pub const SIMPLIFY_STRUCTURE: &str = "Consider simplifying the code structure";
pub const PREFER_FUNCTIONAL: &str = "Many loops detected - consider functional iteration methods";
pub const MODULARIZE: &str = "Many functions - consider grouping them into modules or classes";
pub const SPLIT_FILE: &str = "Long file - consider splitting it into modules";
pub const REFACTOR: &str = "High complexity - consider refactoring";
pub const EXTRACT_LOGIC: &str = "Few functions - consider extracting logic";
pub const CHECK_HARMONY: &str = "New code inserted - check its harmony";
pub const ADJUST_STRUCTURE: &str = "Code removed - adjust the structure";
pub const MUSICAL_NAMES: &str = "Consider renaming functions with more musical names";

/// Hints attached to an explicit suggestion request
pub fn suggest_advice(analysis: &CodeAnalysis) -> Vec<String> {
    let mut advice = Vec::new();

    if analysis.complexity_score > SIMPLIFY_SCORE {
        advice.push(SIMPLIFY_STRUCTURE.to_string());
    }
    if analysis.loops > MANY_LOOPS {
        advice.push(PREFER_FUNCTIONAL.to_string());
    }
    if analysis.functions > MANY_FUNCTIONS {
        advice.push(MODULARIZE.to_string());
    }

    advice
}

/// Hints shown when a file is opened
pub fn file_open_advice(analysis: &CodeAnalysis) -> Vec<String> {
    let mut advice = Vec::new();

    if analysis.lines > LONG_FILE_LINES {
        advice.push(SPLIT_FILE.to_string());
    }
    if analysis.complexity_score > REFACTOR_SCORE {
        advice.push(REFACTOR.to_string());
    }
    if analysis.functions < FEW_FUNCTIONS {
        advice.push(EXTRACT_LOGIC.to_string());
    }

    advice
}

/// Hints produced while the user edits.
///
/// `naming` is only consulted when symbols were supplied with the edit.
pub fn realtime_advice(changes: &[EditChange], naming: Option<&NamingStats>) -> Vec<String> {
    let mut advice: Vec<String> = changes
        .iter()
        .filter_map(|change| match change.kind {
            ChangeKind::Insert => Some(CHECK_HARMONY.to_string()),
            ChangeKind::Delete => Some(ADJUST_STRUCTURE.to_string()),
            ChangeKind::Other => None,
        })
        .collect();

    if naming.is_some_and(NamingStats::should_surface) {
        advice.push(MUSICAL_NAMES.to_string());
    }

    advice
}
