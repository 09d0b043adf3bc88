//! # MixMuse Core
//!
//! Core engine for MixMuse.rs - musical analysis of source code
//!
//! This crate provides the analysis components of the MixMuse.rs ecosystem:
//! - Lexical metrics extraction (lines, functions, loops, complexity)
//! - Classification of metrics into a symbolic musical pattern
//! - Music-themed naming suggestions and naming statistics
//! - Configuration management
//!
//! Every operation is a pure function of its inputs. Arbitrary text, including
//! malformed or empty code, is accepted and degrades to default metrics.

pub mod analysis;
pub mod config;
pub mod engine;
pub mod naming;

// Re-export commonly used types
pub use mixmuse_shared::*;

pub use analysis::{MetricsExtractor, PatternClassifier};
pub use config::{ConfigManager, ConfigValue};
pub use engine::MuseEngine;
pub use naming::{NamingSuggester, parse_suggestions};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, MuseError>;

/// Lexical metrics of a code snippet
pub fn extract(code: &str) -> CodeAnalysis {
    MetricsExtractor::extract(code)
}

/// Musical pattern for previously extracted metrics.
///
/// A positive `tempo` overrides the style's base tempo.
pub fn classify(
    analysis: &CodeAnalysis,
    style: MusicStyle,
    complexity: Complexity,
    tempo: Option<i32>,
) -> MusicalPattern {
    PatternClassifier::classify(analysis, style, complexity, tempo)
}

/// Rename proposals as `original -> suggested` lines
pub fn suggest_names<S: AsRef<str>>(code: &str, symbols: &[S]) -> NamingSuggestions {
    NamingSuggester::suggest_names(code, symbols)
}

/// Naming statistics of a code snippet
pub fn analyze_naming_patterns(code: &str) -> NamingStats {
    NamingSuggester::analyze_naming_patterns(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_on_stub_function() {
        let code = "def process_data():\n    ...\n";

        let analysis = extract(code);
        assert_eq!(analysis.lines, 2);
        assert_eq!(analysis.functions, 1);

        let pattern = classify(&analysis, MusicStyle::Jazz, Complexity::Simple, None);
        assert_eq!(pattern.tempo, 120);
        assert_eq!(pattern.structure, "simple binary form (AB)");

        let names = suggest_names(code, &["process_data"]);
        assert_eq!(names.suggestions, "process_data -> orchestrateData");

        let stats = analyze_naming_patterns(code);
        assert_eq!(stats.total_functions, analysis.functions);
    }

    #[test]
    fn test_shared_version_matches() {
        assert_eq!(VERSION, mixmuse_shared::VERSION);
    }
}
