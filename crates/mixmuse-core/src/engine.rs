//! Analysis engine tying the extractor, classifier and naming suggester together

use crate::analysis::advice;
use crate::analysis::{MetricsExtractor, PatternClassifier};
use crate::naming::{NamingSuggester, parse_suggestions};
use mixmuse_shared::{
    CodeAnalysis, Complexity, MuseConfig, MuseReport, MusicStyle, MusicalPattern, NamingStats, NamingSuggestions,
    RealtimeRequest, RenameProposal, Result, SuggestRequest,
};
use tracing::{debug, info, instrument};

/// Main engine facade
///
/// The engine is stateless apart from its configuration, which supplies the
/// rendering defaults and feature switches for the composed operations.
#[derive(Debug, Clone)]
pub struct MuseEngine {
    config: MuseConfig,
}

impl MuseEngine {
    /// Create a new engine configured from `MIXMUSE_*` environment variables
    #[instrument]
    pub fn new() -> Result<Self> {
        info!("Initializing MixMuse.rs engine from environment");

        let config = MuseConfig::load_with_env()?;
        Self::with_config(config)
    }

    /// Create a new engine with the provided configuration
    #[instrument(skip(config))]
    pub fn with_config(config: MuseConfig) -> Result<Self> {
        config.validate()?;

        info!(
            style = %config.defaults.style,
            complexity = %config.defaults.complexity,
            "MixMuse.rs engine initialized"
        );
        Ok(Self { config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &MuseConfig {
        &self.config
    }

    /// Replace the configuration at runtime
    #[instrument(skip(self, new_config))]
    pub fn update_config(&mut self, new_config: MuseConfig) -> Result<()> {
        new_config.validate()?;
        self.config = new_config;
        info!("Engine configuration updated");
        Ok(())
    }

    /// Lexical metrics of a snippet
    #[instrument(skip(self, code), fields(bytes = code.len()))]
    pub fn extract(&self, code: &str) -> CodeAnalysis {
        let analysis = MetricsExtractor::extract(code);
        debug!(
            lines = analysis.lines,
            functions = analysis.functions,
            loops = analysis.loops,
            score = analysis.complexity_score,
            "Extracted code metrics"
        );
        analysis
    }

    /// Musical pattern for an analysis
    pub fn classify(
        &self,
        analysis: &CodeAnalysis,
        style: MusicStyle,
        complexity: Complexity,
        tempo: Option<i32>,
    ) -> MusicalPattern {
        let pattern = PatternClassifier::classify(analysis, style, complexity, tempo);
        debug!(%style, %complexity, tempo = pattern.tempo, "Classified musical pattern");
        pattern
    }

    /// Rename proposals as `original -> suggested` lines
    #[instrument(skip(self, code, symbols), fields(symbol_count = symbols.len()))]
    pub fn suggest_names<S: AsRef<str>>(&self, code: &str, symbols: &[S]) -> NamingSuggestions {
        let suggestions = NamingSuggester::suggest_names(code, symbols);
        debug!(lines = suggestions.suggestions.lines().count(), "Generated naming suggestions");
        suggestions
    }

    /// Naming statistics of a snippet
    #[instrument(skip(self, code))]
    pub fn analyze_naming_patterns(&self, code: &str) -> NamingStats {
        NamingSuggester::analyze_naming_patterns(code)
    }

    /// Full suggestion: requested rendering, suggest advice and rename proposals
    #[instrument(skip(self, request), fields(style = %request.music_style, complexity = %request.complexity))]
    pub fn suggest(&self, request: &SuggestRequest) -> MuseReport {
        let analysis = self.extract(&request.code);

        MuseReport {
            suggestions: advice::suggest_advice(&analysis),
            musical_pattern: self.pattern_if_enabled(&analysis, request.music_style, request.complexity, request.tempo),
            naming_suggestions: self.proposals_if_enabled(&request.code, &request.symbols),
            analysis,
        }
    }

    /// Report for a newly opened file, rendered with the configured defaults
    #[instrument(skip(self, code))]
    pub fn analyze_file(&self, code: &str) -> MuseReport {
        let analysis = self.extract(code);
        let defaults = &self.config.defaults;
        let no_symbols: [&str; 0] = [];

        MuseReport {
            suggestions: advice::file_open_advice(&analysis),
            musical_pattern: self.pattern_if_enabled(&analysis, defaults.style, defaults.complexity, self.default_tempo()),
            naming_suggestions: self.proposals_if_enabled(code, &no_symbols),
            analysis,
        }
    }

    /// Report for an in-progress edit, rendered with the configured defaults
    #[instrument(skip(self, request), fields(changes = request.changes.len()))]
    pub fn analyze_realtime(&self, request: &RealtimeRequest) -> MuseReport {
        let analysis = self.extract(&request.code);
        let defaults = &self.config.defaults;

        let (naming_stats, naming_suggestions) = if request.symbols.is_empty() {
            (None, None)
        } else {
            (
                Some(self.analyze_naming_patterns(&request.code)),
                self.proposals_if_enabled(&request.code, &request.symbols),
            )
        };

        MuseReport {
            suggestions: advice::realtime_advice(&request.changes, naming_stats.as_ref()),
            musical_pattern: self.pattern_if_enabled(&analysis, defaults.style, defaults.complexity, self.default_tempo()),
            naming_suggestions,
            analysis,
        }
    }

    fn default_tempo(&self) -> Option<i32> {
        i32::try_from(self.config.defaults.tempo).ok()
    }

    fn pattern_if_enabled(
        &self,
        analysis: &CodeAnalysis,
        style: MusicStyle,
        complexity: Complexity,
        tempo: Option<i32>,
    ) -> Option<MusicalPattern> {
        self.config
            .features
            .musical_analysis
            .then(|| self.classify(analysis, style, complexity, tempo))
    }

    fn proposals_if_enabled<S: AsRef<str>>(&self, code: &str, symbols: &[S]) -> Option<Vec<RenameProposal>> {
        if !self.config.features.naming_suggestions {
            return None;
        }
        let text = self.suggest_names(code, symbols);
        Some(parse_suggestions(&text.suggestions))
    }
}
