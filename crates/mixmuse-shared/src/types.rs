//! Core types used throughout MixMuse.rs

use crate::error::{MuseError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Music styles a pattern can be rendered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MusicStyle {
    Jazz,
    Classical,
    Electronic,
    Rock,
    Ambient,
}

impl MusicStyle {
    /// Every style, in catalog order
    pub const ALL: [MusicStyle; 5] = [
        MusicStyle::Jazz,
        MusicStyle::Classical,
        MusicStyle::Electronic,
        MusicStyle::Rock,
        MusicStyle::Ambient,
    ];

    /// Wire value
    pub fn as_str(self) -> &'static str {
        match self {
            MusicStyle::Jazz => "jazz",
            MusicStyle::Classical => "classical",
            MusicStyle::Electronic => "electronic",
            MusicStyle::Rock => "rock",
            MusicStyle::Ambient => "ambient",
        }
    }

    /// Human readable label
    pub fn label(self) -> &'static str {
        match self {
            MusicStyle::Jazz => "Jazz",
            MusicStyle::Classical => "Classical",
            MusicStyle::Electronic => "Electronic",
            MusicStyle::Rock => "Rock",
            MusicStyle::Ambient => "Ambient",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            MusicStyle::Jazz => "Improvisation and complexity",
            MusicStyle::Classical => "Formal structure",
            MusicStyle::Electronic => "Synthesized patterns",
            MusicStyle::Rock => "Energetic code",
            MusicStyle::Ambient => "Free flow",
        }
    }
}

impl fmt::Display for MusicStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MusicStyle {
    type Err = MuseError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        MusicStyle::ALL
            .into_iter()
            .find(|style| style.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| MuseError::invalid_enum("music style", s))
    }
}

/// Requested complexity of the musical rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Simple,
    Medium,
    Complex,
}

impl Complexity {
    pub const ALL: [Complexity; 3] = [Complexity::Simple, Complexity::Medium, Complexity::Complex];

    pub fn as_str(self) -> &'static str {
        match self {
            Complexity::Simple => "simple",
            Complexity::Medium => "medium",
            Complexity::Complex => "complex",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Complexity::Simple => "Simple",
            Complexity::Medium => "Medium",
            Complexity::Complex => "Complex",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Complexity::Simple => "Basic code",
            Complexity::Medium => "Moderate code",
            Complexity::Complex => "Advanced code",
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Complexity {
    type Err = MuseError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Complexity::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| MuseError::invalid_enum("complexity", s))
    }
}

/// Identifier casing conventions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStyle {
    /// `process_data`
    Snake,
    /// `processData`
    Camel,
    /// `ProcessData`
    Pascal,
    /// `PROCESS_DATA`
    ScreamingSnake,
    /// `process`
    Lower,
    Mixed,
}

/// Lexical metrics of a code snippet
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct CodeAnalysis {
    /// Newline-delimited lines (empty input has zero lines)
    pub lines: usize,

    /// Function-like definition sites
    pub functions: usize,

    /// Iteration constructs
    pub loops: usize,

    /// Structural complexity in [0, 1]
    pub complexity_score: f64,
}

/// Symbolic musical description of a code snippet
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicalPattern {
    pub rhythm: String,
    pub harmony: String,
    pub melody: String,
    pub structure: String,
    /// Beats per minute
    pub tempo: u32,
    pub key: String,
    pub time_signature: String,
}

/// A proposed identifier rename; never applied to source
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct RenameProposal {
    pub original: String,
    pub suggested: String,
}

impl RenameProposal {
    pub fn new(original: impl Into<String>, suggested: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            suggested: suggested.into(),
        }
    }
}

/// Text-formatted rename proposals, one `original -> suggested` per line
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct NamingSuggestions {
    pub suggestions: String,
}

impl NamingSuggestions {
    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
    }
}

/// Aggregate naming statistics for a code snippet
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct NamingStats {
    /// Function-like definition sites, named or anonymous
    pub total_functions: usize,
    pub named_functions: usize,
    pub snake_case_functions: usize,
    pub camel_case_functions: usize,
    pub pascal_case_functions: usize,
    pub other_case_functions: usize,
    /// Names already led by a musical verb
    pub themed_functions: usize,
    /// Names that would receive a rename proposal
    pub themeable_functions: usize,
    pub dominant_convention: Option<CaseStyle>,
}

impl NamingStats {
    /// Whether naming feedback is worth surfacing at all
    pub fn should_surface(&self) -> bool {
        self.total_functions > 0
    }
}

/// Kind of an editor change reported during realtime analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Insert,
    Delete,
    #[serde(other)]
    Other,
}

/// A single editor change
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EditChange {
    #[serde(rename = "type")]
    pub kind: ChangeKind,
    #[serde(default)]
    pub line: Option<usize>,
    #[serde(default)]
    pub text: Option<String>,
}

impl EditChange {
    pub fn new(kind: ChangeKind) -> Self {
        Self {
            kind,
            line: None,
            text: None,
        }
    }
}

/// Full suggestion request: code, symbols and rendering configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestRequest {
    pub code: String,
    #[serde(default)]
    pub symbols: Vec<String>,
    #[serde(default = "default_style")]
    pub music_style: MusicStyle,
    #[serde(default)]
    pub tempo: Option<i32>,
    #[serde(default = "default_complexity")]
    pub complexity: Complexity,
}

fn default_style() -> MusicStyle {
    MusicStyle::Jazz
}

fn default_complexity() -> Complexity {
    Complexity::Medium
}

/// Realtime request sent while the user is editing
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct RealtimeRequest {
    pub code: String,
    #[serde(default)]
    pub changes: Vec<EditChange>,
    #[serde(default)]
    pub symbols: Vec<String>,
}

/// Combined engine output
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MuseReport {
    pub suggestions: Vec<String>,
    pub analysis: CodeAnalysis,
    pub musical_pattern: Option<MusicalPattern>,
    pub naming_suggestions: Option<Vec<RenameProposal>>,
}
