//! Musical pattern classification
//!
//! Maps a [`CodeAnalysis`] plus rendering configuration onto a
//! [`MusicalPattern`]. Each style owns a fixed palette; the complexity
//! setting and the analysis' complexity score choose the entry within it.
//!
//! Selection rules:
//! - the score falls into a [`ScoreBucket`]; a score exactly on a boundary
//!   belongs to the lower bucket
//! - `Complexity` shifts the bucket by -1 / 0 / +1, clamped to the palette
//! - the loop tier can only raise the rhythm entry
//! - the highest level uses the style's asymmetric time signature
//! - structure ignores style and reflects the code's size and shape

use mixmuse_shared::{CodeAnalysis, Complexity, MusicStyle, MusicalPattern};
use serde::{Deserialize, Serialize};

/// Highest score still classified as low
pub const LOW_CEILING: f64 = 0.3;
/// Highest score still classified as moderate
pub const MODERATE_CEILING: f64 = 0.6;

/// Loop count above which the rhythm becomes dense
pub const DENSE_LOOP_THRESHOLD: usize = 5;

/// Coarse band of the complexity score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScoreBucket {
    Low,
    Moderate,
    High,
}

impl ScoreBucket {
    /// Bucket a score; out-of-range values are clamped and NaN counts as zero
    pub fn from_score(score: f64) -> Self {
        let score = if score.is_nan() { 0.0 } else { score.clamp(0.0, 1.0) };
        match score {
            s if s <= LOW_CEILING => ScoreBucket::Low,
            s if s <= MODERATE_CEILING => ScoreBucket::Moderate,
            _ => ScoreBucket::High,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Code shape archetype behind the `structure` label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StructureArchetype {
    Simple,
    Sectional,
    Cyclic,
}

impl StructureArchetype {
    pub fn from_analysis(analysis: &CodeAnalysis) -> Self {
        if analysis.functions <= 1 && analysis.lines <= 30 {
            StructureArchetype::Simple
        } else if analysis.functions <= 5 && analysis.lines <= 150 {
            StructureArchetype::Sectional
        } else {
            StructureArchetype::Cyclic
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StructureArchetype::Simple => "simple binary form (AB)",
            StructureArchetype::Sectional => "sectional song form (AABA)",
            StructureArchetype::Cyclic => "cyclic rondo form (ABACA)",
        }
    }
}

/// Fixed label vocabulary of one style, ordered from sparse to dense
#[derive(Debug, Clone, Copy)]
pub struct StylePalette {
    pub base_tempo: u32,
    pub rhythm: [&'static str; 3],
    pub harmony: [&'static str; 3],
    pub melody: [&'static str; 3],
    pub key: [&'static str; 3],
    pub time_signature: [&'static str; 3],
}

const JAZZ: StylePalette = StylePalette {
    base_tempo: 120,
    rhythm: ["swing eighths", "syncopated swing", "polyrhythmic bebop"],
    harmony: ["major triads", "seventh chords (ii-V-I)", "extended altered chords"],
    melody: ["pentatonic scale", "blues scale phrases", "chromatic bebop lines"],
    key: ["C major", "F major", "Bb minor"],
    time_signature: ["4/4", "4/4", "5/4"],
};

const CLASSICAL: StylePalette = StylePalette {
    base_tempo: 90,
    rhythm: ["steady quarter notes", "dotted rhythms", "hemiola cross-rhythms"],
    harmony: ["tonic-dominant cadences", "diatonic progressions", "chromatic modulations"],
    melody: ["stepwise motion", "arpeggiated figures", "contrapuntal fugue subject"],
    key: ["C major", "G major", "D minor"],
    time_signature: ["4/4", "3/4", "7/8"],
};

const ELECTRONIC: StylePalette = StylePalette {
    base_tempo: 128,
    rhythm: ["four-on-the-floor", "broken beat", "glitch stutter"],
    harmony: ["single drone pad", "layered minor chords", "modulated synth clusters"],
    melody: ["repetitive arpeggio", "sequenced motifs", "granular textures"],
    key: ["A minor", "F minor", "C# minor"],
    time_signature: ["4/4", "4/4", "7/8"],
};

const ROCK: StylePalette = StylePalette {
    base_tempo: 140,
    rhythm: ["straight backbeat", "driving eighth notes", "dense double-time riffs"],
    harmony: ["power chords", "barre chord progressions", "modal riff harmony"],
    melody: ["simple riff", "pentatonic lead", "shredding solo runs"],
    key: ["E minor", "A minor", "C# minor"],
    time_signature: ["4/4", "4/4", "7/4"],
};

const AMBIENT: StylePalette = StylePalette {
    base_tempo: 70,
    rhythm: ["free-floating pulse", "slow evolving pulse", "layered polymetric swells"],
    harmony: ["open fifths", "suspended chords", "dense tone clusters"],
    melody: ["sustained tones", "sparse motifs", "overlapping generative loops"],
    key: ["D major", "B minor", "F# lydian"],
    time_signature: ["4/4", "6/8", "5/4"],
};

/// Palette owned by a style
pub fn palette(style: MusicStyle) -> &'static StylePalette {
    match style {
        MusicStyle::Jazz => &JAZZ,
        MusicStyle::Classical => &CLASSICAL,
        MusicStyle::Electronic => &ELECTRONIC,
        MusicStyle::Rock => &ROCK,
        MusicStyle::Ambient => &AMBIENT,
    }
}

/// Palette level (0..=2) for a score bucket under a complexity setting
pub fn palette_level(bucket: ScoreBucket, complexity: Complexity) -> usize {
    let index = bucket.index();
    match complexity {
        Complexity::Simple => index.saturating_sub(1),
        Complexity::Medium => index,
        Complexity::Complex => (index + 1).min(2),
    }
}

/// Rhythm tier implied by the loop count alone
pub fn loop_tier(loops: usize) -> usize {
    match loops {
        0 => 0,
        n if n <= DENSE_LOOP_THRESHOLD => 1,
        _ => 2,
    }
}

/// Pattern classifier
pub struct PatternClassifier;

impl PatternClassifier {
    /// Classify an analysis. Total over its inputs.
    ///
    /// `tempo` passes through when present and positive, otherwise the style's
    /// base tempo is used.
    pub fn classify(
        analysis: &CodeAnalysis,
        style: MusicStyle,
        complexity: Complexity,
        tempo: Option<i32>,
    ) -> MusicalPattern {
        let palette = palette(style);
        let bucket = ScoreBucket::from_score(analysis.complexity_score);
        let level = palette_level(bucket, complexity);
        let rhythm_level = level.max(loop_tier(analysis.loops));

        let tempo = match tempo {
            Some(bpm) if bpm > 0 => bpm as u32,
            _ => palette.base_tempo,
        };

        MusicalPattern {
            rhythm: palette.rhythm[rhythm_level].to_string(),
            harmony: palette.harmony[level].to_string(),
            melody: palette.melody[level].to_string(),
            structure: StructureArchetype::from_analysis(analysis).label().to_string(),
            tempo,
            key: palette.key[level].to_string(),
            time_signature: palette.time_signature[level].to_string(),
        }
    }
}
