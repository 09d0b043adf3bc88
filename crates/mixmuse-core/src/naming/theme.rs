//! Musical theme dictionary
//!
//! Generic procedural verbs and nouns mapped to music-themed synonyms. The
//! tables are the single source of truth for renames; bump [`THEME_VERSION`]
//! whenever an entry changes so recorded suggestions can be told apart.
//!
//! Themed verbs are never keys themselves, so a themed name is left alone on
//! a second pass.

/// Version of the theme tables
pub const THEME_VERSION: u32 = 1;

/// Leading verb -> musical verb
pub static VERB_THEMES: &[(&str, &str)] = &[
    ("process", "orchestrate"),
    ("handle", "conduct"),
    ("manage", "conduct"),
    ("calculate", "harmonize"),
    ("compute", "harmonize"),
    ("update", "harmonize"),
    ("modify", "harmonize"),
    ("set", "harmonize"),
    ("validate", "tune"),
    ("verify", "tune"),
    ("check", "tune"),
    ("get", "compose"),
    ("fetch", "compose"),
    ("load", "compose"),
    ("create", "compose"),
    ("build", "compose"),
    ("make", "compose"),
    ("generate", "compose"),
    ("save", "arrange"),
    ("store", "arrange"),
    ("write", "arrange"),
    ("sort", "arrange"),
    ("organize", "arrange"),
    ("delete", "resolve"),
    ("remove", "resolve"),
    ("clear", "resolve"),
    ("run", "perform"),
    ("execute", "perform"),
    ("render", "perform"),
    ("display", "perform"),
    ("show", "perform"),
    ("print", "perform"),
    ("init", "rehearse"),
    ("initialize", "rehearse"),
    ("setup", "rehearse"),
    ("prepare", "rehearse"),
    ("parse", "transcribe"),
    ("read", "transcribe"),
    ("convert", "transpose"),
    ("transform", "transpose"),
    ("map", "transpose"),
    ("split", "arpeggiate"),
    ("merge", "blend"),
    ("combine", "blend"),
    ("join", "blend"),
    ("filter", "mute"),
    ("stop", "fade"),
    ("close", "fade"),
    ("finish", "fade"),
    ("reset", "retune"),
    ("test", "audition"),
    ("log", "record"),
    ("send", "cue"),
    ("notify", "cue"),
    ("start", "strike"),
    ("begin", "strike"),
    ("iterate", "vamp"),
    ("repeat", "vamp"),
];

/// Trailing noun -> themed noun, applied only once a verb matched
pub static NOUN_THEMES: &[(&str, &str)] = &[
    ("sum", "values"),
    ("input", "parameters"),
    ("inputs", "parameters"),
    ("args", "parameters"),
    ("queue", "playlist"),
    ("timer", "metronome"),
];

/// Musical synonym for a lowercase verb
pub fn themed_verb(word: &str) -> Option<&'static str> {
    lookup(VERB_THEMES, word)
}

/// Themed replacement for a lowercase noun
pub fn themed_noun(word: &str) -> Option<&'static str> {
    lookup(NOUN_THEMES, word)
}

/// Whether a lowercase word is one of the themed verbs
pub fn is_musical_verb(word: &str) -> bool {
    VERB_THEMES.iter().any(|(_, themed)| *themed == word)
}

fn lookup(table: &'static [(&'static str, &'static str)], word: &str) -> Option<&'static str> {
    table.iter().find(|(generic, _)| *generic == word).map(|(_, themed)| *themed)
}
