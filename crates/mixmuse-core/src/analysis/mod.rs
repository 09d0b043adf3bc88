//! Code Analysis and Musical Classification
//!
//! This module provides the analysis half of the engine:
//! - Lexical parsing of arbitrary source text
//! - Metrics extraction (lines, functions, loops, complexity score)
//! - Musical pattern classification
//! - Improvement advice

pub mod advice;
pub mod classifier;
pub mod metrics;
pub mod parser;

// Re-export main types
pub use classifier::{PatternClassifier, ScoreBucket, StructureArchetype, StylePalette};
pub use metrics::{CodeMetrics, MetricsExtractor};
pub use parser::{FunctionSite, ParsedSource, SiteKind, SourceLine, SourceParser};
