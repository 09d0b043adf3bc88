//! Code Metrics Extraction
//!
//! Turns raw source text into a [`CodeAnalysis`] record:
//! - line count (newline-delimited, empty input has zero lines)
//! - function-like definition sites
//! - iteration constructs
//! - a bounded complexity score
//!
//! # Complexity score
//!
//! ```text
//! nesting     = max over code lines of max(brace depth, indentation level)
//! decisions   = branch keywords + loop constructs + logical operators
//! body_lines  = code lines / max(declared functions, 1)
//!
//! raw   = 0.4 * min(nesting, 4) / 4
//!       + 0.4 * min(decisions, 10) / 10
//!       + 0.2 * min(body_lines, 40) / 40
//! score = round(raw * 100) / 100
//! ```
//!
//! Only named statement-level definitions divide the body size. Lambdas and
//! arrow functions still count towards `functions`, but a branch whose
//! condition holds one adds code lines without adding a declaration. Each term
//! is non-decreasing in its input, so adding a branch or a nesting level never
//! lowers the score. The pattern classifier's bucket thresholds are defined
//! against this exact formula.

use crate::analysis::parser::{ParsedSource, SourceLine, SourceParser};
use mixmuse_shared::CodeAnalysis;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Weight of the nesting term
pub const NESTING_WEIGHT: f64 = 0.4;
/// Weight of the decision term
pub const DECISION_WEIGHT: f64 = 0.4;
/// Weight of the body size term
pub const SIZE_WEIGHT: f64 = 0.2;

/// Nesting level at which the nesting term saturates
pub const NESTING_CAP: usize = 4;
/// Decision count at which the decision term saturates
pub const DECISION_CAP: usize = 10;
/// Code lines per function at which the size term saturates
pub const BODY_LINES_CAP: f64 = 40.0;

static BRANCH_KEYWORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[^\w.$])(?:if|elif|elsif|elseif|case|catch|except|when|unless|guard|match)\b").unwrap()
});

static LOOP_KEYWORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|[^\w.$])(for|foreach|while|until)\b").unwrap());

static LOOP_BLOCK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:^|[^\w.$])loop\s*\{").unwrap());

static LOOP_METHOD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.(?:forEach|for_each|each)\b").unwrap());

static LOGICAL_OPERATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"&&|\|\||\band\b|\bor\b").unwrap());

/// Detailed metrics behind a [`CodeAnalysis`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeMetrics {
    /// The public analysis record
    pub analysis: CodeAnalysis,

    /// Lines carrying code after comments and strings are removed
    pub code_lines: usize,

    /// Deepest brace or indentation level
    pub nesting: usize,

    /// Branches, loops and logical operators
    pub decisions: usize,
}

/// Metrics extractor
pub struct MetricsExtractor;

impl MetricsExtractor {
    /// Extract the analysis record for a snippet. Never fails.
    pub fn extract(content: &str) -> CodeAnalysis {
        Self::measure(content).analysis
    }

    /// Extract the analysis record along with its intermediate counts
    pub fn measure(content: &str) -> CodeMetrics {
        let parsed = SourceParser::parse(content);
        Self::measure_parsed(&parsed)
    }

    /// Measure an already parsed source
    pub fn measure_parsed(parsed: &ParsedSource) -> CodeMetrics {
        let sites = parsed.function_sites();
        let functions = sites.len();
        let declarations = sites.iter().filter(|site| site.is_declaration()).count();
        let loops: usize = parsed.lines.iter().map(count_loops).sum();
        let branches: usize = parsed.lines.iter().map(count_branches).sum();
        let nesting = max_nesting(&parsed.lines);
        let code_lines = parsed.lines.len();
        let decisions = branches + loops;
        let body_lines = code_lines as f64 / declarations.max(1) as f64;

        CodeMetrics {
            analysis: CodeAnalysis {
                lines: parsed.total_lines,
                functions,
                loops,
                complexity_score: complexity_score(nesting, decisions, body_lines),
            },
            code_lines,
            nesting,
            decisions,
        }
    }
}

/// Combine the three terms into a score in [0, 1], rounded to two decimals
pub fn complexity_score(nesting: usize, decisions: usize, body_lines: f64) -> f64 {
    let nesting_term = nesting.min(NESTING_CAP) as f64 / NESTING_CAP as f64;
    let decision_term = decisions.min(DECISION_CAP) as f64 / DECISION_CAP as f64;
    let size_term = if body_lines.is_finite() {
        body_lines.clamp(0.0, BODY_LINES_CAP) / BODY_LINES_CAP
    } else {
        0.0
    };

    let raw = NESTING_WEIGHT * nesting_term + DECISION_WEIGHT * decision_term + SIZE_WEIGHT * size_term;
    ((raw * 100.0).round() / 100.0).clamp(0.0, 1.0)
}

fn count_loops(line: &SourceLine) -> usize {
    let code = line.code.as_str();
    let implements_trait = code.split(|c: char| !c.is_alphanumeric() && c != '_').any(|w| w == "impl");

    // `impl Trait for Type` is not iteration
    let keyword_loops = LOOP_KEYWORD
        .captures_iter(code)
        .filter(|caps| !(implements_trait && &caps[1] == "for"))
        .count();

    keyword_loops + LOOP_BLOCK.find_iter(code).count() + LOOP_METHOD.find_iter(code).count()
}

fn count_branches(line: &SourceLine) -> usize {
    let code = line.code.as_str();
    BRANCH_KEYWORD.find_iter(code).count() + LOGICAL_OPERATOR.find_iter(code).count()
}

/// Deepest level reached by braces or by the indentation stack
fn max_nesting(lines: &[SourceLine]) -> usize {
    let mut stack = vec![0usize];
    let mut deepest = 0;

    for line in lines {
        while stack.len() > 1 && line.indent < stack[stack.len() - 1] {
            stack.pop();
        }
        if line.indent > stack[stack.len() - 1] {
            stack.push(line.indent);
        }

        let indent_level = stack.len() - 1;
        deepest = deepest.max(indent_level).max(line.brace_depth);
    }

    deepest
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_input() {
        let analysis = MetricsExtractor::extract("");
        assert_eq!(analysis, CodeAnalysis::default());
        assert_eq!(analysis.complexity_score, 0.0);
    }

    #[test]
    fn test_whitespace_only_input() {
        let analysis = MetricsExtractor::extract("\n   \n\t\n");
        assert_eq!(analysis.lines, 3);
        assert_eq!(analysis.functions, 0);
        assert_eq!(analysis.complexity_score, 0.0);
    }

    #[test]
    fn test_python_stub_function() {
        let metrics = MetricsExtractor::measure("def process_data():\n    ...\n");
        assert_eq!(metrics.analysis.lines, 2);
        assert_eq!(metrics.analysis.functions, 1);
        assert_eq!(metrics.analysis.loops, 0);
        assert_eq!(metrics.nesting, 1);
        assert_eq!(metrics.decisions, 0);
        // 0.4 * 1/4 + 0.2 * 2/40
        assert_eq!(metrics.analysis.complexity_score, 0.11);
    }

    #[test]
    fn test_nested_python_loops() {
        let code = r#"
def process_data(data):
    result = []
    for item in data:
        if item.type == 'user':
            for subitem in item.items:
                if subitem.active:
                    result.append(subitem.value)
    return result
"#;
        let metrics = MetricsExtractor::measure(code);
        assert_eq!(metrics.analysis.functions, 1);
        assert_eq!(metrics.analysis.loops, 2);
        assert_eq!(metrics.nesting, 5);
        assert_eq!(metrics.decisions, 4);
        // 0.4 * 1 + 0.4 * 0.4 + 0.2 * 8/40
        assert_eq!(metrics.analysis.complexity_score, 0.6);
    }

    #[test]
    fn test_javascript_function() {
        let code = r#"
function calculateTotal(items) {
    let total = 0;
    for (let item of items) {
        total += item.price;
    }
    return total;
}
"#;
        let analysis = MetricsExtractor::extract(code);
        assert_eq!(analysis.lines, 8);
        assert_eq!(analysis.functions, 1);
        assert_eq!(analysis.loops, 1);
    }

    #[test]
    fn test_python_class_methods() {
        let code = r#"
class UserManager:
    def __init__(self):
        self.users = []

    def add_user(self, user):
        self.users.append(user)

    def get_user(self, user_id):
        for user in self.users:
            if user.id == user_id:
                return user
        return None
"#;
        let analysis = MetricsExtractor::extract(code);
        assert_eq!(analysis.functions, 3);
        assert_eq!(analysis.loops, 1);
    }

    #[test]
    fn test_rust_loops_and_impl_for() {
        let code = r#"
impl Display for Track {
    fn fmt(&self, f: &mut Formatter) -> Result {
        loop {
            break;
        }
        while let Some(x) = it.next() {}
        items.iter().for_each(|i| drop(i));
        Ok(())
    }
}
"#;
        let analysis = MetricsExtractor::extract(code);
        assert_eq!(analysis.functions, 1);
        assert_eq!(analysis.loops, 3);
    }

    #[test]
    fn test_keywords_in_comments_and_strings_ignored() {
        let code = "# for while if\nx = \"for item in items\"\n// while(true)\n";
        let metrics = MetricsExtractor::measure(code);
        assert_eq!(metrics.analysis.loops, 0);
        assert_eq!(metrics.decisions, 0);
    }

    #[test]
    fn test_identifiers_containing_keywords_ignored() {
        let metrics = MetricsExtractor::measure("format = 1\nwhile_count = iffy + before\n");
        assert_eq!(metrics.analysis.loops, 0);
        assert_eq!(metrics.decisions, 0);
    }

    #[test]
    fn test_malformed_input_degrades() {
        let code = "}}} def ( { for for \"unterminated\n/* never closed\nwhile";
        let analysis = MetricsExtractor::extract(code);
        assert_eq!(analysis.lines, 3);
        assert!(analysis.complexity_score >= 0.0 && analysis.complexity_score <= 1.0);
    }

    #[test]
    fn test_score_saturates_at_one() {
        assert_eq!(complexity_score(100, 100, 1000.0), 1.0);
        assert_eq!(complexity_score(0, 0, 0.0), 0.0);
        assert_eq!(complexity_score(0, 0, f64::NAN), 0.0);
    }

    #[test]
    fn test_score_monotonic_in_each_term() {
        for n in 0..8 {
            for d in 0..15 {
                let base = complexity_score(n, d, 10.0);
                assert!(complexity_score(n + 1, d, 10.0) >= base);
                assert!(complexity_score(n, d + 1, 10.0) >= base);
                assert!(complexity_score(n, d, 11.0) >= base);
            }
        }
    }

    /// Python body with every term of the score already saturated
    fn saturated_python() -> String {
        let mut code = String::from("def f(xs):\n");
        for i in 0..40 {
            code.push_str(&format!("    y{i} = xs\n"));
        }
        for depth in 1..=5 {
            code.push_str(&format!("{}if a{depth} or b{depth}:\n", "    ".repeat(depth)));
        }
        code.push_str(&format!("{}return xs\n", "    ".repeat(6)));
        code
    }

    #[test]
    fn test_lambda_in_branch_condition_keeps_score() {
        let base = saturated_python();
        let nested = format!("{base}    if any(map(lambda v: v, xs)):\n        pass\n");

        let before = MetricsExtractor::measure(&base);
        let after = MetricsExtractor::measure(&nested);
        assert_eq!(before.analysis.complexity_score, 1.0);
        assert_eq!(after.analysis.functions, 2);
        assert_eq!(after.analysis.complexity_score, 1.0);
    }

    #[test]
    fn test_arrow_in_branch_condition_keeps_score() {
        let base = "function f(xs) {\n    let y = 0;\n    return y;\n}\n";
        let nested = "function f(xs) {\n    let y = 0;\n    if (xs.some(x => x > 1)) {\n        y = 1;\n    }\n    return y;\n}\n";
        assert!(MetricsExtractor::extract(nested).complexity_score > MetricsExtractor::extract(base).complexity_score);
    }

    #[test]
    fn test_php_elseif_branch() {
        let mut base = String::from("function f($k) {\n");
        for i in 0..40 {
            base.push_str(&format!("    $y{i} = 1;\n"));
        }
        for depth in 1..=5 {
            base.push_str(&format!("{}if ($a{depth} && $b{depth}) {{\n", "    ".repeat(depth)));
        }
        for depth in (1..=5).rev() {
            base.push_str(&format!("{}}}\n", "    ".repeat(depth)));
        }
        let nested = format!("{base}    if ($j) {{\n        x();\n    }}\n    elseif ($k) {{\n        y();\n    }}\n}}\n");
        base.push_str("}\n");

        let before = MetricsExtractor::measure(&base);
        let after = MetricsExtractor::measure(&nested);
        assert_eq!(before.analysis.complexity_score, 1.0);
        assert_eq!(after.analysis.functions, 1);
        assert_eq!(after.decisions, before.decisions + 2);
        assert_eq!(after.analysis.complexity_score, 1.0);
    }

    #[test]
    fn test_added_nested_branch_never_lowers_score() {
        let base = "def f(x):\n    y = x\n    return y\n";
        let nested = "def f(x):\n    y = x\n    if x:\n        y = 2\n    return y\n";
        assert!(MetricsExtractor::extract(nested).complexity_score > MetricsExtractor::extract(base).complexity_score);
    }
}
