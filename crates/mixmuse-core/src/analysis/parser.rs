//! Lexical source parser
//!
//! Language-agnostic preprocessing shared by the metrics extractor and the
//! naming suggester:
//! - comment removal (`//`, `#`, `/* */`)
//! - string literal contents removal (single, double, backtick and triple quoted)
//! - indentation and brace depth per line
//! - function definition sites across several syntax idioms
//!
//! The parser never fails. Unbalanced braces, unterminated comments or strings
//! simply degrade the per-line information.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Columns a tab advances the indentation by
const TAB_WIDTH: usize = 4;

/// Keyword-introduced definitions: `def f(`, `fn f`, `func (r T) f(`, `function f(`, `fun f`, `sub f`
static KEYWORD_DEFINITION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:def\s+([A-Za-z_][\w.?!]*)|fn\s+([A-Za-z_]\w*)|func\b\s*(?:\([^)]*\)\s*)?([A-Za-z_]\w*)?\s*\(|function\b\s*\*?\s*([A-Za-z_$][\w$]*)?\s*\(|fun\s+(?:<[^>]*>\s*)?([A-Za-z_]\w*)|sub\s+([A-Za-z_]\w*)\s*\{)",
    )
    .unwrap()
});

/// Arrow functions in expression position: `= (a) =>`, `(x =>`, `, async y =>`.
/// The bound form `const name = (a) =>` captures the name.
static ARROW_DEFINITION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:(?:\b([A-Za-z_$][\w$]*)\s*[:=]|[(,])\s*(?:async\s+)?|\basync\s+)(?:\([^()]*\)|[A-Za-z_$][\w$]*)\s*=>",
    )
    .unwrap()
});

/// Anonymous Python lambdas
static LAMBDA_DEFINITION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\blambda\b[^:]*:").unwrap());

/// Brace-bodied methods without a keyword: `public int sum(int a) {`, `render() {`
static BRACE_DEFINITION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:[\w:<>\[\]*&,.$]+\s+)*\*?&?([A-Za-z_$][\w$]*)\s*\([^;{}]*\)\s*(?:const\s*)?(?:throws\s+[\w.,\s]+?)?(?:->\s*[\w:<>\[\]&*, ]+)?\s*\{\s*$",
    )
    .unwrap()
});

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z_$][\w$]*").unwrap());

/// Key of a `key => value` pair in a hash or array literal
static PAIR_KEY: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^(?:\$?[A-Za-z_][\w$]*|""|'')$"#).unwrap());

/// Scalar value of a `key => value` pair
static PAIR_VALUE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^(?:-?\d[\w.]*|""|''|\$[A-Za-z_]\w*|true|false|null|nil|undef)$"#).unwrap()
});

/// Words that can never start or name a brace-bodied method
const NON_DEFINITION_WORDS: &[&str] = &[
    "if", "else", "for", "foreach", "while", "do", "switch", "match", "catch", "try", "return",
    "new", "throw", "await", "yield", "case", "with", "using", "lock", "synchronized", "elif",
    "when", "unless", "until", "loop", "sizeof", "typeof", "delete", "print", "println", "assert",
    "elseif", "elsif",
];

/// A single line of code after comments and string contents are removed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLine {
    /// Line number (1-based)
    pub number: usize,

    /// Leading whitespace width in columns
    pub indent: usize,

    /// Lowest brace depth reached on this line
    pub brace_depth: usize,

    /// Remaining code text, trimmed
    pub code: String,
}

/// How a function site was written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteKind {
    /// Named statement-level definition (`def f`, `fn f`, `void f() {`)
    Declaration,
    /// Function value inside an expression (lambdas, arrows, anonymous `function`)
    Expression,
}

/// A function-like definition site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionSite {
    /// Declared name, `None` for anonymous functions
    pub name: Option<String>,

    /// Line number (1-based)
    pub line: usize,

    pub kind: SiteKind,
}

impl FunctionSite {
    pub fn is_declaration(&self) -> bool {
        self.kind == SiteKind::Declaration
    }
}

/// Result of the lexical pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedSource {
    /// Newline-delimited lines in the raw input
    pub total_lines: usize,

    /// Lines that still carry code after stripping
    pub lines: Vec<SourceLine>,
}

impl ParsedSource {
    /// Function definition sites in source order
    pub fn function_sites(&self) -> Vec<FunctionSite> {
        self.lines.iter().flat_map(function_sites_in_line).collect()
    }

    /// Every identifier token left in code
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.lines
            .iter()
            .flat_map(|line| IDENTIFIER.find_iter(&line.code).map(|m| m.as_str()))
    }
}

/// Multi-line lexical state carried between lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Code,
    BlockComment,
    TripleString(char),
}

/// Lexical parser for arbitrary source text
pub struct SourceParser;

impl SourceParser {
    /// Strip comments and strings and annotate every code line
    pub fn parse(content: &str) -> ParsedSource {
        let mut state = ScanState::Code;
        let mut depth = 0usize;
        let mut lines = Vec::new();
        let mut total_lines = 0;

        for (index, raw) in content.lines().enumerate() {
            total_lines += 1;

            let (code, next_state) = strip_line(raw, state);
            state = next_state;

            let mut lowest = depth;
            for c in code.chars() {
                match c {
                    '{' => depth += 1,
                    '}' => {
                        depth = depth.saturating_sub(1);
                        lowest = lowest.min(depth);
                    }
                    _ => {}
                }
            }

            let trimmed = code.trim();
            if trimmed.is_empty() {
                continue;
            }

            lines.push(SourceLine {
                number: index + 1,
                indent: indent_width(raw),
                brace_depth: lowest,
                code: trimmed.to_string(),
            });
        }

        ParsedSource { total_lines, lines }
    }
}

fn indent_width(raw: &str) -> usize {
    raw.chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { TAB_WIDTH } else { 1 })
        .sum()
}

/// Remove comments and string contents from one line.
///
/// String delimiters are kept (`"if"` becomes `""`) so the line shape survives.
fn strip_line(raw: &str, mut state: ScanState) -> (String, ScanState) {
    let chars: Vec<char> = raw.chars().collect();
    let mut out = String::with_capacity(raw.len());
    let mut i = 0;

    while i < chars.len() {
        match state {
            ScanState::BlockComment => {
                if chars[i] == '*' && chars.get(i + 1) == Some(&'/') {
                    state = ScanState::Code;
                    out.push(' ');
                    i += 2;
                } else {
                    i += 1;
                }
            }
            ScanState::TripleString(quote) => {
                if is_triple(&chars, i, quote) {
                    state = ScanState::Code;
                    i += 3;
                } else {
                    i += 1;
                }
            }
            ScanState::Code => {
                let c = chars[i];
                let next = chars.get(i + 1).copied();

                if (c == '/' && next == Some('/')) || c == '#' {
                    break;
                }
                if c == '/' && next == Some('*') {
                    state = ScanState::BlockComment;
                    i += 2;
                    continue;
                }
                if (c == '"' || c == '\'') && is_triple(&chars, i, c) {
                    state = ScanState::TripleString(c);
                    out.push(c);
                    out.push(c);
                    i += 3;
                    continue;
                }
                if c == '"' || c == '\'' || c == '`' {
                    if let Some(end) = closing_quote(&chars, i + 1, c) {
                        out.push(c);
                        out.push(c);
                        i = end + 1;
                        continue;
                    }
                }

                out.push(c);
                i += 1;
            }
        }
    }

    (out, state)
}

fn is_triple(chars: &[char], i: usize, quote: char) -> bool {
    chars.get(i) == Some(&quote) && chars.get(i + 1) == Some(&quote) && chars.get(i + 2) == Some(&quote)
}

/// Index of the closing quote on the same line, honouring backslash escapes
fn closing_quote(chars: &[char], start: usize, quote: char) -> Option<usize> {
    let mut i = start;
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 2,
            c if c == quote => return Some(i),
            _ => i += 1,
        }
    }
    None
}

fn has_word(code: &str, word: &str) -> bool {
    code.split(|c: char| !c.is_alphanumeric() && c != '_').any(|w| w == word)
}

/// Definition sites on a single stripped line.
///
/// Keyword, arrow and lambda forms may appear several times per line; the
/// brace-bodied method form is only considered when none of them matched.
fn function_sites_in_line(line: &SourceLine) -> Vec<FunctionSite> {
    let code = line.code.as_str();
    let mut sites = Vec::new();

    for caps in KEYWORD_DEFINITION.captures_iter(code) {
        let name = (1..=6)
            .find_map(|group| caps.get(group))
            .map(|m| m.as_str().to_string());
        let kind = if name.is_some() {
            SiteKind::Declaration
        } else {
            SiteKind::Expression
        };
        sites.push(FunctionSite {
            name,
            line: line.number,
            kind,
        });
    }

    // `Some(x) => ...` match arms share the arrow token
    if !has_word(code, "match") {
        for caps in ARROW_DEFINITION.captures_iter(code) {
            let Some(whole) = caps.get(0) else { continue };
            if caps.get(1).is_none() && in_pair_list(code, whole.start()) {
                continue;
            }
            sites.push(FunctionSite {
                name: caps.get(1).map(|m| m.as_str().to_string()),
                line: line.number,
                kind: SiteKind::Expression,
            });
        }
    }

    for _ in LAMBDA_DEFINITION.find_iter(code) {
        sites.push(FunctionSite {
            name: None,
            line: line.number,
            kind: SiteKind::Expression,
        });
    }

    if sites.is_empty() {
        if let Some(caps) = BRACE_DEFINITION.captures(code) {
            let first_word = code.split(|c: char| !c.is_alphanumeric() && c != '_').next().unwrap_or("");
            let name = &caps[1];
            if !NON_DEFINITION_WORDS.contains(&first_word) && !NON_DEFINITION_WORDS.contains(&name) {
                sites.push(FunctionSite {
                    name: Some(name.to_string()),
                    line: line.number,
                    kind: SiteKind::Declaration,
                });
            }
        }
    }

    sites
}

/// Whether the arrow at `at` belongs to a `key => value` list such as
/// `(name => 1, age => 3)` or `array($k => $v)` rather than a function.
///
/// The list is the bracket group enclosing `at`. Every comma-separated entry
/// must be a pair, and a single pair only counts when its value is a scalar.
fn in_pair_list(code: &str, at: usize) -> bool {
    let bytes = code.as_bytes();

    let open = if matches!(bytes.get(at), Some(b'(')) {
        Some(at)
    } else {
        let mut depth = 0usize;
        let mut found = None;
        for i in (0..at).rev() {
            match bytes[i] {
                b')' | b']' => depth += 1,
                b'(' | b'[' if depth == 0 => {
                    found = Some(i);
                    break;
                }
                b'(' | b'[' => depth -= 1,
                _ => {}
            }
        }
        found
    };

    let start = open.map_or(0, |i| i + 1);
    let mut end = code.len();
    let mut depth = 0usize;
    for (i, b) in bytes.iter().enumerate().skip(start) {
        match b {
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' if depth == 0 => {
                end = i;
                break;
            }
            b')' | b']' | b'}' => depth -= 1,
            _ => {}
        }
    }

    let mut entries = Vec::new();
    let mut depth = 0usize;
    let mut from = start;
    for (i, b) in bytes.iter().enumerate().take(end).skip(start) {
        match b {
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => depth = depth.saturating_sub(1),
            b',' if depth == 0 => {
                entries.push(&code[from..i]);
                from = i + 1;
            }
            _ => {}
        }
    }
    entries.push(&code[from..end]);

    let pairs: Vec<(&str, &str)> = entries
        .iter()
        .map(|entry| entry.trim())
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| entry.split_once("=>"))
        .map(|(key, value)| (key.trim(), value.trim()))
        .collect();

    let entry_count = entries.iter().filter(|entry| !entry.trim().is_empty()).count();
    if pairs.is_empty() || pairs.len() != entry_count {
        return false;
    }
    if !pairs.iter().all(|(key, value)| PAIR_KEY.is_match(key) && !value.contains("=>")) {
        return false;
    }

    pairs.len() > 1 || pairs.iter().all(|(_, value)| PAIR_VALUE.is_match(value))
}
