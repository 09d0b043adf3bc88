//! Property tests for the analysis and naming operations

use mixmuse_core::naming::DELIMITER;
use mixmuse_core::{Complexity, MusicStyle, classify, extract, suggest_names};
use proptest::prelude::*;

fn style() -> impl Strategy<Value = MusicStyle> {
    prop::sample::select(MusicStyle::ALL.to_vec())
}

fn complexity() -> impl Strategy<Value = Complexity> {
    prop::sample::select(Complexity::ALL.to_vec())
}

/// Code-like text: a mix of keywords, punctuation and identifiers
fn code_like() -> impl Strategy<Value = String> {
    let token = prop::sample::select(vec![
        "def f():", "fn g() {", "}", "{", "if x:", "for i in xs:", "while (a && b) {", "    ", "\t", "\n",
        "# note", "// note", "/*", "*/", "\"", "'''", "return x", "x = 1", "lambda y: y", "=>", "elif", "or",
        "process_data", "getUser", "loop {", ".forEach(", "match v {",
    ]);
    prop::collection::vec(token, 0..40).prop_map(|parts| parts.concat())
}

/// Python function with plain statements, optionally followed by a chain of
/// nested branches that saturates nesting and decisions
fn python_block(statements: usize, saturated: bool) -> String {
    let mut code = String::from("def f(x):\n");
    for i in 0..statements {
        code.push_str(&format!("    y{i} = x\n"));
    }
    if saturated {
        for depth in 1..=5 {
            code.push_str(&format!("{}if a{depth} or b{depth}:\n", "    ".repeat(depth)));
        }
        code.push_str(&format!("{}return x\n", "    ".repeat(6)));
    }
    code
}

/// Brace-language function, same shape as [`python_block`]
fn brace_block(statements: usize, saturated: bool) -> String {
    let mut code = String::from("function f(x) {\n");
    for i in 0..statements {
        code.push_str(&format!("    y{i} = x;\n"));
    }
    if saturated {
        for depth in 1..=5 {
            code.push_str(&format!("{}if (a{depth} && b{depth}) {{\n", "    ".repeat(depth)));
        }
        for depth in (1..=5).rev() {
            code.push_str(&format!("{}}}\n", "    ".repeat(depth)));
        }
    }
    code.push_str("}\n");
    code
}

const PYTHON_BRANCHES: &[&str] = &[
    "    if x:\n        y = 2",
    "    if x:\n        y = 1\n    elif z:\n        y = 2",
    "    if any(map(lambda v: v, xs)):\n        y = 2",
    "    if x and (lambda: x)():\n        y = 2",
];

const BRACE_BRANCHES: &[&str] = &[
    "    if (x) {\n        y = 2;\n    }",
    "    if (x) {\n        y = 1;\n    }\n    elseif (z) {\n        y = 2;\n    }",
    "    if (x) {\n        y = 1;\n    }\n    elsif (z) {\n        y = 2;\n    }",
    "    if (x) {\n        y = 1;\n    } else if (z) {\n        y = 2;\n    }",
    "    if (xs.some(v => v > 1)) {\n        y = 2;\n    }",
    "    if (xs.filter((v) => v).length) {\n        y = 2;\n    }",
    "    if (xs.map(function(v) { return v; })) {\n        y = 2;\n    }",
];

/// Insert `branch` before statement line `at` of a block built above
fn with_branch(base: &str, statements: usize, at: usize, branch: &str) -> String {
    let mut lines: Vec<&str> = base.lines().collect();
    lines.insert(1 + at % statements, branch);
    lines.join("\n") + "\n"
}

proptest! {
    #[test]
    fn prop_classification_is_deterministic(
        code in code_like(),
        style in style(),
        complexity in complexity(),
        tempo in prop::option::of(-10i32..400),
    ) {
        let first = classify(&extract(&code), style, complexity, tempo);
        let second = classify(&extract(&code), style, complexity, tempo);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_score_in_closed_range(code in any::<String>()) {
        let score = extract(&code).complexity_score;
        prop_assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn prop_code_like_score_in_closed_range(code in code_like()) {
        let score = extract(&code).complexity_score;
        prop_assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn prop_added_python_branch_never_lowers_score(
        statements in 1usize..60,
        at in 0usize..60,
        saturated in any::<bool>(),
        branch in prop::sample::select(PYTHON_BRANCHES.to_vec()),
    ) {
        let base = python_block(statements, saturated);
        let nested = with_branch(&base, statements, at, branch);

        prop_assert!(extract(&nested).complexity_score >= extract(&base).complexity_score);
    }

    #[test]
    fn prop_added_brace_branch_never_lowers_score(
        statements in 1usize..60,
        at in 0usize..60,
        saturated in any::<bool>(),
        branch in prop::sample::select(BRACE_BRANCHES.to_vec()),
    ) {
        let base = brace_block(statements, saturated);
        let nested = with_branch(&base, statements, at, branch);

        prop_assert!(extract(&nested).complexity_score >= extract(&base).complexity_score);
    }

    #[test]
    fn prop_positive_tempo_passes_through(bpm in 1i32..1000, style in style(), complexity in complexity()) {
        let pattern = classify(&extract("x = 1\n"), style, complexity, Some(bpm));
        prop_assert_eq!(pattern.tempo, bpm as u32);
    }

    #[test]
    fn prop_naming_lines_have_one_delimiter(
        code in code_like(),
        symbols in prop::collection::vec("[a-zA-Z_][a-zA-Z0-9_]{0,12}", 0..8),
    ) {
        let out = suggest_names(&code, &symbols).suggestions;
        prop_assert!(!out.ends_with('\n'));
        for line in out.lines().filter(|line| !line.is_empty()) {
            prop_assert_eq!(line.matches(DELIMITER).count(), 1);
        }
    }

    #[test]
    fn prop_suggestions_only_for_generic_verbs(name in "(process|get|save|check)_[a-z]{1,8}") {
        let code = format!("def {name}():\n    pass\n");
        let out = suggest_names(&code, &[name.as_str()]).suggestions;
        let expected_prefix = format!("{name}{DELIMITER}");
        prop_assert!(out.starts_with(&expected_prefix));
    }
}
