//! Per-function cyclomatic complexity.
//!
//! The aggregators only depend on [`FunctionAnalyzer`]; the default
//! implementation parses with tree-sitter and walks each function body
//! counting decision points.

use crate::types::metrics::{ComplexityDistribution, ComplexityStats};
use std::path::Path;
use tracing::debug;
use tree_sitter::{Language, Node, Parser};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionComplexity {
    pub complexity: u32,
    /// Lines spanned by the function, inclusive.
    pub length: u32,
}

/// Produces one entry per function found in a file, or nothing when the file
/// cannot be analyzed. Implementations must not fail.
pub trait FunctionAnalyzer {
    fn analyze(&self, path: &Path, source: &str) -> Vec<FunctionComplexity>;
}

/// Summarize per-function results into file-level stats.
pub fn summarize(functions: &[FunctionComplexity]) -> ComplexityStats {
    if functions.is_empty() {
        return ComplexityStats::default();
    }

    let mut distribution = ComplexityDistribution::default();
    for function in functions {
        distribution.record(function.complexity);
    }

    let count = functions.len() as f64;
    let complexity_sum: u64 = functions.iter().map(|f| u64::from(f.complexity)).sum();
    let length_sum: u64 = functions.iter().map(|f| u64::from(f.length)).sum();

    ComplexityStats {
        functions: functions.len(),
        avg_complexity: complexity_sum as f64 / count,
        max_complexity: functions.iter().map(|f| f.complexity).max().unwrap_or(0),
        avg_function_length: length_sum as f64 / count,
        distribution,
    }
}

/// Grammar tables for one language.
struct Grammar {
    language: Language,
    functions: &'static [&'static str],
    branches: &'static [&'static str],
}

const PYTHON_FUNCTIONS: &[&str] = &["function_definition"];
const PYTHON_BRANCHES: &[&str] = &[
    "if_statement",
    "elif_clause",
    "while_statement",
    "for_statement",
    "except_clause",
    "boolean_operator",
    "conditional_expression",
    "if_clause",
    "case_clause",
];

const JS_FUNCTIONS: &[&str] = &[
    "function_declaration",
    "function_expression",
    "generator_function_declaration",
    "arrow_function",
    "method_definition",
];
const JS_BRANCHES: &[&str] = &[
    "if_statement",
    "while_statement",
    "for_statement",
    "for_in_statement",
    "do_statement",
    "switch_case",
    "catch_clause",
    "ternary_expression",
];

const RUST_FUNCTIONS: &[&str] = &["function_item"];
const RUST_BRANCHES: &[&str] = &[
    "if_expression",
    "while_expression",
    "for_expression",
    "loop_expression",
    "match_arm",
];

const GO_FUNCTIONS: &[&str] = &["function_declaration", "method_declaration", "func_literal"];
const GO_BRANCHES: &[&str] = &[
    "if_statement",
    "for_statement",
    "expression_case",
    "type_case",
    "communication_case",
];

const JAVA_FUNCTIONS: &[&str] = &["method_declaration", "constructor_declaration"];
const JAVA_BRANCHES: &[&str] = &[
    "if_statement",
    "while_statement",
    "for_statement",
    "enhanced_for_statement",
    "do_statement",
    "catch_clause",
    "switch_label",
    "ternary_expression",
];

const C_FUNCTIONS: &[&str] = &["function_definition"];
const C_BRANCHES: &[&str] = &[
    "if_statement",
    "while_statement",
    "for_statement",
    "do_statement",
    "case_statement",
    "conditional_expression",
];
const CPP_BRANCHES: &[&str] = &[
    "if_statement",
    "while_statement",
    "for_statement",
    "for_range_loop",
    "do_statement",
    "case_statement",
    "catch_clause",
    "conditional_expression",
];

const CSHARP_FUNCTIONS: &[&str] = &[
    "method_declaration",
    "constructor_declaration",
    "local_function_statement",
];
const CSHARP_BRANCHES: &[&str] = &[
    "if_statement",
    "while_statement",
    "for_statement",
    "foreach_statement",
    "do_statement",
    "catch_clause",
    "switch_section",
    "conditional_expression",
];

fn grammar_for(path: &Path) -> Option<Grammar> {
    let extension = path.extension()?.to_str()?;
    let grammar = match extension {
        "py" => Grammar {
            language: tree_sitter_python::LANGUAGE.into(),
            functions: PYTHON_FUNCTIONS,
            branches: PYTHON_BRANCHES,
        },
        "js" | "jsx" | "mjs" | "cjs" => Grammar {
            language: tree_sitter_javascript::LANGUAGE.into(),
            functions: JS_FUNCTIONS,
            branches: JS_BRANCHES,
        },
        "ts" => Grammar {
            language: tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            functions: JS_FUNCTIONS,
            branches: JS_BRANCHES,
        },
        "tsx" => Grammar {
            language: tree_sitter_typescript::LANGUAGE_TSX.into(),
            functions: JS_FUNCTIONS,
            branches: JS_BRANCHES,
        },
        "rs" => Grammar {
            language: tree_sitter_rust::LANGUAGE.into(),
            functions: RUST_FUNCTIONS,
            branches: RUST_BRANCHES,
        },
        "go" => Grammar {
            language: tree_sitter_go::LANGUAGE.into(),
            functions: GO_FUNCTIONS,
            branches: GO_BRANCHES,
        },
        "java" => Grammar {
            language: tree_sitter_java::LANGUAGE.into(),
            functions: JAVA_FUNCTIONS,
            branches: JAVA_BRANCHES,
        },
        "c" | "h" => Grammar {
            language: tree_sitter_c::LANGUAGE.into(),
            functions: C_FUNCTIONS,
            branches: C_BRANCHES,
        },
        "cpp" | "cc" | "cxx" | "hpp" => Grammar {
            language: tree_sitter_cpp::LANGUAGE.into(),
            functions: C_FUNCTIONS,
            branches: CPP_BRANCHES,
        },
        "cs" => Grammar {
            language: tree_sitter_c_sharp::LANGUAGE.into(),
            functions: CSHARP_FUNCTIONS,
            branches: CSHARP_BRANCHES,
        },
        _ => return None,
    };
    Some(grammar)
}

/// tree-sitter backed analyzer for Python, JavaScript, TypeScript, Rust, Go,
/// Java, C, C++ and C#. Other extensions report no functions.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeSitterAnalyzer;

impl FunctionAnalyzer for TreeSitterAnalyzer {
    fn analyze(&self, path: &Path, source: &str) -> Vec<FunctionComplexity> {
        let Some(grammar) = grammar_for(path) else {
            return Vec::new();
        };

        let mut parser = Parser::new();
        if let Err(err) = parser.set_language(&grammar.language) {
            debug!(path = %path.display(), error = %err, "grammar rejected");
            return Vec::new();
        }
        let Some(tree) = parser.parse(source, None) else {
            debug!(path = %path.display(), "parse produced no tree");
            return Vec::new();
        };

        collect_functions(tree.root_node(), &grammar)
    }
}

/// Pre-order walk over the whole tree with an explicit stack, so deeply
/// nested expressions cannot exhaust the thread stack.
fn collect_functions(root: Node, grammar: &Grammar) -> Vec<FunctionComplexity> {
    let mut out = Vec::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if grammar.functions.contains(&node.kind()) {
            let length = node.end_position().row - node.start_position().row + 1;
            out.push(FunctionComplexity {
                complexity: 1 + count_decisions(node, grammar),
                length: length as u32,
            });
        }
        push_children(node, &mut stack);
    }
    out
}

/// Count decision points below `function`, stopping at nested functions (they are scored on their own).
fn count_decisions(function: Node, grammar: &Grammar) -> u32 {
    let mut complexity = 0;
    let mut stack = Vec::new();
    push_children(function, &mut stack);
    while let Some(node) = stack.pop() {
        let kind = node.kind();
        if grammar.functions.contains(&kind) {
            continue;
        }
        if grammar.branches.contains(&kind) || is_short_circuit(&node) {
            complexity += 1;
        }
        push_children(node, &mut stack);
    }
    complexity
}

/// Children are pushed last-first so they pop in source order.
fn push_children<'tree>(node: Node<'tree>, stack: &mut Vec<Node<'tree>>) {
    let mut cursor = node.walk();
    let children: Vec<Node<'tree>> = node.children(&mut cursor).collect();
    stack.extend(children.into_iter().rev());
}

fn is_short_circuit(node: &Node) -> bool {
    if node.kind() != "binary_expression" {
        return false;
    }
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|child| matches!(child.kind(), "&&" | "||"));
    found
}
