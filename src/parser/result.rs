use super::Input;
use serde::Serialize;
use std::fmt::{self, Write};
use thiserror::Error;

/// A node of an accepted parse
///
/// `begin` and `end` are character positions into the recognizer's input,
/// `end` exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    /// Name of the grammar rule that produced this node
    pub rule: &'static str,
    pub begin: usize,
    pub end: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(rule: &'static str, begin: usize, end: usize) -> Self {
        Self {
            rule,
            begin,
            end,
            children: Vec::new(),
        }
    }

    pub fn with_children(rule: &'static str, begin: usize, end: usize, children: Vec<Node>) -> Self {
        Self {
            rule,
            begin,
            end,
            children,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// Total number of nodes in this subtree, including itself
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Node::node_count).sum::<usize>()
    }

    /// Pre-order walk over the subtree
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Node)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }

    /// All nodes produced by `rule`, in pre-order
    pub fn find_all(&self, rule: &str) -> Vec<&Node> {
        let mut found = Vec::new();
        self.walk(&mut |node| {
            if node.rule == rule {
                found.push(node);
            }
        });
        found
    }

    /// Indented rendering, one node per line with its quoted text
    pub fn pretty(&self, input: &Input) -> String {
        let mut out = String::new();
        self.pretty_into(input, 0, &mut out);
        out
    }

    fn pretty_into(&self, input: &Input, depth: usize, out: &mut String) {
        let _ = writeln!(
            out,
            "{:indent$}{} {:?}",
            "",
            self.rule,
            input.slice(self.begin, self.end),
            indent = depth * 2
        );
        for child in &self.children {
            child.pretty_into(input, depth + 1, out);
        }
    }
}

/// Why a recognizer declined its input
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseError {
    #[error("{line}:{column}: expected {expected} in {rule}")]
    Syntax {
        rule: &'static str,
        position: usize,
        line: usize,
        column: usize,
        expected: String,
    },

    #[error("no start rule with index {index} ({count} rules)")]
    UnknownRule { index: usize, count: usize },

    #[error("accepted without producing a syntax tree")]
    MissingTree,
}

/// A grammar that accepted the input
#[derive(Debug, Clone, Serialize)]
pub struct Match {
    pub grammar: String,
    pub tree: Node,
}

/// A grammar that declined the input, with its diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    pub grammar: String,
    pub error: ParseError,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.grammar, self.error)
    }
}

/// Result of trying a single grammar
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Accepted(Match),
    Rejected(Rejection),
}

impl ParseOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ParseOutcome::Accepted(_))
    }

    pub fn grammar(&self) -> &str {
        match self {
            ParseOutcome::Accepted(m) => &m.grammar,
            ParseOutcome::Rejected(r) => &r.grammar,
        }
    }
}
