//! Built-in grammar recognizers
//!
//! Each grammar is a zero-sized type implementing [`Grammar`]; the
//! [`GrammarParser`] wrapper turns it into a [`Recognizer`] bound to one
//! input buffer. Adding a grammar means writing its rules and registering it
//! in [`register_defaults`].

mod colon;
mod crontab;
mod fstab;
mod peg;
mod procfs;
mod scan;

#[cfg(test)]
mod tests;

pub use colon::{Group, Gshadow, Passwd, Shadow};
pub use crontab::Crontab;
pub use fstab::Fstab;
pub use peg::Peg;
pub use procfs::{Diskstats, Maps};
pub use scan::{is_blank, records, single_record, Scanner};

use crate::error::GrammarError;
use crate::extent::ExtentMask;
use crate::parser::{Actions, GrammarRegistry, Input, Node, ParseError, Recognizer};
use std::marker::PhantomData;

/// Static description of a grammar: its name, rules and semantic actions
pub trait Grammar: 'static {
    const NAME: &'static str;
    const DESCRIPTION: &'static str;

    /// Start rules; index 0 parses a whole file
    const RULES: &'static [&'static str];

    /// Whether [`Grammar::execute`] does anything
    const HAS_ACTIONS: bool = false;

    /// Parse the entire input from the rule at `rule`
    ///
    /// `rule` is always a valid index into [`Grammar::RULES`].
    fn parse(s: &mut Scanner<'_>, rule: usize) -> Result<Node, ParseError>;

    /// Semantic actions over an accepted tree
    fn execute(_tree: &Node, _input: &Input, _mask: &mut ExtentMask) -> Result<(), GrammarError> {
        Ok(())
    }
}

/// Recognizer for grammar `G` over one input buffer
pub struct GrammarParser<G> {
    input: Input,
    tree: Option<Node>,
    grammar: PhantomData<G>,
}

impl<G: Grammar> GrammarParser<G> {
    pub fn new(input: &str) -> Self {
        Self {
            input: Input::new(input),
            tree: None,
            grammar: PhantomData,
        }
    }

    /// Constructor suitable for [`GrammarRegistry::register`]
    pub fn boxed(input: &str) -> Box<dyn Recognizer> {
        Box::new(Self::new(input))
    }
}

impl<G: Grammar> Recognizer for GrammarParser<G> {
    fn rules(&self) -> &'static [&'static str] {
        G::RULES
    }

    fn init(&mut self) {
        self.tree = None;
    }

    fn parse_rule(&mut self, rule: usize) -> Result<(), ParseError> {
        self.tree = None;
        if rule >= G::RULES.len() {
            return Err(ParseError::UnknownRule {
                index: rule,
                count: G::RULES.len(),
            });
        }

        let mut scanner = Scanner::new(&self.input);
        let tree = G::parse(&mut scanner, rule)?;
        self.tree = Some(tree);
        Ok(())
    }

    fn syntax_tree(&self) -> Option<&Node> {
        self.tree.as_ref()
    }

    fn input(&self) -> &Input {
        &self.input
    }

    fn actions(&self) -> Option<&dyn Actions> {
        if G::HAS_ACTIONS {
            Some(self)
        } else {
            None
        }
    }
}

impl<G: Grammar> Actions for GrammarParser<G> {
    fn execute(&self, tree: &Node, mask: &mut ExtentMask) -> Result<(), GrammarError> {
        G::execute(tree, &self.input, mask)
    }
}

/// Register grammar `G` under its own name
pub fn register<G: Grammar>(registry: &mut GrammarRegistry) {
    registry.register(G::NAME, G::DESCRIPTION, GrammarParser::<G>::boxed);
}

/// Register every built-in grammar
pub fn register_defaults(registry: &mut GrammarRegistry) {
    register::<Crontab>(registry);
    register::<Diskstats>(registry);
    register::<Fstab>(registry);
    register::<Group>(registry);
    register::<Gshadow>(registry);
    register::<Maps>(registry);
    register::<Passwd>(registry);
    register::<Peg>(registry);
    register::<Shadow>(registry);
}

/// Whole-file rule at index 0, single record otherwise
fn file_or_record<F>(
    s: &mut Scanner<'_>,
    rule: usize,
    file: &'static str,
    record: F,
) -> Result<Node, ParseError>
where
    F: Fn(&mut Scanner<'_>) -> Result<Node, ParseError>,
{
    if rule == 0 {
        records(s, file, record)
    } else {
        single_record(s, record)
    }
}

/// Hide every node produced by `rule`, e.g. whole comment lines
fn hide_all(tree: &Node, rule: &str, mask: &mut ExtentMask) -> Result<(), GrammarError> {
    for node in tree.find_all(rule) {
        mask.hide(node.begin, node.end, rule)?;
    }
    Ok(())
}
