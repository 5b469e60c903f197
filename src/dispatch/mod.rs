
use crate::error::GrammarError;
use crate::parser::{GrammarDescriptor, GrammarRegistry, Match, ParseError, ParseOutcome, Rejection};
use tracing::{debug, info};

/// Which grammars to try, and when to stop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Policy {
    /// Exactly one grammar; its result is final
    Named(String),
    /// Every grammar in name order, stopping at the first acceptance
    FirstMatch,
    /// Every grammar, reporting each outcome
    MatchAll,
}

/// Outcome of a successful dispatch
///
/// `accepted` is never empty. Under [`Policy::FirstMatch`] it holds a single
/// match and `rejected` holds the grammars tried before it.
#[derive(Debug, Clone)]
pub struct DispatchReport {
    pub accepted: Vec<Match>,
    pub rejected: Vec<Rejection>,
}

impl DispatchReport {
    /// Names of the accepting grammars, in the order they were tried
    pub fn matched_names(&self) -> Vec<&str> {
        self.accepted.iter().map(|m| m.grammar.as_str()).collect()
    }
}

/// Tries registered grammars against an input buffer
pub struct Dispatcher<'r> {
    registry: &'r GrammarRegistry,
}

impl<'r> Dispatcher<'r> {
    pub fn new(registry: &'r GrammarRegistry) -> Self {
        Self { registry }
    }

    /// Look up a grammar by name
    pub fn resolve(&self, name: &str) -> Result<&'r GrammarDescriptor, GrammarError> {
        self.registry.resolve(name)
    }

    /// Build, initialize and parse with one grammar from its default start rule
    pub fn try_one(&self, descriptor: &GrammarDescriptor, input: &str) -> ParseOutcome {
        self.try_rule(descriptor, input, 0)
    }

    /// Like [`Dispatcher::try_one`], starting from the rule at index `rule`
    ///
    /// Rejection is a normal outcome and is returned, never raised.
    pub fn try_rule(&self, descriptor: &GrammarDescriptor, input: &str, rule: usize) -> ParseOutcome {
        let mut recognizer = descriptor.build(input);
        recognizer.init();

        let parsed = recognizer.parse_rule(rule).and_then(|()| {
            recognizer
                .syntax_tree()
                .cloned()
                .ok_or(ParseError::MissingTree)
        });

        match parsed {
            Ok(tree) => {
                info!(grammar = %descriptor.name, nodes = tree.node_count(), "grammar accepted input");
                ParseOutcome::Accepted(Match {
                    grammar: descriptor.name.clone(),
                    tree,
                })
            }
            Err(error) => {
                debug!(grammar = %descriptor.name, %error, "grammar rejected input");
                ParseOutcome::Rejected(Rejection {
                    grammar: descriptor.name.clone(),
                    error,
                })
            }
        }
    }

    /// Try grammars against `input` according to `policy`
    pub fn dispatch(&self, input: &str, policy: &Policy) -> Result<DispatchReport, GrammarError> {
        self.dispatch_from(input, policy, 0)
    }

    /// Like [`Dispatcher::dispatch`], with a start rule for [`Policy::Named`]
    ///
    /// Scans over every grammar always use each grammar's default rule.
    pub fn dispatch_from(
        &self,
        input: &str,
        policy: &Policy,
        rule: usize,
    ) -> Result<DispatchReport, GrammarError> {
        match policy {
            Policy::Named(name) => {
                let descriptor = self.resolve(name)?;
                match self.try_rule(descriptor, input, rule) {
                    ParseOutcome::Accepted(m) => Ok(DispatchReport {
                        accepted: vec![m],
                        rejected: Vec::new(),
                    }),
                    ParseOutcome::Rejected(r) => Err(GrammarError::ParseRejected(r)),
                }
            }
            Policy::FirstMatch => self.scan(input, true),
            Policy::MatchAll => self.scan(input, false),
        }
    }

    fn scan(&self, input: &str, stop_at_first: bool) -> Result<DispatchReport, GrammarError> {
        let mut accepted = Vec::new();
        let mut rejected = Vec::new();

        for descriptor in self.registry.iter() {
            match self.try_one(descriptor, input) {
                ParseOutcome::Accepted(m) => {
                    accepted.push(m);
                    if stop_at_first {
                        break;
                    }
                }
                ParseOutcome::Rejected(r) => rejected.push(r),
            }
        }

        if accepted.is_empty() {
            return Err(GrammarError::NoGrammarMatched(rejected));
        }
        Ok(DispatchReport { accepted, rejected })
    }
}
