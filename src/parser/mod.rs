mod input;
mod registry;
mod result;


pub use input::Input;
pub use registry::{Constructor, GrammarDescriptor, GrammarRegistry};
pub use result::{Match, Node, ParseError, ParseOutcome, Rejection};

use crate::error::GrammarError;
use crate::extent::ExtentMask;

/// Core trait that all grammar recognizers must implement
///
/// A recognizer is bound to one input buffer when it is constructed and
/// either fully accepts that buffer or rejects it. There is no partial match
/// and no error recovery.
pub trait Recognizer {
    /// Rule names this recognizer can start from; index 0 is the default
    fn rules(&self) -> &'static [&'static str];

    /// Reset parse state, discarding any previous syntax tree
    fn init(&mut self);

    /// Parse the whole input starting from the rule at `rule`
    fn parse_rule(&mut self, rule: usize) -> Result<(), ParseError>;

    /// Parse the whole input from the default start rule
    fn parse(&mut self) -> Result<(), ParseError> {
        self.parse_rule(0)
    }

    /// Syntax tree of the last accepted parse
    fn syntax_tree(&self) -> Option<&Node>;

    /// The buffer this recognizer was built over
    fn input(&self) -> &Input;

    /// Semantic actions, for grammars that define any
    fn actions(&self) -> Option<&dyn Actions> {
        None
    }
}

/// Side-effecting semantic actions run over an accepted parse
pub trait Actions {
    /// Walk `tree` and record hidden extents into `mask`
    ///
    /// # Arguments
    /// * `tree` - Root of the accepted parse produced by the same recognizer
    /// * `mask` - Mask sized to the recognizer's input
    fn execute(&self, tree: &Node, mask: &mut ExtentMask) -> Result<(), GrammarError>;
}
