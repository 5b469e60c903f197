
use crate::error::GrammarError;
use crate::extent::{Extent, ExtentMask};
use crate::parser::{GrammarRegistry, ParseError, Recognizer, Rejection};
use tracing::debug;

/// Input text with the hidden extents removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canonical {
    pub text: String,
    /// Number of characters removed
    pub hidden: usize,
    /// Hide requests recorded by the grammar's semantic actions
    pub extents: Vec<Extent>,
}

/// Run a recognizer's semantic actions and remove what they hide
///
/// `grammar` names the recognizer in rejection diagnostics. The recognizer
/// must accept its whole input; a rejection fails the canonicalization.
pub fn canonicalize(grammar: &str, recognizer: &mut dyn Recognizer) -> Result<Canonical, GrammarError> {
    let mut mask = ExtentMask::for_input(recognizer.input());

    recognizer.init();
    recognizer.parse().map_err(|error| reject(grammar, error))?;

    let tree = recognizer
        .syntax_tree()
        .ok_or_else(|| reject(grammar, ParseError::MissingTree))?;
    let actions = recognizer
        .actions()
        .ok_or_else(|| GrammarError::NoSemanticActions(grammar.to_string()))?;
    actions.execute(tree, &mut mask)?;

    let text = mask.apply(recognizer.input().as_str())?;
    debug!(
        grammar,
        hidden = mask.hidden_count(),
        extents = mask.extents().len(),
        "canonicalized input"
    );

    Ok(Canonical {
        text,
        hidden: mask.hidden_count(),
        extents: mask.extents().to_vec(),
    })
}

/// Canonicalize `input` with the registered grammar `name`
pub fn canonicalize_named(
    registry: &GrammarRegistry,
    name: &str,
    input: &str,
) -> Result<Canonical, GrammarError> {
    let descriptor = registry.resolve(name)?;
    let mut recognizer = descriptor.build(input);
    canonicalize(&descriptor.name, recognizer.as_mut())
}

fn reject(grammar: &str, error: ParseError) -> GrammarError {
    GrammarError::ParseRejected(Rejection {
        grammar: grammar.to_string(),
        error,
    })
}
