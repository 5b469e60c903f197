// Public API exports
pub mod canon;
pub mod dispatch;
pub mod error;
pub mod extent;
pub mod grammars;
pub mod logging;
pub mod parser;
pub mod reader;

// Re-export main types for convenience
pub use error::GrammarError;
pub use reader::InputReader;

pub use parser::{
    Actions, Constructor, GrammarDescriptor, GrammarRegistry, Input, Match, Node, ParseError,
    ParseOutcome, Recognizer, Rejection,
};

pub use dispatch::{DispatchReport, Dispatcher, Policy};

pub use extent::{Extent, ExtentMask};

pub use canon::{Canonical, canonicalize, canonicalize_named};

pub use grammars::{Grammar, GrammarParser};
