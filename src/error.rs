use crate::parser::Rejection;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GrammarError {
    #[error("unknown grammar {0:?}")]
    UnknownGrammar(String),

    #[error("{0}")]
    ParseRejected(Rejection),

    #[error("no grammar matched ({} rejected)", .0.len())]
    NoGrammarMatched(Vec<Rejection>),

    #[error("invalid extent [{begin}, {end}) over {len} characters ({label:?})")]
    InvalidExtent {
        begin: usize,
        end: usize,
        len: usize,
        label: String,
    },

    #[error("mask covers {mask} characters but input has {input}")]
    MaskMismatch { mask: usize, input: usize },

    #[error("grammar {0:?} has no semantic actions")]
    NoSemanticActions(String),

    #[error("input too large: more than {limit} bytes")]
    InputTooLarge { limit: u64 },

    #[error("input is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

impl GrammarError {
    /// Every per-grammar rejection carried by this error
    pub fn rejections(&self) -> &[Rejection] {
        match self {
            GrammarError::ParseRejected(rejection) => std::slice::from_ref(rejection),
            GrammarError::NoGrammarMatched(causes) => causes,
            _ => &[],
        }
    }
}
