
use crate::error::GrammarError;
use crate::parser::Input;
use serde::Serialize;
use tracing::trace;

/// A recorded hide request over `[begin, end)`
///
/// The label is kept for diagnostics only and never affects masking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extent {
    pub begin: usize,
    pub end: usize,
    pub label: String,
}

/// Per-character record of hidden positions
///
/// Positions are character indices into the input. Once hidden, a position
/// stays hidden. Two masks are equal when they hide the same positions,
/// whatever extents were recorded to get there.
#[derive(Debug, Clone)]
pub struct ExtentMask {
    hidden: Vec<bool>,
    extents: Vec<Extent>,
}

impl ExtentMask {
    /// Create a mask over `len` characters, all visible
    pub fn new(len: usize) -> Self {
        Self {
            hidden: vec![false; len],
            extents: Vec::new(),
        }
    }

    /// Create a mask sized to `input`
    pub fn for_input(input: &Input) -> Self {
        Self::new(input.len())
    }

    /// Hide the half-open range `[begin, end)`
    ///
    /// Empty ranges are accepted and change nothing. Inverted or out of range
    /// requests are rejected rather than clamped.
    pub fn hide(
        &mut self,
        begin: usize,
        end: usize,
        label: impl Into<String>,
    ) -> Result<(), GrammarError> {
        let label = label.into();
        if begin > end || end > self.hidden.len() {
            return Err(GrammarError::InvalidExtent {
                begin,
                end,
                len: self.hidden.len(),
                label,
            });
        }
        if begin == end {
            return Ok(());
        }

        trace!(begin, end, label = %label, "hide extent");
        self.hidden[begin..end].fill(true);
        self.extents.push(Extent { begin, end, label });
        Ok(())
    }

    /// Keep the characters whose position is not hidden, in order
    pub fn apply(&self, input: &str) -> Result<String, GrammarError> {
        let count = input.chars().count();
        if count != self.hidden.len() {
            return Err(GrammarError::MaskMismatch {
                mask: self.hidden.len(),
                input: count,
            });
        }

        Ok(input
            .chars()
            .zip(&self.hidden)
            .filter(|(_, &hidden)| !hidden)
            .map(|(c, _)| c)
            .collect())
    }

    pub fn is_hidden(&self, position: usize) -> bool {
        self.hidden.get(position).copied().unwrap_or(false)
    }

    /// Number of hidden positions
    pub fn hidden_count(&self) -> usize {
        self.hidden.iter().filter(|&&h| h).count()
    }

    /// Hide requests in the order they were recorded
    pub fn extents(&self) -> &[Extent] {
        &self.extents
    }

    /// Hidden flag per character position
    pub fn hidden(&self) -> &[bool] {
        &self.hidden
    }

    /// Number of characters covered by the mask
    pub fn len(&self) -> usize {
        self.hidden.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hidden.is_empty()
    }
}

impl PartialEq for ExtentMask {
    fn eq(&self, other: &Self) -> bool {
        self.hidden == other.hidden
    }
}

impl Eq for ExtentMask {}
