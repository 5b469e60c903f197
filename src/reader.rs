use crate::error::GrammarError;
use std::io::Read;
use tracing::warn;

/// Reads a whole input stream into memory, with a size limit
pub struct InputReader {
    max_bytes: u64,
}

impl InputReader {
    /// Create a reader with the default limit
    pub fn new() -> Self {
        Self {
            max_bytes: 64 * 1024 * 1024, // 64 MB
        }
    }

    /// Set the maximum number of bytes accepted
    pub fn max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Read all of `source` as UTF-8 text
    pub fn read(&self, source: impl Read) -> Result<String, GrammarError> {
        let mut bytes = Vec::new();
        // One byte past the limit tells an exact fit from an overflow
        source
            .take(self.max_bytes.saturating_add(1))
            .read_to_end(&mut bytes)?;

        if bytes.len() as u64 > self.max_bytes {
            warn!(limit = self.max_bytes, "input exceeds size limit");
            return Err(GrammarError::InputTooLarge {
                limit: self.max_bytes,
            });
        }

        Ok(String::from_utf8(bytes)?)
    }
}

impl Default for InputReader {
    fn default() -> Self {
        Self::new()
    }
}
