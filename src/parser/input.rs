/// Input buffer addressed by character (code point) index
///
/// Every position handed out by a recognizer, a syntax tree or an extent mask
/// is an index into `chars`, never a byte offset into `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    text: String,
    chars: Vec<char>,
}

impl Input {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let chars = text.chars().collect();
        Self { text, chars }
    }

    /// The text as given
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Number of characters (not bytes)
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<char> {
        self.chars.get(position).copied()
    }

    /// Text of the half-open character range `[begin, end)`, clamped to the input
    pub fn slice(&self, begin: usize, end: usize) -> String {
        let end = end.min(self.chars.len());
        let begin = begin.min(end);
        self.chars[begin..end].iter().collect()
    }

    /// 1-based line and column of a character position
    pub fn line_column(&self, position: usize) -> (usize, usize) {
        let mut line = 1;
        let mut column = 1;
        for &c in self.chars.iter().take(position) {
            if c == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        (line, column)
    }
}

impl From<&str> for Input {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Input {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}
