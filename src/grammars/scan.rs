use crate::parser::{Input, Node, ParseError};

/// Character cursor used by the built-in recognizers
pub struct Scanner<'a> {
    input: &'a Input,
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a Input) -> Self {
        Self { input, pos: 0 }
    }

    pub fn input(&self) -> &'a Input {
        self.input
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Rewind (or advance) to a previously saved position
    pub fn reset(&mut self, pos: usize) {
        self.pos = pos.min(self.input.len());
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    pub fn peek(&self) -> Option<char> {
        self.input.get(self.pos)
    }

    pub fn peek_at(&self, offset: usize) -> Option<char> {
        self.input.get(self.pos + offset)
    }

    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    pub fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// True if the upcoming characters spell `s`; consumes nothing
    pub fn looking_at(&self, s: &str) -> bool {
        s.chars()
            .enumerate()
            .all(|(i, c)| self.peek_at(i) == Some(c))
    }

    pub fn eat_str(&mut self, s: &str) -> bool {
        if self.looking_at(s) {
            self.pos += s.chars().count();
            true
        } else {
            false
        }
    }

    /// Consume characters while `pred` holds; returns how many were consumed
    pub fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> usize {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.pos += 1;
        }
        self.pos - start
    }

    /// Spaces and tabs
    pub fn blanks(&mut self) -> usize {
        self.eat_while(is_blank)
    }

    /// At a newline or the end of input
    pub fn at_eol(&self) -> bool {
        matches!(self.peek(), None | Some('\n'))
    }

    pub fn eol(&mut self) -> bool {
        self.eat('\n')
    }

    pub fn expect(&mut self, c: char, rule: &'static str) -> Result<(), ParseError> {
        if self.eat(c) {
            Ok(())
        } else {
            Err(self.error(rule, format!("{c:?}")))
        }
    }

    /// At least one blank
    pub fn separator(&mut self, rule: &'static str) -> Result<(), ParseError> {
        if self.blanks() == 0 {
            return Err(self.error(rule, "whitespace"));
        }
        Ok(())
    }

    /// A leaf node of at least `min` characters matching `pred`
    pub fn token(
        &mut self,
        rule: &'static str,
        pred: impl Fn(char) -> bool,
        min: usize,
        expected: &str,
    ) -> Result<Node, ParseError> {
        let begin = self.pos;
        if self.eat_while(pred) < min {
            self.pos = begin;
            return Err(self.error(rule, expected));
        }
        Ok(Node::new(rule, begin, self.pos))
    }

    /// Syntax error at the current position
    pub fn error(&self, rule: &'static str, expected: impl Into<String>) -> ParseError {
        let (line, column) = self.input.line_column(self.pos);
        ParseError::Syntax {
            rule,
            position: self.pos,
            line,
            column,
            expected: expected.into(),
        }
    }
}

pub fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Zero or more newline-separated records covering the whole input
///
/// Each record node is extended over its terminating newline. The last
/// record may omit the newline.
pub fn records<F>(s: &mut Scanner<'_>, rule: &'static str, record: F) -> Result<Node, ParseError>
where
    F: Fn(&mut Scanner<'_>) -> Result<Node, ParseError>,
{
    let begin = s.pos();
    let mut children = Vec::new();
    while !s.at_end() {
        let mut node = record(s)?;
        if !s.eol() && !s.at_end() {
            return Err(s.error(node.rule, "end of line"));
        }
        node.end = s.pos();
        children.push(node);
    }
    Ok(Node::with_children(rule, begin, s.pos(), children))
}

/// Exactly one record spanning the whole input, newline optional
pub fn single_record<F>(s: &mut Scanner<'_>, record: F) -> Result<Node, ParseError>
where
    F: Fn(&mut Scanner<'_>) -> Result<Node, ParseError>,
{
    let mut node = record(s)?;
    s.eol();
    if !s.at_end() {
        return Err(s.error(node.rule, "end of input"));
    }
    node.end = s.pos();
    Ok(node)
}
