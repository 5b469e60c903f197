use super::{Grammar, Scanner};
use crate::error::GrammarError;
use crate::extent::ExtentMask;
use crate::parser::{Input, Node, ParseError};

/// PEG grammar files in Ford's notation
///
/// ```text
/// Grammar    <- Spacing Definition+ EndOfFile
/// Definition <- Identifier LEFTARROW Expression
/// Expression <- Sequence (SLASH Sequence)*
/// Sequence   <- Prefix*
/// Prefix     <- (AND / NOT)? Suffix
/// Suffix     <- Primary (QUESTION / STAR / PLUS)?
/// Primary    <- Identifier !LEFTARROW / OPEN Expression CLOSE
///             / Literal / Class / DOT / Action / BEGIN / END
/// ```
///
/// Semantic actions strip comments and fold every run of spacing down to a
/// single character, so the canonical form of a grammar file has one token
/// separator wherever the source had any.
pub struct Peg;

/// Deepest `(` nesting accepted before the input is rejected
pub(super) const MAX_NESTING: usize = 256;

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn spacing(s: &mut Scanner<'_>) -> Option<Node> {
    let begin = s.pos();
    let mut comments = Vec::new();
    loop {
        match s.peek() {
            Some(' ' | '\t' | '\r' | '\n') => {
                s.bump();
            }
            Some('#') => {
                let at = s.pos();
                s.eat_while(|c| c != '\n');
                comments.push(Node::new("comment", at, s.pos()));
            }
            _ => break,
        }
    }
    (s.pos() > begin).then(|| Node::with_children("spacing", begin, s.pos(), comments))
}

fn grammar(s: &mut Scanner<'_>) -> Result<Node, ParseError> {
    let begin = s.pos();
    let mut children = Vec::new();
    children.extend(spacing(s));
    children.push(definition(s)?);
    while !s.at_end() {
        children.push(definition(s)?);
    }
    Ok(Node::with_children("grammar", begin, s.pos(), children))
}

fn definition(s: &mut Scanner<'_>) -> Result<Node, ParseError> {
    let begin = s.pos();
    let mut children = vec![identifier(s)?];
    children.extend(spacing(s));
    let arrow = s.pos();
    if !s.eat_str("<-") {
        return Err(s.error("definition", "'<-'"));
    }
    children.push(Node::new("arrow", arrow, s.pos()));
    children.extend(spacing(s));
    children.push(expression(s, 0)?);
    Ok(Node::with_children("definition", begin, s.pos(), children))
}

fn identifier(s: &mut Scanner<'_>) -> Result<Node, ParseError> {
    if !s.peek().is_some_and(is_ident_start) {
        return Err(s.error("identifier", "an identifier"));
    }
    s.token("identifier", is_ident, 1, "an identifier")
}

fn expression(s: &mut Scanner<'_>, depth: usize) -> Result<Node, ParseError> {
    let begin = s.pos();
    let mut children = vec![sequence(s, depth)?];
    loop {
        let slash = s.pos();
        if !s.eat('/') {
            break;
        }
        children.push(Node::new("slash", slash, s.pos()));
        children.extend(spacing(s));
        children.push(sequence(s, depth)?);
    }
    Ok(Node::with_children("expression", begin, s.pos(), children))
}

fn sequence(s: &mut Scanner<'_>, depth: usize) -> Result<Node, ParseError> {
    let begin = s.pos();
    let mut items = Vec::new();
    while let Some(item) = item(s, depth)? {
        items.push(item);
    }
    Ok(Node::with_children("sequence", begin, s.pos(), items))
}

/// A prefixed, suffixed primary; `None` if nothing here can start one
fn item(s: &mut Scanner<'_>, depth: usize) -> Result<Option<Node>, ParseError> {
    let begin = s.pos();
    let mut children = Vec::new();

    let prefix = match s.peek() {
        Some('&') => Some("and"),
        Some('!') => Some("not"),
        _ => None,
    };
    if let Some(rule) = prefix {
        s.bump();
        children.push(Node::new(rule, begin, s.pos()));
        children.extend(spacing(s));
    }

    match primary(s, depth)? {
        Some(node) => children.push(node),
        None if prefix.is_some() => return Err(s.error("prefix", "an expression")),
        None => return Ok(None),
    }
    children.extend(spacing(s));

    let suffix = match s.peek() {
        Some('?') => Some("question"),
        Some('*') => Some("star"),
        Some('+') => Some("plus"),
        _ => None,
    };
    if let Some(rule) = suffix {
        let at = s.pos();
        s.bump();
        children.push(Node::new(rule, at, s.pos()));
        children.extend(spacing(s));
    }

    Ok(Some(Node::with_children("item", begin, s.pos(), children)))
}

fn primary(s: &mut Scanner<'_>, depth: usize) -> Result<Option<Node>, ParseError> {
    let begin = s.pos();
    let node = match s.peek() {
        Some(c) if is_ident_start(c) => {
            let name = identifier(s)?;
            let after = s.pos();
            let _ = spacing(s);
            if s.looking_at("<-") {
                s.reset(begin);
                return Ok(None);
            }
            s.reset(after);
            name
        }
        Some('(') => group(s, depth)?,
        Some(quote @ ('\'' | '"')) => quoted(s, "literal", quote)?,
        Some('[') => quoted(s, "class", ']')?,
        Some('{') => action(s)?,
        Some('.') => single(s, "dot"),
        Some('<') if !s.looking_at("<-") => single(s, "begin"),
        Some('>') => single(s, "end"),
        _ => return Ok(None),
    };
    Ok(Some(node))
}

fn single(s: &mut Scanner<'_>, rule: &'static str) -> Node {
    let begin = s.pos();
    s.bump();
    Node::new(rule, begin, s.pos())
}

/// Parenthesized expression; `depth` counts the groups already open
fn group(s: &mut Scanner<'_>, depth: usize) -> Result<Node, ParseError> {
    if depth >= MAX_NESTING {
        return Err(s.error("group", format!("nesting depth <= {MAX_NESTING}")));
    }
    let begin = s.pos();
    let mut children = vec![single(s, "open")];
    children.extend(spacing(s));
    children.push(expression(s, depth + 1)?);
    if s.peek() != Some(')') {
        return Err(s.error("group", "')'"));
    }
    children.push(single(s, "close"));
    Ok(Node::with_children("group", begin, s.pos(), children))
}

/// Literal or class body up to the unescaped `close` character
fn quoted(s: &mut Scanner<'_>, rule: &'static str, close: char) -> Result<Node, ParseError> {
    let begin = s.pos();
    s.bump();
    loop {
        match s.bump() {
            Some(c) if c == close => break,
            Some('\\') => {
                if s.bump().is_none() {
                    return Err(s.error(rule, "an escaped character"));
                }
            }
            Some(_) => {}
            None => return Err(s.error(rule, format!("{close:?}"))),
        }
    }
    Ok(Node::new(rule, begin, s.pos()))
}

fn action(s: &mut Scanner<'_>) -> Result<Node, ParseError> {
    let begin = s.pos();
    s.bump();
    let mut depth = 1;
    while depth > 0 {
        match s.bump() {
            Some('{') => depth += 1,
            Some('}') => depth -= 1,
            Some(_) => {}
            None => return Err(s.error("action", "'}'")),
        }
    }
    Ok(Node::new("action", begin, s.pos()))
}

/// Hide a spacing run except for the one character worth keeping
///
/// Leading spacing disappears. Trailing spacing keeps a newline if it had
/// one. Anything else keeps its first newline, or else its first blank.
fn fold_spacing(node: &Node, input: &Input, mask: &mut ExtentMask) -> Result<(), GrammarError> {
    let (begin, end) = (node.begin, node.end);
    let newline = (begin..end).find(|&i| input.get(i) == Some('\n'));
    let keep = if begin == 0 {
        None
    } else if end == input.len() {
        newline
    } else {
        newline.or_else(|| (begin..end).find(|&i| input.get(i).is_some_and(char::is_whitespace)))
    };

    match keep {
        Some(k) => {
            mask.hide(begin, k, "spacing")?;
            mask.hide(k + 1, end, "spacing")
        }
        None => mask.hide(begin, end, "spacing"),
    }
}

impl Grammar for Peg {
    const NAME: &'static str = "peg";
    const DESCRIPTION: &'static str = "parsing expression grammar definitions";
    const RULES: &'static [&'static str] = &["grammar", "definition", "expression"];
    const HAS_ACTIONS: bool = true;

    fn parse(s: &mut Scanner<'_>, rule: usize) -> Result<Node, ParseError> {
        if rule == 0 {
            return grammar(s);
        }

        let begin = s.pos();
        let leading = spacing(s);
        let mut node = if rule == 1 {
            definition(s)?
        } else {
            expression(s, 0)?
        };
        if !s.at_end() {
            return Err(s.error(Self::RULES[rule], "end of input"));
        }
        if let Some(leading) = leading {
            node.children.insert(0, leading);
            node.begin = begin;
        }
        Ok(node)
    }

    fn execute(tree: &Node, input: &Input, mask: &mut ExtentMask) -> Result<(), GrammarError> {
        for comment in tree.find_all("comment") {
            mask.hide(comment.begin, comment.end, "comment")?;
        }
        for node in tree.find_all("spacing") {
            fold_spacing(node, input, mask)?;
        }
        Ok(())
    }
}
