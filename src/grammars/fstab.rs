use super::{file_or_record, hide_all, is_blank, Grammar, Scanner};
use crate::error::GrammarError;
use crate::extent::ExtentMask;
use crate::parser::{Input, Node, ParseError};

/// fstab(5)
///
/// Semantic actions drop comment lines.
pub struct Fstab;

fn in_word(c: char) -> bool {
    !is_blank(c) && c != '\n'
}

fn in_option(c: char) -> bool {
    c != ',' && in_word(c)
}

fn line(s: &mut Scanner<'_>) -> Result<Node, ParseError> {
    let begin = s.pos();
    s.blanks();
    if s.peek() == Some('#') {
        s.eat_while(|c| c != '\n');
        return Ok(Node::new("comment", begin, s.pos()));
    }
    if s.at_eol() {
        return Ok(Node::new("blank", begin, s.pos()));
    }
    entry(s, begin)
}

fn entry(s: &mut Scanner<'_>, begin: usize) -> Result<Node, ParseError> {
    let mut children = Vec::with_capacity(6);
    children.push(s.token("spec", in_word, 1, "a device or label")?);
    s.separator("entry")?;
    children.push(s.token("file", in_word, 1, "a mount point")?);
    s.separator("entry")?;
    children.push(s.token("vfstype", in_word, 1, "a filesystem type")?);
    s.separator("entry")?;
    children.push(options(s)?);

    for rule in ["freq", "passno"] {
        if s.blanks() == 0 || s.at_eol() {
            break;
        }
        children.push(s.token(rule, |c| c.is_ascii_digit(), 1, "a decimal number")?);
    }
    s.blanks();

    Ok(Node::with_children("entry", begin, s.pos(), children))
}

fn options(s: &mut Scanner<'_>) -> Result<Node, ParseError> {
    let begin = s.pos();
    let mut children = Vec::new();
    loop {
        children.push(s.token("option", in_option, 1, "a mount option")?);
        if !s.eat(',') {
            break;
        }
    }
    Ok(Node::with_children("options", begin, s.pos(), children))
}

impl Grammar for Fstab {
    const NAME: &'static str = "fstab";
    const DESCRIPTION: &'static str = "static filesystem table, spec file vfstype options [freq [passno]]";
    const RULES: &'static [&'static str] = &["fstab", "line"];
    const HAS_ACTIONS: bool = true;

    fn parse(s: &mut Scanner<'_>, rule: usize) -> Result<Node, ParseError> {
        file_or_record(s, rule, "fstab", line)
    }

    fn execute(tree: &Node, _input: &Input, mask: &mut ExtentMask) -> Result<(), GrammarError> {
        hide_all(tree, "comment", mask)
    }
}
