use super::{file_or_record, hide_all, Grammar, Scanner};
use crate::error::GrammarError;
use crate::extent::ExtentMask;
use crate::parser::{Input, Node, ParseError};

/// crontab(5)
///
/// Semantic actions drop comment lines.
pub struct Crontab;

const TIME_FIELDS: [&str; 5] = ["minute", "hour", "day_of_month", "month", "day_of_week"];

const NICKNAMES: [&str; 8] = [
    "reboot", "yearly", "annually", "monthly", "weekly", "daily", "midnight", "hourly",
];

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_name(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn line(s: &mut Scanner<'_>) -> Result<Node, ParseError> {
    let begin = s.pos();
    s.blanks();
    match s.peek() {
        Some('#') => {
            s.eat_while(|c| c != '\n');
            Ok(Node::new("comment", begin, s.pos()))
        }
        None | Some('\n') => Ok(Node::new("blank", begin, s.pos())),
        Some('@') => nickname_job(s, begin),
        Some(c) if is_name_start(c) => match environment(s, begin) {
            Some(node) => Ok(node),
            None => job(s, begin),
        },
        Some(_) => job(s, begin),
    }
}

/// `NAME = value`; restores the scanner and returns `None` if this is not one
fn environment(s: &mut Scanner<'_>, begin: usize) -> Option<Node> {
    let start = s.pos();
    s.eat_while(is_name);
    let name = Node::new("name", start, s.pos());
    s.blanks();
    if !s.eat('=') {
        s.reset(start);
        return None;
    }
    s.blanks();
    let value_begin = s.pos();
    s.eat_while(|c| c != '\n');
    let value = Node::new("value", value_begin, s.pos());
    Some(Node::with_children("environment", begin, s.pos(), vec![name, value]))
}

fn nickname_job(s: &mut Scanner<'_>, begin: usize) -> Result<Node, ParseError> {
    let at = s.pos();
    s.expect('@', "nickname")?;
    s.eat_while(|c| c.is_ascii_alphabetic());
    let word = s.input().slice(at + 1, s.pos());
    if !NICKNAMES.contains(&word.as_str()) {
        s.reset(at);
        return Err(s.error("nickname", format!("one of @{}", NICKNAMES.join(", @"))));
    }
    let nickname = Node::new("nickname", at, s.pos());
    s.separator("job")?;
    let command = command(s)?;
    Ok(Node::with_children("job", begin, s.pos(), vec![nickname, command]))
}

fn job(s: &mut Scanner<'_>, begin: usize) -> Result<Node, ParseError> {
    let mut children = Vec::with_capacity(TIME_FIELDS.len() + 1);
    for rule in TIME_FIELDS {
        children.push(time_field(s, rule)?);
        s.separator("job")?;
    }
    children.push(command(s)?);
    Ok(Node::with_children("job", begin, s.pos(), children))
}

/// `*`, numbers, names, ranges, steps and comma lists
fn time_field(s: &mut Scanner<'_>, rule: &'static str) -> Result<Node, ParseError> {
    let begin = s.pos();
    loop {
        if !s.eat('*') {
            atom(s, rule)?;
            if s.eat('-') {
                atom(s, rule)?;
            }
        }
        if s.eat('/') {
            s.token(rule, |c| c.is_ascii_digit(), 1, "a step")?;
        }
        if !s.eat(',') {
            break;
        }
    }
    Ok(Node::new(rule, begin, s.pos()))
}

fn atom(s: &mut Scanner<'_>, rule: &'static str) -> Result<(), ParseError> {
    s.token(rule, |c| c.is_ascii_alphanumeric(), 1, "a number, a name or '*'")?;
    Ok(())
}

fn command(s: &mut Scanner<'_>) -> Result<Node, ParseError> {
    s.token("command", |c| c != '\n', 1, "a command")
}

impl Grammar for Crontab {
    const NAME: &'static str = "crontab";
    const DESCRIPTION: &'static str = "cron tables, environment lines and scheduled jobs";
    const RULES: &'static [&'static str] = &["crontab", "line"];
    const HAS_ACTIONS: bool = true;

    fn parse(s: &mut Scanner<'_>, rule: usize) -> Result<Node, ParseError> {
        file_or_record(s, rule, "crontab", line)
    }

    fn execute(tree: &Node, _input: &Input, mask: &mut ExtentMask) -> Result<(), GrammarError> {
        hide_all(tree, "comment", mask)
    }
}
