use super::{file_or_record, Grammar, Scanner};
use crate::parser::{Node, ParseError};

/// One field of a colon-separated record
#[derive(Debug, Clone, Copy)]
enum Field {
    /// Any text without `:`, possibly empty
    Text(&'static str),
    /// Non-empty text without `:`
    Required(&'static str),
    /// Decimal number
    Number(&'static str),
    /// Decimal number or empty
    OptionalNumber(&'static str),
    /// Comma-separated names, possibly empty
    List(&'static str),
}

fn in_field(c: char) -> bool {
    c != ':' && c != '\n'
}

fn in_member(c: char) -> bool {
    c != ',' && in_field(c)
}

impl Field {
    fn parse(self, s: &mut Scanner<'_>) -> Result<Node, ParseError> {
        match self {
            Field::Text(rule) => s.token(rule, in_field, 0, "field text"),
            Field::Required(rule) => s.token(rule, in_field, 1, "a non-empty field"),
            Field::Number(rule) => s.token(rule, |c| c.is_ascii_digit(), 1, "a decimal number"),
            Field::OptionalNumber(rule) => s.token(rule, |c| c.is_ascii_digit(), 0, "a decimal number"),
            Field::List(rule) => list(s, rule),
        }
    }
}

fn list(s: &mut Scanner<'_>, rule: &'static str) -> Result<Node, ParseError> {
    let begin = s.pos();
    let mut members = Vec::new();
    if s.peek().is_some_and(in_member) {
        loop {
            members.push(s.token("member", in_member, 1, "a member name")?);
            if !s.eat(',') {
                break;
            }
        }
    }
    Ok(Node::with_children(rule, begin, s.pos(), members))
}

fn colon_record(
    s: &mut Scanner<'_>,
    rule: &'static str,
    fields: &[Field],
) -> Result<Node, ParseError> {
    let begin = s.pos();
    let mut children = Vec::with_capacity(fields.len());
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            s.expect(':', rule)?;
        }
        children.push(field.parse(s)?);
    }
    Ok(Node::with_children(rule, begin, s.pos(), children))
}

const PASSWD: &[Field] = &[
    Field::Required("name"),
    Field::Text("password"),
    Field::Number("uid"),
    Field::Number("gid"),
    Field::Text("gecos"),
    Field::Text("home"),
    Field::Text("shell"),
];

const GROUP: &[Field] = &[
    Field::Required("name"),
    Field::Text("password"),
    Field::Number("gid"),
    Field::List("members"),
];

const SHADOW: &[Field] = &[
    Field::Required("name"),
    Field::Text("password"),
    Field::OptionalNumber("last_change"),
    Field::OptionalNumber("min_age"),
    Field::OptionalNumber("max_age"),
    Field::OptionalNumber("warn_period"),
    Field::OptionalNumber("inactive_period"),
    Field::OptionalNumber("expiration"),
    Field::Text("reserved"),
];

const GSHADOW: &[Field] = &[
    Field::Required("name"),
    Field::Text("password"),
    Field::List("admins"),
    Field::List("members"),
];

/// passwd(5)
pub struct Passwd;

impl Grammar for Passwd {
    const NAME: &'static str = "passwd";
    const DESCRIPTION: &'static str = "user accounts, name:passwd:uid:gid:gecos:home:shell";
    const RULES: &'static [&'static str] = &["passwd", "entry"];

    fn parse(s: &mut Scanner<'_>, rule: usize) -> Result<Node, ParseError> {
        file_or_record(s, rule, "passwd", |s| colon_record(s, "entry", PASSWD))
    }
}

/// group(5)
pub struct Group;

impl Grammar for Group {
    const NAME: &'static str = "group";
    const DESCRIPTION: &'static str = "groups, name:passwd:gid:members";
    const RULES: &'static [&'static str] = &["group", "entry"];

    fn parse(s: &mut Scanner<'_>, rule: usize) -> Result<Node, ParseError> {
        file_or_record(s, rule, "group", |s| colon_record(s, "entry", GROUP))
    }
}

/// shadow(5)
pub struct Shadow;

impl Grammar for Shadow {
    const NAME: &'static str = "shadow";
    const DESCRIPTION: &'static str = "shadowed passwords, nine colon-separated fields";
    const RULES: &'static [&'static str] = &["shadow", "entry"];

    fn parse(s: &mut Scanner<'_>, rule: usize) -> Result<Node, ParseError> {
        file_or_record(s, rule, "shadow", |s| colon_record(s, "entry", SHADOW))
    }
}

/// gshadow(5)
pub struct Gshadow;

impl Grammar for Gshadow {
    const NAME: &'static str = "gshadow";
    const DESCRIPTION: &'static str = "shadowed groups, name:passwd:admins:members";
    const RULES: &'static [&'static str] = &["gshadow", "entry"];

    fn parse(s: &mut Scanner<'_>, rule: usize) -> Result<Node, ParseError> {
        file_or_record(s, rule, "gshadow", |s| colon_record(s, "entry", GSHADOW))
    }
}
