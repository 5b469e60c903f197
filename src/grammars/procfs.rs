use super::{file_or_record, is_blank, Grammar, Scanner};
use crate::parser::{Node, ParseError};

/// Minimum number of I/O counters per `/proc/diskstats` line
const MIN_COUNTERS: usize = 11;

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_hex(c: char) -> bool {
    c.is_ascii_hexdigit()
}

fn in_word(c: char) -> bool {
    !is_blank(c) && c != '\n'
}

/// `/proc/diskstats`
pub struct Diskstats;

fn disk(s: &mut Scanner<'_>) -> Result<Node, ParseError> {
    let begin = s.pos();
    s.blanks();
    let mut children = Vec::with_capacity(3 + MIN_COUNTERS);
    children.push(s.token("major", is_digit, 1, "a major device number")?);
    s.separator("disk")?;
    children.push(s.token("minor", is_digit, 1, "a minor device number")?);
    s.separator("disk")?;
    children.push(s.token("device", in_word, 1, "a device name")?);

    let mut counters = 0;
    while s.blanks() > 0 && !s.at_eol() {
        children.push(s.token("counter", is_digit, 1, "a decimal counter")?);
        counters += 1;
    }
    if counters < MIN_COUNTERS {
        return Err(s.error("disk", format!("at least {MIN_COUNTERS} counters, found {counters}")));
    }

    Ok(Node::with_children("disk", begin, s.pos(), children))
}

impl Grammar for Diskstats {
    const NAME: &'static str = "diskstats";
    const DESCRIPTION: &'static str = "kernel block device I/O statistics";
    const RULES: &'static [&'static str] = &["diskstats", "disk"];

    fn parse(s: &mut Scanner<'_>, rule: usize) -> Result<Node, ParseError> {
        file_or_record(s, rule, "diskstats", disk)
    }
}

/// `/proc/<pid>/maps`
pub struct Maps;

fn mapping(s: &mut Scanner<'_>) -> Result<Node, ParseError> {
    let begin = s.pos();
    let mut children = Vec::with_capacity(6);

    let range = s.pos();
    s.token("start", is_hex, 1, "a hexadecimal address")?;
    s.expect('-', "address")?;
    s.token("end", is_hex, 1, "a hexadecimal address")?;
    children.push(Node::new("address", range, s.pos()));
    s.separator("mapping")?;

    children.push(perms(s)?);
    s.separator("mapping")?;
    children.push(s.token("offset", is_hex, 1, "a hexadecimal offset")?);
    s.separator("mapping")?;

    let dev = s.pos();
    s.token("dev", is_hex, 1, "a hexadecimal major number")?;
    s.expect(':', "dev")?;
    s.token("dev", is_hex, 1, "a hexadecimal minor number")?;
    children.push(Node::new("dev", dev, s.pos()));
    s.separator("mapping")?;

    children.push(s.token("inode", is_digit, 1, "an inode number")?);
    if s.blanks() > 0 && !s.at_eol() {
        children.push(s.token("pathname", |c| c != '\n', 1, "a pathname")?);
    }

    Ok(Node::with_children("mapping", begin, s.pos(), children))
}

fn perms(s: &mut Scanner<'_>) -> Result<Node, ParseError> {
    let begin = s.pos();
    for allowed in ["r-", "w-", "x-", "ps"] {
        match s.peek() {
            Some(c) if allowed.contains(c) => {
                s.bump();
            }
            _ => return Err(s.error("perms", format!("one of {allowed:?}"))),
        }
    }
    Ok(Node::new("perms", begin, s.pos()))
}

impl Grammar for Maps {
    const NAME: &'static str = "maps";
    const DESCRIPTION: &'static str = "process memory mappings";
    const RULES: &'static [&'static str] = &["maps", "mapping"];

    fn parse(s: &mut Scanner<'_>, rule: usize) -> Result<Node, ParseError> {
        file_or_record(s, rule, "maps", mapping)
    }
}
