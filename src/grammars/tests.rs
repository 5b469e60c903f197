use super::*;

fn parse<G: Grammar>(text: &str) -> Result<Node, ParseError> {
    let mut recognizer = GrammarParser::<G>::new(text);
    recognizer.parse()?;
    Ok(recognizer.syntax_tree().cloned().unwrap())
}

fn parse_rule<G: Grammar>(text: &str, rule: usize) -> Result<Node, ParseError> {
    let mut recognizer = GrammarParser::<G>::new(text);
    recognizer.parse_rule(rule)?;
    Ok(recognizer.syntax_tree().cloned().unwrap())
}

fn canonical<G: Grammar>(text: &str) -> String {
    let mut recognizer = GrammarParser::<G>::new(text);
    crate::canonicalize(G::NAME, &mut recognizer).unwrap().text
}

fn rules(tree: &Node) -> Vec<&'static str> {
    tree.children.iter().map(|n| n.rule).collect()
}

fn text(source: &str, node: &Node) -> String {
    Input::new(source).slice(node.begin, node.end)
}

// ========================================================================
// Scanner Tests
// ========================================================================

#[test]
fn test_scanner_token_and_error_position() {
    let input = Input::new("ab12\ncd");
    let mut s = Scanner::new(&input);

    let word = s.token("word", |c| c.is_ascii_alphabetic(), 1, "letters").unwrap();
    assert_eq!((word.begin, word.end), (0, 2));

    s.eat_while(|c| c.is_ascii_digit());
    assert!(s.eol());
    let err = s.token("digits", |c| c.is_ascii_digit(), 1, "digits").unwrap_err();
    assert_eq!(
        err,
        ParseError::Syntax {
            rule: "digits",
            position: 5,
            line: 2,
            column: 1,
            expected: "digits".to_string(),
        }
    );
    assert_eq!(s.pos(), 5);
}

#[test]
fn test_scanner_looking_at_does_not_consume() {
    let input = Input::new("<-x");
    let mut s = Scanner::new(&input);
    assert!(s.looking_at("<-"));
    assert_eq!(s.pos(), 0);
    assert!(s.eat_str("<-"));
    assert_eq!(s.peek(), Some('x'));
    assert!(!s.looking_at("xy"));
}

#[test]
fn test_records_without_final_newline() {
    let input = Input::new("a\nb");
    let mut s = Scanner::new(&input);
    let tree = records(&mut s, "file", |s| s.token("line", |c| c != '\n', 1, "text")).unwrap();

    assert_eq!(tree.children.len(), 2);
    assert_eq!((tree.children[0].begin, tree.children[0].end), (0, 2));
    assert_eq!((tree.children[1].begin, tree.children[1].end), (2, 3));
}

// ========================================================================
// passwd / group / shadow / gshadow
// ========================================================================

const PASSWD: &str = "root:x:0:0:root:/root:/bin/bash\n\
                      daemon:x:1:1:daemon:/usr/sbin:/usr/sbin/nologin\n\
                      nobody:x:65534:65534:nobody:/nonexistent:\n";

#[test]
fn test_passwd_accepts_entries() {
    let tree = parse::<Passwd>(PASSWD).unwrap();
    assert_eq!(tree.rule, "passwd");
    assert_eq!(tree.children.len(), 3);

    let root = &tree.children[0];
    assert_eq!(
        rules(root),
        vec!["name", "password", "uid", "gid", "gecos", "home", "shell"]
    );
    assert_eq!(text(PASSWD, &root.children[6]), "/bin/bash");
    assert_eq!(text(PASSWD, root), "root:x:0:0:root:/root:/bin/bash\n");
}

#[test]
fn test_passwd_accepts_empty_file() {
    let tree = parse::<Passwd>("").unwrap();
    assert!(tree.children.is_empty());
}

#[test]
fn test_passwd_rejects_non_numeric_uid() {
    let err = parse::<Passwd>("root:x:zero:0::/root:/bin/sh\n").unwrap_err();
    assert!(matches!(err, ParseError::Syntax { rule: "uid", column: 8, .. }));
}

#[test]
fn test_passwd_rejects_extra_field() {
    let err = parse::<Passwd>("root:x:0:0::/root:/bin/sh:extra\n").unwrap_err();
    assert!(matches!(err, ParseError::Syntax { rule: "entry", .. }));
}

#[test]
fn test_passwd_rejects_empty_name() {
    assert!(parse::<Passwd>(":x:0:0::/root:/bin/sh\n").is_err());
}

#[test]
fn test_passwd_single_entry_rule() {
    let tree = parse_rule::<Passwd>("root:x:0:0::/root:/bin/sh\n", 1).unwrap();
    assert_eq!(tree.rule, "entry");
    assert!(parse_rule::<Passwd>("a:x:0:0:::\nb:x:1:1:::\n", 1).is_err());
}

#[test]
fn test_group_members() {
    let source = "sudo:x:27:alice,bob\nnogroup:x:65534:\n";
    let tree = parse::<Group>(source).unwrap();

    let members = &tree.children[0].children[3];
    assert_eq!(members.rule, "members");
    assert_eq!(members.children.len(), 2);
    assert_eq!(text(source, &members.children[1]), "bob");
    assert!(tree.children[1].children[3].children.is_empty());
}

#[test]
fn test_group_rejects_trailing_comma() {
    assert!(parse::<Group>("sudo:x:27:alice,\n").is_err());
}

#[test]
fn test_shadow_optional_numbers() {
    let source = "root:$6$salt$hash:19000:0:99999:7:::\nbin:*:19000::::::\n";
    let tree = parse::<Shadow>(source).unwrap();
    assert_eq!(tree.children.len(), 2);
    assert_eq!(tree.children[0].children.len(), 9);
    assert!(tree.children[1].children[3].is_empty());
}

#[test]
fn test_shadow_rejects_text_in_numeric_field() {
    assert!(parse::<Shadow>("root:x:soon:0:99999:7:::\n").is_err());
}

#[test]
fn test_gshadow_admins_and_members() {
    let source = "wheel:!:root:alice,bob\n";
    let tree = parse::<Gshadow>(source).unwrap();
    let entry = &tree.children[0];
    assert_eq!(rules(entry), vec!["name", "password", "admins", "members"]);
    assert_eq!(entry.children[2].children.len(), 1);
    assert_eq!(entry.children[3].children.len(), 2);
}

// ========================================================================
// fstab
// ========================================================================

const FSTAB: &str = "# /etc/fstab\n\
                     UUID=1234-abcd / ext4 errors=remount-ro 0 1\n\
                     \n\
                     /dev/sdb1  /mnt/data\tvfat  defaults,noatime\n\
                     tmpfs /tmp tmpfs defaults 0\n";

#[test]
fn test_fstab_lines() {
    let tree = parse::<Fstab>(FSTAB).unwrap();
    assert_eq!(rules(&tree), vec!["comment", "entry", "blank", "entry", "entry"]);

    let root = &tree.children[1];
    assert_eq!(
        rules(root),
        vec!["spec", "file", "vfstype", "options", "freq", "passno"]
    );

    let data = &tree.children[3];
    assert_eq!(rules(data), vec!["spec", "file", "vfstype", "options"]);
    assert_eq!(data.children[3].children.len(), 2);
}

#[test]
fn test_fstab_rejects_missing_fields() {
    let err = parse::<Fstab>("/dev/sda1 /\n").unwrap_err();
    assert!(matches!(err, ParseError::Syntax { rule: "entry", line: 1, .. }));
}

#[test]
fn test_fstab_rejects_non_numeric_pass() {
    assert!(parse::<Fstab>("/dev/sda1 / ext4 defaults 0 x\n").is_err());
}

#[test]
fn test_fstab_hides_comment_lines() {
    let out = canonical::<Fstab>(FSTAB);
    assert!(!out.contains('#'));
    assert!(out.starts_with("UUID=1234-abcd"));
    assert_eq!(out.lines().count(), 4);
}

// ========================================================================
// crontab
// ========================================================================

const CRONTAB: &str = "SHELL=/bin/sh\n\
                       MAILTO = ops@example.com\n\
                       # m h dom mon dow command\n\
                       */15 * * * * /usr/bin/poll --quiet\n\
                       0 4 1-7,15 jan-mar mon /usr/local/bin/backup\n\
                       @reboot /usr/bin/start-agent\n";

#[test]
fn test_crontab_lines() {
    let tree = parse::<Crontab>(CRONTAB).unwrap();
    assert_eq!(
        rules(&tree),
        vec!["environment", "environment", "comment", "job", "job", "job"]
    );

    let mailto = &tree.children[1];
    assert_eq!(text(CRONTAB, &mailto.children[0]), "MAILTO");
    assert_eq!(text(CRONTAB, &mailto.children[1]), "ops@example.com");

    let poll = &tree.children[3];
    assert_eq!(
        rules(poll),
        vec!["minute", "hour", "day_of_month", "month", "day_of_week", "command"]
    );
    assert_eq!(text(CRONTAB, &poll.children[5]), "/usr/bin/poll --quiet");

    assert_eq!(rules(&tree.children[5]), vec!["nickname", "command"]);
}

#[test]
fn test_crontab_rejects_unknown_nickname() {
    let err = parse::<Crontab>("@fortnightly /bin/true\n").unwrap_err();
    assert!(matches!(err, ParseError::Syntax { rule: "nickname", .. }));
}

#[test]
fn test_crontab_rejects_job_without_command() {
    assert!(parse::<Crontab>("* * * * *\n").is_err());
    assert!(parse::<Crontab>("* * * *  \n").is_err());
}

#[test]
fn test_crontab_rejects_bad_step() {
    assert!(parse::<Crontab>("*/ * * * * /bin/true\n").is_err());
}

#[test]
fn test_crontab_hides_comment_lines() {
    assert_eq!(canonical::<Crontab>("# comment\nkey=value\n"), "key=value\n");
    assert_eq!(
        canonical::<Crontab>("  # indented\n@daily /bin/true\n# last"),
        "@daily /bin/true\n"
    );
}

// ========================================================================
// diskstats / maps
// ========================================================================

const DISKSTATS: &str = "   8       0 sda 4851 1525 363802 2012 2961 3584 196304 4836 0 3840 6849 0 0 0 0\n\
                         \x20  8       1 sda1 4795 1525 361386 1989 2955 3584 196304 4832 0 3804 6821\n";

#[test]
fn test_diskstats_counters() {
    let tree = parse::<Diskstats>(DISKSTATS).unwrap();
    assert_eq!(tree.children.len(), 2);
    assert_eq!(tree.children[0].children.len(), 3 + 15);
    assert_eq!(tree.children[1].children.len(), 3 + 11);
    assert_eq!(text(DISKSTATS, &tree.children[1].children[2]), "sda1");
}

#[test]
fn test_diskstats_rejects_short_line() {
    let err = parse::<Diskstats>("8 0 sda 1 2 3\n").unwrap_err();
    match err {
        ParseError::Syntax { expected, .. } => assert!(expected.contains("found 3")),
        other => panic!("unexpected error: {other}"),
    }
}

const MAPS: &str = "55d0c8a2e000-55d0c8a30000 r--p 00000000 08:01 1048602 /usr/bin/cat\n\
                    7ffd1b9e1000-7ffd1ba02000 rw-p 00000000 00:00 0                          [stack]\n\
                    7f3e2c000000-7f3e2c021000 rw-p 00000000 00:00 0 \n";

#[test]
fn test_maps_entries() {
    let tree = parse::<Maps>(MAPS).unwrap();
    assert_eq!(tree.children.len(), 3);
    assert_eq!(
        rules(&tree.children[0]),
        vec!["address", "perms", "offset", "dev", "inode", "pathname"]
    );
    assert_eq!(text(MAPS, &tree.children[1].children[5]), "[stack]");
    assert_eq!(tree.children[2].children.len(), 5);
}

#[test]
fn test_maps_rejects_bad_perms() {
    let err = parse::<Maps>("1000-2000 rwzp 0 00:00 0\n").unwrap_err();
    assert!(matches!(err, ParseError::Syntax { rule: "perms", column: 13, .. }));
}

// ========================================================================
// peg
// ========================================================================

const PEG: &str = "# Arithmetic\n\
                   Expr    <- Term (('+' / '-') Term)*   # sums\n\
                   \n\
                   Term    <- [0-9]+ / '(' Expr ')'\n";

#[test]
fn test_peg_definitions() {
    let tree = parse::<Peg>(PEG).unwrap();
    let definitions = tree.find_all("definition");
    assert_eq!(definitions.len(), 2);
    assert_eq!(text(PEG, &definitions[1].children[0]), "Term");
    assert_eq!(tree.find_all("comment").len(), 2);
    assert_eq!(tree.find_all("slash").len(), 2);
}

#[test]
fn test_peg_operators_and_actions() {
    let source = "Start <- &'a' !\"b\" < .? > { emit({ depth }) } Rest+\nRest <- [\\]a-z]*\n";
    let tree = parse::<Peg>(source).unwrap();
    for rule in ["and", "not", "begin", "end", "dot", "question", "action", "plus", "class", "star"] {
        assert_eq!(tree.find_all(rule).len(), 1, "rule {rule}");
    }
}

#[test]
fn test_peg_requires_a_definition() {
    assert!(parse::<Peg>("").is_err());
    assert!(parse::<Peg>("# only a comment\n").is_err());
}

#[test]
fn test_peg_rejects_unterminated_literal() {
    let err = parse::<Peg>("A <- 'abc\n").unwrap_err();
    assert!(matches!(err, ParseError::Syntax { rule: "literal", .. }));
}

#[test]
fn test_peg_rejects_unbalanced_group() {
    let err = parse::<Peg>("A <- (b c\n").unwrap_err();
    assert!(matches!(err, ParseError::Syntax { rule: "group", .. }));
}

fn nested_groups(depth: usize) -> String {
    format!("A <- {}'a'{}\n", "(".repeat(depth), ")".repeat(depth))
}

#[test]
fn test_peg_accepts_nesting_at_limit() {
    let tree = parse::<Peg>(&nested_groups(super::peg::MAX_NESTING)).unwrap();
    assert_eq!(tree.find_all("group").len(), super::peg::MAX_NESTING);
}

#[test]
fn test_peg_rejects_nesting_past_limit() {
    let limit = super::peg::MAX_NESTING;
    let err = parse::<Peg>(&nested_groups(limit + 1)).unwrap_err();
    match err {
        ParseError::Syntax { rule, position, expected, .. } => {
            assert_eq!(rule, "group");
            assert_eq!(position, "A <- ".len() + limit);
            assert_eq!(expected, format!("nesting depth <= {limit}"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_peg_deep_nesting_is_rejected_without_recursing() {
    assert!(parse::<Peg>(&nested_groups(200_000)).is_err());
    assert!(parse_rule::<Peg>(&"(".repeat(200_000), 2).is_err());
}

#[test]
fn test_peg_expression_rule() {
    let tree = parse_rule::<Peg>("  'a' / b*", 2).unwrap();
    assert_eq!(tree.rule, "expression");
    assert_eq!(tree.begin, 0);
    assert_eq!(tree.children[0].rule, "spacing");
    assert!(parse_rule::<Peg>("A <- b", 2).is_err());
}

#[test]
fn test_peg_canonical_form() {
    assert_eq!(
        canonical::<Peg>(PEG),
        "Expr <- Term (('+' / '-') Term)*\nTerm <- [0-9]+ / '(' Expr ')'\n"
    );
}

#[test]
fn test_peg_canonical_keeps_compact_input() {
    let compact = "A<-b/c\nB<-'x'\n";
    assert_eq!(canonical::<Peg>(compact), compact);
}

#[test]
fn test_peg_canonical_drops_trailing_comment() {
    assert_eq!(canonical::<Peg>("A <- b # done"), "A <- b");
}

#[test]
fn test_peg_canonical_is_stable() {
    let once = canonical::<Peg>(PEG);
    assert_eq!(canonical::<Peg>(&once), once);
}
