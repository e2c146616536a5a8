use super::{parse, render, render_segment, ParseError, Segment, Template};

fn lit(s: &str) -> Segment {
    Segment::literal(s)
}

#[test]
fn test_render_variable_with_verb() {
    let t = Template::new(
        vec![Segment::variable(
            "name",
            vec![lit("a"), Segment::Wildcard, lit("b")],
        )],
        "LOCK",
    );
    assert_eq!(render(&t), "/{name=a/*/b}:LOCK");
}

#[test]
fn test_render_simple_segments() {
    assert_eq!(render_segment(&lit("v1")), "v1");
    assert_eq!(render_segment(&Segment::Wildcard), "*");
    assert_eq!(render_segment(&Segment::DeepWildcard), "**");
}

#[test]
fn test_render_empty_variable_as_wildcard() {
    let t = Template::new(vec![lit("v1"), Segment::variable("id", vec![])], "");
    assert_eq!(render(&t), "/v1/{id=*}");
}

#[test]
fn test_render_empty_template() {
    assert_eq!(render(&Template::default()), "/");
    assert_eq!(render(&Template::new(vec![], "LOCK")), "/:LOCK");
}

#[test]
fn test_parse_full_example() {
    let t = parse("/v1/{name=a/*/b}/c:LOCK").unwrap();
    assert_eq!(
        t.segments,
        vec![
            lit("v1"),
            Segment::variable("name", vec![lit("a"), Segment::Wildcard, lit("b")]),
            lit("c"),
        ]
    );
    assert_eq!(t.verb, "LOCK");
}

#[test]
fn test_parse_root() {
    let t = parse("/").unwrap();
    assert!(t.segments.is_empty());
    assert!(t.verb.is_empty());
}

#[test]
fn test_parse_bare_variable_is_single_wildcard() {
    let t = parse("/users/{id}").unwrap();
    assert_eq!(
        t.segments[1],
        Segment::variable("id", vec![Segment::Wildcard])
    );
}

#[test]
fn test_parse_nested_field_path() {
    let t = parse("/v1/{book.name=shelves/*/books/*}").unwrap();
    assert_eq!(t.field_paths().collect::<Vec<_>>(), vec!["book.name"]);
}

#[test]
fn test_parse_deep_wildcard_last() {
    let t = parse("/static/**").unwrap();
    assert_eq!(t.segments, vec![lit("static"), Segment::DeepWildcard]);

    let t = parse("/v1/{path=files/**}").unwrap();
    assert_eq!(
        t.segments[1],
        Segment::variable("path", vec![lit("files"), Segment::DeepWildcard])
    );
}

#[test]
fn test_parse_colon_inside_literal_is_not_a_verb() {
    let t = parse("/a:b/c").unwrap();
    assert_eq!(t.segments, vec![lit("a:b"), lit("c")]);
    assert!(t.verb.is_empty());

    let t = parse("/a/b:c:undelete").unwrap();
    assert_eq!(t.segments, vec![lit("a"), lit("b:c")]);
    assert_eq!(t.verb, "undelete");
}

#[test]
fn test_parse_verb_after_variable() {
    let t = parse("/v1/{name=*}:cancel").unwrap();
    assert_eq!(t.verb, "cancel");
    assert_eq!(t.variable_count(), 1);
}

#[test]
fn test_parse_errors() {
    assert!(matches!(
        parse("v1/books"),
        Err(ParseError::MissingLeadingSlash { .. })
    ));
    assert!(matches!(
        parse("/v1//books"),
        Err(ParseError::EmptySegment { position: 4, .. })
    ));
    assert!(matches!(parse("/v1/"), Err(ParseError::EmptySegment { .. })));
    assert!(matches!(
        parse("/v1/{name=a/{id}}"),
        Err(ParseError::NestedVariable { .. })
    ));
    assert!(matches!(
        parse("/v1/{name"),
        Err(ParseError::UnexpectedEnd { .. })
    ));
    assert!(matches!(
        parse("/v1/{1abc}"),
        Err(ParseError::InvalidFieldPath { .. })
    ));
    assert!(matches!(
        parse("/v1/{a..b}"),
        Err(ParseError::InvalidFieldPath { .. })
    ));
    assert!(matches!(
        parse("/**/tail"),
        Err(ParseError::DeepWildcardNotLast { .. })
    ));
    assert!(matches!(
        parse("/{path=**}/tail"),
        Err(ParseError::DeepWildcardNotLast { .. })
    ));
    assert!(matches!(parse("/v1:"), Err(ParseError::EmptyVerb { .. })));
    assert!(matches!(
        parse("/:lock"),
        Err(ParseError::EmptySegment { position: 1, .. })
    ));
    assert!(matches!(
        parse("/v1/:lock"),
        Err(ParseError::EmptySegment { position: 4, .. })
    ));
    assert!(matches!(
        parse("/v1/a*b"),
        Err(ParseError::InvalidCharacter { found: '*', .. })
    ));
    assert!(matches!(
        parse("/v1/a}"),
        Err(ParseError::InvalidCharacter { found: '}', .. })
    ));
    assert!(matches!(
        parse("/v1/b ook"),
        Err(ParseError::InvalidCharacter { found: ' ', .. })
    ));
}

#[test]
fn test_parse_error_display_names_pattern() {
    let err = parse("/**/x").unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid template '/**/x': '**' must be the last segment"
    );
}

#[test]
fn test_render_inverts_parse() {
    let patterns = [
        "/",
        "/v1/books",
        "/v1/*/books/**",
        "/v1/{name=shelves/*/books/*}",
        "/v1/{name.nested=a/*/b}/{obj=**}",
        "/v1/{id=*}:undelete",
        "/v1/a:b/c",
    ];
    for pattern in patterns {
        let t = parse(pattern).unwrap();
        assert_eq!(render(&t), pattern, "render mismatch for {pattern}");
        assert_eq!(parse(&render(&t)).unwrap(), t);
    }
}

#[test]
fn test_from_str() {
    let t: Template = "/v1/{id}".parse().unwrap();
    assert_eq!(t.to_string(), "/v1/{id=*}");
}
