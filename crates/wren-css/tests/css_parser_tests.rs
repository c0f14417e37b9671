//! Integration tests for the style sheet parser.

use quickcheck_macros::quickcheck;
use wren_css::{
    CSSParser, ParseError, Selector, StyleRule, parse_declarations, parse_stylesheet,
    serialize_declarations,
};
use wren_dom::StyleMap;

fn tag(name: &str) -> Selector {
    Selector::Tag(name.to_string())
}

fn get<'a>(rule: &'a StyleRule, property: &str) -> Option<&'a str> {
    rule.declarations.get(property).map(String::as_str)
}

#[test]
fn test_single_rule() {
    let rules = parse_stylesheet("p { color: red; }");
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].selector, tag("p"));
    assert_eq!(get(&rules[0], "color"), Some("red"));
}

#[test]
fn test_rules_keep_source_order() {
    let rules = parse_stylesheet("h1 { font-size: 32px; }\np { color: red; }\ndiv { color: blue; }");
    let selectors: Vec<String> = rules.iter().map(|r| r.selector.to_string()).collect();
    assert_eq!(selectors, vec!["h1", "p", "div"]);
}

#[test]
fn test_descendant_selector() {
    let rules = parse_stylesheet("div p { color: green; }");
    assert_eq!(rules.len(), 1);
    assert_eq!(
        rules[0].selector,
        Selector::Descendant(Box::new(tag("div")), Box::new(tag("p")))
    );
    assert_eq!(rules[0].selector.priority(), 2);
}

#[test]
fn test_names_are_case_folded_but_values_are_not() {
    let rules = parse_stylesheet("P { COLOR: Red; }");
    assert_eq!(rules[0].selector, tag("p"));
    assert_eq!(get(&rules[0], "color"), Some("Red"));
}

#[test]
fn test_word_characters() {
    let rules = parse_stylesheet("pre { background-color: #eee; font-size: 1.5em; width: 50%; }");
    assert_eq!(get(&rules[0], "background-color"), Some("#eee"));
    assert_eq!(get(&rules[0], "font-size"), Some("1.5em"));
    assert_eq!(get(&rules[0], "width"), Some("50%"));
}

#[test]
fn test_last_declaration_is_optional_semicolon() {
    let rules = parse_stylesheet("p { color: red }");
    assert_eq!(get(&rules[0], "color"), Some("red"));
}

#[test]
fn test_missing_semicolon_drops_the_declaration() {
    // Neither half of the run-on pair survives, and parsing carries on.
    let rules = parse_stylesheet("p { color: red background: blue; } div { color: green; }");
    assert_eq!(rules.len(), 2);
    assert!(rules[0].declarations.is_empty());
    assert_eq!(get(&rules[1], "color"), Some("green"));
}

#[test]
fn test_missing_colon_skips_to_next_declaration() {
    let rules = parse_stylesheet("p { color red; font-size: 20px; }");
    assert_eq!(rules.len(), 1);
    assert_eq!(get(&rules[0], "color"), None);
    assert_eq!(get(&rules[0], "font-size"), Some("20px"));
}

#[test]
fn test_stray_semicolons_are_skipped() {
    let rules = parse_stylesheet("p { ; ; color: red;; }");
    assert_eq!(get(&rules[0], "color"), Some("red"));
}

#[test]
fn test_unsupported_selector_skips_the_rule() {
    let rules = parse_stylesheet("a > b { color: red; } p { color: blue; }");
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].selector, tag("p"));
}

#[test]
fn test_unclosed_rule_is_dropped() {
    let rules = parse_stylesheet("div { color: green; } p { color: red");
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].selector, tag("div"));
}

#[test]
fn test_empty_and_blank_sheets() {
    assert!(parse_stylesheet("").is_empty());
    assert!(parse_stylesheet("  \n\t ").is_empty());
}

#[test]
fn test_empty_body() {
    let rules = parse_stylesheet("p {}");
    assert_eq!(rules.len(), 1);
    assert!(rules[0].declarations.is_empty());
}

#[test]
fn test_step_errors() {
    let mut parser = CSSParser::new(": x");
    assert_eq!(parser.word(), Err(ParseError::ExpectedWord(0)));
    assert_eq!(
        parser.literal('{'),
        Err(ParseError::ExpectedLiteral {
            expected: '{',
            position: 0
        })
    );
    assert_eq!(parser.literal(':'), Ok(()));
    parser.whitespace();
    assert_eq!(parser.word().as_deref(), Ok("x"));
}

#[test]
fn test_pair() {
    let mut parser = CSSParser::new("  Font-Size :  20px");
    assert_eq!(
        parser.pair(),
        Ok(("font-size".to_string(), "20px".to_string()))
    );
}

#[test]
fn test_ignore_until() {
    let mut parser = CSSParser::new("abc;def}");
    assert_eq!(parser.ignore_until(&[';', '}']), Some(';'));
    assert_eq!(parser.ignore_until(&['}']), Some('}'));
    assert_eq!(parser.ignore_until(&['x']), None);
}

#[test]
fn test_inline_declarations_last_writer_wins() {
    let decls = parse_declarations("color: blue; font-size: 20px; COLOR: red");
    assert_eq!(decls.len(), 2);
    assert_eq!(decls.get("color").map(String::as_str), Some("red"));
}

#[test]
fn test_serialize_declarations_is_sorted() {
    let decls = parse_declarations("font-size: 20px; color: red; color: blue");
    assert_eq!(serialize_declarations(&decls), "color: blue; font-size: 20px;");
    assert_eq!(serialize_declarations(&StyleMap::new()), "");
}

const PROPERTIES: [&str; 4] = ["color", "font-size", "font-weight", "background-color"];
const VALUES: [&str; 5] = ["red", "20px", "bold", "#fff", "50%"];

#[quickcheck]
fn prop_inline_round_trip_keeps_last_value(pairs: Vec<(u8, u8)>) -> bool {
    let mut expected = StyleMap::new();
    let mut body = Vec::new();
    for (p, v) in pairs {
        let property = PROPERTIES[p as usize % PROPERTIES.len()];
        let value = VALUES[v as usize % VALUES.len()];
        body.push(format!("{property}: {value}"));
        let _ = expected.insert(property.to_string(), value.to_string());
    }

    let parsed = parse_declarations(&body.join("; "));
    let reparsed = parse_declarations(&serialize_declarations(&parsed));
    parsed == expected && reparsed == expected
}

#[quickcheck]
fn prop_parse_always_terminates(input: String) -> bool {
    let rules = parse_stylesheet(&input);
    rules.len() <= input.matches('}').count() + 1
}
