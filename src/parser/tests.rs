#[cfg(test)]
use super::*;
#[cfg(test)]
use crate::ast::Value;

fn parse(input: &str) -> Result<Document, ParseError> {
    Parser::new(input).parse_document()
}

fn s(v: &str) -> Value {
    Value::Str(v.to_string())
}

fn arr(items: &[&str]) -> Value {
    Value::StrArray(items.iter().map(|i| i.to_string()).collect())
}

#[test]
fn test_parser_basic_manifest() {
    let input = r#"
# Manifest for the hello module
id = "hello"
name = "Hello World"
entry = "hello.sh"

[tests]

[[tests.smoke]]
kind = "script"
args = ["--help"]

[[tests.smoke]]
kind = "bash"
run = [
  "echo one",   # first
  "echo two",
]

[[tests.integration]]
kind = "bash"
run = "echo integration"
"#;

    let doc = parse(input).expect("Failed to parse document");
    println!("--- Parsed Document ---");
    println!("{:#?}", doc);

    assert_eq!(doc.get("id"), Some(&s("hello")));
    assert_eq!(doc.get("name"), Some(&s("Hello World")));
    assert_eq!(doc.get("entry"), Some(&s("hello.sh")));

    let tests = doc.get("tests").and_then(Value::as_table).expect("tests table");
    let smoke = tests
        .get("smoke")
        .and_then(Value::as_table_array)
        .expect("smoke steps");
    assert_eq!(smoke.len(), 2);
    assert_eq!(smoke[0].get("kind"), Some(&s("script")));
    assert_eq!(smoke[0].get("args"), Some(&arr(&["--help"])));
    assert_eq!(smoke[1].get("run"), Some(&arr(&["echo one", "echo two"])));

    let integration = tests
        .get("integration")
        .and_then(Value::as_table_array)
        .expect("integration steps");
    assert_eq!(integration[0].get("run"), Some(&s("echo integration")));
}

#[test]
fn test_parse_is_deterministic() {
    let input = "a = \"1\"\n[b.c]\nd = ['x', \"y\"]\n[[e]]\nf = \"g\"\n";
    assert_eq!(parse(input).unwrap(), parse(input).unwrap());
}

#[test]
fn test_last_write_wins() {
    let doc = parse("a = \"1\"\na = \"2\"").unwrap();
    assert_eq!(doc.get("a"), Some(&s("2")));
    assert_eq!(doc.len(), 1);

    let doc = parse("a = [\"1\"]\na = \"2\"").unwrap();
    assert_eq!(doc.get("a"), Some(&s("2")));
}

#[test]
fn test_quoted_hash_is_not_a_comment() {
    let doc = parse(r#"a = "x#y""#).unwrap();
    assert_eq!(doc.get("a"), Some(&s("x#y")));
}

#[test]
fn test_trailing_comment_is_stripped() {
    let doc = parse(r#"a = "v" # note"#).unwrap();
    assert_eq!(doc.get("a"), Some(&s("v")));
}

#[test]
fn test_multi_line_array() {
    let doc = parse("a = [\n\"x\",\n\"y\"\n]").unwrap();
    assert_eq!(doc.get("a"), Some(&arr(&["x", "y"])));
}

#[test]
fn test_multi_line_array_skips_blank_and_comment_lines() {
    let input = "a = [\n\n  # comment\n  \"x\", # tail\n\n  \"y\"\n]\nb = \"after\"";
    let doc = parse(input).unwrap();
    assert_eq!(doc.get("a"), Some(&arr(&["x", "y"])));
    assert_eq!(doc.get("b"), Some(&s("after")));
}

#[test]
fn test_multi_line_array_with_bracket_in_string() {
    let doc = parse("a = [\n\"]\",\n']'\n]").unwrap();
    assert_eq!(doc.get("a"), Some(&arr(&["]", "]"])));
}

#[test]
fn test_trailing_comma() {
    let doc = parse(r#"a = ["x", "y", ]"#).unwrap();
    assert_eq!(doc.get("a"), Some(&arr(&["x", "y"])));
}

#[test]
fn test_empty_array() {
    let doc = parse("a = []\nb = [   ]").unwrap();
    assert_eq!(doc.get("a"), Some(&arr(&[])));
    assert_eq!(doc.get("b"), Some(&arr(&[])));
}

#[test]
fn test_table_path_creation() {
    let doc = parse("[a.b]\nc = \"1\"").unwrap();
    let a = doc.get("a").and_then(Value::as_table).unwrap();
    let b = a.get("b").and_then(Value::as_table).unwrap();
    assert_eq!(b.get("c"), Some(&s("1")));
}

#[test]
fn test_table_is_extended_not_replaced() {
    let doc = parse("[a]\nx = \"1\"\n[a.b]\ny = \"2\"\n[a]\nz = \"3\"").unwrap();
    let a = doc.get("a").and_then(Value::as_table).unwrap();
    assert_eq!(a.get("x"), Some(&s("1")));
    assert_eq!(a.get("z"), Some(&s("3")));
    let b = a.get("b").and_then(Value::as_table).unwrap();
    assert_eq!(b.get("y"), Some(&s("2")));
}

#[test]
fn test_header_segments_are_trimmed() {
    let doc = parse("[ a . b ]\nc = \"1\"").unwrap();
    let a = doc.get("a").and_then(Value::as_table).unwrap();
    assert!(a.get("b").and_then(Value::as_table).is_some());
}

#[test]
fn test_array_of_tables_accumulates() {
    let doc = parse("[[a]]\nx = \"1\"\n[[a]]\nx = \"2\"").unwrap();
    let a = doc.get("a").and_then(Value::as_table_array).unwrap();
    assert_eq!(a.len(), 2);
    assert_eq!(a[0].get("x"), Some(&s("1")));
    assert_eq!(a[1].get("x"), Some(&s("2")));
}

#[test]
fn test_nested_array_of_tables_creates_parents() {
    let doc = parse("[[tests.smoke]]\nkind = \"bash\"").unwrap();
    let tests = doc.get("tests").and_then(Value::as_table).unwrap();
    let smoke = tests.get("smoke").and_then(Value::as_table_array).unwrap();
    assert_eq!(smoke[0].get("kind"), Some(&s("bash")));
}

#[test]
fn test_empty_array_of_tables_element() {
    let doc = parse("[[a]]\n[[a]]\nx = \"1\"").unwrap();
    let a = doc.get("a").and_then(Value::as_table_array).unwrap();
    assert_eq!(a.len(), 2);
    assert!(a[0].is_empty());
}

#[test]
fn test_shape_conflict_fails() {
    let err = parse("a = \"1\"\n[a]\nb = \"2\"").unwrap_err();
    println!("{}", err);
    assert!(matches!(err, ParseError::ShapeConflict { expected: "table", line: 2, .. }));

    let err = parse("[a]\n[[a]]").unwrap_err();
    assert!(matches!(err, ParseError::ShapeConflict { expected: "array of tables", .. }));

    let err = parse("[[a]]\n[a]").unwrap_err();
    assert!(matches!(err, ParseError::ShapeConflict { found: "array of tables", .. }));

    let err = parse("a = \"1\"\n[[a.b]]").unwrap_err();
    assert!(matches!(err, ParseError::ShapeConflict { .. }));
}

#[test]
fn test_unterminated_array_fails() {
    let err = parse("a = [").unwrap_err();
    assert!(matches!(err, ParseError::UnterminatedArray { ref key, line: 1, .. } if key == "a"));

    let err = parse("a = [\n\"x\",\n# never closed\n").unwrap_err();
    assert!(matches!(err, ParseError::UnterminatedArray { .. }));
}

#[test]
fn test_invalid_headers_fail() {
    assert!(matches!(parse("[a b]"), Err(ParseError::InvalidHeader { .. })));
    assert!(matches!(parse("[]"), Err(ParseError::InvalidHeader { code: Some(203), .. })));
    assert!(matches!(parse("[[ ]]"), Err(ParseError::InvalidHeader { .. })));
    assert!(matches!(parse("[a..b]"), Err(ParseError::InvalidHeader { .. })));
    assert!(matches!(parse("[a.\"b\"]"), Err(ParseError::InvalidHeader { .. })));
}

#[test]
fn test_invalid_key_fails() {
    let err = parse("my key = \"x\"").unwrap_err();
    assert!(matches!(err, ParseError::InvalidKey { ref key, .. } if key == "my key"));
}

#[test]
fn test_unrecognized_line_fails() {
    let err = parse("id = \"x\"\njust some words").unwrap_err();
    assert!(matches!(err, ParseError::InvalidLine { line: 2, .. }));
}

#[test]
fn test_bare_values_fail() {
    assert!(matches!(parse("a = 1"), Err(ParseError::InvalidString { line: 1, .. })));
    assert!(matches!(parse("a = true"), Err(ParseError::InvalidString { .. })));
    assert!(matches!(parse("a = \"open"), Err(ParseError::InvalidString { .. })));
    assert!(matches!(parse("a = [1, 2]"), Err(ParseError::InvalidArray { .. })));
    assert!(matches!(parse("a = [[\"x\"]]"), Err(ParseError::InvalidArray { .. })));
    assert!(matches!(parse("a = [\"x\"] extra"), Err(ParseError::InvalidArray { .. })));
}

#[test]
fn test_escape_decoding() {
    let doc = parse(r#"a = "line1\nline2\ttab""#).unwrap();
    assert_eq!(doc.get("a"), Some(&s("line1\nline2\ttab")));

    let doc = parse(r"a = 'line1\nline2'").unwrap();
    assert_eq!(doc.get("a"), Some(&s(r"line1\nline2")));

    let doc = parse(r#"a = "say \"hi\" \\ done""#).unwrap();
    assert_eq!(doc.get("a"), Some(&s(r#"say "hi" \ done"#)));

    // Substitutions run in sequence, so an escaped backslash can feed `\n`.
    let doc = parse(r#"a = "x\\n""#).unwrap();
    assert_eq!(doc.get("a"), Some(&s("x\n")));
}

#[test]
fn test_equals_inside_value() {
    let doc = parse(r#"cmd = "FOO=bar baz""#).unwrap();
    assert_eq!(doc.get("cmd"), Some(&s("FOO=bar baz")));
}

#[test]
fn test_parse_string_directly() {
    assert_eq!(parse_string(" \"x\" ").unwrap(), "x");
    assert_eq!(parse_string("''").unwrap(), "");
    assert!(parse_string("\"").is_err());
    assert!(parse_string("'x\"").is_err());
    assert!(parse_string("bare").is_err());
}

#[test]
fn test_parse_string_array_directly() {
    assert_eq!(
        parse_string_array(r#"["a, b", 'c']"#).unwrap(),
        vec!["a, b".to_string(), "c".to_string()]
    );
    assert!(parse_string_array(r#""a""#).is_err());
}

#[test]
fn test_error_messages_name_the_offending_text() {
    let err = parse("a = oops").unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("oops"), "{}", msg);
    assert!(msg.contains("line 1"), "{}", msg);
}

#[test]
fn test_crlf_lines() {
    let doc = parse("a = \"1\"\r\n[b]\r\nc = \"2\"\r\n").unwrap();
    assert_eq!(doc.get("a"), Some(&s("1")));
    assert!(doc.get("b").and_then(Value::as_table).is_some());
}

#[test]
fn test_lone_carriage_return_ends_a_line() {
    let doc = parse("a = \"1\"\rb = \"2\"").unwrap();
    assert_eq!(doc.get("a"), Some(&s("1")));
    assert_eq!(doc.get("b"), Some(&s("2")));

    let err = parse("a = \"1\"\r\rbad line").unwrap_err();
    assert_eq!(err.line(), 3);
}
