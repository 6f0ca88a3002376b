//! Every grammar violation is fatal and reports the 1-based line/column of
//! the offending byte. Assertions go through `Display`, which pins the
//! message and the position in one string.

use super::convert_err;
use crate::ErrorKind;

#[track_caller]
fn assert_fails(input: &str, display: &str) {
    assert_eq!(convert_err(input).to_string(), display);
}

#[test]
fn missing_member_value() {
    // the error lands on the '}' column, and the failed member has not
    // produced a terminated line
    assert_fails(r#"{"a":}"#, "value expected at 1:6");
}

#[test]
fn bare_garbage() {
    assert_fails("x", "value expected at 1:1");
}

#[test]
fn empty_input() {
    assert_fails("", "unexpected end of input at 1:1");
}

#[test]
fn truncated_object() {
    assert_fails(r#"{"a":1"#, "unexpected end of input at 1:6");
}

#[test]
fn truncated_string() {
    assert_fails(r#"{"a"#, "unexpected end of input at 1:3");
}

#[test]
fn truncated_literal() {
    assert_fails("tru", "unexpected end of input at 1:3");
}

#[test]
fn misspelled_literal() {
    assert_fails("truu", "expected 'true' but got 'u' at 1:4");
}

#[test]
fn missing_comma_in_array() {
    assert_fails("[1 2]", "expected ',' but got '2' at 1:4");
}

#[test]
fn missing_colon() {
    assert_fails(r#"{"a" 1}"#, "expected ':' but got '1' at 1:6");
}

#[test]
fn array_closed_with_brace() {
    assert_fails("[1}", "expected ',' but got '}' at 1:3");
}

#[test]
fn object_key_is_not_a_string() {
    assert_fails("{1:2}", "expected '\"' but got '1' at 1:2");
}

#[test]
fn trailing_input_after_value() {
    assert_fails("1 1", "end of input expected at 1:3");
    assert_fails("01", "end of input expected at 1:2");
    assert_fails("{} {}", "end of input expected at 1:4");
}

#[test]
fn incomplete_fraction() {
    assert_fails("1.", "number expected at 1:2");
}

#[test]
fn incomplete_exponent() {
    assert_fails("[1e+]", "number expected at 1:5");
}

#[test]
fn lonely_minus() {
    assert_fails("-", "number expected at 1:1");
}

#[test]
fn unknown_string_escape() {
    assert_fails(r#""\q""#, "unknown escape sequence with character 'q' at 1:3");
}

#[test]
fn bad_unicode_escape() {
    assert_fails(
        r#""\u12G4""#,
        "hex digit expected with character 'G' at 1:6",
    );
}

#[test]
fn raw_control_byte_in_string() {
    assert_fails(
        "{\"a\tb\":1}",
        "disallowed control character 0x09 in JSON string at 1:4",
    );
}

#[test]
fn position_tracks_lines() {
    assert_fails("{\n\"a\":\nx}", "value expected at 3:1");
}

#[test]
fn nesting_too_deep() {
    let input = "[".repeat(400);
    let err = convert_err(&input);
    assert!(matches!(err.kind(), ErrorKind::TooDeep));
}

#[test]
fn failed_member_emits_no_terminator() {
    let mut out = Vec::new();
    let result = crate::convert(
        &br#"{"a":}"#[..],
        &mut out,
        &crate::Options::default(),
    );
    assert!(result.is_err());
    // the identifier prefix has streamed, but no line was completed
    assert!(!out.contains(&b'\n'));
}
