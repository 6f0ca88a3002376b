//! End-to-end checks through the public surface only.

use json2sh::{convert, unescape, ErrorKind, Options};

#[test]
fn converts_a_document_with_custom_options() {
    let opts = Options::from_args(Some("CFG_"), None, Some(r"\n"));
    let input = br#"{"host": "db.local", "port": 5432, "tls": true}"#;
    let mut out = Vec::new();
    convert(&input[..], &mut out, &opts).unwrap();
    assert_eq!(
        out,
        b"CFG_host='db.local'\nCFG_port=5432\nCFG_tls=$JSON_true_\n"
    );
}

#[test]
fn errors_carry_position_and_kind() {
    let mut out = Vec::new();
    let err = convert(&b"[1,\n 2,]"[..], &mut out, &Options::default()).unwrap_err();
    assert_eq!((err.line(), err.column()), (2, 4));
    assert!(matches!(err.kind(), ErrorKind::ValueExpected));
    assert_eq!(err.to_string(), "value expected at 2:4");
}

#[test]
fn unescape_decodes_argument_literals() {
    assert_eq!(unescape(br"\t-\x3d-\0101", b'\\'), b"\t-=-A");
    assert_eq!(unescape(b"untouched", b'\\'), b"untouched");
}
