mod parse_bad;

use crate::{Error, Options};

pub(crate) fn convert_with(input: &str, options: &Options) -> String {
    let mut out = Vec::new();
    crate::convert(input.as_bytes(), &mut out, options).expect("conversion failed");
    String::from_utf8(out).expect("output is not UTF-8")
}

pub(crate) fn convert_default(input: &str) -> String {
    convert_with(input, &Options::default())
}

pub(crate) fn convert_err(input: &str) -> Error {
    let mut out = Vec::new();
    crate::convert(input.as_bytes(), &mut out, &Options::default())
        .expect_err("conversion unexpectedly succeeded")
}
