//! Prefix / separator / terminator configuration.

use bstr::BString;

use crate::unescape::unescape;

/// Output configuration for one conversion.
///
/// Each string may be given as a backslash-escaped literal: a leading `\`
/// triggers one round of [`unescape`] at construction time, and
/// already-literal strings pass through untouched (`\i` arms de-escaping
/// for an argument that must itself start with a backslash).
#[derive(Debug, Clone)]
pub struct Options {
    /// Name prefix prepended to every identifier.
    ///
    /// Emitted verbatim; keeping it inside the identifier alphabet is the
    /// caller's business. Default: `JSON_`.
    pub prefix: BString,
    /// Assignment separator between identifier and value literal.
    /// Default: `=`.
    pub separator: BString,
    /// Line terminator, emitted before each replayed line and once after
    /// the final one. Default: newline.
    pub terminator: BString,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            prefix: BString::from("JSON_"),
            separator: BString::from("="),
            terminator: BString::from("\n"),
        }
    }
}

impl Options {
    /// Build options from raw command-line arguments, applying the leading
    /// backslash de-escape rule to each and defaulting the missing ones.
    #[must_use]
    pub fn from_args(
        prefix: Option<&str>,
        separator: Option<&str>,
        terminator: Option<&str>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            prefix: prefix.map_or(defaults.prefix, decode_arg),
            separator: separator.map_or(defaults.separator, decode_arg),
            terminator: terminator.map_or(defaults.terminator, decode_arg),
        }
    }
}

fn decode_arg(s: &str) -> BString {
    if s.as_bytes().first() == Some(&b'\\') {
        BString::from(unescape(s.as_bytes(), b'\\'))
    } else {
        BString::from(s)
    }
}

#[cfg(test)]
mod tests {
    use super::Options;

    #[test]
    fn defaults() {
        let opts = Options::default();
        assert_eq!(opts.prefix, "JSON_");
        assert_eq!(opts.separator, "=");
        assert_eq!(opts.terminator, "\n");
    }

    #[test]
    fn leading_backslash_arms_deescaping() {
        let opts = Options::from_args(None, None, Some(r"\r\n"));
        assert_eq!(opts.terminator, "\r\n");
    }

    #[test]
    fn literal_arguments_pass_through() {
        let opts = Options::from_args(Some("VAR_"), Some(": "), None);
        assert_eq!(opts.prefix, "VAR_");
        assert_eq!(opts.separator, ": ");
        assert_eq!(opts.terminator, "\n");
    }

    #[test]
    fn copy_rest_keeps_backslashes() {
        let opts = Options::from_args(Some(r"\C\n"), None, None);
        assert_eq!(opts.prefix, r"\n");
    }
}
