//! Pulls the Drive file identifier out of a pasted share link.
//!
//! Only one link shape is understood: an `id=<token>` query-style
//! parameter, where the token runs until the next `&` or whitespace.
//! The match is not anchored to a parameter boundary, so `fid=` or
//! `?resourceid=` also satisfy it.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static FILE_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"id=([^&\s]+)").expect("file id pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmbedError {
    /// The pasted text has no `id=` parameter followed by a token.
    #[error("No `id=` parameter found in the pasted text")]
    PatternNotFound,
}

/// Identifier of a Drive file as it appears in the share link.
///
/// No validation is applied beyond what the extraction pattern implies.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileId(String);

impl FileId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Return the token following the first `id=` in `raw`.
///
/// Later `id=` occurrences are ignored. An `id=` immediately followed by
/// `&`, whitespace or the end of input does not count as a match, and
/// the search moves on to the next occurrence.
pub fn extract(raw: &str) -> Result<FileId, EmbedError> {
    FILE_ID_PATTERN
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|token| FileId::new(token.as_str()))
        .ok_or(EmbedError::PatternNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_id_before_next_parameter() {
        let id = extract("https://drive.google.com/open?id=ABC123&foo=bar").unwrap();
        assert_eq!(id.as_str(), "ABC123");
    }

    #[test]
    fn extracts_id_at_end_of_input() {
        assert_eq!(extract("...id=XYZ").unwrap().as_str(), "XYZ");
    }

    #[test]
    fn missing_parameter_is_pattern_not_found() {
        assert_eq!(
            extract("no id parameter here"),
            Err(EmbedError::PatternNotFound)
        );
        assert_eq!(extract(""), Err(EmbedError::PatternNotFound));
    }

    #[test]
    fn only_first_match_is_used() {
        let id = extract("https://x.test/?id=first&id=second").unwrap();
        assert_eq!(id.as_str(), "first");
    }

    #[test]
    fn token_stops_at_whitespace() {
        let id = extract("id=1a2b3c trailing words\nid=other").unwrap();
        assert_eq!(id.as_str(), "1a2b3c");
    }

    #[test]
    fn empty_token_falls_through_to_next_occurrence() {
        let id = extract("?id=&usp=sharing&resourceid=R-9").unwrap();
        assert_eq!(id.as_str(), "R-9");

        assert_eq!(extract("id= id=\t"), Err(EmbedError::PatternNotFound));
    }

    #[test]
    fn pattern_is_not_anchored_to_parameter_name() {
        let id = extract("https://example.test/?fid=hidden").unwrap();
        assert_eq!(id.as_str(), "hidden");
    }

    #[test]
    fn token_keeps_punctuation_and_unicode() {
        let id = extract("open?id=1-_Abc.%20ü#frag&x=1").unwrap();
        assert_eq!(id.as_str(), "1-_Abc.%20ü#frag");
    }

    #[test]
    fn recovers_tokens_embedded_after_id_prefix() {
        for token in ["1BxiMVs0XRA5nFMdKvBdBZjgmUUqptlbs74OgvE2upms", "a", "x=y", "\"q\""] {
            let raw = format!("https://drive.google.com/open?id={token}");
            assert_eq!(extract(&raw).unwrap().as_str(), token);
        }
    }
}
