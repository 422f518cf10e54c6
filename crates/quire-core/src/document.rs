//! Document splitting
//!
//! Separates a raw note into its optional YAML front matter block and the
//! body that follows it, and detects which line ending convention the note
//! uses. Everything here borrows from the raw text so callers can rebuild
//! the document byte-for-byte.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Front matter at offset 0: `---<eol>`, lazily any text, then a line that is
/// exactly `---<eol>`. CRLF mode lets `^` match after `\r` as well as `\n`.
static FRONTMATTER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?sR)\A(---(?:\r\n|\r|\n))(.*?)(?m:^)(---(?:\r\n|\r|\n))")
        .expect("frontmatter regex")
});

/// Line ending convention of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    CrLf,
    /// `\r`
    Cr,
}

impl LineEnding {
    /// Detect the convention: first `\r\n`, else `\n`, else `\r`, else `\n`
    pub fn detect(text: &str) -> Self {
        if text.contains("\r\n") {
            Self::CrLf
        } else if text.contains('\n') {
            Self::Lf
        } else if text.contains('\r') {
            Self::Cr
        } else {
            Self::Lf
        }
    }

    /// The literal line terminator
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
            Self::Cr => "\r",
        }
    }
}

impl fmt::Display for LineEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detect the line ending used by `text`
pub fn detect_line_ending(text: &str) -> LineEnding {
    LineEnding::detect(text)
}

/// Leading front matter block, borrowed from the raw document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontmatterBlock<'a> {
    /// Opening delimiter including its line ending
    pub start_marker: &'a str,
    /// Raw text between the delimiters, not YAML-parsed
    pub body: &'a str,
    /// Closing delimiter including its line ending
    pub end_marker: &'a str,
}

impl FrontmatterBlock<'_> {
    /// Byte length of the whole block, markers included
    pub fn len(&self) -> usize {
        self.start_marker.len() + self.body.len() + self.end_marker.len()
    }

    /// Always false; a block has at least its two markers
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// A raw document split into its regions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitDocument<'a> {
    /// Front matter, if the document starts with one
    pub frontmatter: Option<FrontmatterBlock<'a>>,
    /// Everything after the closing marker, or the whole document
    pub body: &'a str,
}

/// Locate the front matter block at the very start of `text`
///
/// Returns `None` when the document doesn't open with a bare `---` line or
/// the block is never closed.
pub fn split_frontmatter(text: &str) -> Option<FrontmatterBlock<'_>> {
    let caps = FRONTMATTER_REGEX.captures(text)?;
    Some(FrontmatterBlock {
        start_marker: caps.get(1)?.as_str(),
        body: caps.get(2)?.as_str(),
        end_marker: caps.get(3)?.as_str(),
    })
}

/// Split `text` into front matter and body
pub fn split_document(text: &str) -> SplitDocument<'_> {
    match split_frontmatter(text) {
        Some(block) => SplitDocument {
            body: &text[block.len()..],
            frontmatter: Some(block),
        },
        None => SplitDocument {
            frontmatter: None,
            body: text,
        },
    }
}

/// One line of text together with the terminator that ended it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// Line content without its terminator
    pub content: &'a str,
    /// `"\n"`, `"\r\n"`, `"\r"`, or `""` for a final unterminated line
    pub ending: &'a str,
}

/// Iterator over lines split on any of the three line endings
///
/// Unlike [`str::lines`], a lone `\r` also ends a line and every terminator
/// is kept, so concatenating `content + ending` reproduces the input.
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    rest: &'a str,
}

/// Iterate over the lines of `text`, keeping their terminators
pub fn lines(text: &str) -> Lines<'_> {
    Lines { rest: text }
}

impl<'a> Iterator for Lines<'a> {
    type Item = Line<'a>;

    fn next(&mut self) -> Option<Line<'a>> {
        if self.rest.is_empty() {
            return None;
        }

        let line = match self.rest.find(['\r', '\n']) {
            Some(idx) => {
                let ending_len = if self.rest[idx..].starts_with("\r\n") {
                    2
                } else {
                    1
                };
                let line = Line {
                    content: &self.rest[..idx],
                    ending: &self.rest[idx..idx + ending_len],
                };
                self.rest = &self.rest[idx + ending_len..];
                line
            }
            None => {
                let line = Line {
                    content: self.rest,
                    ending: "",
                };
                self.rest = "";
                line
            }
        };

        Some(line)
    }
}

/// Whether `text` ends with any line terminator
pub fn ends_with_line_ending(text: &str) -> bool {
    text.ends_with('\n') || text.ends_with('\r')
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("a\r\nb\nc", LineEnding::CrLf ; "crlf wins even when mixed")]
    #[test_case("a\nb\rc", LineEnding::Lf ; "lf before lone cr")]
    #[test_case("a\rb", LineEnding::Cr ; "classic mac")]
    #[test_case("single line", LineEnding::Lf ; "defaults to lf")]
    #[test_case("", LineEnding::Lf ; "empty")]
    fn test_detect_line_ending(text: &str, expected: LineEnding) {
        assert_eq!(detect_line_ending(text), expected);
    }

    #[test_case("\n" ; "lf")]
    #[test_case("\r\n" ; "crlf")]
    #[test_case("\r" ; "cr")]
    fn test_split_frontmatter_each_line_ending(eol: &str) {
        let text = format!("---{eol}title: Test{eol}---{eol}Body{eol}");
        let block = split_frontmatter(&text).expect("frontmatter");

        assert_eq!(block.start_marker, format!("---{eol}"));
        assert_eq!(block.body, format!("title: Test{eol}"));
        assert_eq!(block.end_marker, format!("---{eol}"));
        assert_eq!(split_document(&text).body, format!("Body{eol}"));
    }

    #[test]
    fn test_split_frontmatter_mixed_endings() {
        let text = "---\r\ntitle: A\nstate: b\r---\nrest";
        let block = split_frontmatter(text).unwrap();
        assert_eq!(block.start_marker, "---\r\n");
        assert_eq!(block.body, "title: A\nstate: b\r");
        assert_eq!(block.end_marker, "---\n");
        assert_eq!(split_document(text).body, "rest");
    }

    #[test]
    fn test_empty_frontmatter() {
        let block = split_frontmatter("---\n---\nbody").unwrap();
        assert_eq!(block.body, "");
        assert_eq!(block.len(), 8);
    }

    #[test]
    fn test_frontmatter_must_start_at_offset_zero() {
        assert!(split_frontmatter("\n---\ntitle: x\n---\n").is_none());
        assert!(split_frontmatter("Intro\n---\ntitle: x\n---\n").is_none());
        assert!(split_frontmatter(" ---\ntitle: x\n---\n").is_none());
    }

    #[test]
    fn test_unclosed_frontmatter_is_absent() {
        let text = "---\ntitle: x\nno closing marker\n";
        assert!(split_frontmatter(text).is_none());
        let split = split_document(text);
        assert!(split.frontmatter.is_none());
        assert_eq!(split.body, text);
    }

    #[test]
    fn test_closing_marker_needs_line_ending() {
        assert!(split_frontmatter("---\ntitle: x\n---").is_none());
    }

    #[test]
    fn test_marker_lines_must_be_bare() {
        assert!(split_frontmatter("----\ntitle: x\n---\n").is_none());
        let text = "---\ntitle: x\n--- not a marker\n---\nbody";
        let block = split_frontmatter(text).unwrap();
        assert_eq!(block.body, "title: x\n--- not a marker\n");
    }

    #[test]
    fn test_stops_at_first_closing_marker() {
        let text = "---\na: 1\n---\nbody\n---\nmore\n";
        let split = split_document(text);
        assert_eq!(split.frontmatter.unwrap().body, "a: 1\n");
        assert_eq!(split.body, "body\n---\nmore\n");
    }

    #[test]
    fn test_lines_keep_terminators() {
        let text = "one\r\ntwo\nthree\rfour";
        let collected: Vec<_> = lines(text).map(|l| (l.content, l.ending)).collect();
        assert_eq!(
            collected,
            vec![
                ("one", "\r\n"),
                ("two", "\n"),
                ("three", "\r"),
                ("four", ""),
            ]
        );
        let rebuilt: String = lines(text).map(|l| format!("{}{}", l.content, l.ending)).collect();
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn test_lines_blank_lines() {
        let collected: Vec<_> = lines("\n\nx\n").map(|l| l.content).collect();
        assert_eq!(collected, vec!["", "", "x"]);
        assert_eq!(lines("").count(), 0);
    }
}
