//! Line search and rewrite over a note body
//!
//! Patterns are applied to each body line separately (terminator excluded),
//! so `^` and `$` anchor to the line. Front matter is never searched or
//! rewritten, and rewritten lines keep their original terminator.

use crate::document::{lines, split_document};
use crate::error::NoteResult;
use regex::{Regex, RegexBuilder};

/// Options for [`find_lines`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Match case exactly (default `true`)
    pub case_sensitive: bool,
    /// Require word boundaries around the pattern
    pub whole_word: bool,
    /// Return this capture group instead of the whole line
    pub capture_group: Option<usize>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            whole_word: false,
            capture_group: None,
        }
    }
}

impl SearchOptions {
    /// Default options: case-sensitive, whole lines returned
    pub fn new() -> Self {
        Self::default()
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn whole_word(mut self, whole_word: bool) -> Self {
        self.whole_word = whole_word;
        self
    }

    pub fn capture_group(mut self, group: usize) -> Self {
        self.capture_group = Some(group);
        self
    }

    fn build(&self, pattern: &str) -> NoteResult<Regex> {
        let pattern = if self.whole_word {
            format!(r"\b(?:{pattern})\b")
        } else {
            pattern.to_string()
        };
        Ok(RegexBuilder::new(&pattern)
            .case_insensitive(!self.case_sensitive)
            .build()?)
    }
}

/// Body lines matching `pattern`
///
/// With a capture group set, the group's text is returned instead and lines
/// where the group didn't participate are skipped.
pub fn find_lines(text: &str, pattern: &str, options: &SearchOptions) -> NoteResult<Vec<String>> {
    let regex = options.build(pattern)?;
    let body = split_document(text).body;

    let found = lines(body)
        .filter_map(|line| match options.capture_group {
            None => regex.is_match(line.content).then(|| line.content.to_string()),
            Some(group) => regex
                .captures(line.content)
                .and_then(|caps| caps.get(group))
                .map(|m| m.as_str().to_string()),
        })
        .collect();

    Ok(found)
}

/// Result of rewriting body lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRewrite {
    /// Document after the rewrite
    pub content: String,
    /// New text of every line that changed, in document order
    pub modified: Vec<String>,
}

impl LineRewrite {
    /// Whether any line changed
    pub fn changed(&self) -> bool {
        !self.modified.is_empty()
    }
}

/// Rewrite body lines with `f`; `None` or an identical string leaves a line alone
pub fn rewrite_lines<F>(text: &str, mut f: F) -> LineRewrite
where
    F: FnMut(&str) -> Option<String>,
{
    let body = split_document(text).body;
    let head = &text[..text.len() - body.len()];

    let mut content = String::with_capacity(text.len());
    content.push_str(head);
    let mut modified = Vec::new();

    for line in lines(body) {
        match f(line.content) {
            Some(new) if new != line.content => {
                content.push_str(&new);
                modified.push(new);
            }
            _ => content.push_str(line.content),
        }
        content.push_str(line.ending);
    }

    LineRewrite { content, modified }
}

/// Replace every match of `pattern` on each body line
///
/// `replacement` may reference groups as `$1` or `${name}`.
pub fn replace_lines(text: &str, pattern: &str, replacement: &str) -> NoteResult<LineRewrite> {
    let regex = Regex::new(pattern)?;
    Ok(rewrite_lines(text, |line| {
        regex
            .is_match(line)
            .then(|| regex.replace_all(line, replacement).into_owned())
    }))
}
