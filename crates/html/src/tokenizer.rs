//! Character-level markup tokenizer.
//!
//! A single scan that tracks whether it is inside a tag. Outside a tag
//! characters collect into text; `<` ends the text and starts a tag, `>`
//! ends the tag.

use crate::token::HtmlToken;

/// Markup tokenizer. Iterate it to receive [`HtmlToken`]s.
pub struct Tokenizer<'a> {
    input: std::str::Chars<'a>,
    buffer: String,
    in_tag: bool,
    finished: bool,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input: input.chars(),
            buffer: String::new(),
            in_tag: false,
            finished: false,
        }
    }

    /// Produce the next token, or `None` once the input is exhausted.
    pub fn next_token(&mut self) -> Option<HtmlToken> {
        while let Some(c) = self.input.next() {
            match c {
                '<' => {
                    // Whatever was buffered becomes text, including the
                    // remains of a tag that never saw its `>`.
                    self.in_tag = true;
                    if !self.buffer.is_empty() {
                        return Some(HtmlToken::Text(std::mem::take(&mut self.buffer)));
                    }
                }
                '>' if self.in_tag => {
                    self.in_tag = false;
                    let raw = std::mem::take(&mut self.buffer);
                    if let Some(token) = parse_tag(&raw) {
                        return Some(token);
                    }
                }
                // A `>` with no open tag is ordinary text, not a tag end.
                _ => self.buffer.push(c),
            }
        }

        if self.finished {
            return None;
        }
        self.finished = true;
        // An unterminated trailing tag is dropped.
        if !self.in_tag && !self.buffer.is_empty() {
            return Some(HtmlToken::Text(std::mem::take(&mut self.buffer)));
        }
        self.buffer.clear();
        None
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = HtmlToken;

    fn next(&mut self) -> Option<HtmlToken> {
        self.next_token()
    }
}

/// Split raw tag text into a case-folded name and its attributes.
///
/// Attribute tokens are whitespace separated. `key=value` keeps the value
/// verbatim (quotes included); a bare token maps to the empty string.
/// Returns `None` for an empty tag such as `<>`.
pub fn parse_tag(raw: &str) -> Option<HtmlToken> {
    let mut parts = raw.split_whitespace();
    let name = parts.next()?.to_lowercase();
    let attrs = parts
        .map(|part| match part.split_once('=') {
            Some((key, value)) => (key.to_lowercase(), value.to_string()),
            None => (part.to_lowercase(), String::new()),
        })
        .collect();
    Some(HtmlToken::Tag { name, attrs })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenize(input: &str) -> Vec<HtmlToken> {
        Tokenizer::new(input).collect()
    }

    fn tag(name: &str) -> HtmlToken {
        HtmlToken::Tag {
            name: name.to_string(),
            attrs: Vec::new(),
        }
    }

    fn text(s: &str) -> HtmlToken {
        HtmlToken::Text(s.to_string())
    }

    #[test]
    fn simple_element() {
        assert_eq!(tokenize("<p>hi</p>"), vec![tag("p"), text("hi"), tag("/p")]);
    }

    #[test]
    fn tag_names_are_case_folded() {
        assert_eq!(tokenize("<DIV></Div>"), vec![tag("div"), tag("/div")]);
    }

    #[test]
    fn whitespace_text_is_still_emitted() {
        // Discarding whitespace-only text is the tree builder's job.
        assert_eq!(tokenize("<b> </b>"), vec![tag("b"), text(" "), tag("/b")]);
    }

    #[test]
    fn attributes_keep_quotes() {
        let tokens = tokenize(r#"<a HREF="/x" Target='_blank' hidden>"#);
        assert_eq!(
            tokens,
            vec![HtmlToken::Tag {
                name: "a".into(),
                attrs: vec![
                    ("href".into(), "\"/x\"".into()),
                    ("target".into(), "'_blank'".into()),
                    ("hidden".into(), String::new()),
                ],
            }]
        );
    }

    #[test]
    fn value_may_contain_equals() {
        let tokens = tokenize("<a href=a=b>");
        assert_eq!(
            tokens,
            vec![HtmlToken::Tag {
                name: "a".into(),
                attrs: vec![("href".into(), "a=b".into())],
            }]
        );
    }

    #[test]
    fn declarations_and_closers_keep_prefix() {
        let tokens = tokenize("<!DOCTYPE html></p>");
        assert_eq!(
            tokens,
            vec![
                HtmlToken::Tag {
                    name: "!doctype".into(),
                    attrs: vec![("html".into(), String::new())],
                },
                tag("/p"),
            ]
        );
    }

    #[test]
    fn trailing_text_is_flushed() {
        assert_eq!(tokenize("<p>tail"), vec![tag("p"), text("tail")]);
    }

    #[test]
    fn unterminated_tag_is_dropped() {
        assert_eq!(tokenize("text<p class"), vec![text("text")]);
    }

    #[test]
    fn empty_tag_is_skipped() {
        assert_eq!(tokenize("a<>b"), vec![text("a"), text("b")]);
    }

    #[test]
    fn gt_outside_tag_is_text() {
        assert_eq!(tokenize("a > b"), vec![text("a > b")]);
    }

    #[test]
    fn lt_inside_tag_restarts_it() {
        assert_eq!(tokenize("<a <b>"), vec![text("a "), tag("b")]);
    }

    #[test]
    fn empty_input() {
        assert!(tokenize("").is_empty());
    }
}
