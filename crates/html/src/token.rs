//! Token types produced by the tokenizer.

/// A single token emitted by the [`Tokenizer`](crate::Tokenizer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlToken {
    /// Raw text between tags, whitespace preserved.
    Text(String),
    /// Everything between `<` and `>`, split into a name and attributes.
    ///
    /// `name` is case-folded and keeps any leading `/` (closers) or `!`
    /// (declarations and comments).
    Tag {
        name: String,
        attrs: Vec<(String, String)>,
    },
}
