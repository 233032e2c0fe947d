//! Markup parser: tokenizer and tree builder.
//!
//! Turns a markup string into a [`dom::Dom`] tree. Malformed input is never
//! rejected: missing structure is inserted and unbalanced tags are repaired.

pub mod token;
pub mod tokenizer;
pub mod tree_builder;

pub use token::HtmlToken;
pub use tokenizer::Tokenizer;
pub use tree_builder::TreeBuilder;

/// Convenience function: parse a markup string into a DOM tree.
///
/// ```
/// let dom = html::parse("<p>Hello</p>");
/// assert!(dom.root().is_some());
/// ```
pub fn parse(text: &str) -> dom::Dom {
    tree_builder::parse(text)
}
