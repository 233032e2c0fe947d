//! Headless markup renderer.
//!
//! Ties the pipeline together: [`html`] builds the node tree, [`layout`]
//! computes geometry, [`paint`] emits draw commands, and [`Browser`] owns
//! the result together with a scroll position.

pub mod browser;

pub use browser::{Browser, Page, SCROLL_STEP};
