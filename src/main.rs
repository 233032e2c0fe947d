//! Command-line front end: render a markup file and print the result.
//!
//! ```text
//! markup_render <file> [--width N] [--height N] [--scroll N] [--tree]
//! ```
//!
//! Prints the draw commands visible in the viewport, or the node tree with
//! `--tree`. Set `RUST_LOG=debug` to trace the pipeline.

use anyhow::{bail, Context, Result};
use common::{Color, Rect};
use font::{FontCache, FontKey, TrueTypeMetrics};
use layout::LayoutConfig;
use markup_render::Browser;
use paint::Canvas;

/// Parsed command-line options.
#[derive(Debug, PartialEq)]
struct Options {
    path: String,
    config: LayoutConfig,
    scroll: f32,
    tree: bool,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options> {
    let mut path = None;
    let mut config = LayoutConfig::default();
    let mut scroll = 0.0;
    let mut tree = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--width" => config.width = number(&arg, args.next())?,
            "--height" => config.height = number(&arg, args.next())?,
            "--scroll" => scroll = number(&arg, args.next())?,
            "--tree" => tree = true,
            flag if flag.starts_with("--") => bail!("unknown option {flag}"),
            _ if path.is_none() => path = Some(arg.clone()),
            _ => bail!("unexpected argument {arg}"),
        }
    }

    let Some(path) = path else {
        bail!("usage: markup_render <file> [--width N] [--height N] [--scroll N] [--tree]");
    };
    Ok(Options {
        path,
        config,
        scroll,
        tree,
    })
}

fn number(flag: &str, value: Option<String>) -> Result<f32> {
    let value = value.with_context(|| format!("{flag} needs a value"))?;
    value
        .parse()
        .with_context(|| format!("{flag}: '{value}' is not a number"))
}

/// Collects draw calls as printable lines.
#[derive(Default)]
struct TextCanvas {
    lines: Vec<String>,
}

impl Canvas for TextCanvas {
    fn create_text(&mut self, x: f32, y: f32, text: &str, font: FontKey) {
        self.lines
            .push(format!("text {x:>7.1} {y:>7.1}  [{font}] {text}"));
    }

    fn create_rectangle(&mut self, rect: Rect, color: Color) {
        self.lines.push(format!(
            "rect {:>7.1} {:>7.1} {:>7.1} {:>7.1}  {color}",
            rect.left, rect.top, rect.right, rect.bottom
        ));
    }
}

fn font_cache() -> FontCache {
    match TrueTypeMetrics::load_system_font() {
        Ok(metrics) => FontCache::new(metrics),
        Err(e) => {
            log::warn!("{e}; using approximate font metrics");
            FontCache::default()
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let options = parse_args(std::env::args().skip(1))?;
    let text = std::fs::read_to_string(&options.path)
        .with_context(|| format!("failed to read {}", options.path))?;

    let mut browser = Browser::new(options.config, font_cache());
    browser.load(&text);

    let Some(page) = browser.page() else {
        bail!("{} produced no document", options.path);
    };
    if options.tree {
        if let Some(root) = page.dom.root() {
            print!("{}", page.dom.dump(root));
        }
        return Ok(());
    }

    browser.scroll_to(options.scroll);
    let mut canvas = TextCanvas::default();
    browser.draw(&mut canvas);
    for line in &canvas.lines {
        println!("{line}");
    }
    log::info!(
        "drew {} commands at scroll {} of {}",
        canvas.lines.len(),
        browser.scroll(),
        browser.max_scroll()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn defaults() {
        let opts = parse_args(args(&["page.html"])).unwrap();
        assert_eq!(opts.path, "page.html");
        assert_eq!(opts.config, LayoutConfig::default());
        assert_eq!(opts.scroll, 0.0);
        assert!(!opts.tree);
    }

    #[test]
    fn all_options() {
        let opts = parse_args(args(&[
            "--width", "400", "page.html", "--height", "300", "--scroll", "50", "--tree",
        ]))
        .unwrap();
        assert_eq!(opts.config.width, 400.0);
        assert_eq!(opts.config.height, 300.0);
        assert_eq!(opts.scroll, 50.0);
        assert!(opts.tree);
    }

    #[test]
    fn errors() {
        assert!(parse_args(args(&[])).is_err());
        assert!(parse_args(args(&["a", "b"])).is_err());
        assert!(parse_args(args(&["a", "--width"])).is_err());
        assert!(parse_args(args(&["a", "--width", "wide"])).is_err());
        assert!(parse_args(args(&["a", "--bogus"])).is_err());
    }
}
