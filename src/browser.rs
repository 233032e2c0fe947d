//! The browser shell: one loaded page, a scroll offset and a viewport.

use dom::Dom;
use font::FontCache;
use layout::{LayoutConfig, LayoutTree};
use paint::{Canvas, DisplayItem, DisplayList};

/// Distance moved by one scroll step.
pub const SCROLL_STEP: f32 = 100.0;

// ─────────────────────────────────────────────────────────────────────────────
// Page
// ─────────────────────────────────────────────────────────────────────────────

/// Everything produced by loading one document.
pub struct Page {
    pub dom: Dom,
    pub layout_tree: LayoutTree,
    pub display_list: DisplayList,
}

// ─────────────────────────────────────────────────────────────────────────────
// Browser
// ─────────────────────────────────────────────────────────────────────────────

pub struct Browser {
    config: LayoutConfig,
    fonts: FontCache,
    page: Option<Page>,
    scroll: f32,
}

impl Browser {
    /// A browser with no page loaded. `fonts` lives as long as the browser.
    pub fn new(config: LayoutConfig, fonts: FontCache) -> Self {
        Self {
            config,
            fonts,
            page: None,
            scroll: 0.0,
        }
    }

    /// Replace the current page with `text` and scroll back to the top.
    pub fn load(&mut self, text: &str) {
        let dom = html::parse(text);
        let Some(root) = dom.root() else {
            return;
        };
        let layout_tree = layout::layout(&dom, root, &self.config, &mut self.fonts);
        let display_list = paint::build_display_list(&layout_tree, &dom, &mut self.fonts);
        log::debug!(
            "loaded page: {} nodes, {} draw commands",
            dom.nodes.len(),
            display_list.len()
        );
        self.page = Some(Page {
            dom,
            layout_tree,
            display_list,
        });
        self.scroll = 0.0;
    }

    pub fn page(&self) -> Option<&Page> {
        self.page.as_ref()
    }

    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    /// Furthest scroll offset: the page bottom plus one margin lines up with
    /// the viewport bottom. Never negative.
    pub fn max_scroll(&self) -> f32 {
        let height = self.page.as_ref().map_or(0.0, |p| p.layout_tree.height());
        (height + 2.0 * self.config.v_step - self.config.height).max(0.0)
    }

    /// Advance by [`SCROLL_STEP`], stopping at [`max_scroll`](Self::max_scroll).
    pub fn scroll_down(&mut self) {
        self.scroll = (self.scroll + SCROLL_STEP).min(self.max_scroll());
    }

    /// Jump to `y`, clamped to the scrollable range.
    pub fn scroll_to(&mut self, y: f32) {
        self.scroll = y.clamp(0.0, self.max_scroll());
    }

    /// Draw commands that intersect the viewport at the current scroll.
    pub fn visible_items(&self) -> impl Iterator<Item = &DisplayItem> {
        let (scroll, height) = (self.scroll, self.config.height);
        self.page
            .iter()
            .flat_map(|p| p.display_list.iter())
            .filter(move |item| item.is_visible(scroll, height))
    }

    /// Paint the visible part of the page onto `canvas`, in display-list
    /// order. Returns the number of commands issued.
    pub fn draw(&self, canvas: &mut dyn Canvas) -> usize {
        let mut drawn = 0;
        for item in self.visible_items() {
            item.execute(self.scroll, canvas);
            drawn += 1;
        }
        drawn
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
