//! Reveal-on-scroll.
//!
//! Elements tagged `.reveal` gain `active` once their top edge comes within
//! the configured margin of the viewport bottom. The class is only ever
//! added, so running the pass repeatedly is harmless; it runs on page-ready,
//! on `load` and on every `scroll` without debouncing.

use crate::config::RevealConfig;
use crate::page::{EventKind, Flow, Page, Target, handler};

pub const REVEAL_SELECTOR: &str = ".reveal";
pub const ACTIVE_CLASS: &str = "active";

/// True when an element whose top sits at `top` (viewport coordinates)
/// counts as visible.
pub fn is_revealed(top: f64, viewport_height: f64, margin: f64) -> bool {
    top < viewport_height - margin
}

/// Activate every revealable element currently in range. Returns how many
/// elements are active after the pass.
pub fn reveal_all<P: Page>(page: &P, config: &RevealConfig) -> usize {
    let height = page.viewport_height();
    let mut active = 0;
    for element in page.query_all(REVEAL_SELECTOR) {
        if is_revealed(page.rect_top(&element), height, config.visible_margin) {
            page.add_class(&element, ACTIVE_CLASS);
        }
        if page.has_class(&element, ACTIVE_CLASS) {
            active += 1;
        }
    }
    active
}

/// Re-run the reveal pass on window `load` and `scroll`.
pub fn wire<P: Page>(page: &P, config: &RevealConfig) {
    for kind in [EventKind::Load, EventKind::Scroll] {
        let config = config.clone();
        page.listen(
            Target::Window,
            kind,
            handler(move |page: &P, _| {
                reveal_all(page, &config);
                Flow::Continue
            }),
        );
    }
}
