//! In-page navigation.
//!
//! Clicking a navigation anchor whose `href` is a fragment scrolls smoothly
//! to the target section, leaving room for the fixed header, then collapses
//! the work dropdown for a moment so the mobile menu closes behind the
//! click. The default jump is suppressed for every fragment link, whether or
//! not its target exists.
//!
//! On narrow viewports the work dropdown also opens on tap: the toggle flips
//! the menu between shown and hidden, and a click anywhere outside the
//! dropdown hides it.

use crate::config::ScrollConfig;
use crate::page::{EventKind, Flow, Page, PageEvent, Target, handler};

pub const ANCHOR_SELECTOR: &str = "nav a[href^=\"#\"]";
pub const DROPDOWN_MENU_SELECTOR: &str = ".work-dropdown .dropdown-menu";
pub const WORK_TOGGLE_SELECTOR: &str = ".work-toggle";
pub const WORK_DROPDOWN_SELECTOR: &str = ".work-dropdown";
pub const MENU_SELECTOR: &str = ".dropdown-menu";

/// Document position to scroll to so the target lands below the header.
pub fn scroll_target(rect_top: f64, scroll_y: f64, header_offset: f64) -> f64 {
    rect_top + scroll_y - header_offset
}

/// The fragment id an `href` points at, if it is an in-page link.
pub fn fragment(href: &str) -> Option<&str> {
    href.strip_prefix('#')
}

/// Handle a click on a navigation anchor.
pub fn follow_anchor<P: Page>(page: &P, anchor: &P::Element, config: &ScrollConfig) -> Flow {
    let Some(href) = page.attribute(anchor, "href") else {
        return Flow::Continue;
    };
    let Some(id) = fragment(&href) else {
        return Flow::Continue;
    };

    let target = if id.is_empty() {
        None
    } else {
        page.element_by_id(id)
    };
    if let Some(target) = target {
        let top = scroll_target(page.rect_top(&target), page.scroll_y(), config.header_offset);
        page.smooth_scroll_to(top);
        collapse_dropdown(page, config.dropdown_restore_ms);
    }
    Flow::PreventDefault
}

/// Hide the dropdown menu now and hand its display back to the stylesheet
/// after `restore_ms`.
pub fn collapse_dropdown<P: Page>(page: &P, restore_ms: u32) {
    let Some(menu) = page.query(DROPDOWN_MENU_SELECTOR) else {
        return;
    };
    page.set_style(&menu, "display", "none");
    page.set_timeout(
        restore_ms,
        Box::new(move |page: &P| page.set_style(&menu, "display", "")),
    );
}

/// Wire smooth scrolling on every navigation anchor.
pub fn wire_anchors<P: Page>(page: &P, config: &ScrollConfig) -> usize {
    let anchors = page.query_all(ANCHOR_SELECTOR);
    for anchor in &anchors {
        let config = config.clone();
        let anchor_el = anchor.clone();
        page.listen(
            Target::Element(anchor.clone()),
            EventKind::Click,
            handler(move |page: &P, _| follow_anchor(page, &anchor_el, &config)),
        );
    }
    anchors.len()
}

/// Wire the tap-to-open work dropdown. Only applies when the viewport is at
/// most `mobile_breakpoint` wide at the time of wiring.
pub fn wire_mobile_dropdown<P: Page>(page: &P, config: &ScrollConfig) -> bool {
    if page.viewport_width() > config.mobile_breakpoint {
        return false;
    }
    let (Some(toggle), Some(dropdown)) = (
        page.query(WORK_TOGGLE_SELECTOR),
        page.query(WORK_DROPDOWN_SELECTOR),
    ) else {
        return false;
    };

    let menu_root = dropdown.clone();
    page.listen(
        Target::Element(toggle),
        EventKind::Click,
        handler(move |page: &P, _| {
            if let Some(menu) = page.query_within(&menu_root, MENU_SELECTOR) {
                let shown = page.style(&menu, "display") == "block";
                page.set_style(&menu, "display", if shown { "none" } else { "block" });
            }
            Flow::PreventDefault
        }),
    );

    page.listen(
        Target::Document,
        EventKind::Click,
        handler(move |page: &P, event: &PageEvent<P::Element>| {
            let inside = event
                .target
                .as_ref()
                .is_some_and(|target| page.contains(&dropdown, target));
            if !inside {
                if let Some(menu) = page.query_within(&dropdown, MENU_SELECTOR) {
                    page.set_style(&menu, "display", "none");
                }
            }
            Flow::Continue
        }),
    );
    true
}

/// Wire both navigation behaviors.
pub fn wire<P: Page>(page: &P, config: &ScrollConfig) {
    let anchors = wire_anchors(page, config);
    let mobile = wire_mobile_dropdown(page, config);
    log::debug!("navigation: {anchors} anchor(s), mobile dropdown {mobile}");
}
