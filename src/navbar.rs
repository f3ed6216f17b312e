//! Header shadow and active-link highlighting.
//!
//! Both follow the window scroll offset. The header switches between a
//! resting and a raised shadow around `shadow_threshold`; the navigation
//! link whose fragment names the current section gets `active`.

use crate::app::SiteState;
use crate::config::NavbarConfig;
use crate::page::{EventKind, Flow, Page, Target, handler};
use std::rc::Rc;

pub const HEADER_SELECTOR: &str = "header";
pub const SECTION_SELECTOR: &str = "section[id]";
pub const LINK_SELECTOR: &str = "nav ul li a[href^=\"#\"]";
pub const ACTIVE_CLASS: &str = "active";

/// Shadow for a given scroll offset.
pub fn shadow_for(scroll_y: f64, config: &NavbarConfig) -> &str {
    if scroll_y > config.shadow_threshold {
        &config.raised_shadow
    } else {
        &config.resting_shadow
    }
}

/// Apply the shadow for the current offset and record the offset.
pub fn update_shadow<P: Page>(
    page: &P,
    header: &P::Element,
    state: &SiteState,
    config: &NavbarConfig,
) {
    let scroll_y = page.scroll_y();
    page.set_style(header, "box-shadow", shadow_for(scroll_y, config));
    state.record_scroll(scroll_y);
}

/// Update the header shadow on every scroll. Returns `false` when the page
/// has no header.
pub fn wire_shadow<P: Page>(page: &P, state: Rc<SiteState>, config: &NavbarConfig) -> bool {
    let Some(header) = page.query(HEADER_SELECTOR) else {
        return false;
    };
    let config = config.clone();
    page.listen(
        Target::Window,
        EventKind::Scroll,
        handler(move |page: &P, _| {
            update_shadow(page, &header, &state, &config);
            Flow::Continue
        }),
    );
    true
}

/// The id of the last section (in document order) whose top, less
/// `offset`, the viewport has scrolled past.
pub fn current_section<'a>(
    scroll_y: f64,
    sections: &'a [(String, f64)],
    offset: f64,
) -> Option<&'a str> {
    sections
        .iter()
        .rev()
        .find(|(_, top)| scroll_y >= top - offset)
        .map(|(id, _)| id.as_str())
}

/// Move `active` to the link matching the current section.
pub fn update_active_links<P: Page>(page: &P, config: &NavbarConfig) -> Option<String> {
    let sections: Vec<(String, f64)> = page
        .query_all(SECTION_SELECTOR)
        .iter()
        .filter_map(|s| Some((page.attribute(s, "id")?, page.offset_top(s))))
        .collect();
    let current = current_section(page.scroll_y(), &sections, config.active_offset);

    for link in page.query_all(LINK_SELECTOR) {
        page.remove_class(&link, ACTIVE_CLASS);
        let target = page.attribute(&link, "href");
        let fragment = target.as_deref().and_then(|href| href.strip_prefix('#'));
        if current.is_some() && fragment == current {
            page.add_class(&link, ACTIVE_CLASS);
        }
    }
    current.map(str::to_string)
}

/// Highlight now, then on every scroll.
pub fn wire_active_links<P: Page>(page: &P, config: &NavbarConfig) {
    let config = config.clone();
    update_active_links(page, &config);
    page.listen(
        Target::Window,
        EventKind::Scroll,
        handler(move |page: &P, _| {
            update_active_links(page, &config);
            Flow::Continue
        }),
    );
}
