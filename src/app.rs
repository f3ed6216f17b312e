//! Boot sequence.
//!
//! [`Site::boot`] wires every behavior against a [`Page`]. Handlers that need
//! state across events share one [`SiteState`] instead of module globals.
//!
//! | Phase | Behaviors |
//! |-------|-----------|
//! | boot | theme, navigation, reveal listeners, typing, header shadow, contact form, lazy images, console greeting |
//! | ready | work data load (then carousels), initial reveal pass, active-link highlighting |
//!
//! "Ready" is `DOMContentLoaded`, or immediately when the document has
//! already been parsed by the time the bundle starts.

use crate::config::BehaviorConfig;
use crate::page::{EventKind, Flow, Page, Target, handler};
use crate::{banner, cards, contact, lazy_images, navbar, navigation, reveal, theme, typing};
use std::cell::Cell;
use std::rc::Rc;

/// Mutable state shared between handlers for the page's lifetime.
#[derive(Debug, Default)]
pub struct SiteState {
    last_scroll: Cell<f64>,
}

impl SiteState {
    /// Offset seen by the most recent scroll handler.
    pub fn last_scroll(&self) -> f64 {
        self.last_scroll.get()
    }

    pub fn record_scroll(&self, scroll_y: f64) {
        self.last_scroll.set(scroll_y);
    }
}

/// The configured site, ready to be attached to a page.
#[derive(Debug, Clone)]
pub struct Site {
    config: Rc<BehaviorConfig>,
    state: Rc<SiteState>,
}

impl Site {
    pub fn new(config: BehaviorConfig) -> Self {
        Self {
            config: Rc::new(config),
            state: Rc::default(),
        }
    }

    pub fn config(&self) -> &BehaviorConfig {
        &self.config
    }

    pub fn state(&self) -> &SiteState {
        &self.state
    }

    /// Wire every behavior. Ready-phase work runs now or on `DOMContentLoaded`.
    pub fn boot<P: Page>(&self, page: &P) {
        let config = &self.config;
        theme::wire(page, &config.theme);
        navigation::wire(page, &config.scroll);
        reveal::wire(page, &config.reveal);
        typing::wire(page, &config.typing);
        navbar::wire_shadow(page, self.state.clone(), &config.navbar);
        contact::wire(page, &config.contact);
        lazy_images::wire(page);
        banner::print(page, &config.console);

        if page.is_loading() {
            let site = self.clone();
            page.listen(
                Target::Document,
                EventKind::DomContentLoaded,
                handler(move |page: &P, _| {
                    site.on_ready(page);
                    Flow::Continue
                }),
            );
        } else {
            self.on_ready(page);
        }
    }

    fn on_ready<P: Page>(&self, page: &P) {
        log::debug!("document ready");
        cards::load(page, &self.config);
        reveal::reveal_all(page, &self.config.reveal);
        navbar::wire_active_links(page, &self.config.navbar);
    }
}
