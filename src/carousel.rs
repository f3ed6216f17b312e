//! Carousel initialization.
//!
//! Each `.slide-container` on the page wraps one card list in Swiper's
//! markup. Once the cards are rendered, every container holding a `.swiper`
//! element gets a widget with the responsive layout from [`CarouselConfig`].
//! Pagination and prev/next controls are looked up inside the same
//! container, so several carousels on one page never share controls.
//!
//! [`CarouselOptions`] serializes to Swiper's own option names. The element
//! references (`pagination.el`, `navigation.nextEl`, `navigation.prevEl`)
//! are not serializable; the page backend adds them from the
//! [`CarouselMount`] when it constructs the widget.

use crate::config::CarouselConfig;
use crate::page::{CarouselMount, Page};
use serde::Serialize;
use std::collections::BTreeMap;

pub const CONTAINER_SELECTOR: &str = ".slide-container";
pub const SWIPER_SELECTOR: &str = ".swiper";
pub const PAGINATION_SELECTOR: &str = ".swiper-pagination";
pub const NEXT_SELECTOR: &str = ".swiper-button-next";
pub const PREV_SELECTOR: &str = ".swiper-button-prev";

/// Swiper constructor options.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselOptions {
    pub slides_per_view: u32,
    pub space_between: u32,
    #[serde(rename = "loop")]
    pub looping: bool,
    pub centered_slides: bool,
    pub grab_cursor: bool,
    pub pagination: PaginationOptions,
    /// Keyed by minimum viewport width; serialized as string keys.
    pub breakpoints: BTreeMap<u32, BreakpointOptions>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationOptions {
    pub clickable: bool,
    pub dynamic_bullets: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakpointOptions {
    pub slides_per_view: u32,
    pub space_between: u32,
}

impl CarouselOptions {
    pub fn from_config(config: &CarouselConfig) -> Self {
        let breakpoints = config
            .breakpoints
            .iter()
            .map(|b| {
                (
                    b.min_width,
                    BreakpointOptions {
                        slides_per_view: b.slides,
                        space_between: b.space_between,
                    },
                )
            })
            .collect();

        Self {
            // Narrowest layout until the breakpoints kick in
            slides_per_view: config.breakpoints.first().map_or(1, |b| b.slides),
            space_between: config.space_between,
            looping: false,
            centered_slides: false,
            grab_cursor: config.grab_cursor,
            pagination: PaginationOptions {
                clickable: true,
                dynamic_bullets: true,
            },
            breakpoints,
        }
    }

    /// Slides visible at a given viewport width.
    pub fn slides_at(&self, width: u32) -> u32 {
        self.breakpoints
            .range(..=width)
            .next_back()
            .map_or(self.slides_per_view, |(_, b)| b.slides_per_view)
    }
}

/// Attach a carousel to every slide container that has Swiper markup.
///
/// Returns the number of widgets attached. Containers without a `.swiper`
/// element are skipped silently; attach failures are logged per container.
pub fn init_all<P: Page>(page: &P, config: &CarouselConfig) -> usize {
    let options = CarouselOptions::from_config(config);
    let mut attached = 0;

    for container in page.query_all(CONTAINER_SELECTOR) {
        let Some(swiper) = page.query_within(&container, SWIPER_SELECTOR) else {
            continue;
        };
        let mount = CarouselMount {
            pagination: page.query_within(&container, PAGINATION_SELECTOR),
            next: page.query_within(&container, NEXT_SELECTOR),
            prev: page.query_within(&container, PREV_SELECTOR),
            swiper,
            container,
        };
        match page.attach_carousel(&mount, &options) {
            Ok(()) => attached += 1,
            Err(e) => log::error!("Error initializing carousel: {e}"),
        }
    }

    log::debug!("attached {attached} carousel(s)");
    attached
}
