//! Shared test utilities for the folio test suite.
//!
//! Provides a prepared [`MockPage`] laid out like the portfolio page, sample
//! work data, and small markup helpers.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let fixture = portfolio_page();
//! cards::load(&fixture.page, &BehaviorConfig::default());
//! fixture.page.complete_fetch(Ok(sample_data_json()));
//!
//! let html = fixture.page.inner_html(&fixture.experience);
//! assert_eq!(count_cards(&html), 2);
//! ```

use crate::carousel;
use crate::contact;
use crate::lazy_images;
use crate::navbar;
use crate::navigation;
use crate::page::backend::tests::{MockEl, MockPage};
use crate::page::Page;
use crate::reveal;
use crate::types::{Category, WorkItem};
use crate::typing;

// =========================================================================
// Page fixture
// =========================================================================

/// A mock document with every element the behaviors look for.
pub struct PortfolioPage {
    pub page: MockPage,
    pub body: MockEl,
    pub header: MockEl,
    pub theme_toggle: MockEl,
    pub home_link: MockEl,
    pub about_link: MockEl,
    pub experience: MockEl,
    pub publications: MockEl,
    pub projects: MockEl,
    /// Top at 100px: inside the reveal margin of an 800px viewport.
    pub reveal_near: MockEl,
    /// Top at 2000px: far below the fold.
    pub reveal_far: MockEl,
    /// `data-text="Software Engineer"`.
    pub typing: MockEl,
    /// `data-src="images/hero.jpg"`.
    pub lazy_image: MockEl,
    pub send_button: MockEl,
}

impl PortfolioPage {
    /// The three card containers, in category order.
    pub fn containers(&self) -> Vec<MockEl> {
        vec![self.experience, self.publications, self.projects]
    }
}

/// Build the portfolio document.
///
/// Layout: a `header`, two sections (`#home` at 0px, `#about` at 900px) with
/// matching nav links, one slide container per category (each holding a
/// `.swiper`, pagination and prev/next controls, and the category's card
/// list), the theme toggle, a contact form, two `.reveal` elements, one
/// typing element and one deferred image. The document has finished
/// parsing; `set_loading(true)` simulates an early boot.
pub fn portfolio_page() -> PortfolioPage {
    let page = MockPage::new();

    let body = page.element();
    page.set_body(body);

    let header = page.element();
    page.register(navbar::HEADER_SELECTOR, header);

    let theme_toggle = page.element_with_id(crate::theme::TOGGLE_ID);

    let mut links = Vec::new();
    for (id, top) in [("home", 0.0), ("about", 900.0)] {
        let section = page.element_with_id(id);
        page.set_offset_top(section, top);
        page.set_rect_top(section, top);
        page.register(navbar::SECTION_SELECTOR, section);

        let link = page.element();
        page.set_attribute(&link, "href", &format!("#{id}"));
        page.register(navbar::LINK_SELECTOR, link);
        page.register(navigation::ANCHOR_SELECTOR, link);
        links.push(link);
    }

    let mut containers = Vec::new();
    for category in Category::ALL {
        let slide = page.element();
        page.register(carousel::CONTAINER_SELECTOR, slide);
        let swiper = page.element();
        page.register_within(slide, carousel::SWIPER_SELECTOR, swiper);
        for selector in [
            carousel::PAGINATION_SELECTOR,
            carousel::NEXT_SELECTOR,
            carousel::PREV_SELECTOR,
        ] {
            let control = page.element();
            page.register_within(slide, selector, control);
        }
        let cards = page.element_with_id(category.container_id());
        page.register_within(swiper, ".swiper-wrapper", cards);
        containers.push(cards);
    }

    let form = page.element();
    page.register(contact::FORM_SELECTOR, form);
    let send_button = page.element();
    page.register_within(form, contact::BUTTON_SELECTOR, send_button);
    page.set_inner_html(&send_button, "Send Message");

    let reveal_near = page.element();
    page.register(reveal::REVEAL_SELECTOR, reveal_near);
    page.set_rect_top(reveal_near, 100.0);
    let reveal_far = page.element();
    page.register(reveal::REVEAL_SELECTOR, reveal_far);
    page.set_rect_top(reveal_far, 2000.0);

    let typing = page.element();
    page.register(typing::TYPING_SELECTOR, typing);
    page.set_attribute(&typing, typing::TEXT_ATTRIBUTE, "Software Engineer");

    let lazy_image = page.element();
    page.register(lazy_images::LAZY_SELECTOR, lazy_image);
    page.set_attribute(&lazy_image, lazy_images::SOURCE_ATTRIBUTE, "images/hero.jpg");

    PortfolioPage {
        page,
        body,
        header,
        theme_toggle,
        home_link: links[0],
        about_link: links[1],
        experience: containers[0],
        publications: containers[1],
        projects: containers[2],
        reveal_near,
        reveal_far,
        typing,
        lazy_image,
        send_button,
    }
}

// =========================================================================
// Work data
// =========================================================================

/// A complete work item; image and link are derived from the lowercased title.
pub fn sample_item(title: &str) -> WorkItem {
    let slug = title.to_lowercase();
    WorkItem {
        title: title.to_string(),
        subtitle: Some("Acme Corp".to_string()),
        date: "2023-03-15".to_string(),
        description: "Built the thing".to_string(),
        image: format!("images/{slug}.png"),
        link: format!("https://example.com/{slug}"),
    }
}

/// A `data.json` document: two experience items, one publication, no projects.
pub fn sample_data_json() -> String {
    serde_json::json!({
        "experience": [
            {
                "title": "Staff Engineer",
                "subtitle": "Acme Corp",
                "date": "2023-03-15",
                "description": "Led the platform team",
                "image": "images/acme.png",
                "link": "https://acme.example"
            },
            {
                "title": "Intern",
                "date": "2019-06-01",
                "description": "Fixed bugs",
                "image": "images/intern.png",
                "link": "https://intern.example"
            }
        ],
        "publications": [
            {
                "title": "On Carousels",
                "subtitle": "Journal of Sliding",
                "date": "2021-11",
                "description": "A survey",
                "image": "images/paper.png",
                "link": "https://doi.example/1"
            }
        ],
        "projects": []
    })
    .to_string()
}

// =========================================================================
// Markup helpers
// =========================================================================

/// Number of cards in rendered markup.
pub fn count_cards(html: &str) -> usize {
    html.matches(r#"class="card swiper-slide""#).count()
}

/// Card titles in rendered markup, in order.
pub fn card_titles(html: &str) -> Vec<String> {
    html.split(r#"<h2 class="name">"#)
        .skip(1)
        .filter_map(|rest| rest.split_once("</h2>").map(|(title, _)| title.to_string()))
        .collect()
}
