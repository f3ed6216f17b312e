//! # Folio
//!
//! The client-side behavior layer of a static personal portfolio site. The
//! page itself is hand-written HTML and CSS; this crate, compiled to
//! WebAssembly, makes it move: theme persistence, smooth in-page scrolling,
//! reveal-on-scroll, a typing effect, data-driven work cards in carousels,
//! header styling, contact-form feedback and lazy images.
//!
//! The same crate builds a small native CLI (`folio`) that checks and
//! pre-renders the work data outside the browser.
//!
//! # Architecture: Behaviors Against a Page Seam
//!
//! Every behavior is a plain function generic over [`page::Page`], the set of
//! document operations it needs. Nothing outside [`page::web`] touches
//! `web-sys`:
//!
//! ```text
//! app::Site::boot
//!   ├── theme, navigation, reveal, typing, navbar, contact, lazy_images, banner
//!   └── on ready ── cards::load ──(fetch)──► cards::render_all ──► carousel::init_all
//!                                   │
//!                         page::Page (trait)
//!                    ┌──────────────┴──────────────┐
//!              WebPage (wasm32)              MockPage (tests)
//! ```
//!
//! This keeps every behavior testable without a browser: the mock page has a
//! virtual clock, canned selector results, and explicit drivers for clicks,
//! scrolls, intersections and fetch completion.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`app`] | Boot sequence, ready-phase work, shared [`app::SiteState`] |
//! | [`page`] | The [`page::Page`] trait, event types, and the `web-sys` backend |
//! | [`config`] | `folio.toml` / inline config loading, validation, merging |
//! | [`types`] | Theme preference, work categories, work items |
//! | [`theme`] | Dark/light toggle persisted in browser storage |
//! | [`navigation`] | Smooth scrolling for fragment links, dropdown collapse, mobile dropdown |
//! | [`reveal`] | Marks `.reveal` elements active as they scroll into view |
//! | [`typing`] | Character-by-character typing effect, once per element |
//! | [`cards`] | Date formatting, card markup (Maud), work-data loader |
//! | [`carousel`] | Swiper options and per-container initialization |
//! | [`navbar`] | Header shadow and active-link highlighting |
//! | [`contact`] | Transient "sending" state on the contact button |
//! | [`lazy_images`] | `data-src` → `src` on first intersection |
//! | [`banner`] | Developer-console greeting |
//! | [`output`] | CLI output formatting for `folio check` |
//!
//! # Design Decisions
//!
//! ## Handlers Receive the Page
//!
//! Handlers, timers and intersection watchers take the page as an argument
//! instead of capturing it. A behavior only captures its own config slice and
//! the elements it acts on, so the registration APIs stay `'static` without
//! reference cycles.
//!
//! ## Maud for Card Markup
//!
//! Cards are rendered with [Maud](https://maud.lambda.xyz/) rather than string
//! interpolation. Every field from `data.json` is escaped, so a title or
//! description can never inject markup into the page.
//!
//! ## Every Constant Is Config
//!
//! Offsets, delays, thresholds, labels and carousel breakpoints live in
//! [`config::BehaviorConfig`]. The stock values reproduce the site's feel;
//! a page can override any subset through an inline
//! `<script type="application/toml" id="folio-config">` element.
//!
//! ## Nothing Is Fatal
//!
//! A missing element skips its behavior. A failed data fetch is logged and
//! leaves the card containers as they were. Missing browser features
//! (storage, intersection observing, the carousel library) degrade to the
//! static page.

pub mod app;
pub mod banner;
pub mod cards;
pub mod carousel;
pub mod config;
pub mod contact;
pub mod lazy_images;
pub mod navbar;
pub mod navigation;
pub mod output;
pub mod page;
pub mod reveal;
pub mod theme;
pub mod types;
pub mod typing;

#[cfg(test)]
pub(crate) mod test_helpers;
