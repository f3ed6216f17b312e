//! The DOM seam.
//!
//! Every behavior in this crate talks to the document through the [`Page`]
//! trait rather than through `web-sys` directly. The module is split into:
//! - **Backend**: [`Page`] trait, event and watcher types, [`PageError`]
//! - **Web** (wasm32 only): `WebPage`, the `web-sys` implementation, plus the
//!   `#[wasm_bindgen(start)]` entry point
//!
//! Tests drive the same behaviors through an in-memory `MockPage` with a
//! virtual clock, so timers, intersections and fetches are deterministic.

pub mod backend;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use backend::{
    CarouselMount, EventKind, FetchDone, Flow, Handler, Page, PageError, PageEvent, Target, Task,
    Watch, Watcher, handler, watcher,
};
#[cfg(target_arch = "wasm32")]
pub use web::WebPage;
