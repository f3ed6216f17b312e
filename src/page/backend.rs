//! Page backend trait and shared event types.
//!
//! The [`Page`] trait is the full set of document operations the behaviors
//! need: element lookup, classes/attributes/styles, geometry, one storage
//! key, timers, event and intersection registration, a text fetch, and the
//! carousel hand-off. Handlers receive the page as an argument instead of
//! capturing it, so a registered closure never keeps the page alive.
//!
//! The production implementation is [`WebPage`](super::web::WebPage)
//! (wasm32 only). Tests use `MockPage` from this module's test block.

use crate::carousel::CarouselOptions;
use std::rc::Rc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PageError {
    #[error("storage unavailable: {0}")]
    Storage(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("HTTP {status} fetching {url}")]
    Status { url: String, status: u16 },
    #[error("script error: {0}")]
    Script(String),
    #[error("{0} is not supported by this browser")]
    Unsupported(&'static str),
}

/// DOM events the behaviors listen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Submit,
    Scroll,
    Load,
    DomContentLoaded,
}

impl EventKind {
    /// DOM event type name.
    pub fn name(self) -> &'static str {
        match self {
            EventKind::Click => "click",
            EventKind::Submit => "submit",
            EventKind::Scroll => "scroll",
            EventKind::Load => "load",
            EventKind::DomContentLoaded => "DOMContentLoaded",
        }
    }
}

/// Where a listener is attached.
#[derive(Debug, Clone, PartialEq)]
pub enum Target<E> {
    Window,
    Document,
    Element(E),
}

/// The parts of a DOM event handlers look at.
#[derive(Debug, Clone)]
pub struct PageEvent<E> {
    /// Element the event originated from.
    pub target: Option<E>,
    /// Element the listener is attached to (`None` for window/document).
    pub current_target: Option<E>,
}

/// What a handler wants done with the event's default action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    PreventDefault,
}

/// Whether an intersection watcher keeps observing an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Watch {
    Keep,
    Stop,
}

/// Elements a carousel is mounted on, all scoped to one slide container.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselMount<E> {
    pub container: E,
    pub swiper: E,
    pub pagination: Option<E>,
    pub next: Option<E>,
    pub prev: Option<E>,
}

pub type Task<P> = Box<dyn FnOnce(&P)>;
pub type Handler<P> = Rc<dyn Fn(&P, &PageEvent<<P as Page>::Element>) -> Flow>;
/// Called with the element and whether it is currently intersecting.
pub type Watcher<P> = Rc<dyn Fn(&P, &<P as Page>::Element, bool) -> Watch>;
pub type FetchDone<P> = Box<dyn FnOnce(&P, Result<String, PageError>)>;

/// Wrap a closure as an event [`Handler`].
pub fn handler<P: Page>(f: impl Fn(&P, &PageEvent<P::Element>) -> Flow + 'static) -> Handler<P> {
    Rc::new(f)
}

/// Wrap a closure as an intersection [`Watcher`].
pub fn watcher<P: Page>(f: impl Fn(&P, &P::Element, bool) -> Watch + 'static) -> Watcher<P> {
    Rc::new(f)
}

/// Document operations used by the page behaviors.
///
/// Lookups return `None`/empty when nothing matches; mutators on elements
/// never fail. Only storage, intersection observing and the carousel hand-off
/// report errors, because those depend on browser capabilities.
pub trait Page: Clone + 'static {
    type Element: Clone + 'static;

    // -- lookup ------------------------------------------------------------

    fn query(&self, selector: &str) -> Option<Self::Element>;
    fn query_all(&self, selector: &str) -> Vec<Self::Element>;
    /// First match among `scope`'s descendants.
    fn query_within(&self, scope: &Self::Element, selector: &str) -> Option<Self::Element>;
    fn element_by_id(&self, id: &str) -> Option<Self::Element>;
    fn body(&self) -> Option<Self::Element>;
    /// True when `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: &Self::Element, node: &Self::Element) -> bool;

    // -- content -----------------------------------------------------------

    fn has_class(&self, element: &Self::Element, class: &str) -> bool;
    fn add_class(&self, element: &Self::Element, class: &str);
    fn remove_class(&self, element: &Self::Element, class: &str);
    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;
    fn set_attribute(&self, element: &Self::Element, name: &str, value: &str);
    fn remove_attribute(&self, element: &Self::Element, name: &str);
    fn text(&self, element: &Self::Element) -> String;
    /// Replace all children with a single text node.
    fn set_text(&self, element: &Self::Element, text: &str);
    fn inner_html(&self, element: &Self::Element) -> String;
    fn set_inner_html(&self, element: &Self::Element, html: &str);
    /// Append a new `tag` element carrying `class`, returning it.
    fn append_child(
        &self,
        parent: &Self::Element,
        tag: &str,
        class: &str,
    ) -> Option<Self::Element>;
    /// Inline style property value, empty when unset.
    fn style(&self, element: &Self::Element, property: &str) -> String;
    /// Set an inline style property; an empty value clears it.
    fn set_style(&self, element: &Self::Element, property: &str, value: &str);
    fn set_disabled(&self, element: &Self::Element, disabled: bool);

    // -- geometry ----------------------------------------------------------

    fn viewport_width(&self) -> f64;
    fn viewport_height(&self) -> f64;
    fn scroll_y(&self) -> f64;
    /// Top of the element's bounding box, relative to the viewport.
    fn rect_top(&self, element: &Self::Element) -> f64;
    /// Top of the element relative to its offset parent.
    fn offset_top(&self, element: &Self::Element) -> f64;
    fn smooth_scroll_to(&self, top: f64);

    // -- storage -----------------------------------------------------------

    fn load_pref(&self, key: &str) -> Result<Option<String>, PageError>;
    fn store_pref(&self, key: &str, value: &str) -> Result<(), PageError>;

    // -- scheduling and events ---------------------------------------------

    /// True while the document is still being parsed.
    fn is_loading(&self) -> bool;
    /// Run `task` once after `delay_ms`. Not cancellable.
    fn set_timeout(&self, delay_ms: u32, task: Task<Self>);
    fn listen(&self, target: Target<Self::Element>, kind: EventKind, handler: Handler<Self>);
    /// Observe `elements`; `threshold` is the visible fraction that counts
    /// as intersecting (`None` for any pixel).
    fn watch_intersections(
        &self,
        elements: &[Self::Element],
        threshold: Option<f64>,
        watcher: Watcher<Self>,
    ) -> Result<(), PageError>;
    /// GET `url` as text; `done` runs later with the body or the failure.
    fn fetch_text(&self, url: &str, done: FetchDone<Self>);

    // -- third-party widgets -----------------------------------------------

    fn attach_carousel(
        &self,
        mount: &CarouselMount<Self::Element>,
        options: &CarouselOptions,
    ) -> Result<(), PageError>;
    /// Print a CSS-styled line to the developer console.
    fn console_styled(&self, text: &str, css: &str);
}
