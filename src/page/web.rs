//! Browser backend and bundle entry point.
//!
//! [`WebPage`] implements [`Page`] over `web-sys`. Event, timer and
//! intersection callbacks are JS closures that live for the rest of the
//! page's life (`forget` / `once_into_js`); nothing is ever unregistered.
//! The work-data fetch runs on the microtask queue through
//! `wasm_bindgen_futures::spawn_local`.
//!
//! The carousel widget is the global `Swiper` constructor, bound through an
//! `extern` block. Its options are built by serializing
//! [`CarouselOptions`] to JSON, parsing them into a JS object, and then
//! attaching the element references that JSON cannot carry.

use super::backend::{
    CarouselMount, EventKind, FetchDone, Flow, Handler, Page, PageError, PageEvent, Target, Task,
    Watch, Watcher,
};
use crate::app::Site;
use crate::carousel::CarouselOptions;
use crate::config::{BehaviorConfig, parse_config};
use js_sys::{Array, JSON, Object, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{
    Document, Element, Event, EventTarget, HtmlButtonElement, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, Node, NodeList, Response, ScrollBehavior,
    ScrollToOptions, Window, console,
};

/// Id of the optional inline TOML config element.
pub const CONFIG_ELEMENT_ID: &str = "folio-config";

#[wasm_bindgen]
extern "C" {
    type Swiper;

    #[wasm_bindgen(constructor, catch)]
    fn new(element: &Element, options: &JsValue) -> Result<Swiper, JsValue>;
}

/// Readable message from a thrown JS value.
fn js_error(value: JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// The live document.
#[derive(Clone)]
pub struct WebPage {
    window: Window,
    document: Document,
}

impl WebPage {
    /// `None` outside a browser window (e.g. in a worker).
    pub fn new() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self { window, document })
    }

    /// Config from the inline `<script type="application/toml">` element, or
    /// the stock defaults when there is none or it is invalid.
    pub fn inline_config(&self) -> BehaviorConfig {
        let Some(text) = self
            .document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content())
        else {
            return BehaviorConfig::default();
        };
        match parse_config(&text) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Invalid #{CONFIG_ELEMENT_ID}, using defaults: {e}");
                BehaviorConfig::default()
            }
        }
    }

    fn storage(&self) -> Result<web_sys::Storage, PageError> {
        self.window
            .local_storage()
            .map_err(|e| PageError::Storage(js_error(e)))?
            .ok_or_else(|| PageError::Storage("localStorage is not available".into()))
    }

    fn has_global(&self, name: &str) -> bool {
        Reflect::has(&self.window, &JsValue::from_str(name)).unwrap_or(false)
    }

    async fn fetch(&self, url: &str) -> Result<String, PageError> {
        let value = JsFuture::from(self.window.fetch_with_str(url))
            .await
            .map_err(|e| PageError::Network(js_error(e)))?;
        let response: Response = value
            .dyn_into()
            .map_err(|e| PageError::Network(js_error(e)))?;
        if !response.ok() {
            return Err(PageError::Status {
                url: url.to_string(),
                status: response.status(),
            });
        }
        let body = response
            .text()
            .map_err(|e| PageError::Network(js_error(e)))?;
        JsFuture::from(body)
            .await
            .map_err(|e| PageError::Network(js_error(e)))?
            .as_string()
            .ok_or_else(|| PageError::Network("response body is not text".into()))
    }

    fn carousel_options(
        &self,
        mount: &CarouselMount<Element>,
        options: &CarouselOptions,
    ) -> Result<JsValue, PageError> {
        let json = serde_json::to_string(options).map_err(|e| PageError::Script(e.to_string()))?;
        let value = JSON::parse(&json).map_err(|e| PageError::Script(js_error(e)))?;

        let optional = |el: &Option<Element>| el.clone().map_or(JsValue::NULL, JsValue::from);
        let set = |target: &JsValue, key: &str, value: &JsValue| {
            Reflect::set(target, &JsValue::from_str(key), value)
                .map(|_| ())
                .map_err(|e| PageError::Script(js_error(e)))
        };

        let pagination = Reflect::get(&value, &JsValue::from_str("pagination"))
            .map_err(|e| PageError::Script(js_error(e)))?;
        set(&pagination, "el", &optional(&mount.pagination))?;

        let navigation: JsValue = Object::new().into();
        set(&navigation, "nextEl", &optional(&mount.next))?;
        set(&navigation, "prevEl", &optional(&mount.prev))?;
        set(&value, "navigation", &navigation)?;
        Ok(value)
    }
}

impl Page for WebPage {
    type Element = Element;

    fn query(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        self.document
            .query_selector_all(selector)
            .map(elements)
            .unwrap_or_default()
    }

    fn query_within(&self, scope: &Element, selector: &str) -> Option<Element> {
        scope.query_selector(selector).ok().flatten()
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(Element::from)
    }

    fn contains(&self, ancestor: &Element, node: &Element) -> bool {
        let node: &Node = node;
        ancestor.contains(Some(node))
    }

    fn has_class(&self, element: &Element, class: &str) -> bool {
        element.class_list().contains(class)
    }

    fn add_class(&self, element: &Element, class: &str) {
        let _ = element.class_list().add_1(class);
    }

    fn remove_class(&self, element: &Element, class: &str) {
        let _ = element.class_list().remove_1(class);
    }

    fn attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn set_attribute(&self, element: &Element, name: &str, value: &str) {
        let _ = element.set_attribute(name, value);
    }

    fn remove_attribute(&self, element: &Element, name: &str) {
        let _ = element.remove_attribute(name);
    }

    fn text(&self, element: &Element) -> String {
        element.text_content().unwrap_or_default()
    }

    fn set_text(&self, element: &Element, text: &str) {
        element.set_text_content(Some(text));
    }

    fn inner_html(&self, element: &Element) -> String {
        element.inner_html()
    }

    fn set_inner_html(&self, element: &Element, html: &str) {
        element.set_inner_html(html);
    }

    fn append_child(&self, parent: &Element, tag: &str, class: &str) -> Option<Element> {
        let child = self.document.create_element(tag).ok()?;
        let _ = child.class_list().add_1(class);
        parent.append_child(&child).ok()?;
        Some(child)
    }

    fn style(&self, element: &Element, property: &str) -> String {
        element
            .dyn_ref::<HtmlElement>()
            .and_then(|el| el.style().get_property_value(property).ok())
            .unwrap_or_default()
    }

    fn set_style(&self, element: &Element, property: &str, value: &str) {
        let Some(el) = element.dyn_ref::<HtmlElement>() else {
            return;
        };
        let style = el.style();
        if value.is_empty() {
            let _ = style.remove_property(property);
        } else {
            let _ = style.set_property(property, value);
        }
    }

    fn set_disabled(&self, element: &Element, disabled: bool) {
        if let Some(button) = element.dyn_ref::<HtmlButtonElement>() {
            button.set_disabled(disabled);
        } else if disabled {
            let _ = element.set_attribute("disabled", "");
        } else {
            let _ = element.remove_attribute("disabled");
        }
    }

    fn viewport_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    }

    fn viewport_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn rect_top(&self, element: &Element) -> f64 {
        element.get_bounding_client_rect().top()
    }

    fn offset_top(&self, element: &Element) -> f64 {
        element
            .dyn_ref::<HtmlElement>()
            .map_or(0.0, |el| f64::from(el.offset_top()))
    }

    fn smooth_scroll_to(&self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn load_pref(&self, key: &str) -> Result<Option<String>, PageError> {
        self.storage()?
            .get_item(key)
            .map_err(|e| PageError::Storage(js_error(e)))
    }

    fn store_pref(&self, key: &str, value: &str) -> Result<(), PageError> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| PageError::Storage(js_error(e)))
    }

    fn is_loading(&self) -> bool {
        self.document.ready_state() == "loading"
    }

    fn set_timeout(&self, delay_ms: u32, task: Task<Self>) {
        let page = self.clone();
        let callback = Closure::once_into_js(move || task(&page));
        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        if let Err(e) = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay)
        {
            log::error!("setTimeout failed: {}", js_error(e));
        }
    }

    fn listen(&self, target: Target<Element>, kind: EventKind, handler: Handler<Self>) {
        let target: EventTarget = match target {
            Target::Window => self.window.clone().into(),
            Target::Document => self.document.clone().into(),
            Target::Element(el) => el.into(),
        };
        let page = self.clone();
        let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let view = PageEvent {
                target: event.target().and_then(|t| t.dyn_into::<Element>().ok()),
                current_target: event
                    .current_target()
                    .and_then(|t| t.dyn_into::<Element>().ok()),
            };
            if handler(&page, &view) == Flow::PreventDefault {
                event.prevent_default();
            }
        });
        if let Err(e) =
            target.add_event_listener_with_callback(kind.name(), closure.as_ref().unchecked_ref())
        {
            log::error!("addEventListener({}) failed: {}", kind.name(), js_error(e));
        }
        closure.forget();
    }

    fn watch_intersections(
        &self,
        elements: &[Element],
        threshold: Option<f64>,
        watcher: Watcher<Self>,
    ) -> Result<(), PageError> {
        if !self.has_global("IntersectionObserver") {
            return Err(PageError::Unsupported("IntersectionObserver"));
        }

        let page = self.clone();
        let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
            move |entries: Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    let target = entry.target();
                    if watcher(&page, &target, entry.is_intersecting()) == Watch::Stop {
                        observer.unobserve(&target);
                    }
                }
            },
        );

        let init = IntersectionObserverInit::new();
        if let Some(threshold) = threshold {
            init.set_threshold(&JsValue::from_f64(threshold));
        }
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
                .map_err(|e| PageError::Script(js_error(e)))?;
        callback.forget();

        for element in elements {
            observer.observe(element);
        }
        Ok(())
    }

    fn fetch_text(&self, url: &str, done: FetchDone<Self>) {
        let page = self.clone();
        let url = url.to_string();
        spawn_local(async move {
            let result = page.fetch(&url).await;
            done(&page, result);
        });
    }

    fn attach_carousel(
        &self,
        mount: &CarouselMount<Element>,
        options: &CarouselOptions,
    ) -> Result<(), PageError> {
        if !self.has_global("Swiper") {
            return Err(PageError::Unsupported("Swiper"));
        }
        let options = self.carousel_options(mount, options)?;
        Swiper::new(&mount.swiper, &options)
            .map(|_| ())
            .map_err(|e| PageError::Script(js_error(e)))
    }

    fn console_styled(&self, text: &str, css: &str) {
        console::log_2(&JsValue::from_str(&format!("%c{text}")), &JsValue::from_str(css));
    }
}

// =============================================================================
// Logging
// =============================================================================

/// Forwards `log` records to the developer console.
struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format!("[folio] {}", record.args()));
        match record.level() {
            log::Level::Error => console::error_1(&line),
            log::Level::Warn => console::warn_1(&line),
            log::Level::Info => console::info_1(&line),
            log::Level::Debug | log::Level::Trace => console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

fn init_logging() {
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

/// Bundle entry point: runs as soon as the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    init_logging();

    let Some(page) = WebPage::new() else {
        log::warn!("no document; folio behaviors not attached");
        return;
    };
    Site::new(page.inline_config()).boot(&page);
}
