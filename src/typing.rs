//! Typing effect.
//!
//! A `.typing-text` element is typed out the first time at least half of it
//! scrolls into view. The text comes from its `data-text` attribute (falling
//! back to its current content). Typing clears the element, appends a span
//! carrying the `typing-cursor` class, and grows the span's text by one
//! character every `speed_ms`. One tick after the last character the cursor
//! class is scheduled for removal `cursor_linger_ms` later.
//!
//! The `typed` class guards against replays: an element that already has it
//! is never typed again, however often its intersection callback fires.

use crate::config::TypingConfig;
use crate::page::{Page, Watch, watcher};
use std::rc::Rc;

pub const TYPING_SELECTOR: &str = ".typing-text";
pub const TEXT_ATTRIBUTE: &str = "data-text";
pub const CURSOR_CLASS: &str = "typing-cursor";
pub const TYPED_CLASS: &str = "typed";

/// Type `text` into `element`, one character per `speed_ms`.
///
/// The first character appears immediately. Each element's timer chain owns
/// its own position, so several elements can type at once.
pub fn type_text<P: Page>(
    page: &P,
    element: &P::Element,
    text: &str,
    speed_ms: u32,
    linger_ms: u32,
) {
    page.set_text(element, "");
    let Some(span) = page.append_child(element, "span", CURSOR_CLASS) else {
        return;
    };
    let chars: Rc<[char]> = text.chars().collect();
    step(page, span, chars, 0, speed_ms, linger_ms);
}

fn step<P: Page>(
    page: &P,
    span: P::Element,
    chars: Rc<[char]>,
    typed: usize,
    speed_ms: u32,
    linger_ms: u32,
) {
    if typed < chars.len() {
        let shown: String = chars[..=typed].iter().collect();
        page.set_text(&span, &shown);
        page.set_timeout(
            speed_ms,
            Box::new(move |page: &P| step(page, span, chars, typed + 1, speed_ms, linger_ms)),
        );
    } else {
        page.set_timeout(
            linger_ms,
            Box::new(move |page: &P| page.remove_class(&span, CURSOR_CLASS)),
        );
    }
}

/// Intersection callback for one element. Types it once, then stops watching.
pub fn on_visible<P: Page>(
    page: &P,
    element: &P::Element,
    intersecting: bool,
    config: &TypingConfig,
) -> Watch {
    if !intersecting {
        return Watch::Keep;
    }
    if page.has_class(element, TYPED_CLASS) {
        return Watch::Stop;
    }

    let text = page
        .attribute(element, TEXT_ATTRIBUTE)
        .unwrap_or_else(|| page.text(element));
    type_text(page, element, &text, config.speed_ms, config.cursor_linger_ms);
    page.add_class(element, TYPED_CLASS);
    Watch::Stop
}

/// Watch every typing element on the page.
pub fn wire<P: Page>(page: &P, config: &TypingConfig) {
    let elements = page.query_all(TYPING_SELECTOR);
    if elements.is_empty() {
        return;
    }
    let threshold = config.threshold;
    let config = config.clone();
    let result = page.watch_intersections(
        &elements,
        Some(threshold),
        watcher(move |page: &P, element, intersecting| {
            on_visible(page, element, intersecting, &config)
        }),
    );
    if let Err(e) = result {
        log::debug!("typing effect disabled: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::backend::tests::{MockEl, MockPage};

    fn typing_element(page: &MockPage, text: &str) -> MockEl {
        let el = page.element();
        page.register(TYPING_SELECTOR, el);
        page.set_attribute(&el, TEXT_ATTRIBUTE, text);
        page.set_text(&el, text);
        el
    }

    fn cursor(page: &MockPage, el: MockEl) -> MockEl {
        page.children(el)[0]
    }

    #[test]
    fn types_one_character_per_tick() {
        let page = MockPage::new();
        let el = page.element();
        type_text(&page, &el, "abc", 20, 500);

        assert_eq!(page.text(&el), "a");
        page.advance(20);
        assert_eq!(page.text(&el), "ab");
        page.advance(19);
        assert_eq!(page.text(&el), "ab");
        page.advance(1);
        assert_eq!(page.text(&el), "abc");
    }

    #[test]
    fn cursor_is_removed_after_linger() {
        let page = MockPage::new();
        let el = page.element();
        type_text(&page, &el, "hi", 20, 500);
        let span = cursor(&page, el);
        assert!(page.has_class(&span, CURSOR_CLASS));

        // Last char at 20, end-of-text tick at 40, removal at 540
        page.advance(539);
        assert!(page.has_class(&span, CURSOR_CLASS));
        page.advance(1);
        assert!(!page.has_class(&span, CURSOR_CLASS));
        assert_eq!(page.text(&el), "hi");
        assert_eq!(page.pending_timers(), 0);
    }

    #[test]
    fn clears_existing_content_first() {
        let page = MockPage::new();
        let el = page.element();
        page.set_text(&el, "placeholder");
        type_text(&page, &el, "xy", 20, 500);
        assert_eq!(page.text(&el), "x");
        assert_eq!(page.children(el).len(), 1);
    }

    #[test]
    fn handles_multibyte_characters() {
        let page = MockPage::new();
        let el = page.element();
        type_text(&page, &el, "héllo 👋", 10, 0);
        page.advance(10);
        assert_eq!(page.text(&el), "hé");
        page.advance(1000);
        assert_eq!(page.text(&el), "héllo 👋");
    }

    #[test]
    fn empty_text_only_schedules_cursor_removal() {
        let page = MockPage::new();
        let el = page.element();
        type_text(&page, &el, "", 20, 500);
        let span = cursor(&page, el);

        assert_eq!(page.text(&el), "");
        page.advance(500);
        assert!(!page.has_class(&span, CURSOR_CLASS));
    }

    #[test]
    fn elements_type_independently() {
        let page = MockPage::new();
        let first = page.element();
        let second = page.element();
        type_text(&page, &first, "abcd", 20, 500);
        page.advance(20);
        type_text(&page, &second, "wxyz", 10, 500);
        page.advance(20);

        assert_eq!(page.text(&first), "abc");
        assert_eq!(page.text(&second), "wxy");
    }

    #[test]
    fn typed_exactly_once() {
        let page = MockPage::new();
        let el = typing_element(&page, "Hello");
        let config = TypingConfig::default();

        assert_eq!(on_visible(&page, &el, true, &config), Watch::Stop);
        page.advance(10_000);
        assert_eq!(page.text(&el), "Hello");

        // A replayed callback must not restart the animation
        assert_eq!(on_visible(&page, &el, true, &config), Watch::Stop);
        assert_eq!(page.text(&el), "Hello");
        assert_eq!(page.pending_timers(), 0);
    }

    #[test]
    fn not_intersecting_keeps_watching() {
        let page = MockPage::new();
        let el = typing_element(&page, "Hello");

        assert_eq!(
            on_visible(&page, &el, false, &TypingConfig::default()),
            Watch::Keep
        );
        assert!(!page.has_class(&el, TYPED_CLASS));
        assert_eq!(page.text(&el), "Hello");
    }

    #[test]
    fn missing_attribute_types_existing_text() {
        let page = MockPage::new();
        let el = page.element();
        page.set_text(&el, "Fallback");
        on_visible(&page, &el, true, &TypingConfig::default());
        page.advance(10_000);
        assert_eq!(page.text(&el), "Fallback");
    }

    #[test]
    fn wire_watches_at_half_visibility() {
        let page = MockPage::new();
        let el = typing_element(&page, "Hi there");
        wire(&page, &TypingConfig::default());

        assert_eq!(page.watch_thresholds(), vec![Some(0.5)]);
        assert!(page.is_watched(el));

        page.intersect(el, true);
        assert!(page.has_class(&el, TYPED_CLASS));
        assert!(!page.is_watched(el));

        page.intersect(el, true);
        page.advance(10_000);
        assert_eq!(page.text(&el), "Hi there");
    }

    #[test]
    fn wire_without_intersection_support_leaves_text() {
        let page = MockPage::new();
        page.set_intersection_supported(false);
        let el = typing_element(&page, "Static");
        wire(&page, &TypingConfig::default());

        assert!(!page.is_watched(el));
        assert_eq!(page.text(&el), "Static");
    }
}
