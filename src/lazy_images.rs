//! Deferred image loading.
//!
//! Images marked up as `<img data-src="...">` get their real `src` the first
//! time they intersect the viewport. Browsers without intersection
//! observing keep the placeholders.

use crate::page::{Page, Watch, watcher};

pub const LAZY_SELECTOR: &str = "img[data-src]";
pub const SOURCE_ATTRIBUTE: &str = "data-src";

/// Intersection callback for one image.
pub fn on_visible<P: Page>(page: &P, image: &P::Element, intersecting: bool) -> Watch {
    if !intersecting {
        return Watch::Keep;
    }
    let Some(source) = page
        .attribute(image, SOURCE_ATTRIBUTE)
        .filter(|source| !source.is_empty())
    else {
        return Watch::Keep;
    };
    page.set_attribute(image, "src", &source);
    page.remove_attribute(image, SOURCE_ATTRIBUTE);
    Watch::Stop
}

/// Watch every deferred image. Returns how many are being watched.
pub fn wire<P: Page>(page: &P) -> usize {
    let images = page.query_all(LAZY_SELECTOR);
    if images.is_empty() {
        return 0;
    }
    match page.watch_intersections(
        &images,
        None,
        watcher(|page: &P, image, intersecting| on_visible(page, image, intersecting)),
    ) {
        Ok(()) => images.len(),
        Err(e) => {
            log::debug!("lazy images disabled: {e}");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::backend::tests::{MockEl, MockPage};

    fn lazy_image(page: &MockPage, source: &str) -> MockEl {
        let img = page.element();
        page.set_attribute(&img, "src", "images/blur.png");
        page.set_attribute(&img, SOURCE_ATTRIBUTE, source);
        page.register(LAZY_SELECTOR, img);
        img
    }

    #[test]
    fn swaps_source_on_first_intersection() {
        let page = MockPage::new();
        let img = lazy_image(&page, "images/photo.jpg");
        assert_eq!(wire(&page), 1);
        assert_eq!(page.watch_thresholds(), vec![None]);

        page.intersect(img, true);
        assert_eq!(page.attribute(&img, "src").as_deref(), Some("images/photo.jpg"));
        assert_eq!(page.attribute(&img, SOURCE_ATTRIBUTE), None);
        assert!(!page.is_watched(img));
    }

    #[test]
    fn leaving_view_keeps_placeholder() {
        let page = MockPage::new();
        let img = lazy_image(&page, "images/photo.jpg");
        wire(&page);

        page.intersect(img, false);
        assert_eq!(page.attribute(&img, "src").as_deref(), Some("images/blur.png"));
        assert!(page.is_watched(img));
    }

    #[test]
    fn images_load_independently() {
        let page = MockPage::new();
        let first = lazy_image(&page, "a.jpg");
        let second = lazy_image(&page, "b.jpg");
        wire(&page);

        page.intersect(second, true);
        assert_eq!(page.attribute(&first, "src").as_deref(), Some("images/blur.png"));
        assert_eq!(page.attribute(&second, "src").as_deref(), Some("b.jpg"));
        assert!(page.is_watched(first));
    }

    #[test]
    fn empty_source_keeps_placeholder_and_watch() {
        let page = MockPage::new();
        let img = lazy_image(&page, "");
        wire(&page);

        page.intersect(img, true);
        assert_eq!(page.attribute(&img, "src").as_deref(), Some("images/blur.png"));
        assert_eq!(page.attribute(&img, SOURCE_ATTRIBUTE).as_deref(), Some(""));
        assert!(page.is_watched(img));

        page.set_attribute(&img, SOURCE_ATTRIBUTE, "images/late.jpg");
        page.intersect(img, true);
        assert_eq!(page.attribute(&img, "src").as_deref(), Some("images/late.jpg"));
        assert!(!page.is_watched(img));
    }

    #[test]
    fn unsupported_browser_keeps_placeholders() {
        let page = MockPage::new();
        page.set_intersection_supported(false);
        let img = lazy_image(&page, "images/photo.jpg");

        assert_eq!(wire(&page), 0);
        assert_eq!(page.attribute(&img, "src").as_deref(), Some("images/blur.png"));
    }

    #[test]
    fn no_images_registers_nothing() {
        let page = MockPage::new();
        assert_eq!(wire(&page), 0);
        assert!(page.watch_thresholds().is_empty());
    }
}
