//! Theme persistence.
//!
//! The body carries the dark class unless the stored preference is
//! `"light"`. Toggling flips the class first and then derives the preference
//! from the resulting class state, so storage always matches what is shown.
//! When storage is unavailable the toggle still works for the current visit.

use crate::config::ThemeConfig;
use crate::page::{EventKind, Flow, Page, Target, handler};
use crate::types::Theme;

pub const TOGGLE_ID: &str = "theme-toggle";

/// The stored preference, or the default when nothing usable is stored.
pub fn saved_theme<P: Page>(page: &P, config: &ThemeConfig) -> Theme {
    match page.load_pref(&config.storage_key) {
        Ok(Some(value)) => Theme::parse(&value).unwrap_or_default(),
        Ok(None) => Theme::default(),
        Err(e) => {
            log::debug!("theme preference unreadable, using default: {e}");
            Theme::default()
        }
    }
}

/// Apply the stored preference to the body. Returns the applied theme.
pub fn apply_saved<P: Page>(page: &P, config: &ThemeConfig) -> Theme {
    let theme = saved_theme(page, config);
    if let Some(body) = page.body() {
        match theme {
            Theme::Dark => page.add_class(&body, &config.dark_class),
            Theme::Light => page.remove_class(&body, &config.dark_class),
        }
    }
    theme
}

/// The theme the body currently shows.
pub fn current_theme<P: Page>(page: &P, config: &ThemeConfig) -> Option<Theme> {
    let body = page.body()?;
    Some(if page.has_class(&body, &config.dark_class) {
        Theme::Dark
    } else {
        Theme::Light
    })
}

/// Flip the body class and persist the resulting theme.
pub fn toggle<P: Page>(page: &P, config: &ThemeConfig) -> Option<Theme> {
    let body = page.body()?;
    if page.has_class(&body, &config.dark_class) {
        page.remove_class(&body, &config.dark_class);
    } else {
        page.add_class(&body, &config.dark_class);
    }

    let theme = current_theme(page, config)?;
    if let Err(e) = page.store_pref(&config.storage_key, theme.as_str()) {
        log::debug!("theme preference not persisted: {e}");
    }
    Some(theme)
}

/// Apply the saved theme and wire the toggle control, if present.
pub fn wire<P: Page>(page: &P, config: &ThemeConfig) {
    apply_saved(page, config);

    let Some(control) = page.element_by_id(TOGGLE_ID) else {
        return;
    };
    let config = config.clone();
    page.listen(
        Target::Element(control),
        EventKind::Click,
        handler(move |page: &P, _| {
            toggle(page, &config);
            Flow::Continue
        }),
    );
}
