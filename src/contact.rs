//! Contact form feedback.
//!
//! The form posts natively to an external endpoint; all this does is show a
//! disabled "sending" button for a couple of seconds so a slow submission
//! does not invite a second click.

use crate::config::ContactConfig;
use crate::page::{EventKind, Flow, Page, Target, handler};

pub const FORM_SELECTOR: &str = ".contact-left";
pub const BUTTON_SELECTOR: &str = ".send-btn";

/// Put the form's send button into its sending state and schedule the
/// restore. The submission itself is never blocked.
pub fn on_submit<P: Page>(page: &P, form: &P::Element, config: &ContactConfig) -> Flow {
    let Some(button) = page.query_within(form, BUTTON_SELECTOR) else {
        return Flow::Continue;
    };
    let original = page.inner_html(&button);
    // Already sending: the pending restore still holds the real label
    if original == config.sending_label {
        return Flow::Continue;
    }

    page.set_inner_html(&button, &config.sending_label);
    page.set_disabled(&button, true);
    page.set_timeout(
        config.reset_ms,
        Box::new(move |page: &P| {
            page.set_inner_html(&button, &original);
            page.set_disabled(&button, false);
        }),
    );
    Flow::Continue
}

/// Returns `false` when the page has no contact form.
pub fn wire<P: Page>(page: &P, config: &ContactConfig) -> bool {
    let Some(form) = page.query(FORM_SELECTOR) else {
        return false;
    };
    let config = config.clone();
    let form_el = form.clone();
    page.listen(
        Target::Element(form),
        EventKind::Submit,
        handler(move |page: &P, _| on_submit(page, &form_el, &config)),
    );
    true
}
