//! Work cards: date formatting, card markup, and the data loader.
//!
//! The loader fetches the work document once, replaces each category
//! container's content with one card per item, then hands off to
//! [`carousel::init_all`]. Any failure along the way (network, HTTP status,
//! JSON) is logged and leaves the containers untouched.
//!
//! Card markup matches the Swiper slide structure the stylesheet expects:
//!
//! ```text
//! div.card.swiper-slide
//! ├── div.image-content
//! │   ├── span.overlay
//! │   └── div.card-image > img.card-img
//! └── div.card-content
//!     ├── h2.name
//!     ├── p.subtitle        (only when the item has one)
//!     ├── p.card-date       ("March 2023")
//!     ├── p.description
//!     └── button.button > a (external link)
//! ```
//!
//! All text is escaped by maud; item fields are never injected as raw HTML.

use crate::carousel;
use crate::config::{BehaviorConfig, WorkConfig};
use crate::page::{Page, PageError};
use crate::types::{Category, WorkData, WorkItem};
use chrono::{DateTime, NaiveDate};
use maud::{Markup, html};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] PageError),
    #[error("invalid work data: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Render an ISO-ish date as "Month Year", e.g. `2023-03-15` → `March 2023`.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM`, `YYYY` and RFC 3339 timestamps. The
/// calendar date as written is used, never shifted by timezone. Returns an
/// empty string when the date cannot be read.
pub fn format_month_year(raw: &str) -> String {
    parse_date(raw.trim())
        .map(|date| date.format("%B %Y").to_string())
        .unwrap_or_default()
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(stamp.date_naive());
    }
    // Date-time without offset: the date part is all we need
    if let Some((date, _)) = raw.split_once('T') {
        return NaiveDate::parse_from_str(date, "%Y-%m-%d").ok();
    }
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d") {
        return Some(date);
    }
    if raw.len() == 4 && raw.bytes().all(|b| b.is_ascii_digit()) {
        return NaiveDate::parse_from_str(&format!("{raw}-01-01"), "%Y-%m-%d").ok();
    }
    None
}

/// Markup for a single card.
pub fn render_card(item: &WorkItem, config: &WorkConfig) -> Markup {
    // Cleared first so a missing placeholder cannot trigger the handler again
    let fallback = format!("this.onerror=null;this.src='{}'", config.placeholder_image);

    html! {
        div class="card swiper-slide" {
            div.image-content {
                span.overlay {}
                div.card-image {
                    img.card-img src=(item.image) alt=(item.title) onerror=(fallback);
                }
            }
            div.card-content {
                h2.name { (item.title) }
                @if let Some(subtitle) = &item.subtitle {
                    p.subtitle { (subtitle) }
                }
                p.card-date { (format_month_year(&item.date)) }
                p.description { (item.description) }
                button.button {
                    a href=(item.link) target="_blank" rel="noopener noreferrer" {
                        (config.link_label)
                    }
                }
            }
        }
    }
}

/// Markup for a whole category: one card per item, in input order.
pub fn render_cards(items: &[WorkItem], config: &WorkConfig) -> Markup {
    html! {
        @for item in items {
            (render_card(item, config))
        }
    }
}

/// Replace a container's content with the category's cards.
///
/// Returns `false` when the page has no container for the category.
pub fn render_category<P: Page>(
    page: &P,
    category: Category,
    items: &[WorkItem],
    config: &WorkConfig,
) -> bool {
    let Some(container) = page.element_by_id(category.container_id()) else {
        return false;
    };
    page.set_inner_html(&container, &render_cards(items, config).into_string());
    true
}

/// Render every category, then initialize the carousels.
pub fn render_all<P: Page>(page: &P, data: &WorkData, config: &BehaviorConfig) {
    for category in Category::ALL {
        let items = data.items(category);
        if render_category(page, category, items, &config.work) {
            log::debug!("rendered {} {} card(s)", items.len(), category.key());
        }
    }
    carousel::init_all(page, &config.carousel);
}

/// Interpret a fetch result as a work document.
pub fn decode(result: Result<String, PageError>) -> Result<WorkData, LoadError> {
    let text = result?;
    Ok(WorkData::parse(&text)?)
}

/// Fetch the work document and render it when it arrives.
pub fn load<P: Page>(page: &P, config: &BehaviorConfig) {
    let url = config.work.data_url.clone();
    let config = config.clone();
    page.fetch_text(
        &url,
        Box::new(move |page: &P, result| match decode(result) {
            Ok(data) => render_all(page, &data, &config),
            Err(e) => log::error!("Error loading work data: {e}"),
        }),
    );
}

// =============================================================================
// Offline checks and pre-rendering (CLI)
// =============================================================================

/// Something in an item that renders badly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    EmptyTitle,
    EmptyLink,
    /// The raw date, which will render as an empty date line.
    UnreadableDate(String),
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::EmptyTitle => write!(f, "empty title"),
            Issue::EmptyLink => write!(f, "empty link"),
            Issue::UnreadableDate(raw) if raw.is_empty() => write!(f, "missing date"),
            Issue::UnreadableDate(raw) => write!(f, "unreadable date {raw:?}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub category: Category,
    /// 1-based position within the category.
    pub position: usize,
    pub title: String,
    pub issue: Issue,
}

/// Items that would render with missing pieces, in category then item order.
pub fn lint(data: &WorkData) -> Vec<Warning> {
    let mut warnings = Vec::new();
    for category in Category::ALL {
        for (i, item) in data.items(category).iter().enumerate() {
            let mut issues = Vec::new();
            if item.title.trim().is_empty() {
                issues.push(Issue::EmptyTitle);
            }
            if item.link.trim().is_empty() {
                issues.push(Issue::EmptyLink);
            }
            if parse_date(item.date.trim()).is_none() {
                issues.push(Issue::UnreadableDate(item.date.clone()));
            }
            warnings.extend(issues.into_iter().map(|issue| Warning {
                category,
                position: i + 1,
                title: item.title.clone(),
                issue,
            }));
        }
    }
    warnings
}

/// One pre-rendered fragment file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub category: Category,
    pub path: PathBuf,
    pub cards: usize,
}

/// Write each category's cards to `<dir>/<container-id>.html`.
pub fn render_to_dir(
    data: &WorkData,
    config: &WorkConfig,
    dir: &Path,
) -> Result<Vec<RenderedFile>, RenderError> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::new();
    for category in Category::ALL {
        let items = data.items(category);
        let path = dir.join(format!("{}.html", category.container_id()));
        fs::write(&path, render_cards(items, config).into_string())?;
        written.push(RenderedFile {
            category,
            path,
            cards: items.len(),
        });
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    // =========================================================================
    // Dates
    // =========================================================================

    #[test]
    fn formats_full_iso_date() {
        assert_eq!(format_month_year("2023-03-15"), "March 2023");
    }

    #[test]
    fn formats_partial_dates() {
        assert_eq!(format_month_year("2021-11"), "November 2021");
        assert_eq!(format_month_year("2019"), "January 2019");
    }

    #[test]
    fn formats_timestamps_without_timezone_shift() {
        assert_eq!(format_month_year("2024-01-01T00:30:00+05:00"), "January 2024");
        assert_eq!(format_month_year("2022-12-31T23:59:59Z"), "December 2022");
        assert_eq!(format_month_year("2022-07-04T10:00:00"), "July 2022");
    }

    #[test]
    fn unreadable_dates_are_empty() {
        assert_eq!(format_month_year(""), "");
        assert_eq!(format_month_year("soon"), "");
        assert_eq!(format_month_year("2023-13-01"), "");
    }

    // =========================================================================
    // Markup
    // =========================================================================

    #[test]
    fn card_contains_all_fields() {
        let html = render_card(&sample_item("Engineer"), &WorkConfig::default()).into_string();

        assert!(html.contains(r#"class="card swiper-slide""#));
        assert!(html.contains(r#"<h2 class="name">Engineer</h2>"#));
        assert!(html.contains(r#"<p class="subtitle">Acme Corp</p>"#));
        assert!(html.contains(r#"<p class="card-date">March 2023</p>"#));
        assert!(html.contains(r#"<p class="description">Built the thing</p>"#));
        assert!(html.contains(r#"src="images/engineer.png""#));
        assert!(html.contains(r#"alt="Engineer""#));
        assert!(html.contains(r#"href="https://example.com/engineer""#));
        assert!(html.contains(r#"target="_blank""#));
        assert!(html.contains(r#"rel="noopener noreferrer""#));
        assert!(html.contains("View More"));
    }

    #[test]
    fn card_without_subtitle_has_no_subtitle_line() {
        let mut item = sample_item("Solo");
        item.subtitle = None;
        let html = render_card(&item, &WorkConfig::default()).into_string();

        assert!(!html.contains("subtitle"));
        assert!(html.contains("card-date"));
    }

    #[test]
    fn card_image_falls_back_to_placeholder() {
        let config = WorkConfig {
            placeholder_image: "img/none.png".to_string(),
            ..WorkConfig::default()
        };
        let html = render_card(&sample_item("x"), &config).into_string();
        assert!(html.contains("onerror="));
        assert!(html.contains("img/none.png"));
        assert!(html.contains("this.onerror=null"));
    }

    #[test]
    fn card_text_is_escaped() {
        let mut item = sample_item("<script>alert('xss')</script>");
        item.description = "a & b".to_string();
        let html = render_card(&item, &WorkConfig::default()).into_string();

        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("a &amp; b"));
    }

    #[test]
    fn render_cards_keeps_input_order() {
        let items = vec![sample_item("First"), sample_item("Second"), sample_item("Third")];
        let html = render_cards(&items, &WorkConfig::default()).into_string();

        assert_eq!(count_cards(&html), 3);
        let first = html.find("First").unwrap();
        let second = html.find("Second").unwrap();
        let third = html.find("Third").unwrap();
        assert!(first < second && second < third);
        assert_eq!(html.matches("March 2023").count(), 3);
    }

    #[test]
    fn render_cards_empty_is_empty() {
        assert_eq!(render_cards(&[], &WorkConfig::default()).into_string(), "");
    }

    // =========================================================================
    // Loader
    // =========================================================================

    #[test]
    fn load_requests_configured_url() {
        let fixture = portfolio_page();
        let mut config = BehaviorConfig::default();
        config.work.data_url = "content/work.json".to_string();

        load(&fixture.page, &config);
        assert_eq!(fixture.page.fetched_urls(), vec!["content/work.json"]);
    }

    #[test]
    fn load_renders_each_category_then_carousels() {
        let fixture = portfolio_page();
        load(&fixture.page, &BehaviorConfig::default());
        fixture.page.complete_fetch(Ok(sample_data_json()));

        let experience = fixture.page.inner_html(&fixture.experience);
        let publications = fixture.page.inner_html(&fixture.publications);
        let projects = fixture.page.inner_html(&fixture.projects);
        assert_eq!(count_cards(&experience), 2);
        assert_eq!(count_cards(&publications), 1);
        assert_eq!(count_cards(&projects), 0);
        assert_eq!(card_titles(&experience), vec!["Staff Engineer", "Intern"]);

        // Carousels initialize even though one category was empty
        assert_eq!(fixture.page.carousels().len(), 3);
    }

    #[test]
    fn load_replaces_existing_container_content() {
        let fixture = portfolio_page();
        fixture
            .page
            .set_inner_html(&fixture.experience, "<p>Loading…</p>");
        load(&fixture.page, &BehaviorConfig::default());
        fixture.page.complete_fetch(Ok(sample_data_json()));

        assert!(!fixture.page.inner_html(&fixture.experience).contains("Loading"));
    }

    #[test]
    fn fetch_rejection_leaves_containers_empty() {
        let fixture = portfolio_page();
        load(&fixture.page, &BehaviorConfig::default());
        fixture
            .page
            .complete_fetch(Err(PageError::Network("offline".into())));

        for container in fixture.containers() {
            assert_eq!(fixture.page.inner_html(&container), "");
        }
        assert!(fixture.page.carousels().is_empty());
    }

    #[test]
    fn http_error_status_leaves_containers_empty() {
        let fixture = portfolio_page();
        load(&fixture.page, &BehaviorConfig::default());
        fixture.page.complete_fetch(Err(PageError::Status {
            url: "data.json".into(),
            status: 404,
        }));

        for container in fixture.containers() {
            assert_eq!(fixture.page.inner_html(&container), "");
        }
    }

    #[test]
    fn malformed_json_leaves_containers_empty() {
        let fixture = portfolio_page();
        load(&fixture.page, &BehaviorConfig::default());
        fixture.page.complete_fetch(Ok("{ not json".to_string()));

        for container in fixture.containers() {
            assert_eq!(fixture.page.inner_html(&container), "");
        }
        assert!(fixture.page.carousels().is_empty());
    }

    #[test]
    fn missing_container_is_skipped() {
        let page = crate::page::backend::tests::MockPage::new();
        let data = WorkData::parse(&sample_data_json()).unwrap();
        assert!(!render_category(
            &page,
            Category::Experience,
            &data.experience,
            &WorkConfig::default()
        ));
    }

    // =========================================================================
    // Offline checks
    // =========================================================================

    #[test]
    fn lint_flags_incomplete_items() {
        let data = WorkData::parse(
            r#"{
                "experience": [
                    {"title": "Complete", "date": "2020-01-01", "link": "https://x.example"},
                    {"title": "", "date": "someday", "link": ""}
                ],
                "projects": [{"title": "Undated", "link": "https://y.example"}]
            }"#,
        )
        .unwrap();
        let warnings = lint(&data);

        let issues: Vec<_> = warnings
            .iter()
            .map(|w| (w.category, w.position, w.issue.clone()))
            .collect();
        assert_eq!(
            issues,
            vec![
                (Category::Experience, 2, Issue::EmptyTitle),
                (Category::Experience, 2, Issue::EmptyLink),
                (
                    Category::Experience,
                    2,
                    Issue::UnreadableDate("someday".to_string())
                ),
                (Category::Projects, 1, Issue::UnreadableDate(String::new())),
            ]
        );
        assert_eq!(warnings[3].issue.to_string(), "missing date");
    }

    #[test]
    fn lint_sample_data_is_clean() {
        let data = WorkData::parse(&sample_data_json()).unwrap();
        assert!(lint(&data).is_empty());
    }

    #[test]
    fn render_to_dir_writes_one_file_per_category() {
        let tmp = tempfile::TempDir::new().unwrap();
        let out = tmp.path().join("cards");
        let data = WorkData::parse(&sample_data_json()).unwrap();

        let written = render_to_dir(&data, &WorkConfig::default(), &out).unwrap();

        assert_eq!(written.len(), 3);
        assert_eq!(written[0].path, out.join("experience-cards.html"));
        assert_eq!(written[0].cards, 2);
        let html = std::fs::read_to_string(&written[0].path).unwrap();
        assert_eq!(card_titles(&html), vec!["Staff Engineer", "Intern"]);
        let projects = std::fs::read_to_string(out.join("projects-cards.html")).unwrap();
        assert_eq!(projects, "");
    }

    #[test]
    fn decode_reports_error_kind() {
        assert!(matches!(
            decode(Err(PageError::Network("x".into()))),
            Err(LoadError::Fetch(_))
        ));
        assert!(matches!(decode(Ok("[]".into())), Err(LoadError::Json(_))));
        assert!(decode(Ok("{}".into())).is_ok());
    }
}
