//! Shared data types: the theme preference and the work-item document.
//!
//! The work document is the static `data.json` the page fetches at load and
//! the CLI reads from disk. Both paths go through [`WorkData::parse`], so the
//! browser and the pre-renderer agree on exactly which documents are valid.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Persisted color theme. Dark is the default when nothing is stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    /// The value written to storage.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Parse a stored value. Anything unrecognized is `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// The three card sections of the page, in render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Experience,
    Publications,
    Projects,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::Experience,
        Category::Publications,
        Category::Projects,
    ];

    /// Key of the category array in `data.json`.
    pub fn key(self) -> &'static str {
        match self {
            Category::Experience => "experience",
            Category::Publications => "publications",
            Category::Projects => "projects",
        }
    }

    /// Id of the element the category's cards are rendered into.
    pub fn container_id(self) -> &'static str {
        match self {
            Category::Experience => "experience-cards",
            Category::Publications => "publications-cards",
            Category::Projects => "projects-cards",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Experience => "Experience",
            Category::Publications => "Publications",
            Category::Projects => "Projects",
        }
    }
}

/// One card's source record.
///
/// Decoding never fails on an individual field: missing or `null` fields
/// become empty strings, numbers and booleans are stringified. An empty
/// subtitle is the same as no subtitle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WorkItem {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_subtitle")]
    pub subtitle: Option<String>,
    /// ISO date as written in the document, e.g. `2023-03-15`.
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    /// Image URL, relative to the page.
    #[serde(default, deserialize_with = "lenient_string")]
    pub image: String,
    /// External link opened by the card's button.
    #[serde(default, deserialize_with = "lenient_string")]
    pub link: String,
}

/// The whole `data.json` document. Missing categories are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WorkData {
    #[serde(default)]
    pub experience: Vec<WorkItem>,
    #[serde(default)]
    pub publications: Vec<WorkItem>,
    #[serde(default)]
    pub projects: Vec<WorkItem>,
}

impl WorkData {
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn items(&self, category: Category) -> &[WorkItem] {
        match category {
            Category::Experience => &self.experience,
            Category::Publications => &self.publications,
            Category::Projects => &self.projects,
        }
    }

    pub fn total(&self) -> usize {
        Category::ALL.iter().map(|c| self.items(*c).len()).sum()
    }
}

fn scalar_to_string(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Value::deserialize(deserializer).map(scalar_to_string)
}

fn lenient_subtitle<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let text = scalar_to_string(Value::deserialize(deserializer)?);
    Ok((!text.is_empty()).then_some(text))
}
