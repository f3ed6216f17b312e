//! Behavior configuration.
//!
//! Every offset, delay, threshold and label the page behaviors use lives
//! here, so none of them is a magic number buried in a handler. The stock
//! values reproduce the site's stock feel; a `folio.toml` (CLI) or an
//! inline `<script type="application/toml" id="folio-config">` element
//! (browser) overrides any subset of them.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [theme]
//! storage_key = "theme"      # localStorage key holding "light" / "dark"
//! dark_class = "dark-mode"   # Class toggled on <body>
//!
//! [scroll]
//! header_offset = 80.0       # Fixed header height subtracted from scroll targets
//! dropdown_restore_ms = 300  # Delay before the collapsed dropdown is restored
//! mobile_breakpoint = 768.0  # Widest viewport that gets the tap-to-open dropdown
//!
//! [reveal]
//! visible_margin = 150.0     # Distance above the viewport bottom that counts as visible
//!
//! [typing]
//! speed_ms = 20              # Delay between typed characters
//! cursor_linger_ms = 500     # Cursor stays this long after the last character
//! threshold = 0.5            # Visible fraction that starts typing
//!
//! [work]
//! data_url = "data.json"
//! placeholder_image = "images/placeholder.png"
//! link_label = "View More"
//!
//! [carousel]
//! space_between = 30
//! grab_cursor = true
//!
//! [[carousel.breakpoints]]
//! min_width = 0
//! slides = 1
//! space_between = 20
//!
//! [navbar]
//! shadow_threshold = 50.0
//! raised_shadow = "0 4px 20px var(--shadow-medium)"
//! resting_shadow = "0 2px 10px var(--shadow-light)"
//! active_offset = 150.0      # Section counts as current this far before its top
//!
//! [contact]
//! sending_label = "Sending..."
//! reset_ms = 2000
//!
//! [console]
//! greeting = true
//! author = ""
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// All behavior settings. Every section has defaults; config files only
/// need the keys they change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BehaviorConfig {
    pub theme: ThemeConfig,
    pub scroll: ScrollConfig,
    pub reveal: RevealConfig,
    pub typing: TypingConfig,
    pub work: WorkConfig,
    pub carousel: CarouselConfig,
    pub navbar: NavbarConfig,
    pub contact: ContactConfig,
    pub console: ConsoleConfig,
}

impl BehaviorConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.theme.storage_key.is_empty() {
            return Err(ConfigError::Validation(
                "theme.storage_key must not be empty".into(),
            ));
        }
        if self.theme.dark_class.is_empty() {
            return Err(ConfigError::Validation(
                "theme.dark_class must not be empty".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.typing.threshold) {
            return Err(ConfigError::Validation(
                "typing.threshold must be between 0 and 1".into(),
            ));
        }
        if self.work.data_url.is_empty() {
            return Err(ConfigError::Validation(
                "work.data_url must not be empty".into(),
            ));
        }
        let breakpoints = &self.carousel.breakpoints;
        if breakpoints.is_empty() {
            return Err(ConfigError::Validation(
                "carousel.breakpoints must not be empty".into(),
            ));
        }
        if breakpoints.iter().any(|b| b.slides == 0) {
            return Err(ConfigError::Validation(
                "carousel.breakpoints slides must be non-zero".into(),
            ));
        }
        if breakpoints.windows(2).any(|w| w[0].min_width >= w[1].min_width) {
            return Err(ConfigError::Validation(
                "carousel.breakpoints must be sorted by strictly increasing min_width".into(),
            ));
        }
        Ok(())
    }
}

/// Theme persistence settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Browser-local storage key holding `"light"` or `"dark"`.
    pub storage_key: String,
    /// Class present on `<body>` while the dark theme is active.
    pub dark_class: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: "theme".to_string(),
            dark_class: "dark-mode".to_string(),
        }
    }
}

/// In-page navigation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScrollConfig {
    /// Height of the fixed header, subtracted from every scroll target.
    pub header_offset: f64,
    /// How long the dropdown stays hidden after a navigation click.
    pub dropdown_restore_ms: u32,
    /// Viewports at most this wide (at load) get the tap-to-open dropdown.
    pub mobile_breakpoint: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            header_offset: 80.0,
            dropdown_restore_ms: 300,
            mobile_breakpoint: 768.0,
        }
    }
}

/// Reveal-on-scroll settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RevealConfig {
    /// An element is revealed once its top is this far above the viewport bottom.
    pub visible_margin: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            visible_margin: 150.0,
        }
    }
}

/// Typing effect settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TypingConfig {
    /// Milliseconds between characters.
    pub speed_ms: u32,
    /// Milliseconds the cursor stays after the last character.
    pub cursor_linger_ms: u32,
    /// Fraction of the element that must be visible to start typing.
    pub threshold: f64,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            speed_ms: 20,
            cursor_linger_ms: 500,
            threshold: 0.5,
        }
    }
}

/// Work data and card rendering settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorkConfig {
    /// URL of the work document, relative to the page.
    pub data_url: String,
    /// Image shown when a card image fails to load.
    pub placeholder_image: String,
    /// Text of each card's external link button.
    pub link_label: String,
}

impl Default for WorkConfig {
    fn default() -> Self {
        Self {
            data_url: "data.json".to_string(),
            placeholder_image: "images/placeholder.png".to_string(),
            link_label: "View More".to_string(),
        }
    }
}

/// Carousel widget settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselConfig {
    /// Gap between slides before any breakpoint applies, in pixels.
    pub space_between: u32,
    pub grab_cursor: bool,
    /// Responsive layouts, sorted by `min_width`.
    pub breakpoints: Vec<Breakpoint>,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            space_between: 30,
            grab_cursor: true,
            breakpoints: vec![
                Breakpoint {
                    min_width: 0,
                    slides: 1,
                    space_between: 20,
                },
                Breakpoint {
                    min_width: 640,
                    slides: 2,
                    space_between: 25,
                },
                Breakpoint {
                    min_width: 1024,
                    slides: 3,
                    space_between: 30,
                },
            ],
        }
    }
}

/// Layout applied from `min_width` pixels upward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Breakpoint {
    pub min_width: u32,
    pub slides: u32,
    pub space_between: u32,
}

/// Header styling and active-link settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavbarConfig {
    /// Scroll offset past which the header casts the raised shadow.
    pub shadow_threshold: f64,
    pub raised_shadow: String,
    pub resting_shadow: String,
    /// A section becomes current this many pixels before its top reaches the viewport top.
    pub active_offset: f64,
}

impl Default for NavbarConfig {
    fn default() -> Self {
        Self {
            shadow_threshold: 50.0,
            raised_shadow: "0 4px 20px var(--shadow-medium)".to_string(),
            resting_shadow: "0 2px 10px var(--shadow-light)".to_string(),
            active_offset: 150.0,
        }
    }
}

/// Contact form settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactConfig {
    /// Button content while the form is submitting.
    pub sending_label: String,
    /// Milliseconds before the button is restored.
    pub reset_ms: u32,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            sending_label: "Sending...".to_string(),
            reset_ms: 2000,
        }
    }
}

/// Developer-console greeting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConsoleConfig {
    pub greeting: bool,
    /// Signature line; omitted when empty.
    pub author: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            greeting: true,
            author: String::new(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(BehaviorConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values (arrays included) in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Parse a partial config from TOML text, merge it over the stock defaults
/// and validate the result.
pub fn parse_config(text: &str) -> Result<BehaviorConfig, ConfigError> {
    let overlay: toml::Value = toml::from_str(text)?;
    let merged = merge_toml(stock_defaults_value()?, overlay);
    let config: BehaviorConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from a TOML file.
///
/// A missing file yields the validated stock defaults; a file that exists
/// but does not parse or validate is an error.
pub fn load_config(path: &Path) -> Result<BehaviorConfig, ConfigError> {
    if !path.exists() {
        let config = BehaviorConfig::default();
        config.validate()?;
        return Ok(config);
    }
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Returns a fully-commented stock `folio.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Folio Configuration
# ===================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.
#
# The same TOML can be inlined in the page for the browser bundle:
#   <script type="application/toml" id="folio-config"> ... </script>

# ---------------------------------------------------------------------------
# Theme persistence
# ---------------------------------------------------------------------------
[theme]
# localStorage key holding "light" or "dark". Nothing stored means dark.
storage_key = "theme"

# Class toggled on <body> while the dark theme is active.
dark_class = "dark-mode"

# ---------------------------------------------------------------------------
# In-page navigation
# ---------------------------------------------------------------------------
[scroll]
# Fixed header height (px) subtracted from every smooth-scroll target.
header_offset = 80.0

# How long (ms) the work dropdown stays collapsed after a navigation click.
dropdown_restore_ms = 300

# Viewports at most this wide (px) get the tap-to-open work dropdown.
mobile_breakpoint = 768.0

# ---------------------------------------------------------------------------
# Reveal on scroll
# ---------------------------------------------------------------------------
[reveal]
# Elements are revealed once their top is this far (px) above the viewport bottom.
visible_margin = 150.0

# ---------------------------------------------------------------------------
# Typing effect
# ---------------------------------------------------------------------------
[typing]
# Delay (ms) between typed characters.
speed_ms = 20

# How long (ms) the cursor stays after the last character.
cursor_linger_ms = 500

# Fraction of the element (0-1) that must be visible before typing starts.
threshold = 0.5

# ---------------------------------------------------------------------------
# Work cards
# ---------------------------------------------------------------------------
[work]
# Document with "experience", "publications" and "projects" arrays.
data_url = "data.json"

# Shown when a card image fails to load.
placeholder_image = "images/placeholder.png"

# Label of each card's external link button.
link_label = "View More"

# ---------------------------------------------------------------------------
# Carousel
# ---------------------------------------------------------------------------
[carousel]
# Gap (px) between slides before any breakpoint applies.
space_between = 30
grab_cursor = true

# Responsive layouts, sorted by min_width (px). Arrays replace the defaults
# as a whole, so list every breakpoint you want.
[[carousel.breakpoints]]
min_width = 0
slides = 1
space_between = 20

[[carousel.breakpoints]]
min_width = 640
slides = 2
space_between = 25

[[carousel.breakpoints]]
min_width = 1024
slides = 3
space_between = 30

# ---------------------------------------------------------------------------
# Navbar
# ---------------------------------------------------------------------------
[navbar]
# Scroll offset (px) past which the header gets the raised shadow.
shadow_threshold = 50.0
raised_shadow = "0 4px 20px var(--shadow-medium)"
resting_shadow = "0 2px 10px var(--shadow-light)"

# A section becomes the current nav target this far (px) before its top.
active_offset = 150.0

# ---------------------------------------------------------------------------
# Contact form
# ---------------------------------------------------------------------------
[contact]
# Send-button content while the form submits.
sending_label = "Sending..."

# Delay (ms) before the button is restored.
reset_ms = 2000

# ---------------------------------------------------------------------------
# Developer console greeting
# ---------------------------------------------------------------------------
[console]
greeting = true

# Adds a "Built with ... by <author>" line when set.
author = ""
"##
}
