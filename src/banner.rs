//! Developer-console greeting.

use crate::config::ConsoleConfig;
use crate::page::Page;

const GREETING_CSS: &str = "font-size: 20px; color: #6b7fd7; font-weight: bold;";
const INVITE_CSS: &str = "font-size: 14px; color: #8a9ce6;";
const SIGNATURE_CSS: &str = "font-size: 12px; color: #c7c9d1;";

/// Lines of the greeting with their styles.
pub fn banner_lines(config: &ConsoleConfig) -> Vec<(String, &'static str)> {
    if !config.greeting {
        return Vec::new();
    }
    let mut lines = vec![
        ("👋 Hello, curious developer!".to_string(), GREETING_CSS),
        (
            "I see you're checking out the code. Feel free to explore!".to_string(),
            INVITE_CSS,
        ),
    ];
    let author = config.author.trim();
    if !author.is_empty() {
        lines.push((format!("Built with ❤️ by {author}"), SIGNATURE_CSS));
    }
    lines
}

pub fn print<P: Page>(page: &P, config: &ConsoleConfig) {
    for (text, css) in banner_lines(config) {
        page.console_styled(&text, css);
    }
}
