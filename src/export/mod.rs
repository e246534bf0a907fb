//! Non-interactive renderings of a finished profile.

pub mod html;
pub mod json;

pub use html::{render_html, write_html};
pub use json::{render_json, JsonReport};

/// Repositories listed in the JSON report.
pub const JSON_TOP_REPOSITORIES: usize = 5;
/// Repositories listed on the HTML page.
pub const HTML_TOP_REPOSITORIES: usize = 6;
/// Languages listed on the HTML page.
pub const HTML_TOP_LANGUAGES: usize = 10;
