//! Plain-text styling for CLI output
//!
//! Every helper returns the text unchanged apart from `divider`.

pub struct Theme;

impl Theme {
    pub fn primary(text: &str) -> String {
        text.to_string()
    }

    pub fn success(text: &str) -> String {
        text.to_string()
    }

    pub fn warning(text: &str) -> String {
        text.to_string()
    }

    pub fn error(text: &str) -> String {
        text.to_string()
    }

    pub fn muted(text: &str) -> String {
        text.to_string()
    }

    pub fn value(text: &str) -> String {
        text.to_string()
    }

    pub fn header(text: &str) -> String {
        text.to_string()
    }

    pub fn divider(width: usize) -> String {
        "-".repeat(width)
    }
}
