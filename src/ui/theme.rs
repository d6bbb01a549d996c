//! Visual theme and styling.

use console::Style;

/// Styles used across runthis output.
#[derive(Debug, Clone)]
pub struct RunthisTheme {
    /// Success messages (green).
    pub success: Style,
    /// Warnings (orange).
    pub warning: Style,
    /// Errors (red bold).
    pub error: Style,
    /// Secondary text.
    pub dim: Style,
    /// Important text (bold).
    pub highlight: Style,
    /// Headers (cyan bold).
    pub header: Style,
}

impl Default for RunthisTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl RunthisTheme {
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
            header: Style::new().bold().cyan(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            dim: Style::new(),
            highlight: Style::new(),
            header: Style::new(),
        }
    }

    /// Pick colored or plain depending on the terminal.
    pub fn detect() -> Self {
        if should_use_colors() {
            Self::new()
        } else {
            Self::plain()
        }
    }

    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format a header banner.
    pub fn format_header(&self, title: &str) -> String {
        format!(
            "{} {}",
            self.header.apply_to("▶"),
            self.highlight.apply_to(title)
        )
    }
}

/// Check if colors should be enabled.
fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_theme_formats_status() {
        let theme = RunthisTheme::plain();

        assert_eq!(theme.format_success("cloned"), "✓ cloned");
        assert_eq!(theme.format_warning("slow"), "⚠ slow");
        assert_eq!(theme.format_error("failed"), "✗ failed");
    }

    #[test]
    fn header_contains_title() {
        let msg = RunthisTheme::plain().format_header("runthis harness");
        assert!(msg.contains("runthis harness"));
        assert!(msg.starts_with('▶'));
    }

    #[test]
    fn colored_theme_keeps_text() {
        let msg = RunthisTheme::new().format_success("ok");
        assert!(console::strip_ansi_codes(&msg).contains("✓ ok"));
    }
}
