//! Terminal UI with colors and live spinners.

use console::Term;
use std::io::Write;

use super::{
    NonInteractiveUI, OutputMode, ProgressSpinner, RunthisTheme, SpinnerHandle, UserInterface,
};

/// Styled output for a person watching the harness.
///
/// Results go to stdout; warnings and errors go to stderr so a redirected
/// report stays clean.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: RunthisTheme,
    mode: OutputMode,
}

impl TerminalUI {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme: RunthisTheme::detect(),
            mode,
        }
    }

    fn status_line(&mut self, line: String) {
        if self.mode.shows_status() {
            writeln!(self.out, "{}", line).ok();
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.status_line(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        let line = self.theme.format_success(msg);
        self.status_line(line);
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.err, "{}", self.theme.format_warning(msg)).ok();
        }
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_error(msg)).ok();
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_spinners() {
            Box::new(ProgressSpinner::new(message))
        } else {
            Box::new(ProgressSpinner::hidden())
        }
    }

    fn show_header(&mut self, title: &str) {
        let line = format!("\n{}\n", self.theme.format_header(title));
        self.status_line(line);
    }

    fn show_hint(&mut self, hint: &str) {
        let line = format!("  {}", self.theme.dim.apply_to(hint));
        self.status_line(line);
    }
}

/// Spinners and colors only when stdout is a terminal and the caller
/// allows it; plain lines otherwise.
pub fn create_ui(interactive: bool, mode: OutputMode) -> Box<dyn UserInterface> {
    if interactive && Term::stdout().is_term() {
        Box::new(TerminalUI::new(mode))
    } else {
        Box::new(NonInteractiveUI::new(mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_ui_output_mode() {
        let ui = TerminalUI::new(OutputMode::Quiet);
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
    }

    #[test]
    fn create_ui_respects_mode() {
        let ui = create_ui(false, OutputMode::Silent);
        assert_eq!(ui.output_mode(), OutputMode::Silent);
    }

    #[test]
    fn silent_terminal_ui_finishes_hidden_spinner() {
        let mut ui = TerminalUI::new(OutputMode::Silent);
        ui.message("not shown");
        let mut spinner = ui.start_spinner("octo/cat");
        spinner.finish_success("octo/cat");
    }
}
