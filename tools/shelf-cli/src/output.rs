//! Output formatting for the CLI.

use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use shelf_commerce::search::PageButton;

/// Output handler for CLI messages.
///
/// Results go to stdout, diagnostics to stderr. In JSON mode only
/// [`json`](Output::json) and [`error`](Output::error) print anything.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
    out: Term,
    err: Term,
}

impl Output {
    pub fn new(verbose: bool, json: bool) -> Self {
        Self {
            verbose,
            json,
            out: Term::stdout(),
            err: Term::stderr(),
        }
    }

    fn say(&self, line: impl AsRef<str>) {
        if !self.json {
            let _ = self.out.write_line(line.as_ref());
        }
    }

    fn complain(&self, line: impl AsRef<str>) {
        let _ = self.err.write_line(line.as_ref());
    }

    pub fn info(&self, msg: &str) {
        self.say(format!("{} {}", style("ℹ").blue(), msg));
    }

    pub fn success(&self, msg: &str) {
        self.say(format!("{} {}", style("✓").green(), msg));
    }

    pub fn warn(&self, msg: &str) {
        if !self.json {
            self.complain(format!("{} {}", style("⚠").yellow(), msg));
        }
    }

    /// Errors are printed in every mode; JSON mode wraps them in an object.
    pub fn error(&self, msg: &str) {
        if self.json {
            self.complain(serde_json::json!({ "error": msg }).to_string());
        } else {
            self.complain(format!("{} {}", style("✗").red(), style(msg).red()));
        }
    }

    /// Only shown with `--verbose`.
    pub fn debug(&self, msg: &str) {
        if self.verbose && !self.json {
            self.complain(format!("{} {}", style("→").dim(), style(msg).dim()));
        }
    }

    pub fn header(&self, msg: &str) {
        self.say("");
        self.say(style(msg).bold().underlined().to_string());
    }

    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            let _ = self.out.write_line(&json);
        }
    }

    pub fn kv(&self, key: &str, value: &str) {
        self.say(format!("  {}: {}", style(key).dim(), value));
    }

    pub fn list_item(&self, item: &str) {
        self.say(format!("  {} {}", style("•").dim(), item));
    }

    /// One row of a fixed-width table. Cells wider than their column are cut.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        let cells: Vec<String> = cols
            .iter()
            .zip(widths)
            .map(|(col, &width)| pad(&truncate(col, width), width))
            .collect();
        self.say(format!("  {}", cells.join("  ")));
    }

    /// Spinner for a fetch in flight. Hidden in JSON mode.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Terminal width in columns.
    pub fn term_width(&self) -> usize {
        self.out.size().1 as usize
    }
}

/// Colored badge for a merchandising status.
pub fn status_badge(status: &str) -> String {
    match status.to_lowercase().as_str() {
        "new" => style(status).green().to_string(),
        "on sale" => style(status).yellow().to_string(),
        _ => status.to_string(),
    }
}

/// Render page buttons on one line, current page highlighted.
pub fn format_buttons(buttons: &[PageButton], current: usize) -> String {
    buttons
        .iter()
        .map(|b| match b.page() {
            Some(page) if page == current => style(format!("[{}]", page)).bold().to_string(),
            _ => b.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// Pads by visible width so styled cells line up.
fn pad(text: &str, width: usize) -> String {
    console::pad_str(text, width, console::Alignment::Left, None).into_owned()
}

fn truncate(text: &str, width: usize) -> String {
    if console::measure_text_width(text) <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", kept)
}
