//! Terminal output: `[module] message` lines and a build progress line.
//!
//! ```ignore
//! log!("feed"; "{}", path.display());
//! debug!("data"; "loaded {} tables", n);   // only with --verbose
//!
//! let progress = ProgressLine::new(&[("pages", 42), ("docs", 10)]);
//! progress.inc("pages");
//! progress.finish();
//! ```
//!
//! While a progress line is live on a terminal, log lines clear it first
//! and the next `inc` redraws it below them.

use crossterm::{
    cursor, queue,
    terminal::{Clear, ClearType},
};
use owo_colors::OwoColorize;
use parking_lot::Mutex;
use std::{
    io::{IsTerminal, StdoutLock, Write, stdout},
    sync::atomic::{AtomicBool, Ordering},
};

static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set while a `ProgressLine` is drawn on the current row.
static PROGRESS_ACTIVE: AtomicBool = AtomicBool::new(false);

pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Like [`log!`], but only printed with `--verbose`.
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

pub fn log(module: &str, message: &str) {
    let mut out = stdout().lock();
    if PROGRESS_ACTIVE.load(Ordering::Relaxed) {
        clear_row(&mut out);
    }
    writeln!(out, "{} {message}", prefix(module)).ok();
    out.flush().ok();
}

fn prefix(module: &str) -> String {
    let tag = format!("[{module}]");
    match module.to_ascii_lowercase().as_str() {
        "error" => tag.bright_red().bold().to_string(),
        "warning" | "warn" => tag.bright_magenta().bold().to_string(),
        "feed" | "sitemap" | "robots" | "blog" => tag.bright_green().bold().to_string(),
        "docs" | "query" => tag.bright_cyan().bold().to_string(),
        _ => tag.bright_yellow().bold().to_string(),
    }
}

fn clear_row(out: &mut StdoutLock<'_>) {
    if out.is_terminal() {
        queue!(out, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine)).ok();
    }
}

// ============================================================================
// ProgressLine
// ============================================================================

/// `[build] pages(12/40) docs(3/9)`, redrawn in place.
///
/// Counters with a zero total are left out. Off a terminal nothing is drawn
/// until [`finish`](Self::finish), which prints the final counts once.
pub struct ProgressLine {
    counters: Mutex<Vec<(&'static str, usize, usize)>>,
    interactive: bool,
}

impl ProgressLine {
    pub fn new(items: &[(&'static str, usize)]) -> Self {
        let counters = items
            .iter()
            .filter(|(_, total)| *total > 0)
            .map(|&(name, total)| (name, 0, total))
            .collect();
        let progress = Self {
            counters: Mutex::new(counters),
            interactive: stdout().is_terminal(),
        };
        if progress.interactive {
            PROGRESS_ACTIVE.store(true, Ordering::Relaxed);
            progress.redraw();
        }
        progress
    }

    /// Bump counter `name`; unknown names are ignored.
    pub fn inc(&self, name: &str) {
        {
            let mut counters = self.counters.lock();
            let Some(counter) = counters.iter_mut().find(|(n, ..)| *n == name) else {
                return;
            };
            counter.1 += 1;
        }
        if self.interactive {
            self.redraw();
        }
    }

    fn line(&self) -> String {
        self.counters
            .lock()
            .iter()
            .map(|(name, done, total)| format!("{name}({done}/{total})"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn redraw(&self) {
        let line = self.line();
        let mut out = stdout().lock();
        clear_row(&mut out);
        write!(out, "{} {line}", prefix("build")).ok();
        out.flush().ok();
    }

    /// Leave the final counts on their own line.
    pub fn finish(self) {
        let line = self.line();
        let mut out = stdout().lock();
        clear_row(&mut out);
        if !line.is_empty() {
            writeln!(out, "{} {line}", prefix("build")).ok();
        }
        out.flush().ok();
    }
}

impl Drop for ProgressLine {
    fn drop(&mut self) {
        PROGRESS_ACTIVE.store(false, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_line_hides_empty_counters() {
        let progress = ProgressLine::new(&[("pages", 3), ("docs", 0)]);
        assert_eq!(progress.line(), "pages(0/3)");
    }

    #[test]
    fn test_progress_line_inc() {
        let progress = ProgressLine::new(&[("pages", 2), ("docs", 1)]);
        progress.inc("pages");
        progress.inc("docs");
        progress.inc("unknown");
        assert_eq!(progress.line(), "pages(1/2) docs(1/1)");
        progress.finish();
    }

    #[test]
    fn test_prefix_contains_module() {
        assert!(prefix("feed").contains("[feed]"));
        assert!(prefix("Warning").contains("[Warning]"));
    }

    #[test]
    fn test_verbose_toggle() {
        set_verbose(true);
        assert!(is_verbose());
        set_verbose(false);
        assert!(!is_verbose());
    }
}
