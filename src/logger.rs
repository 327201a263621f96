//! Terminal logging with colored module prefixes.
//!
//! - `log!` prints `[module] message`
//! - `debug!` prints only when `--verbose` is set
//! - `ProgressLine` keeps a single updating `[build] pages(3/7)` line
//!
//! ```ignore
//! log!("content"; "site settings fetch failed: {}", err);
//!
//! let progress = ProgressLine::new("pages", 7);
//! progress.inc();
//! progress.finish();
//! ```

use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use owo_colors::OwoColorize;
use parking_lot::Mutex;
use std::{
    io::{Write, stdout},
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Whether a progress line currently owns the last terminal row.
static PROGRESS_ACTIVE: AtomicBool = AtomicBool::new(false);

pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macros
// ============================================================================

/// Log a message with a colored module prefix
///
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Output
// ============================================================================

/// Write `[module] message` to stderr.
///
/// Stdout is reserved for command output (`render`, `query`), so logs never
/// mix into piped HTML or JSON.
pub fn log(module: &str, message: &str) {
    let prefix = colorize_prefix(module);
    let mut err = std::io::stderr().lock();

    if PROGRESS_ACTIVE.load(Ordering::SeqCst) {
        execute!(err, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine)).ok();
    }

    writeln!(err, "{prefix} {message}").ok();
    err.flush().ok();
}

/// Apply color to a module prefix based on module type
fn colorize_prefix(module: &str) -> String {
    let prefix = format!("[{module}]");
    match module.to_ascii_lowercase().as_str() {
        "build" | "render" => prefix.bright_blue().bold().to_string(),
        "frame" => prefix.bright_green().bold().to_string(),
        "error" => prefix.bright_red().bold().to_string(),
        "warning" => prefix.bright_magenta().bold().to_string(),
        _ => prefix.bright_yellow().bold().to_string(),
    }
}

// ============================================================================
// Progress Line
// ============================================================================

/// Single-line counter: `[build] pages(3/7)`.
///
/// Updates in place. `inc` uses `try_lock` so concurrent callers never wait on
/// the terminal; a skipped refresh is caught up by the next one.
pub struct ProgressLine {
    name: &'static str,
    total: usize,
    current: AtomicUsize,
    lock: Mutex<()>,
}

impl ProgressLine {
    pub fn new(name: &'static str, total: usize) -> Self {
        PROGRESS_ACTIVE.store(true, Ordering::SeqCst);
        let progress = Self {
            name,
            total,
            current: AtomicUsize::new(0),
            lock: Mutex::new(()),
        };
        progress.display(false);
        progress
    }

    pub fn inc(&self) {
        self.current.fetch_add(1, Ordering::Relaxed);
        if let Some(_guard) = self.lock.try_lock() {
            self.display(false);
        }
    }

    fn line(&self) -> String {
        let current = self.current.load(Ordering::Relaxed);
        format!(
            "{} {}({}/{})",
            colorize_prefix("build"),
            self.name,
            current,
            self.total
        )
    }

    fn display(&self, newline: bool) {
        let mut out = stdout().lock();
        execute!(out, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine)).ok();
        if newline {
            writeln!(out, "{}", self.line()).ok();
        } else {
            write!(out, "{}", self.line()).ok();
        }
        out.flush().ok();
    }

    /// Keep the final counts on screen and move to the next line.
    pub fn finish(self) {
        PROGRESS_ACTIVE.store(false, Ordering::SeqCst);
        {
            let _guard = self.lock.lock();
            self.display(true);
        }
        std::mem::forget(self);
    }
}

impl Drop for ProgressLine {
    fn drop(&mut self) {
        PROGRESS_ACTIVE.store(false, Ordering::SeqCst);
        let mut out = stdout().lock();
        execute!(out, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine)).ok();
        out.flush().ok();
    }
}
