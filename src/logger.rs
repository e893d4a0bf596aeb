//! Terminal output: `log!` lines with a colored module prefix, plus
//! in-place progress bars for the parallel export.
//!
//! # Example
//!
//! ```ignore
//! log!("check"; "{} works, {} creators", works, creators);
//!
//! let progress = ProgressBars::new(&[("creator", 12), ("work", 80)]);
//! progress.inc("work");
//! progress.finish();
//! ```

use colored::{ColoredString, Colorize};
use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType, size},
};
use unicode_width::UnicodeWidthChar;
use std::{
    io::{Write, stdout},
    sync::{
        Mutex, OnceLock,
        atomic::{AtomicUsize, Ordering},
    },
};

/// Cached terminal width (fetched once on first use)
static TERMINAL_WIDTH: OnceLock<u16> = OnceLock::new();

/// Rows currently held by progress bars, so `log` prints above them.
static BAR_ROWS: AtomicUsize = AtomicUsize::new(0);

// Bar line layout: "[work] [████░░░░] 42/100"
const BRACKET_LEN: usize = 2;
const GAP: usize = 1;
/// " []" around the bar itself
const BAR_FRAME_LEN: usize = 3;
const MIN_BAR_WIDTH: usize = 10;
const MAX_BAR_WIDTH: usize = 40;

/// Display width of `[module] `.
#[inline]
const fn prefix_width(module_len: usize) -> usize {
    module_len + BRACKET_LEN + GAP
}

/// Falls back to 120 columns when the size is unknown (pipes, CI).
fn terminal_width() -> usize {
    *TERMINAL_WIDTH.get_or_init(|| size().map(|(w, _)| w).unwrap_or(120)) as usize
}

/// Log a message with a colored module prefix.
///
/// ```ignore
/// log!("export"; "wrote {} files", count);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Print one log line, truncated to the terminal width.
///
/// Multi-line messages are printed whole.
#[allow(clippy::cast_possible_truncation)] // bar rows are few
pub fn log(module: &str, message: &str) {
    let prefix = colorize_prefix(module);
    let mut stdout = stdout().lock();

    let rows = BAR_ROWS.load(Ordering::SeqCst);
    if rows > 0 {
        execute!(stdout, cursor::MoveUp(rows as u16)).ok();
        execute!(stdout, Clear(ClearType::FromCursorDown)).ok();
    }

    let message = if message.contains('\n') {
        message
    } else {
        truncate_str(message, terminal_width().saturating_sub(prefix_width(module.len())))
    };
    writeln!(stdout, "{prefix} {message}").ok();

    // Re-open the rows the bars draw into
    for _ in 0..rows {
        writeln!(stdout).ok();
    }
    stdout.flush().ok();
}

fn colorize_prefix(module: &str) -> ColoredString {
    let prefix = format!("[{module}]");
    match module.to_ascii_lowercase().as_str() {
        "error" => prefix.bright_red().bold(),
        "warn" => prefix.bright_magenta().bold(),
        "export" => prefix.bright_blue().bold(),
        "check" => prefix.bright_green().bold(),
        _ => prefix.bright_yellow().bold(),
    }
}

/// Cut `s` to at most `max_cols` terminal columns.
///
/// Wide chars (CJK, most emoji) take two columns and are never split.
fn truncate_str(s: &str, max_cols: usize) -> &str {
    let mut cols = 0;
    for (i, c) in s.char_indices() {
        cols += c.width().unwrap_or(0);
        if cols > max_cols {
            return &s[..i];
        }
    }
    s
}

/// Number of filled cells for `current` of `total` in a bar `width` cells wide.
#[inline]
fn filled_cells(current: usize, total: usize, width: usize) -> usize {
    (current * width).checked_div(total).unwrap_or(0).min(width)
}

/// Progress bars drawn on consecutive terminal rows, one per name.
///
/// Safe to update from rayon workers; drawing is serialized by a mutex.
pub struct ProgressBars {
    bars: Vec<Bar>,
    lock: Mutex<()>,
}

struct Bar {
    name: &'static str,
    prefix: ColoredString,
    total: usize,
    current: AtomicUsize,
}

impl ProgressBars {
    /// Reserve one row per `(name, total)` and start every bar at zero.
    pub fn new(bars: &[(&'static str, usize)]) -> Self {
        let mut stdout = stdout().lock();
        for _ in bars {
            writeln!(stdout).ok();
        }
        stdout.flush().ok();
        BAR_ROWS.store(bars.len(), Ordering::SeqCst);

        Self {
            bars: bars
                .iter()
                .map(|&(name, total)| Bar {
                    name,
                    prefix: colorize_prefix(name),
                    total,
                    current: AtomicUsize::new(0),
                })
                .collect(),
            lock: Mutex::new(()),
        }
    }

    /// Like `new`, but drops empty bars.
    ///
    /// Returns `None` when there is at most one item in total.
    pub fn new_filtered(bars: &[(&'static str, usize)]) -> Option<Self> {
        let bars: Vec<_> = bars.iter().filter(|(_, total)| *total > 0).copied().collect();
        let total: usize = bars.iter().map(|(_, n)| n).sum();
        (total > 1).then(|| Self::new(&bars))
    }

    /// Advance the bar called `name` by one. Unknown names are ignored.
    pub fn inc(&self, name: &str) {
        if let Some((row, bar)) = self.bars.iter().enumerate().find(|(_, b)| b.name == name) {
            let current = bar.current.fetch_add(1, Ordering::Relaxed) + 1;
            self.draw(row, bar, current);
        }
    }

    #[allow(clippy::cast_possible_truncation)] // bar rows are few
    fn draw(&self, row: usize, bar: &Bar, current: usize) {
        let _guard = self.lock.lock().ok();

        let count = format!("{current}/{}", bar.total);
        let overhead = prefix_width(bar.name.len()) + BAR_FRAME_LEN + GAP + count.len();
        let width = terminal_width()
            .saturating_sub(overhead)
            .clamp(MIN_BAR_WIDTH, MAX_BAR_WIDTH);
        let filled = filled_cells(current, bar.total, width);
        let line = "█".repeat(filled) + &"░".repeat(width - filled);

        let mut stdout = stdout().lock();
        let up = (self.bars.len() - row) as u16;
        execute!(stdout, cursor::MoveUp(up)).ok();
        execute!(stdout, Clear(ClearType::CurrentLine)).ok();
        write!(stdout, "{} [{line}] {count}", bar.prefix).ok();
        execute!(stdout, cursor::MoveDown(up)).ok();
        write!(stdout, "\r").ok();
        stdout.flush().ok();
    }

    /// Erase all bars and hand the rows back to `log`.
    #[allow(clippy::cast_possible_truncation)] // bar rows are few
    pub fn finish(&self) {
        if BAR_ROWS.swap(0, Ordering::SeqCst) == 0 {
            return;
        }
        let _guard = self.lock.lock().ok();
        let mut stdout = stdout().lock();
        let rows = self.bars.len() as u16;

        execute!(stdout, cursor::MoveUp(rows)).ok();
        execute!(stdout, Clear(ClearType::FromCursorDown)).ok();
        stdout.flush().ok();
    }
}

impl Drop for ProgressBars {
    fn drop(&mut self) {
        self.finish();
    }
}
