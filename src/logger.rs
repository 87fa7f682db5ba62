//! Colored stderr logging.
//!
//! `log!` always prints; `debug!` prints only in verbose mode. stdout is
//! left to command output.
//!
//! # Example
//!
//! ```ignore
//! log!("content"; "loaded {} posts", count);
//! debug!("locale"; "skipping unsupported code `{}`", code);
//! ```

use owo_colors::{OwoColorize, Stream, Style};
use std::{
    io::{Write, stderr},
    sync::atomic::{AtomicBool, Ordering},
};

static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Turn `debug!` output on or off for the whole process.
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// Print `[module] message` to stderr.
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Like [`log!`], but silent unless verbose mode is on.
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

/// Write one `[module] message` line to stderr.
pub fn log(module: &str, message: &str) {
    let mut stderr = stderr().lock();
    let _ = writeln!(stderr, "{} {message}", prefix(module));
}

/// `[module]`, bold and colored by severity when stderr supports it.
fn prefix(module: &str) -> String {
    let color = [
        ("content", Style::new().bright_blue()),
        ("warning", Style::new().bright_magenta()),
        ("error", Style::new().bright_red()),
    ]
    .into_iter()
    .find_map(|(name, style)| module.eq_ignore_ascii_case(name).then_some(style))
    .unwrap_or_else(|| Style::new().bright_yellow());
    let style = color.bold();

    format!("[{module}]")
        .if_supports_color(Stream::Stderr, |text| text.style(style))
        .to_string()
}
