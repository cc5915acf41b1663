//! Terminal logging with colored module prefixes.
//!
//! ```ignore
//! log!("rss"; "wrote {}", path.display());
//! debug!("serve"; "GET {}", url);
//! ```
//!
//! Lines go to stderr so `feedsmith build --stdout` can pipe the feed itself.

use owo_colors::{OwoColorize, Stream, Style};
use std::{
    io::{Write, stderr},
    sync::atomic::{AtomicBool, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macro
// ============================================================================

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
// Helper Functions
// ============================================================================

#[inline]
pub fn log(module: &str, message: &str) {
    let line = format_line(module, message);
    let mut stderr = stderr().lock();
    writeln!(stderr, "{line}").ok();
    stderr.flush().ok();
}

fn format_line(module: &str, message: &str) -> String {
    let prefix = colorize_prefix(module, &module.to_ascii_lowercase());
    format!("{prefix} {message}")
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let prefix = format!("[{module}]");
    let style = match module_lower {
        "serve" => Style::new().bright_blue().bold(),
        "atom" | "rss" => Style::new().bright_green().bold(),
        "error" => Style::new().bright_red().bold(),
        _ => Style::new().bright_yellow().bold(),
    };
    prefix
        .if_supports_color(Stream::Stderr, |text| text.style(style))
        .to_string()
}
