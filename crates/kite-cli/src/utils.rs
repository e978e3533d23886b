//! Shared utilities

use std::io;
use std::thread::{self, JoinHandle};

/// Truncate a string to `max` characters, appending "..." if truncated.
/// Operates on Unicode char boundaries, not bytes.
pub fn truncate_chars(s: &str, max: usize) -> String {
    let mut chars = s.chars();
    let truncated: String = chars.by_ref().take(max).collect();
    if chars.next().is_some() {
        format!("{}...", truncated)
    } else {
        truncated
    }
}

/// Open `url` in the default browser.
///
/// The platform launcher runs on its own thread, which waits for it to exit,
/// so the UI never blocks on a slow browser start.
pub fn open_url(url: &str) -> io::Result<()> {
    launch_with(url, |url| open::that(url)).map(drop)
}

fn launch_with<F>(url: &str, launch: F) -> io::Result<JoinHandle<()>>
where
    F: FnOnce(&str) -> io::Result<()> + Send + 'static,
{
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("refusing to open non-web url: {}", url),
        ));
    }

    let url = url.to_string();
    thread::Builder::new()
        .name("open-url".into())
        .spawn(move || match launch(&url) {
            Ok(()) => tracing::debug!("Opened {}", url),
            Err(e) => tracing::warn!("Could not open {}: {}", url, e),
        })
}
