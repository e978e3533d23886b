//! Copy-to-clipboard for result items and the transient "copied" indicator

use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::error::{Error, Result};

/// How long an item shows as copied
pub const COPIED_WINDOW: Duration = Duration::from_secs(2);

/// Identifies one item of one result message
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemKey {
    pub message_id: String,
    pub index: usize,
}

impl ItemKey {
    pub fn new(message_id: impl Into<String>, index: usize) -> Self {
        Self {
            message_id: message_id.into(),
            index,
        }
    }
}

/// Tracks the single most recently copied item.
///
/// A new copy replaces the previous one. Each copy carries its own deadline,
/// so an older deadline can never clear a newer indicator.
#[derive(Debug, Clone)]
pub struct CopyIndicator {
    window: Duration,
    copied: Option<(ItemKey, Instant)>,
}

impl Default for CopyIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl CopyIndicator {
    pub fn new() -> Self {
        Self::with_window(COPIED_WINDOW)
    }

    pub fn with_window(window: Duration) -> Self {
        Self {
            window,
            copied: None,
        }
    }

    /// Mark `key` as copied at `now`
    pub fn mark(&mut self, key: ItemKey, now: Instant) {
        self.copied = Some((key, now + self.window));
    }

    /// Whether `key` is the copied item and its window is still open
    pub fn is_copied(&self, key: &ItemKey, now: Instant) -> bool {
        self.current(now).is_some_and(|k| k == key)
    }

    /// The item currently shown as copied
    pub fn current(&self, now: Instant) -> Option<&ItemKey> {
        match &self.copied {
            Some((key, deadline)) if now < *deadline => Some(key),
            _ => None,
        }
    }

    /// Drop an expired indicator. Returns true if something was cleared.
    pub fn expire(&mut self, now: Instant) -> bool {
        match &self.copied {
            Some((_, deadline)) if now >= *deadline => {
                self.copied = None;
                true
            }
            _ => false,
        }
    }
}

/// Write access to a clipboard
#[async_trait]
pub trait Clipboard: Send + Sync {
    /// Put `text` on the clipboard. Returns false if the write failed.
    async fn copy(&self, text: &str) -> bool;
}

/// The desktop clipboard
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }

    async fn write(&self, text: &str) -> Result<()> {
        let text = text.to_string();
        tokio::task::spawn_blocking(move || {
            let mut clipboard =
                arboard::Clipboard::new().map_err(|e| Error::Clipboard(e.to_string()))?;
            clipboard
                .set_text(text)
                .map_err(|e| Error::Clipboard(e.to_string()))
        })
        .await
        .map_err(|e| Error::Task(e.to_string()))?
    }
}

#[async_trait]
impl Clipboard for SystemClipboard {
    async fn copy(&self, text: &str) -> bool {
        match self.write(text).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Copy failed: {}", e);
                false
            }
        }
    }
}

/// Copy an item's text and mark it on success.
///
/// A failed write leaves the indicator untouched.
pub async fn copy_item(
    clipboard: &dyn Clipboard,
    indicator: &mut CopyIndicator,
    key: ItemKey,
    text: &str,
) -> bool {
    if !clipboard.copy(text).await {
        return false;
    }
    indicator.mark(key, Instant::now());
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    struct MockClipboard {
        accept: bool,
        written: Arc<Mutex<Vec<String>>>,
    }

    impl MockClipboard {
        fn new(accept: bool) -> Self {
            Self {
                accept,
                written: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    #[async_trait]
    impl Clipboard for MockClipboard {
        async fn copy(&self, text: &str) -> bool {
            if self.accept {
                self.written.lock().push(text.to_string());
            }
            self.accept
        }
    }

    #[tokio::test]
    async fn test_copy_marks_item() {
        let clipboard = MockClipboard::new(true);
        let mut indicator = CopyIndicator::new();
        let key = ItemKey::new("agent-1", 0);

        assert!(copy_item(&clipboard, &mut indicator, key.clone(), "https://notion.so/x").await);
        assert_eq!(clipboard.written.lock().as_slice(), ["https://notion.so/x"]);
        assert!(indicator.is_copied(&key, Instant::now()));
    }

    #[tokio::test]
    async fn test_failed_copy_leaves_indicator() {
        let clipboard = MockClipboard::new(false);
        let mut indicator = CopyIndicator::new();
        let key = ItemKey::new("agent-1", 0);

        assert!(!copy_item(&clipboard, &mut indicator, key.clone(), "x").await);
        assert!(!indicator.is_copied(&key, Instant::now()));
        assert!(indicator.current(Instant::now()).is_none());
    }

    #[test]
    fn test_indicator_expires() {
        let mut indicator = CopyIndicator::new();
        let key = ItemKey::new("agent-1", 2);
        let start = Instant::now();
        indicator.mark(key.clone(), start);

        assert!(indicator.is_copied(&key, start + Duration::from_millis(1999)));
        assert!(!indicator.expire(start + Duration::from_millis(1999)));
        assert!(!indicator.is_copied(&key, start + COPIED_WINDOW));
        assert!(indicator.expire(start + COPIED_WINDOW));
        assert!(!indicator.expire(start + COPIED_WINDOW));
    }

    #[test]
    fn test_new_copy_supersedes_old() {
        let mut indicator = CopyIndicator::new();
        let first = ItemKey::new("agent-1", 0);
        let second = ItemKey::new("agent-1", 1);
        let start = Instant::now();

        indicator.mark(first.clone(), start);
        indicator.mark(second.clone(), start + Duration::from_millis(1500));

        // The first deadline has passed but the second item stays marked
        let later = start + Duration::from_millis(2500);
        assert!(!indicator.expire(later));
        assert!(indicator.is_copied(&second, later));
        assert!(!indicator.is_copied(&first, later));
        assert!(indicator.expire(start + Duration::from_millis(3500)));
    }

    #[test]
    fn test_keys_distinguish_messages() {
        let mut indicator = CopyIndicator::new();
        let now = Instant::now();
        indicator.mark(ItemKey::new("agent-1", 0), now);
        assert!(!indicator.is_copied(&ItemKey::new("agent-2", 0), now));
    }
}
