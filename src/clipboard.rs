//! Clipboard access for copying SVG markup.
//!
//! [`ClipboardSink`] lets the studio and the CLI write text without caring
//! whether a real clipboard exists; [`MemoryClipboard`] stands in for it in
//! tests and headless sessions.

use std::sync::{Arc, Mutex};

use tracing::debug;

/// Error types for clipboard operations.
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    /// No clipboard could be opened (headless session, missing display).
    #[error("Clipboard access error: {0}")]
    AccessError(String),

    /// The clipboard was opened but refused the text.
    #[error("Clipboard write error: {0}")]
    WriteError(String),
}

/// Somewhere text can be copied to.
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// System clipboard implementation using the `arboard` crate.
///
/// The handle is opened on first use and kept, so on X11 the copied text
/// stays available while the owning process runs.
#[derive(Default)]
pub struct SystemClipboard {
    handle: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut handle = match self.handle.take() {
            Some(handle) => handle,
            None => arboard::Clipboard::new()
                .map_err(|e| ClipboardError::AccessError(e.to_string()))?,
        };
        let result = handle
            .set_text(text)
            .map_err(|e| ClipboardError::WriteError(e.to_string()));
        self.handle = Some(handle);
        result?;
        debug!(bytes = text.len(), "Copied to system clipboard");
        Ok(())
    }
}

/// In-process clipboard. Clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Arc<Mutex<Option<String>>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last text copied, if any.
    pub fn contents(&self) -> Option<String> {
        self.contents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl ClipboardSink for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        *self
            .contents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(text.to_string());
        Ok(())
    }
}

/// A clipboard that is never available.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoClipboard;

impl ClipboardSink for NoClipboard {
    fn set_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::AccessError("no clipboard in this session".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clipboard_shares_contents() {
        let reader = MemoryClipboard::new();
        assert_eq!(reader.contents(), None);

        let mut writer = reader.clone();
        writer.set_text("<svg/>").unwrap();
        writer.set_text("<svg>2</svg>").unwrap();
        assert_eq!(reader.contents().as_deref(), Some("<svg>2</svg>"));
    }

    #[test]
    fn test_no_clipboard_fails() {
        let err = NoClipboard.set_text("x").unwrap_err();
        assert!(matches!(err, ClipboardError::AccessError(_)));
    }
}
