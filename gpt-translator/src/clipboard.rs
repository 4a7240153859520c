use std::sync::Mutex;

/// Notice shown after a successful copy
pub const COPIED_NOTICE: &str = "Copied!";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Clipboard error: {0}")]
pub struct ClipboardError(pub String);

/// Destination for copied output text
pub trait Clipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// In-process clipboard, for tests and headless runs
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<String>,
}

impl MemoryClipboard {
    pub fn contents(&self) -> String {
        self.contents
            .lock()
            .map(|c| c.clone())
            .unwrap_or_default()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut contents = self
            .contents
            .lock()
            .map_err(|e| ClipboardError(e.to_string()))?;
        *contents = text.to_string();
        Ok(())
    }
}

/// The desktop clipboard
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard = arboard::Clipboard::new().map_err(|e| ClipboardError(e.to_string()))?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| ClipboardError(e.to_string()))
    }
}
