//! Clipboard boundary.
//!
//! Reading clipboard text is the one asynchronous input to the pipeline. A
//! [`ClipboardSource`] hands back a oneshot receiver; the session awaits it and
//! then performs an ordinary synchronous write.

use std::cell::RefCell;

use tokio::sync::oneshot;

/// Supplies clipboard text asynchronously.
pub trait ClipboardSource {
    /// Start a text read. The receiver yields the text, or an error if the
    /// source is dropped before answering.
    fn read_text(&self) -> oneshot::Receiver<String>;
}

/// In-memory clipboard, answering immediately.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    text: RefCell<String>,
}

impl MemoryClipboard {
    /// A clipboard holding `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: RefCell::new(text.into()),
        }
    }

    /// Replace the clipboard contents.
    pub fn set_text(&self, text: impl Into<String>) {
        *self.text.borrow_mut() = text.into();
    }

    /// Current contents.
    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }
}

impl ClipboardSource for MemoryClipboard {
    fn read_text(&self) -> oneshot::Receiver<String> {
        let (tx, rx) = oneshot::channel();
        // The receiver is still held here, so this cannot fail.
        let _ = tx.send(self.text());
        rx
    }
}

/// A clipboard that never answers; its reads fail once the sender drops.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClosedClipboard;

impl ClipboardSource for ClosedClipboard {
    fn read_text(&self) -> oneshot::Receiver<String> {
        let (_tx, rx) = oneshot::channel();
        rx
    }
}
