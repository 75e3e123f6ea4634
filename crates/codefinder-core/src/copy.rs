//! Copy-to-clipboard controls with transient "Copied!" feedback.
//!
//! Feedback is modelled as a revert deadline on the control instead of a
//! timer task: the control shows [`COPIED_LABEL`] until the deadline passes.
//! Activating it again moves the deadline, so repeated copies never stack.

use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::debug;

/// Label shown on a control right after a successful copy.
pub const COPIED_LABEL: &str = "Copied!";

/// How long [`COPIED_LABEL`] stays up before the code text returns.
pub const COPY_FEEDBACK: Duration = Duration::from_millis(900);

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("clipboard write failed: {0}")]
    Write(String),
}

/// Write access to a clipboard.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The operating system clipboard.
///
/// On Linux the clipboard owner serves the contents, so they vanish when a
/// short-lived process drops it. [`SystemClipboard::holding`] keeps the
/// write alive until the hold expires or another program takes the
/// clipboard over. Other platforms ignore the hold.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
    hold: Option<Duration>,
}

impl SystemClipboard {
    pub fn new() -> Result<Self, ClipboardError> {
        let inner =
            arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
        Ok(Self { inner, hold: None })
    }

    /// Block each write for up to `hold` so the text outlives the process.
    #[must_use]
    pub fn holding(mut self, hold: Duration) -> Self {
        self.hold = Some(hold);
        self
    }

    #[must_use]
    pub fn hold(&self) -> Option<Duration> {
        self.hold
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        #[cfg(target_os = "linux")]
        if let Some(hold) = self.hold {
            use arboard::SetExtLinux;

            return self
                .inner
                .set()
                .wait_until(Instant::now() + hold)
                .text(text.to_owned())
                .map_err(|e| ClipboardError::Write(e.to_string()));
        }
        self.inner
            .set_text(text.to_owned())
            .map_err(|e| ClipboardError::Write(e.to_string()))
    }
}

/// In-memory clipboard that records every write.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    pub writes: Vec<String>,
    failing: bool,
}

impl MemoryClipboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard whose writes always fail.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            writes: Vec::new(),
            failing: true,
        }
    }

    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.writes.last().map(String::as_str)
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.failing {
            return Err(ClipboardError::Write("clipboard rejected write".to_string()));
        }
        self.writes.push(text.to_string());
        Ok(())
    }
}

/// The interactive code cell of one result row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyButton {
    code: String,
    revert_at: Option<Instant>,
}

impl CopyButton {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            revert_at: None,
        }
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Copy the code. Returns whether the clipboard accepted it.
    ///
    /// A failed write is swallowed: the label is left as it was.
    pub fn activate<C>(&mut self, clipboard: &mut C, now: Instant) -> bool
    where
        C: Clipboard + ?Sized,
    {
        match clipboard.write_text(&self.code) {
            Ok(()) => {
                self.revert_at = Some(now + COPY_FEEDBACK);
                true
            }
            Err(error) => {
                debug!(code = %self.code, %error, "copy to clipboard failed");
                false
            }
        }
    }

    /// Text the control displays at `now`.
    #[must_use]
    pub fn label(&self, now: Instant) -> &str {
        if self.is_showing_feedback(now) {
            COPIED_LABEL
        } else {
            &self.code
        }
    }

    #[must_use]
    pub fn is_showing_feedback(&self, now: Instant) -> bool {
        self.revert_at.is_some_and(|deadline| now < deadline)
    }

    /// Time left until the label reverts, if feedback is showing.
    #[must_use]
    pub fn remaining_feedback(&self, now: Instant) -> Option<Duration> {
        self.revert_at
            .filter(|deadline| now < *deadline)
            .map(|deadline| deadline - now)
    }

    /// Drop any pending revert and show the code again.
    pub fn cancel(&mut self) {
        self.revert_at = None;
    }
}
