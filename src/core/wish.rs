//! The wish form: text input plus the sent/idle flag.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionResult {
    /// Trimmed text was empty; nothing changed.
    Ignored,
    /// A previous wish is still being celebrated; nothing changed.
    Blocked,
    Sent,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WishForm {
    text: String,
    sent: bool,
}

impl WishForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_sent(&self) -> bool {
        self.sent
    }

    /// The input is disabled while a wish is being celebrated.
    pub fn input_enabled(&self) -> bool {
        !self.sent
    }

    /// Mirrors the submit button: disabled while sent or while the field is empty.
    pub fn can_submit(&self) -> bool {
        !self.sent && !self.text.is_empty()
    }

    /// Returns false when the input is disabled.
    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        if self.sent {
            return false;
        }
        self.text = text.into();
        true
    }

    /// Validate and flip to sent. Scheduling the reset is the caller's job.
    pub fn submit(&mut self) -> SubmissionResult {
        if self.sent {
            return SubmissionResult::Blocked;
        }
        if self.text.trim().is_empty() {
            return SubmissionResult::Ignored;
        }
        self.sent = true;
        SubmissionResult::Sent
    }

    pub fn reset(&mut self) {
        self.sent = false;
        self.text.clear();
    }
}
