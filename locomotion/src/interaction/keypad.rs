use std::{fmt, sync::Arc};

use crate::constants::{DEFAULT_KEYPAD_CODE, DEFAULT_KEYPAD_CODE_LENGTH};

/// Invoked when a submitted entry matches the code.
pub type SuccessCallback = Arc<dyn Fn() + Send + Sync>;

/// Outcome of [`Keypad::submit`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted,
    Rejected,
}

/// Numeric code panel.
///
/// Digits accumulate up to `max_length`; extra digits are ignored. Submitting always
/// clears the entry and hides the panel, and fires the success callback only on a match.
pub struct Keypad {
    code: String,
    max_length: usize,
    entry: String,
    visible: bool,
    on_success: Option<SuccessCallback>,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new(DEFAULT_KEYPAD_CODE, DEFAULT_KEYPAD_CODE_LENGTH)
    }
}

impl fmt::Debug for Keypad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keypad")
            .field("max_length", &self.max_length)
            .field("entry_len", &self.entry.len())
            .field("visible", &self.visible)
            .field("has_callback", &self.on_success.is_some())
            .finish()
    }
}

impl Keypad {
    pub fn new(code: impl Into<String>, max_length: usize) -> Self {
        Self {
            code: code.into(),
            max_length,
            entry: String::with_capacity(max_length),
            visible: false,
            on_success: None,
        }
    }

    /// Replace the code and callback; any partial entry is discarded.
    pub fn set_code(&mut self, code: impl Into<String>, on_success: SuccessCallback) {
        self.code = code.into();
        self.on_success = Some(on_success);
        self.entry.clear();
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    /// Close without checking the entry.
    pub fn cancel(&mut self) {
        self.visible = false;
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[inline]
    pub fn entry(&self) -> &str {
        &self.entry
    }

    #[inline]
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Append a digit (`0..=9`). Returns false if it was ignored.
    pub fn add_digit(&mut self, digit: u8) -> bool {
        if digit > 9 || self.entry.len() >= self.max_length {
            return false;
        }
        self.entry.push(char::from(b'0' + digit));
        true
    }

    pub fn submit(&mut self) -> SubmitOutcome {
        let outcome = if self.entry == self.code {
            log::info!("keypad accepted code");
            if let Some(on_success) = &self.on_success {
                on_success();
            }
            SubmitOutcome::Accepted
        } else {
            log::debug!("keypad rejected entry");
            SubmitOutcome::Rejected
        };

        self.entry.clear();
        self.visible = false;
        outcome
    }

    /// The entry right-padded with `_` to `max_length`, e.g. `"12__"`.
    pub fn display(&self) -> String {
        let mut text = self.entry.clone();
        text.extend(std::iter::repeat_n('_', self.max_length.saturating_sub(self.entry.len())));
        text
    }
}
