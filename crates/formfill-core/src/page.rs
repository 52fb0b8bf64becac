//! Page boundary: the forms on the page plus the prompt and notice surface.

use serde::{Deserialize, Serialize};

use crate::view::FormMut;

/// Severity of a user-visible notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Info,
    Error,
}

/// Short dismissible message shown on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn filled(count: usize) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: format!("Successfully filled {count} fields!"),
        }
    }

    pub fn no_matching_fields() -> Self {
        Self {
            kind: NoticeKind::Info,
            message: "No matching fields found to fill.".to_string(),
        }
    }

    pub fn no_stored_data() -> Self {
        Self {
            kind: NoticeKind::Error,
            message: "No saved data found. Please configure your profile first.".to_string(),
        }
    }

    pub fn fill_failed() -> Self {
        Self {
            kind: NoticeKind::Error,
            message: "Error occurred while filling the form.".to_string(),
        }
    }
}

/// Everything the session needs from the host page.
pub trait Page {
    type Form: FormMut;

    fn url(&self) -> &str;
    fn form_count(&self) -> usize;
    fn form_mut(&mut self, index: usize) -> Option<&mut Self::Form>;

    /// Show the "fill this form?" prompt, replacing any existing one.
    fn show_prompt(&mut self);
    /// Remove the prompt; returns false if none was shown.
    fn remove_prompt(&mut self) -> bool;
    fn notify(&mut self, notice: Notice);
}
