//! Read-only views over a page's forms, plus the narrow write surface used by the filler.
//!
//! The resolver only depends on `FormView`; it never sees a concrete DOM. Any
//! rendering engine (or the JSON snapshot in `crate::snapshot`) can sit behind
//! these traits.

use serde::{Deserialize, Serialize};

/// Document-order index of a control inside its form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ControlRef(pub usize);

/// Kind of form control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlKind {
    #[default]
    Input,
    Textarea,
    Select,
}

/// Input types that never take free text from a profile.
const NON_TEXT_INPUT_TYPES: &[&str] = &[
    "hidden", "submit", "button", "reset", "image", "file", "checkbox", "radio",
];

/// True if a control of this kind and `type` attribute can receive a profile value.
pub fn is_fillable(kind: ControlKind, input_type: Option<&str>) -> bool {
    match (kind, input_type) {
        (ControlKind::Input, Some(t)) => !NON_TEXT_INPUT_TYPES
            .iter()
            .any(|nt| t.trim().eq_ignore_ascii_case(nt)),
        _ => true,
    }
}

/// Notification dispatched after a value write so page listeners observe it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldEvent {
    Input,
    Change,
}

/// Unexpected failure while writing into the page.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// The control was removed between resolution and write.
    #[error("control {0:?} is no longer attached to the form")]
    Detached(ControlRef),
    /// The page refused the write for another reason.
    #[error("page rejected write: {0}")]
    Rejected(String),
}

/// Read access to one control.
pub trait ControlView {
    fn kind(&self) -> ControlKind;
    /// The `type` attribute of an `<input>`; missing means `text`.
    fn input_type(&self) -> Option<&str>;
    fn name(&self) -> Option<&str>;
    fn dom_id(&self) -> Option<&str>;
    fn placeholder(&self) -> Option<&str>;
    /// Current value; empty string when the user has not typed anything.
    fn value(&self) -> &str;

    fn is_fillable(&self) -> bool {
        is_fillable(self.kind(), self.input_type())
    }
}

/// Read access to one `<label>`.
pub trait LabelView {
    /// Visible text content.
    fn text(&self) -> &str;
    /// Value of the `for` attribute.
    fn for_id(&self) -> Option<&str>;
    /// Control nested inside the label element, if any.
    fn nested_control(&self) -> Option<ControlRef>;
}

/// Read-only snapshot of a form: controls and labels in document order.
pub trait FormView {
    type Control: ControlView;
    type Label: LabelView;

    fn control_count(&self) -> usize;
    fn control(&self, at: ControlRef) -> Option<&Self::Control>;
    fn label_count(&self) -> usize;
    fn label(&self, index: usize) -> Option<&Self::Label>;

    /// First control whose `id` equals `dom_id` exactly (getElementById).
    fn control_by_dom_id(&self, dom_id: &str) -> Option<ControlRef> {
        (0..self.control_count())
            .map(ControlRef)
            .find(|at| self.control(*at).and_then(|c| c.dom_id()) == Some(dom_id))
    }
}

/// Write surface used by the filler.
pub trait FormMut: FormView {
    fn set_value(&mut self, at: ControlRef, value: &str) -> Result<(), DomError>;
    fn dispatch(&mut self, at: ControlRef, event: FieldEvent) -> Result<(), DomError>;
}
