//! Form, control and label nodes of a snapshot.

use serde::{Deserialize, Serialize};

use crate::view::{
    ControlKind, ControlRef, ControlView, DomError, FieldEvent, FormMut, FormView, LabelView,
};

/// One `<input>`, `<textarea>` or `<select>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlNode {
    #[serde(default)]
    pub kind: ControlKind,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub value: String,
    /// Events dispatched on this control since the snapshot was taken.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<FieldEvent>,
}

impl ControlNode {
    /// Text input with the given `name` attribute.
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Self::default()
        }
    }

    /// Text input with the given `id` attribute.
    pub fn identified(id: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            ..Self::default()
        }
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    pub fn with_placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }
}

/// One `<label>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelNode {
    pub text: String,
    #[serde(rename = "for", default, skip_serializing_if = "Option::is_none")]
    pub for_id: Option<String>,
    /// Document-order index of a control nested inside the label.
    #[serde(rename = "control", default, skip_serializing_if = "Option::is_none")]
    pub nested: Option<usize>,
}

impl LabelNode {
    pub fn for_control(text: &str, for_id: &str) -> Self {
        Self {
            text: text.to_string(),
            for_id: Some(for_id.to_string()),
            nested: None,
        }
    }

    pub fn wrapping(text: &str, control: usize) -> Self {
        Self {
            text: text.to_string(),
            for_id: None,
            nested: Some(control),
        }
    }
}

/// One `<form>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSnapshot {
    #[serde(default)]
    pub controls: Vec<ControlNode>,
    #[serde(default)]
    pub labels: Vec<LabelNode>,
}

impl FormSnapshot {
    pub fn new(controls: Vec<ControlNode>, labels: Vec<LabelNode>) -> Self {
        Self { controls, labels }
    }
}

impl ControlView for ControlNode {
    fn kind(&self) -> ControlKind {
        self.kind
    }

    fn input_type(&self) -> Option<&str> {
        self.input_type.as_deref()
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn dom_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn placeholder(&self) -> Option<&str> {
        self.placeholder.as_deref()
    }

    fn value(&self) -> &str {
        &self.value
    }
}

impl LabelView for LabelNode {
    fn text(&self) -> &str {
        &self.text
    }

    fn for_id(&self) -> Option<&str> {
        self.for_id.as_deref()
    }

    fn nested_control(&self) -> Option<ControlRef> {
        self.nested.map(ControlRef)
    }
}

impl FormView for FormSnapshot {
    type Control = ControlNode;
    type Label = LabelNode;

    fn control_count(&self) -> usize {
        self.controls.len()
    }

    fn control(&self, at: ControlRef) -> Option<&ControlNode> {
        self.controls.get(at.0)
    }

    fn label_count(&self) -> usize {
        self.labels.len()
    }

    fn label(&self, index: usize) -> Option<&LabelNode> {
        self.labels.get(index)
    }
}

impl FormMut for FormSnapshot {
    fn set_value(&mut self, at: ControlRef, value: &str) -> Result<(), DomError> {
        let control = self.controls.get_mut(at.0).ok_or(DomError::Detached(at))?;
        control.value = value.to_string();
        Ok(())
    }

    fn dispatch(&mut self, at: ControlRef, event: FieldEvent) -> Result<(), DomError> {
        let control = self.controls.get_mut(at.0).ok_or(DomError::Detached(at))?;
        control.events.push(event);
        Ok(())
    }
}
