use serde::Serialize;

/// Per-page form detection state.
///
/// `Idle -> FormDetected -> PromptShown -> {Filled | Dismissed}`. Navigation and
/// disabling return to `Idle`; so does a scan that finds no forms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Detection {
    #[default]
    Idle,
    FormDetected,
    PromptShown,
    Filled,
    Dismissed,
}

impl Detection {
    pub fn as_str(self) -> &'static str {
        match self {
            Detection::Idle => "idle",
            Detection::FormDetected => "formDetected",
            Detection::PromptShown => "promptShown",
            Detection::Filled => "filled",
            Detection::Dismissed => "dismissed",
        }
    }

    /// A form was seen during a scan. Only `Idle` advances; later states stay
    /// put until navigation resets them.
    pub fn on_forms_found(self) -> Self {
        match self {
            Detection::Idle => Detection::FormDetected,
            other => other,
        }
    }

    pub fn on_prompt_shown(self) -> Self {
        match self {
            Detection::FormDetected => Detection::PromptShown,
            other => other,
        }
    }

    pub fn on_dismissed(self) -> Self {
        match self {
            Detection::PromptShown => Detection::Dismissed,
            other => other,
        }
    }

    /// A fill wrote at least one field. Reachable from any state: the user can
    /// trigger a fill from the menu without ever seeing the prompt.
    pub fn on_filled(self) -> Self {
        Detection::Filled
    }
}

impl std::fmt::Display for Detection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
