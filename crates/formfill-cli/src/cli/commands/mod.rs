//! CLI command handlers, one file per command.

mod completions;
mod detect;
mod fields;
mod fill;
mod man;
mod profile;
mod resolve;
mod toggle;
mod watch;

pub use completions::run_completions;
pub use detect::run_detect;
pub use fields::run_fields;
pub use fill::run_fill;
pub use man::run_man;
pub use profile::run_profile;
pub use resolve::run_resolve;
pub use toggle::run_toggle;
pub use watch::run_watch;

use formfill_core::snapshot::ControlNode;

/// `name=… id=… placeholder=…` for whichever attributes are present.
pub(crate) fn describe_control(control: &ControlNode) -> String {
    let mut parts = Vec::new();
    if let Some(name) = &control.name {
        parts.push(format!("name={name:?}"));
    }
    if let Some(id) = &control.id {
        parts.push(format!("id={id:?}"));
    }
    if let Some(placeholder) = &control.placeholder {
        parts.push(format!("placeholder={placeholder:?}"));
    }
    if parts.is_empty() {
        format!("<{:?}>", control.kind).to_lowercase()
    } else {
        parts.join(" ")
    }
}
