//! JSON page snapshot: a serializable stand-in for a rendered page.
//!
//! The page side serializes each `<form>` into controls and labels (document
//! order). The core resolves and fills against the snapshot; written values
//! and dispatched events are recorded so callers can replay them.

mod form;
mod page;

pub use form::{ControlNode, FormSnapshot, LabelNode};
pub use page::PageSnapshot;
