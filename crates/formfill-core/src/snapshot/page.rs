//! Page-level snapshot: url, forms, prompt visibility and shown notices.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::page::{Notice, Page};

use super::form::FormSnapshot;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSnapshot {
    pub url: String,
    #[serde(default)]
    pub forms: Vec<FormSnapshot>,
    #[serde(default)]
    pub prompt_visible: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notices: Vec<Notice>,
}

impl PageSnapshot {
    pub fn new(url: &str, forms: Vec<FormSnapshot>) -> Self {
        Self {
            url: url.to_string(),
            forms,
            prompt_visible: false,
            notices: Vec::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("parse page snapshot JSON")
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("serialize page snapshot")
    }

    /// Read a snapshot file written by the page side.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("read page snapshot: {}", path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("parse page snapshot: {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self.to_json_pretty()?;
        std::fs::write(path, json)
            .with_context(|| format!("write page snapshot: {}", path.display()))
    }

    /// Most recent notice, if any was shown.
    pub fn last_notice(&self) -> Option<&Notice> {
        self.notices.last()
    }
}

impl Page for PageSnapshot {
    type Form = FormSnapshot;

    fn url(&self) -> &str {
        &self.url
    }

    fn form_count(&self) -> usize {
        self.forms.len()
    }

    fn form_mut(&mut self, index: usize) -> Option<&mut FormSnapshot> {
        self.forms.get_mut(index)
    }

    fn show_prompt(&mut self) {
        self.prompt_visible = true;
    }

    fn remove_prompt(&mut self) -> bool {
        std::mem::replace(&mut self.prompt_visible, false)
    }

    fn notify(&mut self, notice: Notice) {
        tracing::debug!(kind = ?notice.kind, "notice: {}", notice.message);
        self.notices.push(notice);
    }
}
