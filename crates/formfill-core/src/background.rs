//! Background router: context menu, keyboard command and store-change fan-out.
//!
//! Messages go to page sessions through a [`TabChannel`]. A tab without a
//! session (no content script) is not an error: the router falls back to
//! opening the settings surface.

use std::time::Instant;

use crate::message::{Message, Response};
use crate::page::Page;
use crate::session::Session;
use crate::store::{ensure_defaults, ChangedKeys, ProfileStore, StoreError};

pub type TabId = u32;

/// Keyboard command bound to auto-fill.
pub const AUTO_FILL_COMMAND: &str = "auto-fill-form";

#[derive(Debug, thiserror::Error)]
pub enum MessagingError {
    #[error("no receiver in tab {0}")]
    NoReceiver(TabId),
    #[error("tab {0} is gone")]
    Closed(TabId),
}

/// Delivery of messages to the session running in a tab.
pub trait TabChannel {
    fn tabs(&self) -> Vec<TabId>;
    fn active_tab(&self) -> Option<TabId>;
    fn send(&mut self, tab: TabId, message: &Message) -> Result<Response, MessagingError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    AutoFill,
    OpenSettings,
}

impl MenuItem {
    pub const ALL: [MenuItem; 2] = [MenuItem::AutoFill, MenuItem::OpenSettings];

    pub fn id(self) -> &'static str {
        match self {
            MenuItem::AutoFill => "formfill-auto-fill",
            MenuItem::OpenSettings => "formfill-open-settings",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            MenuItem::AutoFill => "Auto-fill Forms",
            MenuItem::OpenSettings => "Open Settings",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|item| item.id() == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    OpenSettings,
}

/// Outcome of a menu click or command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Delivered(Response),
    Fallback(Fallback),
    /// Unknown command or no active tab.
    Ignored,
}

#[derive(Debug)]
pub struct Router<C: TabChannel> {
    channel: C,
}

impl<C: TabChannel> Router<C> {
    pub fn new(channel: C) -> Self {
        Self { channel }
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    pub fn into_channel(self) -> C {
        self.channel
    }

    /// Install hook; see [`ensure_defaults`].
    pub fn on_install<S: ProfileStore + ?Sized>(&self, store: &mut S) -> Result<bool, StoreError> {
        tracing::info!("installed");
        ensure_defaults(store)
    }

    pub fn on_menu_click(&mut self, item: MenuItem, tab: TabId) -> Dispatch {
        match item {
            MenuItem::AutoFill => self.deliver(tab, &Message::AutoFillFromContextMenu),
            MenuItem::OpenSettings => Dispatch::Fallback(Fallback::OpenSettings),
        }
    }

    pub fn on_command(&mut self, command: &str) -> Dispatch {
        if command != AUTO_FILL_COMMAND {
            tracing::debug!(command, "unknown command");
            return Dispatch::Ignored;
        }
        match self.channel.active_tab() {
            Some(tab) => self.deliver(tab, &Message::AutoFillFromKeyboard),
            None => Dispatch::Ignored,
        }
    }

    /// Tell every tab the store changed. Returns how many tabs took the message.
    pub fn on_store_changed(&mut self, changes: &ChangedKeys) -> usize {
        let message = Message::DataUpdated {
            changes: changes.clone(),
        };
        let mut reached = 0;
        for tab in self.channel.tabs() {
            match self.channel.send(tab, &message) {
                Ok(_) => reached += 1,
                Err(e) => tracing::debug!("dataUpdated not delivered: {e}"),
            }
        }
        reached
    }

    fn deliver(&mut self, tab: TabId, message: &Message) -> Dispatch {
        match self.channel.send(tab, message) {
            Ok(response) => Dispatch::Delivered(response),
            Err(e) => {
                tracing::debug!(action = message.action(), "{e}; opening settings instead");
                Dispatch::Fallback(Fallback::OpenSettings)
            }
        }
    }
}

/// A single tab whose session runs in-process.
pub struct SessionTab<'a, S: ProfileStore, P: Page> {
    pub id: TabId,
    pub session: &'a mut Session<S>,
    pub page: &'a mut P,
}

impl<S: ProfileStore, P: Page> TabChannel for SessionTab<'_, S, P> {
    fn tabs(&self) -> Vec<TabId> {
        vec![self.id]
    }

    fn active_tab(&self) -> Option<TabId> {
        Some(self.id)
    }

    fn send(&mut self, tab: TabId, message: &Message) -> Result<Response, MessagingError> {
        if tab != self.id {
            return Err(MessagingError::NoReceiver(tab));
        }
        Ok(self
            .session
            .handle(message.clone(), &mut *self.page, Instant::now()))
    }
}
