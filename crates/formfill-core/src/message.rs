//! Extension-internal messages delivered to a page session, tagged by `action`.

use serde::{Deserialize, Serialize};

use crate::profile::ProfileData;
use crate::store::ChangedKeys;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Message {
    AutoFillFromContextMenu,
    AutoFillFromKeyboard,
    /// Popup pushed fresh data directly.
    UpdateFormData { data: ProfileData },
    /// Store changed; the session reloads from the store.
    DataUpdated {
        #[serde(default)]
        changes: ChangedKeys,
    },
    ExtensionToggled { enabled: bool },
}

impl Message {
    pub fn action(&self) -> &'static str {
        match self {
            Message::AutoFillFromContextMenu => "autoFillFromContextMenu",
            Message::AutoFillFromKeyboard => "autoFillFromKeyboard",
            Message::UpdateFormData { .. } => "updateFormData",
            Message::DataUpdated { .. } => "dataUpdated",
            Message::ExtensionToggled { .. } => "extensionToggled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Response {
    Processed,
    Updated,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreKey;

    #[test]
    fn parses_tagged_actions() {
        let msg: Message = serde_json::from_str(r#"{"action":"autoFillFromKeyboard"}"#).unwrap();
        assert_eq!(msg, Message::AutoFillFromKeyboard);

        let msg: Message =
            serde_json::from_str(r#"{"action":"extensionToggled","enabled":false}"#).unwrap();
        assert_eq!(msg, Message::ExtensionToggled { enabled: false });

        let msg: Message =
            serde_json::from_str(r#"{"action":"dataUpdated","changes":["profile","skills"]}"#)
                .unwrap();
        assert_eq!(
            msg,
            Message::DataUpdated {
                changes: ChangedKeys::from([StoreKey::Profile, StoreKey::Skills])
            }
        );
        assert_eq!(msg.action(), "dataUpdated");
    }

    #[test]
    fn update_form_data_carries_profile() {
        let json = r#"{"action":"updateFormData","data":{"profile":{"email":"a@b.com"}}}"#;
        let Message::UpdateFormData { data } = serde_json::from_str(json).unwrap() else {
            panic!("expected UpdateFormData");
        };
        assert_eq!(data.profile.unwrap().email, "a@b.com");
    }

    #[test]
    fn unknown_action_is_rejected() {
        assert!(serde_json::from_str::<Message>(r#"{"action":"getFormData"}"#).is_err());
    }

    #[test]
    fn response_status_shape() {
        assert_eq!(
            serde_json::to_string(&Response::Processed).unwrap(),
            r#"{"status":"processed"}"#
        );
        assert_eq!(
            serde_json::to_string(&Response::Updated).unwrap(),
            r#"{"status":"updated"}"#
        );
    }
}
