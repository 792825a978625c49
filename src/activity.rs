//! Direct Line activity wire model
//!
//! Only the fields this page reads or writes; everything else on the wire is
//! ignored during deserialization.

use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::config::{USER_ID, USER_NAME};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Message,
    Event,
    Typing,
    #[serde(other)]
    Other,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelAccount {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<ChannelAccount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl Activity {
    /// Whether this activity was authored by this page
    pub fn is_from_user(&self) -> bool {
        self.from.as_ref().is_some_and(|f| f.id == USER_ID)
    }
}

/// One frame of the activity stream
#[derive(Clone, Debug, Deserialize)]
pub struct ActivitySet {
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub watermark: Option<String>,
}

/// The initial greeting event, sent once per connection when the stream opens
pub fn start_conversation_event(locale: &str, timezone: &str) -> Activity {
    Activity {
        kind: ActivityKind::Event,
        id: None,
        text: None,
        name: Some("startConversation".to_string()),
        locale: Some(locale.to_string()),
        local_timezone: Some(timezone.to_string()),
        from: Some(ChannelAccount {
            id: USER_ID.to_string(),
            name: None,
        }),
        timestamp: None,
    }
}

/// A message activity typed into the composer
pub fn user_message(text: &str, locale: &str) -> Activity {
    Activity {
        kind: ActivityKind::Message,
        id: None,
        text: Some(text.to_string()),
        name: None,
        locale: Some(locale.to_string()),
        local_timezone: None,
        from: Some(ChannelAccount {
            id: USER_ID.to_string(),
            name: Some(USER_NAME.to_string()),
        }),
        timestamp: None,
    }
}

/// Parse one stream frame
///
/// Returns None for keep-alives (empty frames) and unparseable messages.
pub fn parse_stream_message(msg: &str) -> Option<ActivitySet> {
    if msg.is_empty() {
        // Direct Line sends empty frames as keep-alives
        trace!("Keep-alive frame");
        return None;
    }

    serde_json::from_str(msg)
        .map_err(|e| {
            warn!(error = %e, "Failed to parse activity set");
        })
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_message_activity_set() {
        let msg = r#"{
            "activities": [
                {
                    "type": "message",
                    "id": "abc|0000001",
                    "text": "Hello! How can I help?",
                    "from": { "id": "crfad_facialPalsyCoPilot", "name": "ctcHealth Assistant" },
                    "timestamp": "2024-01-01T00:00:00.000Z"
                }
            ],
            "watermark": "1"
        }"#;

        let set = parse_stream_message(msg).expect("should parse");
        assert_eq!(set.activities.len(), 1);
        assert_eq!(set.watermark.as_deref(), Some("1"));

        let activity = &set.activities[0];
        assert_eq!(activity.kind, ActivityKind::Message);
        assert_eq!(activity.text.as_deref(), Some("Hello! How can I help?"));
        assert!(!activity.is_from_user());
    }

    #[test]
    fn test_keep_alive_is_ignored() {
        assert!(parse_stream_message("").is_none());
    }

    #[test]
    fn test_garbage_is_ignored() {
        assert!(parse_stream_message("not json").is_none());
    }

    #[test]
    fn test_unknown_activity_kind() {
        let msg = r#"{"activities": [{"type": "conversationUpdate"}]}"#;
        let set = parse_stream_message(msg).expect("should parse");
        assert_eq!(set.activities[0].kind, ActivityKind::Other);
    }

    #[test]
    fn test_greeting_wire_shape() {
        let event = start_conversation_event("en", "Europe/Warsaw");
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "event");
        assert_eq!(json["name"], "startConversation");
        assert_eq!(json["locale"], "en");
        assert_eq!(json["localTimezone"], "Europe/Warsaw");
        // Unset fields stay off the wire
        assert!(json.get("text").is_none());
    }

    #[test]
    fn test_user_message_is_from_user() {
        let activity = user_message("hi", "en");
        assert_eq!(activity.kind, ActivityKind::Message);
        assert!(activity.is_from_user());
        assert_eq!(activity.text.as_deref(), Some("hi"));
    }
}
