//! Inbound event hierarchy, as delivered by the host transport.

use serde::{Deserialize, Serialize};

use crate::model::{Chat, ReplyInfo, Sender};

/// Yunhu conversation kind discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatType {
    /// Group conversation.
    Group,
    /// Direct conversation with the bot (message events).
    Bot,
    /// Direct conversation with a user (notice events).
    User,
}

impl ChatType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Group => "group",
            Self::Bot => "bot",
            Self::User => "user",
        }
    }
}

/// Common envelope of every inbound event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventHeader {
    pub event_id: String,
    pub event_time: i64,
    pub event_type: String,
}

/// The message carried by a message event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageBody {
    pub msg_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub chat_id: String,
    pub chat_type: ChatType,
    pub content_type: String,
    pub content: serde_json::Value,
}

/// A message-bearing event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageEvent {
    pub header: EventHeader,
    pub sender: Sender,
    pub chat: Chat,
    pub message: MessageBody,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply: Option<ReplyInfo>,
}

/// A notice-bearing event (follows, group membership, button reports...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoticeEvent {
    pub header: EventHeader,
    pub user_id: String,
    pub chat_id: String,
    pub chat_type: ChatType,
}

/// The event kinds this binding declares resolvable. Address and id
/// resolution must only be attempted on these.
#[derive(Debug, Clone, PartialEq)]
pub enum YunhuEvent {
    Message(MessageEvent),
    Notice(NoticeEvent),
}

impl YunhuEvent {
    /// The wire event-type discriminator, for diagnostics.
    pub fn kind(&self) -> &str {
        match self {
            Self::Message(e) => &e.header.event_type,
            Self::Notice(e) => &e.header.event_type,
        }
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_type_serde_uses_wire_values() {
        assert_eq!(
            serde_json::to_value(ChatType::Group).unwrap(),
            serde_json::json!("group")
        );
        let back: ChatType = serde_json::from_value(serde_json::json!("bot")).unwrap();
        assert_eq!(back, ChatType::Bot);
    }

    #[test]
    fn message_event_parses_wire_shape() {
        let json = serde_json::json!({
            "header": {
                "eventId": "ev-1",
                "eventTime": 1700000000,
                "eventType": "message.receive.normal"
            },
            "sender": {"senderId": "u-1", "senderType": "user"},
            "chat": {"chatId": "g-1", "chatType": "group"},
            "message": {
                "msgId": "m-1",
                "chatId": "g-1",
                "chatType": "group",
                "contentType": "text",
                "content": {"text": "hi"}
            }
        });
        let event: MessageEvent = serde_json::from_value(json).unwrap();
        assert_eq!(event.message.msg_id, "m-1");
        assert_eq!(event.chat.chat_type, ChatType::Group);
        assert!(event.reply.is_none());
    }
}
