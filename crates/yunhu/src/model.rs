//! Yunhu wire models. Field names follow the platform's camelCase JSON.

use serde::{Deserialize, Serialize};

/// Message sender as reported on inbound events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sender {
    pub sender_id: String,
    pub sender_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_nickname: Option<String>,
}

/// Conversation the event originated from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    pub chat_id: String,
    pub chat_type: crate::event::ChatType,
}

/// Location of a sent message, as echoed back in send receipts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageInfo {
    pub msg_id: String,
    pub recv_id: String,
    pub recv_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMsgData {
    pub message_info: MessageInfo,
}

/// Platform response to a send call. Doubles as the detached message
/// identifier: recall/edit can address a message from this alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMsgResponse {
    pub code: i64,
    pub msg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<SendMsgData>,
}

/// One inline button in the Yunhu button grid.
///
/// `action_type`: 1 opens `url`, 2 submits `value` as input, 3 triggers a
/// platform-side action callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonBody {
    pub text: String,
    pub action_type: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Quoted-message reference attached to an inbound message event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyInfo {
    pub msg_id: String,
    pub content: serde_json::Value,
    pub content_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command_name: Option<String>,
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_response_parses_wire_shape() {
        let json = serde_json::json!({
            "code": 1,
            "msg": "success",
            "data": {
                "messageInfo": {
                    "msgId": "m-9",
                    "recvId": "g-1",
                    "recvType": "group"
                }
            }
        });
        let resp: SendMsgResponse = serde_json::from_value(json).unwrap();
        let info = resp.data.unwrap().message_info;
        assert_eq!(info.msg_id, "m-9");
        assert_eq!(info.recv_type, "group");
    }

    #[test]
    fn button_body_omits_absent_fields() {
        let body = ButtonBody {
            text: "go".into(),
            action_type: 3,
            url: None,
            value: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({"text": "go", "actionType": 3}));
    }
}
