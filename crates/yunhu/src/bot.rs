//! Connection handle to the Yunhu platform.
//!
//! The transcoder only issues requests through this trait; it never
//! mutates connection state, so one handle can be shared read-only across
//! concurrent calls. The host transport owns the HTTP/WebSocket plumbing,
//! authentication, and any retry policy — transport failures surface as
//! [`Error::Transport`](unimsg_core::Error::Transport) and are propagated
//! unchanged.

use {async_trait::async_trait, serde_json::Value, unimsg_core::Result};

use crate::{event::MessageEvent, message::Message, model::SendMsgResponse};

/// Yunhu platform RPCs consumed by the exporter.
#[async_trait]
pub trait YunhuBot: Send + Sync {
    /// The bot's own platform user id.
    fn self_id(&self) -> &str;

    /// Send a message scoped to a live inbound event, optionally as a
    /// reply to `reply_to`.
    async fn send(
        &self,
        event: &MessageEvent,
        message: &Message,
        reply_to: Option<&str>,
    ) -> Result<SendMsgResponse>;

    /// Send a message to an explicit conversation, detached from any event.
    async fn send_msg(
        &self,
        recv_type: &str,
        recv_id: &str,
        content: Value,
        content_type: &str,
        parent_id: Option<&str>,
    ) -> Result<SendMsgResponse>;

    /// Delete a previously sent message.
    async fn delete_msg(&self, message_id: &str, chat_id: &str, chat_type: &str) -> Result<()>;

    /// Replace a previously sent message's content.
    async fn edit_msg(
        &self,
        message_id: &str,
        recv_id: &str,
        recv_type: &str,
        content: Value,
        content_type: &str,
    ) -> Result<()>;
}
