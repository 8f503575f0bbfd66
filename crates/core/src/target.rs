use std::fmt;

use serde::{Deserialize, Serialize};

/// Platform adapter tag, used by the registry to dispatch by adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupportAdapter {
    Yunhu,
}

impl fmt::Display for SupportAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yunhu => f.write_str("yunhu"),
        }
    }
}

/// Platform-family tag carried by [`Target`] for cross-adapter grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupportScope {
    Yunhu,
}

impl fmt::Display for SupportScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yunhu => f.write_str("yunhu"),
        }
    }
}

/// A reusable conversation address derived from a live inbound event.
///
/// Constructed once by the exporter's resolver and immutable afterwards.
/// Serializable so it can outlive the originating event object or a
/// process restart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// Sender (message events) or reporter (notice events).
    pub user_id: String,
    /// Group chat id; empty for direct conversations.
    pub conversation_id: String,
    /// True iff the chat is a direct/bot conversation.
    pub private: bool,
    /// The event's own message id (message events) or event id (notices).
    pub source: String,
    pub adapter: SupportAdapter,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_id: Option<String>,
    pub scope: SupportScope,
}
