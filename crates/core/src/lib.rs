//! Platform-neutral message transcoding core.
//!
//! Application code composes messages out of canonical [`Segment`]s; each
//! platform binding implements [`MessageBuilder`] (native → canonical) and
//! [`MessageExporter`] (canonical → native, plus send/recall/edit). A
//! [`Target`] is a serializable conversation address derived once from a
//! live event and reusable without it.

pub mod builder;
pub mod error;
pub mod exporter;
pub mod message;
pub mod registry;
pub mod segment;
pub mod target;

pub use {
    builder::MessageBuilder,
    error::{Error, Result},
    exporter::{MessageExporter, MessageId, RecallContext, SendTarget},
    message::UniMessage,
    registry::AdapterRegistry,
    segment::{At, AtFlag, Button, ButtonFlag, Emoji, Keyboard, Media, Reply, Segment, Style, Text},
    target::{SupportAdapter, SupportScope, Target},
};
