use async_trait::async_trait;

use crate::{
    error::Result,
    segment::{Reply, Segment},
    target::{SupportAdapter, Target},
};

/// Opaque identifier of a previously sent message.
///
/// The two addressing modes are genuinely different input shapes: a raw id
/// scoped to a live event, or the platform's detached send receipt usable
/// without any event. Recall/edit accept both.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageId<R> {
    /// A bare platform message id, valid together with a live event.
    Raw(String),
    /// The platform's send response, carrying its own message location.
    Receipt(R),
}

/// Where an outgoing message is addressed: a live inbound event, or a
/// previously resolved [`Target`].
#[derive(Debug, Clone, Copy)]
pub enum SendTarget<'a, E> {
    Event(&'a E),
    Target(&'a Target),
}

/// Addressing context for recall/edit. A [`MessageId::Raw`] requires the
/// live event; a [`MessageId::Receipt`] carries its own location and works
/// with either context.
#[derive(Debug, Clone, Copy)]
pub enum RecallContext<'a, E> {
    Event(&'a E),
    Target(&'a Target),
}

/// Outbound transcoder: canonical segments → native message, plus the
/// send/recall/edit operations that need a live connection handle.
///
/// The native message container is named by `Self::Message`; a registry
/// dispatches between exporters by [`adapter`](Self::adapter) tag.
#[async_trait]
pub trait MessageExporter: Send + Sync {
    /// The platform's native message container.
    type Message;
    /// The platform's inbound event type.
    type Event;
    /// The platform connection handle.
    type Bot: ?Sized;
    /// The platform's send receipt (detached message identifier).
    type Receipt;

    fn adapter(&self) -> SupportAdapter;

    /// Derive a reusable conversation address from a live event.
    ///
    /// Only message-bearing and notice-bearing events resolve; anything
    /// else is a logic error surfaced as
    /// [`Error::UnsupportedEvent`](crate::error::Error::UnsupportedEvent).
    fn get_target(&self, event: &Self::Event, bot: Option<&Self::Bot>) -> Result<Target>;

    /// Extract the native message id from a message-origin event.
    fn get_message_id(&self, event: &Self::Event) -> Result<String>;

    /// Convert canonical segments into an assembled native message and the
    /// outgoing reply id, if any segment requested reply linkage.
    async fn export(
        &self,
        segments: &[Segment],
        bot: &Self::Bot,
    ) -> Result<(Self::Message, Option<String>)>;

    /// Export, assemble, and transmit. Returns the platform's send receipt.
    async fn send_to(
        &self,
        target: SendTarget<'_, Self::Event>,
        bot: &Self::Bot,
        segments: &[Segment],
    ) -> Result<Self::Receipt>;

    /// Delete a previously sent message.
    async fn recall(
        &self,
        mid: &MessageId<Self::Receipt>,
        bot: &Self::Bot,
        context: RecallContext<'_, Self::Event>,
    ) -> Result<()>;

    /// Replace a previously sent message's content with newly exported
    /// segments. Same dual addressing as [`recall`](Self::recall).
    async fn edit(
        &self,
        new: &[Segment],
        mid: &MessageId<Self::Receipt>,
        bot: &Self::Bot,
        context: RecallContext<'_, Self::Event>,
    ) -> Result<()>;

    /// Build a [`Reply`] segment from a message-origin event without a
    /// network round trip.
    fn get_reply(&self, event: &Self::Event) -> Result<Reply>;
}
