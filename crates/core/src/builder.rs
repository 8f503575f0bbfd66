use async_trait::async_trait;

use crate::{
    error::Result,
    segment::{Reply, Segment},
    target::SupportAdapter,
};

/// Inbound transcoder: native message element → canonical segment(s).
///
/// One conversion arm per native element type; a single native element may
/// fan out into several canonical segments (e.g. a native button grid
/// becomes one [`Keyboard`](crate::segment::Keyboard) per row).
#[async_trait]
pub trait MessageBuilder: Send + Sync {
    /// The platform's native message element type.
    type Element;
    /// The platform's inbound event type.
    type Event;
    /// The platform connection handle.
    type Bot: ?Sized;

    fn adapter(&self) -> SupportAdapter;

    /// Convert one native element into canonical segments.
    fn build(&self, element: &Self::Element) -> Result<Vec<Segment>>;

    /// Extract the quoted/replied-to reference from an event.
    ///
    /// Reply metadata lives on the event, not on a message element. The
    /// quoted content is recursively deserialized back into canonical form
    /// through this same builder. Returns `Ok(None)` when the event carries
    /// no reply reference.
    async fn extract_reply(
        &self,
        event: &Self::Event,
        bot: &Self::Bot,
    ) -> Result<Option<Reply>>;
}
