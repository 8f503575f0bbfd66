//! Outbound transcoder: canonical segments → native Yunhu message, plus
//! the send/recall/edit operations and target resolution.

use {
    async_trait::async_trait,
    tracing::{debug, info},
    unimsg_core::{
        Button, ButtonFlag, Error, Keyboard, Media, MessageExporter, MessageId, RecallContext,
        Reply, Result, Segment, SendTarget, SupportAdapter, SupportScope, Target,
    },
};

use crate::{
    bot::YunhuBot,
    event::{ChatType, YunhuEvent},
    message::{MediaContent, Message, MessageSegment},
    model::{ButtonBody, SendMsgResponse},
};

/// Per-segment export result. Buttons, keyboards, and replies are
/// call-level concerns, not independent elements, so they travel as
/// pending values until [`assemble`](YunhuMessageExporter::assemble)
/// merges them. Never exposed outside the assembly step.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Exported {
    Native(MessageSegment),
    PendingButton(ButtonBody),
    PendingButtonRow(Vec<ButtonBody>),
    PendingKeyboard(Vec<Vec<ButtonBody>>),
    PendingReply(String),
}

/// Exports canonical segments to Yunhu and owns the platform send calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct YunhuMessageExporter;

impl YunhuMessageExporter {
    pub fn new() -> Self {
        Self
    }

    fn button_body(button: &Button) -> ButtonBody {
        match button.flag {
            ButtonFlag::Link => ButtonBody {
                text: button.label.clone(),
                action_type: 1,
                url: button.url.clone(),
                value: None,
            },
            ButtonFlag::Input => ButtonBody {
                text: button.label.clone(),
                action_type: 2,
                url: None,
                value: button.text.clone(),
            },
            ButtonFlag::Action => ButtonBody {
                text: button.label.clone(),
                action_type: 3,
                url: None,
                value: None,
            },
        }
    }

    /// Resolve media to a native payload: url, then raw bytes, then a
    /// local path read into bytes.
    async fn resolve_media(kind: &'static str, media: &Media) -> Result<MediaContent> {
        if let Some(url) = &media.url {
            return Ok(MediaContent {
                key: media.id.clone(),
                url: Some(url.clone()),
                raw: None,
            });
        }
        if let Some(raw) = &media.raw {
            return Ok(MediaContent {
                key: media.id.clone(),
                url: None,
                raw: Some(raw.clone()),
            });
        }
        if let Some(path) = &media.path {
            let raw = tokio::fs::read(path).await?;
            return Ok(MediaContent {
                key: media.id.clone(),
                url: None,
                raw: Some(raw),
            });
        }
        Err(Error::invalid_segment(kind, media))
    }

    fn export_keyboard(keyboard: &Keyboard) -> Result<Exported> {
        if keyboard.children.is_empty() {
            return Err(Error::invalid_segment("keyboard", keyboard));
        }
        let buttons: Vec<ButtonBody> = keyboard.children.iter().map(Self::button_body).collect();
        match keyboard.row {
            None => Ok(Exported::PendingButtonRow(buttons)),
            Some(0) => Err(Error::invalid_segment("keyboard", keyboard)),
            Some(row) => Ok(Exported::PendingKeyboard(
                buttons.chunks(row).map(<[ButtonBody]>::to_vec).collect(),
            )),
        }
    }

    async fn export_segment(&self, segment: &Segment) -> Result<Exported> {
        Ok(match segment {
            Segment::Text(text) => match text.dominant_style() {
                Some("markdown") => Exported::Native(MessageSegment::markdown(&text.text)),
                Some("html") => Exported::Native(MessageSegment::html(&text.text)),
                // Mixed or partial styles collapse to inline markup.
                _ if !text.styles.is_empty() => {
                    Exported::Native(MessageSegment::markdown(text.to_string()))
                },
                _ => Exported::Native(MessageSegment::text(&text.text)),
            },
            Segment::At(at) => match at.flag {
                unimsg_core::AtFlag::User => Exported::Native(MessageSegment::at(
                    &at.target,
                    at.display.clone().unwrap_or_default(),
                )),
                _ => return Err(Error::unsupported_segment(SupportAdapter::Yunhu, at, "at")),
            },
            Segment::Emoji(emoji) => Exported::Native(MessageSegment::face(
                &emoji.id,
                emoji.name.clone().unwrap_or_default(),
            )),
            Segment::Image(media) => {
                Exported::Native(MessageSegment::image(Self::resolve_media("image", media).await?))
            },
            Segment::Video(media) => {
                Exported::Native(MessageSegment::video(Self::resolve_media("video", media).await?))
            },
            Segment::File(media) => {
                Exported::Native(MessageSegment::file(Self::resolve_media("file", media).await?))
            },
            Segment::Reply(reply) => Exported::PendingReply(reply.id.clone()),
            Segment::Button(button) => Exported::PendingButton(Self::button_body(button)),
            Segment::Keyboard(keyboard) => Self::export_keyboard(keyboard)?,
        })
    }

    /// Message assembly: drain pending values, merge button rows in the
    /// deterministic order single → row → keyboard, append at most one
    /// `Buttons` element, honor the first pending reply. Running this on
    /// elements with no pendings reproduces them unchanged.
    pub(crate) fn assemble(elements: Vec<Exported>) -> (Message, Option<String>) {
        let mut message = Message::new();
        let mut single_rows: Vec<Vec<ButtonBody>> = Vec::new();
        let mut row_rows: Vec<Vec<ButtonBody>> = Vec::new();
        let mut keyboard_rows: Vec<Vec<ButtonBody>> = Vec::new();
        let mut reply_id: Option<String> = None;

        for element in elements {
            match element {
                Exported::Native(segment) => message.push(segment),
                Exported::PendingButton(button) => single_rows.push(vec![button]),
                Exported::PendingButtonRow(row) => row_rows.push(row),
                Exported::PendingKeyboard(rows) => keyboard_rows.extend(rows),
                Exported::PendingReply(id) => {
                    if reply_id.is_none() {
                        reply_id = Some(id);
                    }
                },
            }
        }

        let mut rows = single_rows;
        rows.extend(row_rows);
        rows.extend(keyboard_rows);
        if !rows.is_empty() {
            message.push(MessageSegment::buttons(rows));
        }

        (message, reply_id)
    }

    async fn send_detached(
        &self,
        target: &Target,
        bot: &dyn YunhuBot,
        message: Message,
        parent_id: Option<&str>,
    ) -> Result<SendMsgResponse> {
        let (content, content_type) = message.serialize();
        let (recv_type, recv_id) = if target.private {
            ("user", target.user_id.as_str())
        } else {
            ("group", target.conversation_id.as_str())
        };
        info!(
            recv_type,
            recv_id,
            content_type = %content_type,
            parent_id = ?parent_id,
            "yunhu detached send"
        );
        bot.send_msg(recv_type, recv_id, content, &content_type, parent_id)
            .await
    }

    /// Where a recall/edit call is addressed: `(message_id, chat_id,
    /// chat_type)`. The legal (identifier, context) pairings are a raw id
    /// with its live message event, or a detached receipt with anything.
    fn locate(
        mid: &MessageId<SendMsgResponse>,
        context: &RecallContext<'_, YunhuEvent>,
    ) -> Result<(String, String, String)> {
        match (mid, context) {
            (MessageId::Receipt(receipt), _) => {
                let info = receipt
                    .data
                    .as_ref()
                    .map(|d| &d.message_info)
                    .ok_or_else(|| Error::type_mismatch("send receipt carries no message info"))?;
                Ok((
                    info.msg_id.clone(),
                    info.recv_id.clone(),
                    info.recv_type.clone(),
                ))
            },
            (MessageId::Raw(id), RecallContext::Event(YunhuEvent::Message(event))) => {
                let (chat_id, chat_type) = if event.message.chat_type == ChatType::Bot {
                    (event.sender.sender_id.clone(), "user")
                } else {
                    (event.message.chat_id.clone(), "group")
                };
                Ok((id.clone(), chat_id, chat_type.to_string()))
            },
            (MessageId::Raw(_), _) => Err(Error::type_mismatch(
                "raw message id requires a live message event",
            )),
        }
    }
}

#[async_trait]
impl MessageExporter for YunhuMessageExporter {
    type Message = Message;
    type Event = YunhuEvent;
    type Bot = dyn YunhuBot;
    type Receipt = SendMsgResponse;

    fn adapter(&self) -> SupportAdapter {
        SupportAdapter::Yunhu
    }

    fn get_target(&self, event: &YunhuEvent, bot: Option<&dyn YunhuBot>) -> Result<Target> {
        let self_id = bot.map(|b| b.self_id().to_string());
        match event {
            YunhuEvent::Message(event) => Ok(Target {
                user_id: event.sender.sender_id.clone(),
                conversation_id: if event.chat.chat_type == ChatType::Group {
                    event.chat.chat_id.clone()
                } else {
                    String::new()
                },
                private: event.chat.chat_type == ChatType::Bot,
                source: event.message.msg_id.clone(),
                adapter: SupportAdapter::Yunhu,
                self_id,
                scope: SupportScope::Yunhu,
            }),
            YunhuEvent::Notice(event) => Ok(Target {
                user_id: event.user_id.clone(),
                conversation_id: event.chat_id.clone(),
                private: event.chat_type == ChatType::User,
                source: event.header.event_id.clone(),
                adapter: SupportAdapter::Yunhu,
                self_id,
                scope: SupportScope::Yunhu,
            }),
        }
    }

    fn get_message_id(&self, event: &YunhuEvent) -> Result<String> {
        match event {
            YunhuEvent::Message(event) => Ok(event.message.msg_id.clone()),
            other => Err(Error::unsupported_event("get_message_id", other.kind())),
        }
    }

    async fn export(
        &self,
        segments: &[Segment],
        _bot: &dyn YunhuBot,
    ) -> Result<(Message, Option<String>)> {
        let mut elements = Vec::with_capacity(segments.len());
        for segment in segments {
            elements.push(self.export_segment(segment).await?);
        }
        let (message, reply_id) = Self::assemble(elements);
        debug!(
            segments = segments.len(),
            elements = message.len(),
            has_reply = reply_id.is_some(),
            "exported canonical message"
        );
        Ok((message, reply_id))
    }

    async fn send_to(
        &self,
        target: SendTarget<'_, YunhuEvent>,
        bot: &(dyn YunhuBot + 'static),
        segments: &[Segment],
    ) -> Result<SendMsgResponse> {
        let (message, reply_id) = self.export(segments, bot).await?;
        match target {
            SendTarget::Event(event) => match event {
                YunhuEvent::Message(message_event) => {
                    info!(
                        msg_id = %message_event.message.msg_id,
                        reply_to = ?reply_id,
                        "yunhu event-scoped send"
                    );
                    bot.send(message_event, &message, reply_id.as_deref()).await
                },
                // Notices carry no event-scoped send on this platform;
                // resolve them to an address and send detached.
                YunhuEvent::Notice(_) => {
                    let resolved = self.get_target(event, Some(bot))?;
                    self.send_detached(&resolved, bot, message, reply_id.as_deref())
                        .await
                },
            },
            SendTarget::Target(resolved) => {
                self.send_detached(resolved, bot, message, reply_id.as_deref())
                    .await
            },
        }
    }

    async fn recall(
        &self,
        mid: &MessageId<SendMsgResponse>,
        bot: &dyn YunhuBot,
        context: RecallContext<'_, YunhuEvent>,
    ) -> Result<()> {
        let (message_id, chat_id, chat_type) = Self::locate(mid, &context)?;
        info!(%message_id, %chat_id, %chat_type, "yunhu recall");
        bot.delete_msg(&message_id, &chat_id, &chat_type).await
    }

    async fn edit(
        &self,
        new: &[Segment],
        mid: &MessageId<SendMsgResponse>,
        bot: &(dyn YunhuBot + 'static),
        context: RecallContext<'_, YunhuEvent>,
    ) -> Result<()> {
        let (message_id, chat_id, chat_type) = Self::locate(mid, &context)?;
        let (message, _) = self.export(new, bot).await?;
        let (content, content_type) = message.serialize();
        info!(%message_id, %chat_id, %chat_type, content_type = %content_type, "yunhu edit");
        bot.edit_msg(&message_id, &chat_id, &chat_type, content, &content_type)
            .await
    }

    fn get_reply(&self, event: &YunhuEvent) -> Result<Reply> {
        match event {
            YunhuEvent::Message(event) => Ok(Reply::new(event.message.msg_id.clone())),
            other => Err(Error::unsupported_event("get_reply", other.kind())),
        }
    }
}
