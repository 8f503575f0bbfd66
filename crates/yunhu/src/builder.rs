//! Inbound transcoder: native Yunhu elements → canonical segments.

use {
    async_trait::async_trait,
    tracing::debug,
    unimsg_core::{
        Button, ButtonFlag, Emoji, Keyboard, Media, MessageBuilder, Reply, Result, Segment,
        SupportAdapter, Text, UniMessage,
    },
};

use crate::{
    bot::YunhuBot,
    event::YunhuEvent,
    message::{MediaContent, Message, MessageSegment},
    model::ButtonBody,
};

/// Builds canonical segments from native Yunhu message elements.
#[derive(Debug, Clone, Copy, Default)]
pub struct YunhuMessageBuilder;

impl YunhuMessageBuilder {
    pub fn new() -> Self {
        Self
    }

    fn media(content: &MediaContent) -> Media {
        Media {
            id: content.key.clone(),
            url: content.url.clone(),
            raw: content.raw.clone(),
            path: None,
        }
    }

    fn button(body: &ButtonBody) -> Button {
        match body.action_type {
            1 => Button {
                flag: ButtonFlag::Link,
                label: body.text.clone(),
                url: body.url.clone(),
                text: None,
            },
            2 => Button {
                flag: ButtonFlag::Input,
                label: body.text.clone(),
                url: None,
                text: body.value.clone(),
            },
            _ => Button::action(body.text.clone()),
        }
    }

    /// Convert a whole native message, preserving element order.
    pub fn build_message(&self, message: &Message) -> Result<UniMessage> {
        let mut segments = Vec::with_capacity(message.len());
        for element in message.iter() {
            segments.extend(self.build(element)?);
        }
        Ok(segments.into())
    }
}

#[async_trait]
impl MessageBuilder for YunhuMessageBuilder {
    type Element = MessageSegment;
    type Event = YunhuEvent;
    type Bot = dyn YunhuBot;

    fn adapter(&self) -> SupportAdapter {
        SupportAdapter::Yunhu
    }

    fn build(&self, element: &MessageSegment) -> Result<Vec<Segment>> {
        // Closed native enum: every wire element has an explicit mapping,
        // there is no silent-drop path.
        Ok(match element {
            MessageSegment::Text { text } => vec![Segment::Text(Text::new(text))],
            MessageSegment::Markdown { text } => {
                let len = text.chars().count();
                vec![Segment::Text(Text::new(text).mark(0, len, "markdown"))]
            },
            MessageSegment::Html { text } => {
                let len = text.chars().count();
                vec![Segment::Text(Text::new(text).mark(0, len, "html"))]
            },
            MessageSegment::At { user_id, name } => {
                let display = (!name.is_empty()).then(|| name.clone());
                vec![Segment::At(unimsg_core::At::user(user_id, display))]
            },
            MessageSegment::Face { code, emoji } => vec![Segment::Emoji(Emoji {
                id: code.clone(),
                name: (!emoji.is_empty()).then(|| emoji.clone()),
            })],
            MessageSegment::Image(content) => vec![Segment::Image(Self::media(content))],
            MessageSegment::Video(content) => vec![Segment::Video(Self::media(content))],
            MessageSegment::File(content) => vec![Segment::File(Self::media(content))],
            // A native button grid fans out into one keyboard per row; the
            // rows are already partitioned on the wire, so `row` stays unset.
            MessageSegment::Buttons(rows) => rows
                .iter()
                .map(|row| {
                    Segment::Keyboard(Keyboard::new(row.iter().map(Self::button).collect()))
                })
                .collect(),
        })
    }

    async fn extract_reply(&self, event: &YunhuEvent, _bot: &dyn YunhuBot) -> Result<Option<Reply>> {
        let YunhuEvent::Message(message_event) = event else {
            return Ok(None);
        };
        let Some(reply) = &message_event.reply else {
            return Ok(None);
        };

        let quoted = Message::deserialize(&reply.content, &reply.content_type)?;
        let content = self.build_message(&quoted)?;
        debug!(
            msg_id = %reply.msg_id,
            content_type = %reply.content_type,
            segments = content.len(),
            "extracted reply reference"
        );

        Ok(Some(Reply {
            id: reply.msg_id.clone(),
            content: Some(content),
            raw: Some(serde_json::to_value(reply)?),
        }))
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use rstest::rstest;
    use unimsg_core::{At, AtFlag};

    use super::*;
    use crate::{
        event::{ChatType, EventHeader, MessageBody, MessageEvent},
        model::{Chat, ReplyInfo, Sender},
    };

    fn message_event(reply: Option<ReplyInfo>) -> YunhuEvent {
        YunhuEvent::Message(MessageEvent {
            header: EventHeader {
                event_id: "ev-1".into(),
                event_time: 1_700_000_000,
                event_type: "message.receive.normal".into(),
            },
            sender: Sender {
                sender_id: "u-1".into(),
                sender_type: "user".into(),
                sender_nickname: None,
            },
            chat: Chat {
                chat_id: "g-1".into(),
                chat_type: ChatType::Group,
            },
            message: MessageBody {
                msg_id: "m-1".into(),
                parent_id: None,
                chat_id: "g-1".into(),
                chat_type: ChatType::Group,
                content_type: "text".into(),
                content: serde_json::json!({"text": "hi"}),
            },
            reply,
        })
    }

    struct NoopBot;

    #[async_trait]
    impl YunhuBot for NoopBot {
        fn self_id(&self) -> &str {
            "bot-1"
        }

        async fn send(
            &self,
            _event: &MessageEvent,
            _message: &Message,
            _reply_to: Option<&str>,
        ) -> Result<crate::model::SendMsgResponse> {
            unimplemented!("builder tests issue no sends")
        }

        async fn send_msg(
            &self,
            _recv_type: &str,
            _recv_id: &str,
            _content: serde_json::Value,
            _content_type: &str,
            _parent_id: Option<&str>,
        ) -> Result<crate::model::SendMsgResponse> {
            unimplemented!("builder tests issue no sends")
        }

        async fn delete_msg(&self, _: &str, _: &str, _: &str) -> Result<()> {
            unimplemented!("builder tests issue no sends")
        }

        async fn edit_msg(
            &self,
            _: &str,
            _: &str,
            _: &str,
            _: serde_json::Value,
            _: &str,
        ) -> Result<()> {
            unimplemented!("builder tests issue no sends")
        }
    }

    #[test]
    fn plain_text_builds_unstyled() {
        let builder = YunhuMessageBuilder::new();
        let segs = builder.build(&MessageSegment::text("hi")).unwrap();
        assert_eq!(segs, vec![Segment::Text(Text::new("hi"))]);
    }

    #[rstest]
    #[case(MessageSegment::markdown("**x**"), "markdown")]
    #[case(MessageSegment::html("<b>x</b>"), "html")]
    fn rich_text_builds_fully_marked(#[case] element: MessageSegment, #[case] tag: &str) {
        let builder = YunhuMessageBuilder::new();
        let segs = builder.build(&element).unwrap();
        let Segment::Text(text) = &segs[0] else {
            panic!("expected text segment");
        };
        assert_eq!(text.dominant_style(), Some(tag));
    }

    #[test]
    fn at_builds_user_mention() {
        let builder = YunhuMessageBuilder::new();
        let segs = builder.build(&MessageSegment::at("u-9", "bob")).unwrap();
        assert_eq!(
            segs,
            vec![Segment::At(At {
                flag: AtFlag::User,
                target: "u-9".into(),
                display: Some("bob".into()),
            })]
        );
    }

    #[test]
    fn button_grid_fans_out_one_keyboard_per_row() {
        let builder = YunhuMessageBuilder::new();
        let rows = vec![
            vec![
                ButtonBody {
                    text: "open".into(),
                    action_type: 1,
                    url: Some("https://example.com".into()),
                    value: None,
                },
                ButtonBody {
                    text: "say".into(),
                    action_type: 2,
                    url: None,
                    value: Some("hello".into()),
                },
            ],
            vec![ButtonBody {
                text: "go".into(),
                action_type: 3,
                url: None,
                value: None,
            }],
        ];
        let segs = builder.build(&MessageSegment::buttons(rows)).unwrap();
        assert_eq!(segs.len(), 2);
        let Segment::Keyboard(first) = &segs[0] else {
            panic!("expected keyboard");
        };
        assert_eq!(first.row, None);
        assert_eq!(first.children.len(), 2);
        assert_eq!(first.children[0].flag, ButtonFlag::Link);
        assert_eq!(first.children[0].url.as_deref(), Some("https://example.com"));
        assert_eq!(first.children[1].flag, ButtonFlag::Input);
        assert_eq!(first.children[1].text.as_deref(), Some("hello"));
        let Segment::Keyboard(second) = &segs[1] else {
            panic!("expected keyboard");
        };
        assert_eq!(second.children[0].flag, ButtonFlag::Action);
    }

    #[tokio::test]
    async fn extract_reply_deserializes_quoted_content() {
        let builder = YunhuMessageBuilder::new();
        let event = message_event(Some(ReplyInfo {
            msg_id: "m-0".into(),
            content: serde_json::json!({"text": "# title"}),
            content_type: "markdown".into(),
            command_name: None,
        }));

        let reply = builder
            .extract_reply(&event, &NoopBot)
            .await
            .unwrap()
            .expect("reply reference present");
        assert_eq!(reply.id, "m-0");
        let content = reply.content.unwrap();
        let Segment::Text(text) = &content.segments()[0] else {
            panic!("expected text segment");
        };
        assert_eq!(text.text, "# title");
        assert_eq!(text.dominant_style(), Some("markdown"));
        assert!(reply.raw.is_some());
    }

    #[tokio::test]
    async fn extract_reply_is_none_without_reference() {
        let builder = YunhuMessageBuilder::new();
        let reply = builder
            .extract_reply(&message_event(None), &NoopBot)
            .await
            .unwrap();
        assert!(reply.is_none());
    }
}
