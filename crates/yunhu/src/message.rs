//! Native Yunhu message container.
//!
//! A [`Message`] is an ordered list of typed elements. [`Message::serialize`]
//! flattens it into the `(content, content_type)` pair the platform RPCs
//! take; [`Message::deserialize`] is the inverse, used for quoted-reply
//! content.

use {
    base64::Engine,
    serde_json::{Value, json},
    unimsg_core::{Error, Result},
};

use crate::model::ButtonBody;

/// Payload shared by the native media elements.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MediaContent {
    /// Platform upload key, when the media was previously uploaded.
    pub key: Option<String>,
    pub url: Option<String>,
    pub raw: Option<Vec<u8>>,
}

impl MediaContent {
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    pub fn from_raw(raw: Vec<u8>) -> Self {
        Self {
            raw: Some(raw),
            ..Self::default()
        }
    }
}

/// One native message element.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageSegment {
    Text { text: String },
    Markdown { text: String },
    Html { text: String },
    At { user_id: String, name: String },
    Face { code: String, emoji: String },
    Image(MediaContent),
    Video(MediaContent),
    File(MediaContent),
    /// Row-partitioned button grid. Sent as a call-level `buttons` field.
    Buttons(Vec<Vec<ButtonBody>>),
}

impl MessageSegment {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn markdown(text: impl Into<String>) -> Self {
        Self::Markdown { text: text.into() }
    }

    pub fn html(text: impl Into<String>) -> Self {
        Self::Html { text: text.into() }
    }

    pub fn at(user_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::At {
            user_id: user_id.into(),
            name: name.into(),
        }
    }

    pub fn face(code: impl Into<String>, emoji: impl Into<String>) -> Self {
        Self::Face {
            code: code.into(),
            emoji: emoji.into(),
        }
    }

    pub fn image(content: MediaContent) -> Self {
        Self::Image(content)
    }

    pub fn video(content: MediaContent) -> Self {
        Self::Video(content)
    }

    pub fn file(content: MediaContent) -> Self {
        Self::File(content)
    }

    pub fn buttons(rows: Vec<Vec<ButtonBody>>) -> Self {
        Self::Buttons(rows)
    }

    /// The rendered-text contribution of this element, if it has one.
    fn rendered_text(&self) -> Option<String> {
        match self {
            Self::Text { text } | Self::Markdown { text } | Self::Html { text } => {
                Some(text.clone())
            },
            Self::At { user_id, name } => Some(if name.is_empty() {
                format!("@{user_id}")
            } else {
                format!("@{name}")
            }),
            Self::Face { emoji, .. } => Some(emoji.clone()),
            _ => None,
        }
    }
}

/// Ordered native message.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Message(Vec<MessageSegment>);

impl Message {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, segment: MessageSegment) {
        self.0.push(segment);
    }

    pub fn segments(&self) -> &[MessageSegment] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MessageSegment> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Serialize to the Yunhu `(content, content_type)` call parameters.
    ///
    /// The content type is picked by priority: the first media element
    /// wins, then `html`, then `markdown`, then `text`. Textual elements
    /// are concatenated in order; a button grid becomes the `buttons`
    /// field of the content object.
    pub fn serialize(&self) -> (Value, String) {
        let mut content_type = "text";
        let mut content = json!({});

        for segment in &self.0 {
            let (media, kind, key_field) = match segment {
                MessageSegment::Image(m) => (Some(m), "image", "imageKey"),
                MessageSegment::Video(m) => (Some(m), "video", "videoKey"),
                MessageSegment::File(m) => (Some(m), "file", "fileKey"),
                _ => (None, "", ""),
            };
            let Some(media) = media else { continue };
            content_type = kind;
            if let Some(key) = &media.key {
                content[key_field] = json!(key);
            }
            if let Some(url) = &media.url {
                content["url"] = json!(url);
            }
            if let Some(raw) = &media.raw {
                content["raw"] = json!(base64::engine::general_purpose::STANDARD.encode(raw));
            }
            break;
        }

        if content_type == "text" {
            if self.0.iter().any(|s| matches!(s, MessageSegment::Html { .. })) {
                content_type = "html";
            } else if self
                .0
                .iter()
                .any(|s| matches!(s, MessageSegment::Markdown { .. }))
            {
                content_type = "markdown";
            }

            let text: String = self.0.iter().filter_map(|s| s.rendered_text()).collect();
            content["text"] = json!(text);

            if content_type == "text" {
                let at: Vec<&str> = self
                    .0
                    .iter()
                    .filter_map(|s| match s {
                        MessageSegment::At { user_id, .. } => Some(user_id.as_str()),
                        _ => None,
                    })
                    .collect();
                if !at.is_empty() {
                    content["at"] = json!(at);
                }
            }
        }

        if let Some(rows) = self.0.iter().find_map(|s| match s {
            MessageSegment::Buttons(rows) => Some(rows),
            _ => None,
        }) {
            content["buttons"] = json!(rows);
        }

        (content, content_type.to_string())
    }

    /// Rebuild a native message from wire `(content, content_type)`.
    pub fn deserialize(content: &Value, content_type: &str) -> Result<Self> {
        let text = || {
            content
                .get("text")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        let media = |key_field: &str| -> Result<MediaContent> {
            let raw = match content.get("raw").and_then(Value::as_str) {
                Some(encoded) => Some(
                    base64::engine::general_purpose::STANDARD
                        .decode(encoded)
                        .map_err(|e| Error::invalid_segment("media", e.to_string()))?,
                ),
                None => None,
            };
            Ok(MediaContent {
                key: content
                    .get(key_field)
                    .and_then(Value::as_str)
                    .map(str::to_string),
                url: content
                    .get("url")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                raw,
            })
        };

        let mut message = Message::new();
        match content_type {
            "text" => {
                message.push(MessageSegment::text(text()));
                if let Some(at) = content.get("at").and_then(Value::as_array) {
                    for id in at.iter().filter_map(Value::as_str) {
                        message.push(MessageSegment::at(id, ""));
                    }
                }
            },
            "markdown" => message.push(MessageSegment::markdown(text())),
            "html" => message.push(MessageSegment::html(text())),
            "image" => message.push(MessageSegment::Image(media("imageKey")?)),
            "video" => message.push(MessageSegment::Video(media("videoKey")?)),
            "file" => message.push(MessageSegment::File(media("fileKey")?)),
            other => return Err(Error::invalid_segment("content", other)),
        }

        if let Some(rows) = content.get("buttons") {
            let rows: Vec<Vec<ButtonBody>> = serde_json::from_value(rows.clone())?;
            message.push(MessageSegment::Buttons(rows));
        }

        Ok(message)
    }
}

impl From<Vec<MessageSegment>> for Message {
    fn from(segments: Vec<MessageSegment>) -> Self {
        Self(segments)
    }
}

impl FromIterator<MessageSegment> for Message {
    fn from_iter<I: IntoIterator<Item = MessageSegment>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Message {
    type Item = MessageSegment;
    type IntoIter = std::vec::IntoIter<MessageSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
