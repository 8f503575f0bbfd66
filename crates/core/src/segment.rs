use std::{fmt, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::message::UniMessage;

/// Canonical, platform-neutral message element.
///
/// Segments are immutable once constructed; updates (e.g. [`Text::mark`])
/// return a new segment. Equality and serialization are structural.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Segment {
    Text(Text),
    At(At),
    Emoji(Emoji),
    Image(Media),
    Video(Media),
    File(Media),
    Reply(Reply),
    Button(Button),
    Keyboard(Keyboard),
}

/// A style annotation over a character range of a [`Text`] segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    pub start: usize,
    pub end: usize,
    pub tag: String,
}

/// Plain or styled text.
///
/// Styles are non-owning annotations over `text`; ranges are in characters,
/// may overlap, and an empty list means plain text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Text {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub styles: Vec<Style>,
}

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            styles: Vec::new(),
        }
    }

    /// Return a new `Text` with an additional style range. `end` is clamped
    /// to the character length; an empty range is dropped.
    #[must_use]
    pub fn mark(mut self, start: usize, end: usize, tag: impl Into<String>) -> Self {
        let len = self.char_len();
        let end = end.min(len);
        if start < end {
            self.styles.push(Style {
                start,
                end,
                tag: tag.into(),
            });
        }
        self
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// The single style tag covering every character position, if any.
    ///
    /// Returns `None` when styles are absent, more than one distinct tag is
    /// present, or the tag's merged ranges leave a gap.
    pub fn dominant_style(&self) -> Option<&str> {
        let first = self.styles.first()?;
        if self.styles.iter().any(|s| s.tag != first.tag) {
            return None;
        }
        let len = self.char_len();
        if len == 0 {
            return Some(&first.tag);
        }
        let mut ranges: Vec<(usize, usize)> =
            self.styles.iter().map(|s| (s.start, s.end)).collect();
        ranges.sort_unstable();
        let mut covered = 0usize;
        for (start, end) in ranges {
            if start > covered {
                return None;
            }
            covered = covered.max(end);
        }
        (covered >= len).then_some(first.tag.as_str())
    }

    fn marker(tag: &str) -> Option<&'static str> {
        match tag {
            "bold" => Some("**"),
            "italic" => Some("*"),
            "strikethrough" => Some("~~"),
            "code" => Some("`"),
            _ => None,
        }
    }
}

/// Renders styled ranges as inline markup; unknown tags render bare text.
impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // (position, closing?) insertion points. Closers sort before
        // openers at the same position so adjacent ranges nest correctly.
        let mut inserts: Vec<(usize, bool, &'static str)> = Vec::new();
        for style in &self.styles {
            if let Some(marker) = Self::marker(&style.tag) {
                inserts.push((style.start, false, marker));
                inserts.push((style.end, true, marker));
            }
        }
        inserts.sort_by_key(|&(pos, closing, _)| (pos, !closing));

        let mut next = inserts.iter().peekable();
        for (i, ch) in self.text.chars().enumerate() {
            while let Some(&&(pos, _, marker)) = next.peek() {
                if pos > i {
                    break;
                }
                f.write_str(marker)?;
                next.next();
            }
            write!(f, "{ch}")?;
        }
        for &(_, _, marker) in next {
            f.write_str(marker)?;
        }
        Ok(())
    }
}

/// Mention kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AtFlag {
    User,
    Role,
    All,
}

/// Mention of a user, role, or everyone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct At {
    pub flag: AtFlag,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

impl At {
    pub fn user(target: impl Into<String>, display: Option<String>) -> Self {
        Self {
            flag: AtFlag::User,
            target: target.into(),
            display,
        }
    }
}

/// Platform emoji / sticker face.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Emoji {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Shared shape of the media family (Image/Video/File).
///
/// At least one of `url`, `raw`, or `path` must be resolvable at export
/// time; the exporter resolves them in that order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Media {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Media {
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

    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }
}

/// Reference to a quoted/replied-to message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    pub id: String,
    /// The quoted content, deserialized back into canonical form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<UniMessage>,
    /// The platform-native reply payload, kept for round-trip fidelity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<serde_json::Value>,
}

impl Reply {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: None,
            raw: None,
        }
    }
}

/// Button behavior kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonFlag {
    /// Opens `url`.
    Link,
    /// Submits `text` as user input.
    Input,
    /// Triggers a platform-side action callback.
    Action,
}

/// An inline button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub flag: ButtonFlag,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Button {
    pub fn link(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            flag: ButtonFlag::Link,
            label: label.into(),
            url: Some(url.into()),
            text: None,
        }
    }

    pub fn input(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            flag: ButtonFlag::Input,
            label: label.into(),
            url: None,
            text: Some(text.into()),
        }
    }

    pub fn action(label: impl Into<String>) -> Self {
        Self {
            flag: ButtonFlag::Action,
            label: label.into(),
            url: None,
            text: None,
        }
    }
}

/// A group of buttons. Not itself sent: the exporter unpacks it into the
/// platform's layout primitives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyboard {
    pub children: Vec<Button>,
    /// Max buttons per row. `None` means the children already form one row.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,
}

impl Keyboard {
    pub fn new(children: Vec<Button>) -> Self {
        Self {
            children,
            row: None,
        }
    }

    #[must_use]
    pub fn with_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn mark_returns_new_text_and_keeps_original_semantics() {
        let plain = Text::new("hello");
        let marked = plain.clone().mark(0, 5, "markdown");
        assert!(plain.styles.is_empty());
        assert_eq!(marked.styles.len(), 1);
        assert_eq!(marked.styles[0].tag, "markdown");
    }

    #[test]
    fn mark_clamps_out_of_range_and_drops_empty() {
        let t = Text::new("ab").mark(0, 99, "bold").mark(2, 2, "bold");
        assert_eq!(t.styles.len(), 1);
        assert_eq!(t.styles[0].end, 2);
    }

    #[rstest]
    #[case(Text::new("abc"), None)]
    #[case(Text::new("abc").mark(0, 3, "markdown"), Some("markdown"))]
    #[case(Text::new("abc").mark(0, 1, "markdown"), None)]
    #[case(Text::new("abc").mark(0, 2, "html").mark(1, 3, "html"), Some("html"))]
    #[case(Text::new("abc").mark(0, 2, "html").mark(2, 3, "bold"), None)]
    #[case(Text::new("abcd").mark(0, 1, "html").mark(2, 4, "html"), None)]
    fn dominant_style_cases(#[case] text: Text, #[case] expected: Option<&str>) {
        assert_eq!(text.dominant_style(), expected);
    }

    #[test]
    fn display_renders_known_styles_as_inline_markup() {
        let t = Text::new("hello world").mark(0, 5, "bold");
        assert_eq!(t.to_string(), "**hello** world");
    }

    #[test]
    fn display_leaves_unknown_tags_bare() {
        let t = Text::new("a b").mark(0, 1, "markdown");
        assert_eq!(t.to_string(), "a b");
    }

    #[test]
    fn display_handles_trailing_range() {
        let t = Text::new("abc").mark(1, 3, "code");
        assert_eq!(t.to_string(), "a`bc`");
    }

    #[test]
    fn segment_serde_is_structural() {
        let seg = Segment::At(At::user("42", Some("alice".into())));
        let json = serde_json::to_value(&seg).unwrap();
        assert_eq!(json["type"], "at");
        let back: Segment = serde_json::from_value(json).unwrap();
        assert_eq!(back, seg);
    }
}
