use serde::{Deserialize, Serialize};

use crate::segment::Segment;

/// An ordered sequence of canonical segments.
///
/// Order is semantically significant (render order) and is preserved
/// end-to-end through build, compose, and export.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UniMessage(Vec<Segment>);

impl UniMessage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, segment: Segment) {
        self.0.push(segment);
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.0.iter()
    }
}

impl From<Vec<Segment>> for UniMessage {
    fn from(segments: Vec<Segment>) -> Self {
        Self(segments)
    }
}

impl FromIterator<Segment> for UniMessage {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for UniMessage {
    type Item = Segment;
    type IntoIter = std::vec::IntoIter<Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a UniMessage {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl std::ops::Deref for UniMessage {
    type Target = [Segment];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::Text;

    #[test]
    fn insertion_order_is_preserved() {
        let msg: UniMessage = vec![
            Segment::Text(Text::new("a")),
            Segment::Text(Text::new("b")),
            Segment::Text(Text::new("c")),
        ]
        .into();
        let texts: Vec<_> = msg
            .iter()
            .map(|s| match s {
                Segment::Text(t) => t.text.as_str(),
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(texts, ["a", "b", "c"]);
    }

    #[test]
    fn serde_is_transparent_over_segments() {
        let msg: UniMessage = vec![Segment::Text(Text::new("hi"))].into();
        let json = serde_json::to_value(&msg).unwrap();
        assert!(json.is_array());
        let back: UniMessage = serde_json::from_value(json).unwrap();
        assert_eq!(back, msg);
    }
}
