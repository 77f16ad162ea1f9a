use super::palette::Highlight;

/// One unit of tokenized entry text.
///
/// Segments own their text; delimiters are consumed by the tokenizer and
/// survive only as metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text outside any markup, whitespace and newlines preserved.
    Literal(String),
    /// `**text**`
    Bold(String),
    /// `<c:NAME>text</c>`. The color is passed through unvalidated.
    Color { text: String, color: String },
    /// `<bg:NAME>text</bg>`
    Background {
        text: String,
        key: String,
        highlight: Highlight,
    },
    /// `[label](linkText|url)`
    Link { label: String, url: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Literal,
    Bold,
    Color,
    Background,
    Link,
}

impl Segment {
    pub fn kind(&self) -> SegmentKind {
        match self {
            Segment::Literal(_) => SegmentKind::Literal,
            Segment::Bold(_) => SegmentKind::Bold,
            Segment::Color { .. } => SegmentKind::Color,
            Segment::Background { .. } => SegmentKind::Background,
            Segment::Link { .. } => SegmentKind::Link,
        }
    }

    /// The visible text of this segment, with delimiters removed.
    pub fn text(&self) -> &str {
        match self {
            Segment::Literal(text) | Segment::Bold(text) => text,
            Segment::Color { text, .. } | Segment::Background { text, .. } => text,
            Segment::Link { label, .. } => label,
        }
    }
}
