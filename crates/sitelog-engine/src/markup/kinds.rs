//! Delimiters for each markup form.
//!
//! Raw (unescaped) delimiter text. The tokenizer escapes these when it
//! assembles its combined pattern.

pub struct Bold;

impl Bold {
    pub const DELIM: &'static str = "**";
}

pub struct Color;

impl Color {
    pub const OPEN: &'static str = "<c:";
    pub const CLOSE: &'static str = "</c>";
}

pub struct Background;

impl Background {
    pub const OPEN: &'static str = "<bg:";
    pub const CLOSE: &'static str = "</bg>";
}

/// `[label](linkText|url)`. Only the label is displayed; the text before the
/// pipe is carried for authoring convenience and dropped.
pub struct Link;

impl Link {
    pub const LABEL_OPEN: &'static str = "[";
    pub const LABEL_CLOSE: &'static str = "]";
    pub const TARGET_OPEN: &'static str = "(";
    pub const TARGET_CLOSE: &'static str = ")";
    pub const URL_SEPARATOR: &'static str = "|";
}
