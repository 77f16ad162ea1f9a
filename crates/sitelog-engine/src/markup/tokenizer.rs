use std::sync::OnceLock;

use regex::{Captures, Regex, escape};

use super::{
    kinds::{Background, Bold, Color, Link},
    palette::resolve_background,
    types::Segment,
};

/// The four forms as alternatives of one pattern.
///
/// Every body is non-greedy so the first closing delimiter ends the match.
/// `.` does not cross newlines, so a span never covers a line break.
fn markup_regex() -> &'static Regex {
    static MARKUP_REGEX: OnceLock<Regex> = OnceLock::new();
    MARKUP_REGEX.get_or_init(|| {
        let pattern = format!(
            concat!(
                r"{bold}(?P<bold>.*?){bold}",
                r"|{c_open}(?P<color>[^>\n]*)>(?P<color_text>.*?){c_close}",
                r"|{bg_open}(?P<bg>[^>\n]*)>(?P<bg_text>.*?){bg_close}",
                r"|{l_open}(?P<label>[^\]\n]*){l_close}{t_open}(?P<link_text>[^|)\n]*){sep}(?P<url>[^)\n]*){t_close}",
            ),
            bold = escape(Bold::DELIM),
            c_open = escape(Color::OPEN),
            c_close = escape(Color::CLOSE),
            bg_open = escape(Background::OPEN),
            bg_close = escape(Background::CLOSE),
            l_open = escape(Link::LABEL_OPEN),
            l_close = escape(Link::LABEL_CLOSE),
            t_open = escape(Link::TARGET_OPEN),
            t_close = escape(Link::TARGET_CLOSE),
            sep = escape(Link::URL_SEPARATOR),
        );
        Regex::new(&pattern).expect("Invalid markup regex")
    })
}

/// Splits raw entry text into [`Segment`]s.
///
/// Matches are taken left to right without overlap; the text between them is
/// emitted as `Literal` segments. Empty input yields no segments at all, the
/// "unfilled" placeholder is a rendering concern (see
/// [`render_text`](super::render::render_text)).
///
/// Unterminated markup is not an error. It simply fails to match and stays in
/// the surrounding literal text.
pub fn tokenize(raw: &str) -> Vec<Segment> {
    let mut out = Vec::new();
    let mut text_start = 0;

    // Helper to flush accumulated text as a Literal segment
    fn flush_literal(out: &mut Vec<Segment>, text: &str) {
        if !text.is_empty() {
            out.push(Segment::Literal(text.to_string()));
        }
    }

    for caps in markup_regex().captures_iter(raw) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        flush_literal(&mut out, &raw[text_start..whole.start()]);
        out.push(segment_from(&caps));
        text_start = whole.end();
    }

    flush_literal(&mut out, &raw[text_start..]);
    out
}

/// Builds the segment for whichever alternative participated in the match.
fn segment_from(caps: &Captures<'_>) -> Segment {
    let group = |name: &str| {
        caps.name(name)
            .map_or_else(String::new, |m| m.as_str().to_string())
    };

    if let Some(bold) = caps.name("bold") {
        return Segment::Bold(bold.as_str().to_string());
    }
    if let Some(color) = caps.name("color") {
        return Segment::Color {
            text: group("color_text"),
            color: color.as_str().to_string(),
        };
    }
    if let Some(key) = caps.name("bg") {
        return Segment::Background {
            text: group("bg_text"),
            key: key.as_str().to_string(),
            highlight: resolve_background(key.as_str()),
        };
    }
    Segment::Link {
        label: group("label"),
        url: group("url"),
    }
}
