//! Segment rendering.
//!
//! [`render_segments`] maps segments to surface-neutral [`Directive`]s. The
//! HTML and plain-text writers below, and the terminal browser in the CLI, are
//! all fed from those directives so every surface agrees on styling.

use std::fmt::Write as _;

use html_escape::{encode_double_quoted_attribute, encode_text};

use super::{tokenizer::tokenize, types::Segment};

/// Placeholder shown for an empty or missing field.
pub const UNFILLED: &str = "未填写";

/// Style attributes for one run of text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStyle {
    pub strong: bool,
    pub foreground: Option<String>,
    pub background: Option<String>,
    /// Thin border and padding around a highlighted run.
    pub boxed: bool,
}

/// A run of text with its presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub style: RunStyle,
    /// Hyperlink target. Links always open in a new window with no referrer.
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Run(Run),
    /// The field has no content.
    Unfilled,
}

impl Run {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            style: RunStyle::default(),
            link: None,
        }
    }
}

pub fn render_segment(segment: &Segment) -> Directive {
    let run = match segment {
        Segment::Literal(text) => Run::plain(text),
        Segment::Bold(text) => Run {
            style: RunStyle {
                strong: true,
                ..RunStyle::default()
            },
            ..Run::plain(text)
        },
        Segment::Color { text, color } => Run {
            style: RunStyle {
                foreground: Some(color.clone()),
                ..RunStyle::default()
            },
            ..Run::plain(text)
        },
        Segment::Background {
            text, highlight, ..
        } => Run {
            style: RunStyle {
                foreground: highlight.foreground.clone(),
                background: Some(highlight.background.clone()),
                boxed: true,
                ..RunStyle::default()
            },
            ..Run::plain(text)
        },
        Segment::Link { label, url } => Run {
            link: Some(url.clone()),
            ..Run::plain(label)
        },
    };
    Directive::Run(run)
}

pub fn render_segments(segments: &[Segment]) -> Vec<Directive> {
    segments.iter().map(render_segment).collect()
}

/// Tokenizes and renders a stored field in one step.
///
/// `None` and `""` both produce the single [`Directive::Unfilled`].
pub fn render_text(raw: Option<&str>) -> Vec<Directive> {
    match raw {
        None | Some("") => vec![Directive::Unfilled],
        Some(raw) => render_segments(&tokenize(raw)),
    }
}

/// Writes directives as an inline HTML fragment.
pub fn to_html(directives: &[Directive]) -> String {
    let mut out = String::new();
    for directive in directives {
        match directive {
            Directive::Unfilled => {
                let _ = write!(out, r#"<span class="unfilled">{UNFILLED}</span>"#);
            }
            Directive::Run(run) => write_run_html(&mut out, run),
        }
    }
    out
}

/// A color token usable as one CSS value: a name or a hex code.
///
/// Anything else could add declarations to the `style` attribute.
fn css_color(token: &str) -> Option<&str> {
    let token = token.trim();
    let valid = !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '#' | '-' | '_'));
    valid.then_some(token)
}

/// Link targets allowed in an `href`: http(s), mailto, or scheme-less paths.
fn safe_href(url: &str) -> Option<&str> {
    let url = url.trim();
    let scheme_end = url.find(|c: char| matches!(c, ':' | '/' | '?' | '#'));
    match scheme_end {
        Some(i) if url[i..].starts_with(':') => {
            let scheme = &url[..i];
            ["http", "https", "mailto"]
                .iter()
                .any(|allowed| scheme.eq_ignore_ascii_case(allowed))
                .then_some(url)
        }
        _ => Some(url),
    }
}

fn write_run_html(out: &mut String, run: &Run) {
    let text = encode_text(&run.text);

    if let Some(url) = &run.link {
        match safe_href(url) {
            Some(href) => {
                let _ = write!(
                    out,
                    r#"<a href="{}" target="_blank" rel="noopener noreferrer">{text}</a>"#,
                    encode_double_quoted_attribute(href)
                );
            }
            None => out.push_str(&text),
        }
        return;
    }

    let style = &run.style;
    let foreground = style.foreground.as_deref().and_then(css_color);
    if style.strong {
        let _ = write!(out, "<strong>{text}</strong>");
    } else if style.boxed {
        let background = style
            .background
            .as_deref()
            .and_then(css_color)
            .unwrap_or("transparent");
        let foreground = foreground.unwrap_or("inherit");
        let _ = write!(
            out,
            concat!(
                r#"<span class="highlight" style="background-color: {}; color: {}; "#,
                r#"padding: 0 0.25em; border: 1px solid currentColor; "#,
                r#"border-radius: 3px">{}</span>"#
            ),
            background, foreground, text
        );
    } else if let Some(color) = foreground {
        let _ = write!(out, r#"<span style="color: {color}">{text}</span>"#);
    } else {
        out.push_str(&text);
    }
}

/// Wraps a field's HTML so line breaks survive and long words wrap.
pub fn to_html_block(raw: Option<&str>) -> String {
    format!(
        r#"<div class="markup" style="white-space: pre-wrap; overflow-wrap: break-word">{}</div>"#,
        to_html(&render_text(raw))
    )
}

/// Writes directives for a surface without styling or hyperlinks.
///
/// Links are shown as `label <url>`.
pub fn to_plain(directives: &[Directive]) -> String {
    let mut out = String::new();
    for directive in directives {
        match directive {
            Directive::Unfilled => out.push_str(UNFILLED),
            Directive::Run(Run {
                text,
                link: Some(url),
                ..
            }) => {
                if !text.is_empty() {
                    out.push_str(text);
                    out.push(' ');
                }
                let _ = write!(out, "<{url}>");
            }
            Directive::Run(run) => out.push_str(&run.text),
        }
    }
    out
}
