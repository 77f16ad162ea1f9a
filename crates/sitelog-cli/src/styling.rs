//! Entry markup as ratatui spans.

use std::str::FromStr;

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use sitelog_engine::markup::{Directive, Run, UNFILLED, render_text};

/// Terminal color for a markup color name or hex code.
///
/// Names the terminal does not know are dropped and the text keeps the
/// surrounding style.
fn terminal_color(name: &str) -> Option<Color> {
    Color::from_str(name.trim()).ok()
}

fn run_style(run: &Run) -> Style {
    let mut style = Style::default();
    if run.style.strong {
        style = style.add_modifier(Modifier::BOLD);
    }
    if let Some(fg) = run.style.foreground.as_deref().and_then(terminal_color) {
        style = style.fg(fg);
    }
    if let Some(bg) = run.style.background.as_deref().and_then(terminal_color) {
        style = style.bg(bg);
    }
    if run.link.is_some() {
        style = style.fg(Color::Cyan).add_modifier(Modifier::UNDERLINED);
    }
    style
}

pub fn directive_spans(directives: &[Directive]) -> Vec<Span<'static>> {
    directives
        .iter()
        .map(|directive| match directive {
            Directive::Unfilled => Span::styled(
                UNFILLED,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ),
            Directive::Run(run) if run.style.boxed => {
                Span::styled(format!(" {} ", run.text), run_style(run))
            }
            Directive::Run(run) => Span::styled(run.text.clone(), run_style(run)),
        })
        .collect()
}

/// Renders a stored field to terminal lines, one per source line.
///
/// Markup never spans a newline, so splitting first gives the same runs as
/// tokenizing the whole field.
pub fn field_lines(raw: &str) -> Vec<Line<'static>> {
    if raw.is_empty() {
        return vec![Line::from(directive_spans(&render_text(None)))];
    }
    raw.split('\n')
        .map(|line| {
            let spans = if line.is_empty() {
                Vec::new()
            } else {
                directive_spans(&render_text(Some(line)))
            };
            Line::from(spans)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn bold_is_bold() {
        let spans = directive_spans(&render_text(Some("a**b**")));
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].content, "a");
        assert_eq!(spans[1].content, "b");
        assert!(spans[1].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn hex_and_named_colors() {
        let spans = directive_spans(&render_text(Some("<c:#dc2626>x</c><c:red>y</c>")));
        assert_eq!(spans[0].style.fg, Some(Color::Rgb(0xdc, 0x26, 0x26)));
        assert_eq!(spans[1].style.fg, Some(Color::Red));
    }

    #[test]
    fn unknown_color_keeps_text_unstyled() {
        let spans = directive_spans(&render_text(Some("<c:not-a-color>x</c>")));
        assert_eq!(spans[0].content, "x");
        assert_eq!(spans[0].style.fg, None);
    }

    #[test]
    fn palette_background_is_padded() {
        let spans = directive_spans(&render_text(Some("<bg:yellow>注意</bg>")));
        assert_eq!(spans[0].content, " 注意 ");
        assert_eq!(spans[0].style.bg, Some(Color::Rgb(0xfe, 0xf3, 0xc7)));
        assert_eq!(spans[0].style.fg, Some(Color::Rgb(0x92, 0x40, 0x0e)));
    }

    #[test]
    fn link_shows_label_underlined() {
        let spans = directive_spans(&render_text(Some("[图纸](查看|https://example.com)")));
        assert_eq!(spans[0].content, "图纸");
        assert!(spans[0].style.add_modifier.contains(Modifier::UNDERLINED));
    }

    #[test]
    fn empty_field_is_placeholder() {
        let lines = field_lines("");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].spans[0].content, UNFILLED);
    }

    #[test]
    fn multi_line_field_keeps_blank_lines() {
        let lines = field_lines("**一**\n\n二");
        assert_eq!(lines.len(), 3);
        assert!(lines[1].spans.is_empty());
        assert_eq!(lines[2].spans[0].content, "二");
    }
}
