use pulldown_cmark::{Options, Parser, html};

/// Renders a Markdown report to an HTML fragment.
pub fn report_to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_sections_and_lists() {
        let html =
            report_to_html("## 一、本周工作回顾\n\n- 主体结构验收\n- **二次结构**进场\n");
        assert_eq!(
            html,
            concat!(
                "<h2>一、本周工作回顾</h2>\n<ul>\n<li>主体结构验收</li>\n",
                "<li><strong>二次结构</strong>进场</li>\n</ul>\n"
            )
        );
    }

    #[test]
    fn escapes_raw_text() {
        assert_eq!(report_to_html("a < b"), "<p>a &lt; b</p>\n");
    }
}
