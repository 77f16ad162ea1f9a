use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use sitelog_engine::markup::{
    Directive, Segment, SegmentKind, render::to_html, render_segments, render_text, tokenize,
};

fn visible(segments: &[Segment]) -> String {
    segments.iter().map(Segment::text).collect()
}

#[rstest]
#[case("plain")]
#[case("  leading and trailing  ")]
#[case("multi\nline\r\ntext")]
#[case("stars * alone and < brackets > [not] (a link)")]
#[case("单独的中文文本")]
fn delimiter_free_text_is_one_literal(#[case] s: &str) {
    assert_eq!(tokenize(s), vec![Segment::Literal(s.to_string())]);
}

#[rstest]
#[case("X")]
#[case("two words")]
#[case("钢筋")]
fn bold_form(#[case] x: &str) {
    assert_eq!(tokenize(&format!("**{x}**")), vec![Segment::Bold(x.to_string())]);
}

#[rstest]
#[case("**a** and <c:red>b</c>", "a and b")]
#[case("<bg:yellow>注意</bg>：基坑\n排水", "注意：基坑\n排水")]
#[case("see [docs](d|https://example.com) now", "see docs now")]
#[case("**unterminated <c:red>ok</c>", "**unterminated ok")]
#[case("**a**\n\n**b**", "a\n\nb")]
#[case("<c:green></c>", "")]
#[case("\t[x](y|z)\t", "\tx\t")]
fn concatenation_law(#[case] input: &str, #[case] expected_visible: &str) {
    assert_eq!(visible(&tokenize(input)), expected_visible);
}

#[test]
fn concatenation_law_without_markup_is_identity() {
    let input = "一层 模板\n二层 钢筋 ~ 50% ~";
    assert_eq!(visible(&tokenize(input)), input);
}

#[test]
fn no_empty_literals_anywhere() {
    for input in ["**a**", "**a****b**", "x**a**", "**a**x", "<c:red>a</c><bg:green>b</bg>"] {
        for segment in tokenize(input) {
            if let Segment::Literal(text) = &segment {
                assert!(!text.is_empty(), "empty literal in {input:?}");
            }
        }
    }
}

#[test]
fn mixed_input_kinds() {
    let kinds: Vec<_> = tokenize("Before **bold** <c:blue>blue</c> after")
        .iter()
        .map(Segment::kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            SegmentKind::Literal,
            SegmentKind::Bold,
            SegmentKind::Literal,
            SegmentKind::Color,
            SegmentKind::Literal,
        ]
    );
}

#[test]
fn malformed_input_degrades_to_literal() {
    for input in ["**unterminated", "<bg:yellow>open", "[label](no pipe)", "</c> stray"] {
        assert_eq!(tokenize(input), vec![Segment::Literal(input.to_string())]);
    }
}

#[test]
fn rendering_twice_is_byte_identical() {
    let segments =
        tokenize("A **b** <c:#123456>c</c> <bg:yellow>d</bg> [e](f|https://g.example)\nh");
    let first = to_html(&render_segments(&segments));
    let second = to_html(&render_segments(&segments));
    assert_eq!(first, second);
}

#[test]
fn empty_field_renders_single_placeholder() {
    assert_eq!(render_text(Some("")), vec![Directive::Unfilled]);
    assert_eq!(render_text(None), vec![Directive::Unfilled]);
}

/// One markup form with delimiter-free content, as written and as shown.
#[derive(Debug, Clone)]
enum Piece {
    Literal(String),
    Bold(String),
    Color(String, String),
    Background(String, String),
    Link(String, String, String),
}

impl Piece {
    fn raw(&self) -> String {
        match self {
            Piece::Literal(text) => text.clone(),
            Piece::Bold(text) => format!("**{text}**"),
            Piece::Color(color, text) => format!("<c:{color}>{text}</c>"),
            Piece::Background(key, text) => format!("<bg:{key}>{text}</bg>"),
            Piece::Link(label, link_text, url) => format!("[{label}]({link_text}|{url})"),
        }
    }

    fn visible(&self) -> &str {
        match self {
            Piece::Literal(text) | Piece::Bold(text) => text,
            Piece::Color(_, text) | Piece::Background(_, text) => text,
            Piece::Link(label, ..) => label,
        }
    }

    fn kind(&self) -> SegmentKind {
        match self {
            Piece::Literal(_) => SegmentKind::Literal,
            Piece::Bold(_) => SegmentKind::Bold,
            Piece::Color(..) => SegmentKind::Color,
            Piece::Background(..) => SegmentKind::Background,
            Piece::Link(..) => SegmentKind::Link,
        }
    }
}

const PLAIN: &str = "[a-zA-Z0-9 ,.;:!?#%&()|>/\\-]{1,12}|[钢筋混凝土验收 ]{1,6}";

fn piece() -> impl Strategy<Value = Piece> {
    let inner = "[a-z0-9 进度风险]{1,8}";
    prop_oneof![
        PLAIN.prop_map(Piece::Literal),
        inner.prop_map(Piece::Bold),
        ("[a-z]{1,8}|#[0-9a-f]{6}", inner).prop_map(|(c, t)| Piece::Color(c, t)),
        ("yellow|green|[a-z]{1,6}", inner).prop_map(|(k, t)| Piece::Background(k, t)),
        ("[a-z 图纸]{0,6}", "[a-z ]{0,6}", "https://[a-z]{1,8}\\.example/[a-z]{0,6}")
            .prop_map(|(l, t, u)| Piece::Link(l, t, u)),
    ]
}

/// Arbitrary text dense in delimiter characters.
const NOISY: &str = "[a*<>:/bgc\\[\\]()|\n 中]{0,40}";

proptest! {
    #[test]
    fn prop_composed_markup_round_trips(pieces in prop::collection::vec(piece(), 0..8)) {
        let raw: String = pieces.iter().map(Piece::raw).collect();
        let expected_visible: String = pieces.iter().map(Piece::visible).collect();
        let expected_kinds: Vec<_> = pieces
            .iter()
            .map(Piece::kind)
            .filter(|k| *k != SegmentKind::Literal)
            .collect();

        let segments = tokenize(&raw);

        prop_assert_eq!(visible(&segments), expected_visible);
        let kinds: Vec<_> = segments
            .iter()
            .map(Segment::kind)
            .filter(|k| *k != SegmentKind::Literal)
            .collect();
        prop_assert_eq!(kinds, expected_kinds);
    }

    #[test]
    fn prop_delimiter_free_text_is_one_literal(s in "[^*<\\[]{1,60}") {
        prop_assert_eq!(tokenize(&s), vec![Segment::Literal(s.clone())]);
    }

    #[test]
    fn prop_noisy_input_never_yields_empty_literals(s in NOISY) {
        for segment in tokenize(&s) {
            if let Segment::Literal(text) = &segment {
                prop_assert!(!text.is_empty(), "empty literal in {:?}", s);
            }
        }
    }

    #[test]
    fn prop_visible_text_never_grows(s in NOISY) {
        prop_assert!(visible(&tokenize(&s)).len() <= s.len());
    }

    #[test]
    fn prop_rendering_is_deterministic(s in NOISY) {
        let first = to_html(&render_text(Some(&s)));
        let second = to_html(&render_segments(&tokenize(&s)));
        if s.is_empty() {
            prop_assert_eq!(first, r#"<span class="unfilled">未填写</span>"#);
        } else {
            prop_assert_eq!(first, second);
        }
    }
}
