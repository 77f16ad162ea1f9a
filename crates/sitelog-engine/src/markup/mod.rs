//! # Entry Markup
//!
//! A small inline markup language for the free-text fields of a weekly entry
//! (progress, risks, plan). Raw text is stored verbatim and tokenized fresh on
//! every display pass; segments are never persisted.
//!
//! ## Grammar
//!
//! | Form       | Syntax                     | Segment                  |
//! |------------|----------------------------|--------------------------|
//! | Bold       | `**text**`                 | [`Segment::Bold`]        |
//! | Color      | `<c:NAME>text</c>`         | [`Segment::Color`]       |
//! | Background | `<bg:NAME>text</bg>`       | [`Segment::Background`]  |
//! | Link       | `[label](linkText\|url)`   | [`Segment::Link`]        |
//!
//! Everything else is [`Segment::Literal`]. Malformed markup is never an
//! error: an unterminated `**` simply stays in the literal text.
//!
//! ## Modules
//!
//! - **`types`**: `Segment` sum type and `SegmentKind`
//! - **`kinds`**: delimiter constants, each form owns its own syntax
//! - **`palette`**: named background lookup with verbatim fallback
//! - **`tokenizer`**: `tokenize()` main entry point
//! - **`render`**: segment to presentation directive mapping, HTML and plain surfaces

pub mod kinds;
pub mod palette;
pub mod render;
pub mod tokenizer;
pub mod types;

pub use palette::{Highlight, resolve_background};
pub use render::{
    Directive, Run, RunStyle, UNFILLED, render_segment, render_segments, render_text, to_html,
    to_html_block, to_plain,
};
pub use tokenizer::tokenize;
pub use types::{Segment, SegmentKind};
