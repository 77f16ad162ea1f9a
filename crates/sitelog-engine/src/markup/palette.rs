/// Resolved colors for a `<bg:NAME>` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    pub background: String,
    /// `None` leaves the surrounding text color in place.
    pub foreground: Option<String>,
}

/// Named highlights: key, background, foreground.
const PALETTE: &[(&str, &str, &str)] = &[
    ("yellow", "#fef3c7", "#92400e"),
    ("green", "#dcfce7", "#166534"),
];

/// Looks up a background key.
///
/// Unknown keys are used verbatim as the background color with the foreground
/// inherited. That fallback is best-effort: it only looks right for names the
/// rendering surface already understands.
pub fn resolve_background(key: &str) -> Highlight {
    match PALETTE.iter().find(|(name, _, _)| *name == key) {
        Some((_, background, foreground)) => Highlight {
            background: (*background).to_string(),
            foreground: Some((*foreground).to_string()),
        },
        None => Highlight {
            background: key.to_string(),
            foreground: None,
        },
    }
}
