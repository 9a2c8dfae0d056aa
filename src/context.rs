use serde::Serialize;

/// Lines surrounding a matched line. `start` and `end` are inclusive indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextWindow {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

/// Collects the lines within `radius` of `index`, clamped to the slice bounds.
///
/// Returns `None` when `lines` is empty or `index` is past the last line.
pub fn context_window<S: AsRef<str>>(lines: &[S], index: usize, radius: usize) -> Option<ContextWindow> {
    if index >= lines.len() {
        return None;
    }

    let start = index.saturating_sub(radius);
    let end = index.saturating_add(radius).min(lines.len() - 1);

    let text = lines[start..=end]
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join("\n");

    Some(ContextWindow { start, end, text })
}
