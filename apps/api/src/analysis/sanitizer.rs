//! Response Sanitizer: best-effort isolation of a JSON object in model output.
//!
//! This is a heuristic, not a parser: braces are not balanced and braces
//! inside string literals or surrounding prose are not recognized.

const FENCE: &str = "```";

/// Strips code-fence markers, then slices from the first `{` to the last `}`
/// (inclusive) when both exist, and trims the result.
pub fn sanitize_json_response(raw: &str) -> String {
    let unfenced = strip_fences(raw);

    let sliced = match (unfenced.find('{'), unfenced.rfind('}')) {
        (Some(start), Some(end)) if start <= end => &unfenced[start..=end],
        _ => unfenced.as_str(),
    };

    sliced.trim().to_string()
}

/// Removes every triple-backtick marker together with a language tag that
/// directly follows it (e.g. "```json"). Fence interiors are kept.
fn strip_fences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find(FENCE) {
        out.push_str(&rest[..pos]);
        rest = &rest[pos + FENCE.len()..];
        let tag_len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '+')))
            .unwrap_or(rest.len());
        rest = &rest[tag_len..];
    }
    out.push_str(rest);
    out
}
