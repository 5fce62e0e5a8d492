// Shared prompt fragments and the template filler used by every prompt module.

/// Output format for every bullet-producing prompt.
pub const BULLET_OUTPUT_FORMAT: &str = "\
Return ONLY the bullet points, one per line, each starting with the • symbol. \
No headings, numbering or extra commentary.";

/// ATS-safety constraint shared by the generation prompts.
pub const ATS_SAFE_INSTRUCTION: &str = "\
Keep the text ATS-friendly: plain text, no tables or special characters, \
standard industry keywords.";

/// Fills `{name}` placeholders in one pass. Substituted values are never re-scanned,
/// so user text containing braces cannot trigger a second substitution.
/// Unknown placeholders are left as-is.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + 512);
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };
        let key = &after[..close];
        match values.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => out.push_str(value),
            None => {
                out.push('{');
                out.push_str(key);
                out.push('}');
            }
        }
        rest = &after[close + 1..];
    }

    out.push_str(rest);
    out
}
