//! Text folding shared by tokens and haystacks.

/// Lower-cases `text`, treats `_` and `-` as spaces, collapses whitespace runs
/// and trims. `first_name`, `First-Name` and `first  name` all fold to `first name`.
pub fn fold(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for c in text.chars() {
        if c.is_whitespace() || c == '_' || c == '-' {
            pending_space = !out.is_empty();
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.extend(c.to_lowercase());
    }
    out
}

/// Substring test over already-folded text. Empty needles never match.
pub fn contains_folded(haystack: &str, needle: &str) -> bool {
    !needle.is_empty() && haystack.contains(needle)
}
