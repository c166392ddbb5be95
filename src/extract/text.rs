use crate::extract::ReadRule;

/// Applies a read rule to raw element text
pub fn read(raw: &str, rule: ReadRule) -> String {
    match rule {
        ReadRule::Trimmed => raw.trim().to_string(),
        ReadRule::SingleLine => single_line(raw),
    }
}

/// Joins the non-empty lines of `text` with single spaces
///
/// Each line is trimmed first, so `"$1,200\n  Negotiable \n"` becomes
/// `"$1,200 Negotiable"`. Spacing inside a line is left alone.
pub fn single_line(text: &str) -> String {
    split_lines(text).join(" ")
}

/// Trimmed, non-empty lines of `text`
pub fn split_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}
