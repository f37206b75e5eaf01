use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

pub fn display_width(s: &str) -> usize {
    s.width()
}

pub fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    let current_width = display_width(s);
    if current_width <= max_width {
        return s.to_string();
    }

    if max_width == 0 {
        return String::new();
    }

    let ellipsis = "…";
    let target_width = max_width.saturating_sub(1);

    let mut result = String::new();
    let mut width = 0;

    for ch in s.chars() {
        let ch_width = char_width(ch);
        if width + ch_width > target_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }

    result.push_str(ellipsis);
    result
}

/// Truncate or right-pad `s` with spaces so it occupies exactly `width` columns.
pub fn fit_to_width(s: &str, width: usize) -> String {
    let mut out = truncate_to_width(s, width);
    let w = display_width(&out);
    out.extend(std::iter::repeat(' ').take(width.saturating_sub(w)));
    out
}

/// Flatten newlines and tabs so a value fits on a single table line.
pub fn single_line(s: &str) -> String {
    s.chars()
        .map(|c| if c == '\n' || c == '\r' || c == '\t' { ' ' } else { c })
        .collect()
}
