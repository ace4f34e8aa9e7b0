use console::measure_text_width;

const ELLIPSIS: char = '…';

/// Collapse a cell to one line and cut it to at most `width` characters.
pub fn truncate_cell(value: &str, width: usize) -> String {
    let single_line: String = value
        .chars()
        .map(|c| if c == '\n' || c == '\r' || c == '\t' { ' ' } else { c })
        .collect();

    if width == 0 {
        return String::new();
    }
    if single_line.chars().count() <= width {
        return single_line;
    }
    let mut cut: String = single_line.chars().take(width - 1).collect();
    cut.push(ELLIPSIS);
    cut
}

/// Left-align `value` in a column of `width`, ignoring ANSI escapes.
pub fn pad_right(value: &str, width: usize) -> String {
    let len = measure_text_width(value);
    format!("{}{}", value, " ".repeat(width.saturating_sub(len)))
}

/// Right-align `value` in a column of `width`, ignoring ANSI escapes.
pub fn pad_left(value: &str, width: usize) -> String {
    let len = measure_text_width(value);
    format!("{}{}", " ".repeat(width.saturating_sub(len)), value)
}

pub fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}
