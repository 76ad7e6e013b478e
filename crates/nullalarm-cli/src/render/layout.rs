/// Center `text` in `width` columns, or truncate it with `...` when it does
/// not fit. Width is measured on the trimmed text, so trailing pattern
/// spaces do not count against it.
pub fn fit_text(text: &str, width: usize) -> String {
    let len = text.trim().chars().count();
    if len >= width {
        let mut cut: String = text.chars().take(width.saturating_sub(3)).collect();
        cut.push_str("...");
        return cut;
    }

    let left = (width - len) / 2;
    let right = width - len - left;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

pub fn separator(width: usize, ch: char) -> String {
    std::iter::repeat(ch).take(width).collect()
}

/// `unit` repeated `count` times, e.g. `"* * * "`.
pub fn banner(unit: &str, count: usize) -> String {
    unit.repeat(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centers_short_text() {
        assert_eq!(fit_text("abc", 9), "   abc   ");
        assert_eq!(fit_text("abc", 8), "  abc   ");
    }

    #[test]
    fn truncates_long_text() {
        assert_eq!(fit_text("abcdefghij", 8), "abcde...");
        assert_eq!(fit_text("abcdefgh", 8), "abcde...");
    }

    #[test]
    fn tiny_width_never_panics() {
        assert_eq!(fit_text("abcdef", 2), "...");
        assert_eq!(fit_text("", 0), "...");
    }

    #[test]
    fn trailing_pattern_space_is_not_measured() {
        let line = banner("* ", 3);
        assert_eq!(line, "* * * ");
        // trimmed len 5, width 9: left 2, right 2, plus the kept trailing space
        assert_eq!(fit_text(&line, 9), "  * * *   ");
    }

    #[test]
    fn separator_counts_chars_not_bytes() {
        let sep = separator(4, '═');
        assert_eq!(sep.chars().count(), 4);
        assert_eq!(sep, "════");
    }
}
