//! Text measurement for the embedded monospace face.
//!
//! Reports are set in DejaVu Sans Mono, so every glyph advances by the same
//! width and measurement is exact without shaping.

use crate::format::truncate;

/// Advance width of one glyph, in em (1233 / 2048 units).
pub const CHAR_WIDTH_EM: f64 = 0.602;

/// Width of `text` at `size` points.
pub fn text_width(text: &str, size: f64) -> f64 {
    text.chars().count() as f64 * CHAR_WIDTH_EM * size
}

/// How many glyphs fit in `width` points at `size`.
pub fn max_chars(width: f64, size: f64) -> usize {
    if width <= 0.0 || size <= 0.0 {
        return 0;
    }
    (width / (CHAR_WIDTH_EM * size) + 1e-9).floor() as usize
}

/// Truncate `text` with an ellipsis so it fits in `width` points.
pub fn fit_width(text: &str, width: f64, size: f64) -> String {
    truncate(text, max_chars(width, size))
}

/// Greedy word wrap into lines no wider than `width` points.
///
/// Words longer than a line are split hard.
pub fn wrap(text: &str, width: f64, size: f64) -> Vec<String> {
    let limit = max_chars(width, size).max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > limit {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(limit);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if current_len == 0 { word.len() } else { current_len + 1 + word.len() };
        if needed > limit && current_len > 0 {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current_len += word.len();
        current.extend(word);
    }

    if current_len > 0 {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_width_is_monospace() {
        assert!((text_width("abcd", 10.0) - 24.08).abs() < 1e-9);
        assert_eq!(text_width("", 10.0), 0.0);
    }

    #[test]
    fn test_max_chars() {
        // 60.2pt at 10pt holds exactly 10 glyphs
        assert_eq!(max_chars(60.2, 10.0), 10);
        assert_eq!(max_chars(60.0, 10.0), 9);
        assert_eq!(max_chars(-5.0, 10.0), 0);
    }

    #[test]
    fn test_fit_width_truncates() {
        assert_eq!(fit_width("Galvanized steel sheet", 60.2, 10.0), "Galvanize…");
        assert_eq!(fit_width("Sand", 60.2, 10.0), "Sand");
    }

    #[test]
    fn test_wrap_words() {
        let lines = wrap("the quick brown fox jumps", 60.2, 10.0);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps"]);
        for line in &lines {
            assert!(line.chars().count() <= 10);
        }
    }

    #[test]
    fn test_wrap_splits_long_words() {
        let lines = wrap("ab abcdefghijklmnopqrstuvwxyz", 30.1, 10.0);
        assert_eq!(lines, vec!["ab", "abcde", "fghij", "klmno", "pqrst", "uvwxy", "z"]);
    }

    #[test]
    fn test_wrap_empty() {
        assert!(wrap("   ", 100.0, 10.0).is_empty());
    }
}
