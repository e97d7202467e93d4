//! Greedy word wrapping with pluggable width measurement.
//!
//! The terminal measures in columns, the SVG renderer in estimated pixels;
//! both share [`wrap_words`].

/// Width ratio of an average Latin glyph to the font size.
const NARROW_GLYPH_RATIO: f64 = 0.6;

/// Split `text` on whitespace and pack words into lines no wider than
/// `max_width` as reported by `measure`.
///
/// A word that alone exceeds the width gets a line of its own rather than
/// being broken. Empty or all-whitespace text yields no lines.
pub fn wrap_words(text: &str, max_width: f64, measure: impl Fn(&str) -> f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
            continue;
        }
        let candidate = format!("{line} {word}");
        if measure(&candidate) > max_width {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        } else {
            line = candidate;
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// East Asian wide and fullwidth ranges, which take two terminal columns.
fn is_wide(c: char) -> bool {
    matches!(c,
        '\u{1100}'..='\u{115F}'
        | '\u{2E80}'..='\u{303E}'
        | '\u{3041}'..='\u{33FF}'
        | '\u{3400}'..='\u{4DBF}'
        | '\u{4E00}'..='\u{9FFF}'
        | '\u{A000}'..='\u{A4CF}'
        | '\u{AC00}'..='\u{D7A3}'
        | '\u{F900}'..='\u{FAFF}'
        | '\u{FE30}'..='\u{FE4F}'
        | '\u{FF00}'..='\u{FF60}'
        | '\u{FFE0}'..='\u{FFE6}'
        | '\u{1F300}'..='\u{1F64F}'
        | '\u{20000}'..='\u{3FFFD}')
}

/// Terminal columns occupied by `s`.
pub fn display_width(s: &str) -> usize {
    s.chars().map(|c| if is_wide(c) { 2 } else { 1 }).sum()
}

/// Estimated rendered width of `s` in pixels at `font_size`.
pub fn estimate_text_width(s: &str, font_size: f64) -> f64 {
    s.chars()
        .map(|c| {
            if is_wide(c) {
                font_size
            } else {
                font_size * NARROW_GLYPH_RATIO
            }
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn columns(s: &str) -> f64 {
        display_width(s) as f64
    }

    #[test]
    fn packs_words_greedily() {
        let lines = wrap_words("the quick brown fox jumps", 10.0, columns);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps"]);
    }

    #[test]
    fn long_word_gets_own_line() {
        let lines = wrap_words("a supercalifragilistic b", 5.0, columns);
        assert_eq!(lines, vec!["a", "supercalifragilistic", "b"]);
    }

    #[test]
    fn collapses_whitespace_and_handles_empty() {
        assert_eq!(wrap_words("  one \n two  ", 80.0, columns), vec!["one two"]);
        assert!(wrap_words("   ", 80.0, columns).is_empty());
    }

    #[test]
    fn wide_characters_count_double() {
        assert_eq!(display_width("ab"), 2);
        assert_eq!(display_width("步骤"), 4);
        assert_eq!(estimate_text_width("步", 12.0), 12.0);
        assert!((estimate_text_width("ab", 10.0) - 12.0).abs() < 1e-9);
    }
}
