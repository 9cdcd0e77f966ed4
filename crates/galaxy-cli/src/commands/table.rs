//! Plain-text table helpers shared by the listing commands and the
//! dashboard.

/// Width of the relevance bar in characters.
pub const BAR_WIDTH: usize = 10;

/// A fixed-width bar for a value in [0, 1], e.g. `██████░░░░`.
pub fn relevance_bar(relevance: f64, width: usize) -> String {
    let clamped = if relevance.is_finite() {
        relevance.clamp(0.0, 1.0)
    } else {
        0.0
    };
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    let filled = ((clamped * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Cut `text` to at most `width` characters, marking the cut with `…`.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

/// Left-align `text` in a column of `width` characters.
pub fn cell(text: &str, width: usize) -> String {
    let text = truncate(text, width);
    let padding = width.saturating_sub(text.chars().count());
    format!("{}{}", text, " ".repeat(padding))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relevance_bar() {
        assert_eq!(relevance_bar(0.0, 4), "░░░░");
        assert_eq!(relevance_bar(0.5, 4), "██░░");
        assert_eq!(relevance_bar(1.0, 4), "████");
        assert_eq!(relevance_bar(f64::NAN, 4), "░░░░");
        assert_eq!(relevance_bar(7.0, 4), "████");
    }

    #[test]
    fn test_truncate_counts_characters() {
        assert_eq!(truncate("Röyksopp", 20), "Röyksopp");
        assert_eq!(truncate("Röyksopp", 4), "Röy…");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn test_cell_pads() {
        assert_eq!(cell("ab", 4), "ab  ");
        assert_eq!(cell("abcdef", 4), "abc…");
    }
}
