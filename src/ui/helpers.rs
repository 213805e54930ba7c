//! Shared rendering utilities and formatting helpers.
//!
//! Cursor positioning for the component renderers, plus the pure text
//! formatting used when building movie cards and the filter panel.

/// Positions the cursor at a specific row and column (both 1-indexed).
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Joins genre names into natural language.
///
/// All names but the last are joined with `", "` and the last one is
/// attached with `" and "`. A single name is returned as is; no names yield
/// an empty string.
///
/// # Example
///
/// ```
/// use popcorn::ui::helpers::format_genre_list;
///
/// assert_eq!(format_genre_list(&["Action"]), "Action");
/// assert_eq!(format_genre_list(&["Action", "Comedy"]), "Action and Comedy");
/// assert_eq!(format_genre_list(&["Action", "Comedy", "Drama"]), "Action, Comedy and Drama");
/// ```
#[must_use]
pub fn format_genre_list<S: AsRef<str>>(genres: &[S]) -> String {
    match genres.split_last() {
        None => String::new(),
        Some((last, [])) => last.as_ref().to_string(),
        Some((last, rest)) => {
            let head: Vec<&str> = rest.iter().map(|genre| genre.as_ref()).collect();
            format!("{} and {}", head.join(", "), last.as_ref())
        }
    }
}

/// Formats a number in its shortest form (`8`, `7.5`, `123.456`).
#[must_use]
pub fn format_number(value: f64) -> String {
    format!("{value}")
}

/// Builds a poster URL by appending the stored path to the image base URL.
#[must_use]
pub fn poster_url(image_base_url: &str, poster_path: &str) -> String {
    format!("{image_base_url}{poster_path}")
}

/// Shortens `text` to at most `width` characters, ending in `...` when cut.
///
/// Counts characters, not bytes, so multi-byte titles are never split.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width <= 3 {
        return text.chars().take(width).collect();
    }

    let kept: String = text.chars().take(width - 3).collect();
    format!("{kept}...")
}

/// Display width of `text` in terminal cells, counting one per character.
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genre_list_formats() {
        let none: [&str; 0] = [];
        assert_eq!(format_genre_list(&none), "");
        assert_eq!(format_genre_list(&["Action"]), "Action");
        assert_eq!(format_genre_list(&["Action", "Comedy"]), "Action and Comedy");
        assert_eq!(format_genre_list(&["Action", "Comedy", "Drama"]), "Action, Comedy and Drama");
        assert_eq!(
            format_genre_list(&vec!["A".to_string(), "B".to_string(), "C".to_string(), "D".to_string()]),
            "A, B, C and D"
        );
    }

    #[test]
    fn numbers_use_shortest_form() {
        assert_eq!(format_number(8.0), "8");
        assert_eq!(format_number(7.5), "7.5");
        assert_eq!(format_number(123.456), "123.456");
    }

    #[test]
    fn poster_url_concatenates() {
        assert_eq!(
            poster_url("https://image.tmdb.org/t/p/w500", "/abc.jpg"),
            "https://image.tmdb.org/t/p/w500/abc.jpg"
        );
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Amélie Poulain", 9), "Amélie...");
        assert_eq!(truncate("abcdef", 2), "ab");
        assert_eq!(display_width("Amélie"), 6);
    }
}
