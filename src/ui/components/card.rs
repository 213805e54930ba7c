//! Movie card renderer.
//!
//! Each card occupies `CARD_HEIGHT` rows:
//!
//! ```text
//!   The Matrix
//!   A hacker learns the truth about his reality...
//!   Rating: 8.2/10  Popularity: 85.3
//!   Genres: Action and Science Fiction
//!   https://image.tmdb.org/t/p/w500/matrix.jpg
//!
//! ```

use crate::app::state::CARD_HEIGHT;
use crate::ui::helpers::{display_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::MovieCard;

const INDENT: &str = "  ";

/// Renders one card starting at `row` and returns the row after it.
pub fn render_card(row: usize, card: &MovieCard, theme: &Theme, cols: usize) -> usize {
    let colors = &theme.colors;

    print_line(row, &card.title, &format!("{}{}", Theme::bold(), Theme::fg(&colors.card_title_fg)), cols);
    print_line(row + 1, &card.overview, &Theme::fg(&colors.text_dim), cols);

    let stats_width = cols.saturating_sub(INDENT.len() * 2);
    if display_width(&card.rating) + 2 + display_width(&card.popularity) <= stats_width {
        position_cursor(row + 2, 1);
        print!("{INDENT}{}{}{}", Theme::fg(&colors.rating_fg), card.rating, Theme::reset());
        print!("  {}{}{}", Theme::fg(&colors.text_normal), card.popularity, Theme::reset());
        let used = INDENT.len() + display_width(&card.rating) + 2 + display_width(&card.popularity);
        print!("{}", " ".repeat(cols.saturating_sub(used)));
    } else {
        print_line(row + 2, &card.rating, &Theme::fg(&colors.rating_fg), cols);
    }

    print_line(row + 3, &card.genres, &Theme::fg(&colors.text_normal), cols);
    print_line(row + 4, &card.poster_url, &format!("{}{}", Theme::dim(), Theme::fg(&colors.text_dim)), cols);
    print_line(row + 5, "", "", cols);

    row + CARD_HEIGHT
}

fn print_line(row: usize, text: &str, style: &str, cols: usize) {
    position_cursor(row, 1);
    print!("{INDENT}{style}{text}{}", Theme::reset());
    print!("{}", " ".repeat(cols.saturating_sub(INDENT.len() + display_width(text))));
}
