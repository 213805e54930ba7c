//! Filter panel renderer: genre checkboxes and the minimum rating input.
//!
//! # Layout
//!
//! ```text
//!  [x] Action  [ ] Comedy  [ ] Drama
//!  [ ] Horror  [ ] Romance
//!  Min rating > 7.5/10
//! ```

use crate::app::state::GENRE_GAP;
use crate::ui::helpers::{display_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FilterPanelInfo, GenreToggle, RatingInfo};

/// Renders the genre rows followed by the rating line; returns the next row.
pub fn render_filter_panel(row: usize, panel: &FilterPanelInfo, theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;

    for genre_row in &panel.genre_rows {
        current_row = render_genre_row(current_row, genre_row, theme, cols);
    }

    render_rating(current_row, &panel.rating, theme, cols)
}

fn render_genre_row(row: usize, toggles: &[GenreToggle], theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!(" ");
    let mut used = 1;

    for (idx, toggle) in toggles.iter().enumerate() {
        if idx > 0 {
            print!("{}", " ".repeat(GENRE_GAP));
            used += GENRE_GAP;
        }

        if toggle.is_cursor {
            print!("{}", Theme::fg(&theme.colors.selection_fg));
            print!("{}", Theme::bg(&theme.colors.selection_bg));
        } else if toggle.is_selected {
            print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.checked_fg));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_normal));
        }
        print!("{}", toggle.label);
        print!("{}", Theme::reset());
        used += display_width(&toggle.label);
    }

    print!("{}", " ".repeat(cols.saturating_sub(used)));
    row + 1
}

fn render_rating(row: usize, rating: &RatingInfo, theme: &Theme, cols: usize) -> usize {
    const LABEL: &str = " Min rating ";

    position_cursor(row, 1);
    print!("{}{LABEL}{}", Theme::fg(&theme.colors.text_dim), Theme::reset());

    let value = match &rating.editing {
        Some(buffer) => {
            let shown = format!("[ {buffer}_ ]");
            print!("{}{}{shown}", Theme::bold(), Theme::fg(&theme.colors.input_border));
            shown
        }
        None => {
            let shown = format!("> {}/10", rating.value);
            print!("{}{shown}", Theme::fg(&theme.colors.rating_fg));
            shown
        }
    };
    print!("{}", Theme::reset());

    print!("{}", " ".repeat(cols.saturating_sub(LABEL.len() + display_width(&value))));
    row + 1
}
