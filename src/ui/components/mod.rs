//! Composable UI component renderers.
//!
//! Each component draws one part of the pane at an explicit row and returns
//! the next free row, so the layout function reads top to bottom.
//!
//! # Components
//!
//! - [`header`]: Title bar
//! - [`filters`]: Genre checkboxes and the minimum rating input
//! - [`card`]: One movie card
//! - [`footer`]: Keybinding hints
//! - [`empty`]: Loading and failure messages

mod card;
mod empty;
mod filters;
mod footer;
mod header;

use crate::ui::helpers::{display_width, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use card::render_card;
use empty::render_empty_state;
use filters::render_filter_panel;
use footer::render_footer;
use header::render_header;

/// Renders a horizontal separator at `row` and returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the status layout used while loading or after a failure.
///
/// ```text
/// [blank line]
/// [Header]
/// [Border]
/// [Centered message]
/// [Border]
/// [Footer]
/// ```
pub fn render_status_mode(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;
    current_row = render_header(current_row, &vm.header, theme, cols);
    render_border(current_row, &theme.colors.border, cols);

    if let Some(empty) = &vm.empty_state {
        render_empty_state(empty, theme, cols);
    }

    render_border(rows.saturating_sub(1), &theme.colors.border, cols);
    render_footer(rows, &vm.footer, theme, cols);
}

/// Renders the browsing layout.
///
/// ```text
/// [blank line]
/// [Header]
/// [Border]
/// [Genre rows]
/// [Min rating]
/// [Border]
/// [Showing N movies]
/// [Cards, or the no-results hint]
/// [Border]
/// [Footer]
/// ```
///
/// The view model already holds only the cards that fit, so this never
/// writes past the bottom border.
pub fn render_browse_mode(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_filter_panel(current_row, &vm.filter_panel, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_text_line(current_row, &vm.result_count, &theme.colors.text_normal, cols);

    if let Some(hint) = &vm.no_results_hint {
        render_text_line(current_row + 1, hint, &theme.colors.text_dim, cols);
    }

    for card in &vm.cards {
        current_row = render_card(current_row, card, theme, cols);
    }

    render_border(rows.saturating_sub(1), &theme.colors.border, cols);
    render_footer(rows, &vm.footer, theme, cols);
}

fn render_text_line(row: usize, text: &str, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!(" {}{text}{}", Theme::fg(color), Theme::reset());
    print!("{}", " ".repeat(cols.saturating_sub(1 + display_width(text))));
    row + 1
}
