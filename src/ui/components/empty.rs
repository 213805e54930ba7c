//! Full-pane status message renderer.
//!
//! Shown instead of the filter panel and cards while the catalog is loading,
//! and after loading failed.

use crate::ui::helpers::{display_width, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Row of the primary message; the subtitle goes on the row below.
const MESSAGE_ROW: usize = 6;

/// Renders a centered two-line message.
///
/// The message uses `error_fg` when `empty.is_error` is set and
/// `empty_state_fg` otherwise. The subtitle is dimmed.
///
/// # Layout
///
/// ```text
/// [header, border]
/// [blank lines]
/// [left padding] MESSAGE [right padding]
/// [left padding] subtitle [right padding]
/// ```
pub fn render_empty_state(empty: &EmptyState, theme: &Theme, cols: usize) {
    let color = if empty.is_error {
        &theme.colors.error_fg
    } else {
        &theme.colors.empty_state_fg
    };

    position_cursor(MESSAGE_ROW, 1);
    print!("{}{}", Theme::bold(), Theme::fg(color));
    print_centered(&empty.message, cols);
    print!("{}", Theme::reset());

    position_cursor(MESSAGE_ROW + 1, 1);
    print!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
    print_centered(&empty.subtitle, cols);
    print!("{}", Theme::reset());
}

fn print_centered(text: &str, cols: usize) {
    let text = truncate(text, cols);
    let len = display_width(&text);
    let padding = cols.saturating_sub(len) / 2;

    print!("{}", " ".repeat(padding));
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + len)));
}
