//! Title bar with the active filter summary.

use crate::ui::helpers::{display_width, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the title on the left and the active filters on the right.
///
/// ```text
///  Now playing                            Action and Drama | rating > 6.5
/// ```
///
/// The filter summary is dropped to whatever width the title leaves and the
/// line is padded so `header_bg` spans the pane.
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title = truncate(&format!(" {}", header.title), cols);
    let title_len = display_width(&title);

    let summary = header
        .active_filters
        .as_deref()
        .map(|text| truncate(&format!("{text} "), cols.saturating_sub(title_len + 2)))
        .unwrap_or_default();
    let gap = cols.saturating_sub(title_len + display_width(&summary));

    position_cursor(row, 1);
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }
    print!("{}{}{title}{}", Theme::bold(), Theme::fg(&theme.colors.header_fg), Theme::reset());
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }
    print!("{}", " ".repeat(gap));
    print!("{}{summary}", Theme::fg(&theme.colors.checked_fg));

    print!("{}", Theme::reset());
    row + 1
}
