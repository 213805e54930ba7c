//! Top-level rendering coordinator.
//!
//! Rendering is a two-step process:
//!
//! 1. **View Model Computation**: `AppState` becomes a `UIViewModel`
//! 2. **Component Rendering**: the view model is drawn by the components

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders the plugin UI to stdout for a pane of `rows` x `cols`.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    render_viewmodel(&viewmodel, &state.theme, rows, cols);
}

/// Picks the status layout when there is a message to show, the browsing
/// layout otherwise.
fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    if vm.empty_state.is_some() {
        components::render_status_mode(vm, theme, cols, rows);
    } else {
        components::render_browse_mode(vm, theme, cols, rows);
    }
}
