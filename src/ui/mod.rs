//! UI rendering for sockview.
//!
//! One screen, top to bottom: title and connection badge, the server's
//! random number and boolean indicator, the datetime input, the toggle
//! button, and a debug panel.

mod panels;
mod theme;

pub use panels::{format_random, indicator_label, TRANSPORT_LABEL};
pub use theme::{COLOR_ACTIVE, COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_FOCUS};

use ratatui::layout::{Constraint, Layout};
use ratatui::Frame;

use crate::app::App;

/// Render the whole view.
pub fn render(frame: &mut Frame, app: &App) {
    let [header, values, datetime, button, debug, hints] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(5),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Min(9),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    panels::render_header(frame, header, app);
    panels::render_values(frame, values, app);
    panels::render_datetime(frame, datetime, app);
    panels::render_button(frame, button, app);
    panels::render_debug(frame, debug, app);
    panels::render_hints(frame, hints, app);
}
