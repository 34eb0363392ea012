//! Individual panels of the main screen.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use super::theme::{
    COLOR_ACTIVE, COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_FOCUS, COLOR_HEADER,
    COLOR_INACTIVE, COLOR_VALUE,
};
use crate::app::{describe_datetime, App, Focus, DATETIME_FORMAT_HINT};
use crate::session::ConnectionState;

/// Transport description for the debug panel.
pub const TRANSPORT_LABEL: &str = "Socket.IO (websocket)";

/// Random number as shown in the UI: six decimals.
pub fn format_random(value: f64) -> String {
    format!("{:.6}", value)
}

/// ON/OFF text for the server boolean.
pub fn indicator_label(value: bool) -> &'static str {
    if value {
        "ON"
    } else {
        "OFF"
    }
}

fn panel(title: &str, focused: bool) -> Block<'_> {
    let color = if focused { COLOR_FOCUS } else { COLOR_BORDER };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(COLOR_HEADER),
        ))
}

fn status_style(state: ConnectionState) -> Style {
    match state {
        ConnectionState::Connected => Style::default().fg(COLOR_ACTIVE),
        ConnectionState::Disconnected => Style::default().fg(COLOR_ERROR),
    }
}

pub(super) fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let state = app.session.connection_state();
    let line = Line::from(vec![
        Span::styled(
            "Socket Client",
            Style::default()
                .fg(COLOR_HEADER)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled("● ", status_style(state)),
        Span::styled(state.label(), status_style(state)),
    ]);
    frame.render_widget(
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .block(panel("sockview", false)),
        area,
    );
}

pub(super) fn render_values(frame: &mut Frame, area: Rect, app: &App) {
    let snapshot = app.session.snapshot();
    let indicator_style = if snapshot.boolean_value {
        Style::default()
            .fg(COLOR_ACTIVE)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(COLOR_INACTIVE)
    };
    let status_text = if snapshot.boolean_value {
        "Active"
    } else {
        "Inactive"
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("Random Number     ", Style::default().fg(COLOR_DIM)),
            Span::styled(
                format_random(snapshot.random_number),
                Style::default().fg(COLOR_VALUE),
            ),
        ]),
        Line::from(vec![
            Span::styled("Status Indicator  ", Style::default().fg(COLOR_DIM)),
            Span::styled(
                format!("[{}]", indicator_label(snapshot.boolean_value)),
                indicator_style,
            ),
            Span::raw(" "),
            Span::styled(status_text, indicator_style),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines).block(panel("Server", false)), area);
}

pub(super) fn render_datetime(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Datetime;
    let enabled = app.datetime_enabled();

    let input = if !enabled {
        Line::from(Span::styled(
            "(unavailable while offline)",
            Style::default().fg(COLOR_DIM),
        ))
    } else if app.datetime_draft.is_empty() && !focused {
        Line::from(Span::styled(
            DATETIME_FORMAT_HINT,
            Style::default().fg(COLOR_DIM),
        ))
    } else {
        let cursor = if focused { "▏" } else { "" };
        Line::from(vec![
            Span::raw(app.datetime_draft.clone()),
            Span::styled(cursor, Style::default().fg(COLOR_FOCUS)),
        ])
    };

    let value = &app.session.controls().datetime_value;
    let detail = match &app.input_error {
        Some(error) => Line::from(Span::styled(error.clone(), Style::default().fg(COLOR_ERROR))),
        None if !value.is_empty() => Line::from(Span::styled(
            format!("Selected: {}", describe_datetime(value)),
            Style::default().fg(COLOR_INACTIVE),
        )),
        None => Line::default(),
    };

    frame.render_widget(
        Paragraph::new(vec![input, detail]).block(panel("Date and Time", focused)),
        area,
    );
}

pub(super) fn render_button(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Button;
    let state = app.session.controls().button_state;

    let (label, style) = if state {
        ("Turn OFF", Style::default().fg(COLOR_ACTIVE))
    } else {
        ("Turn ON", Style::default().fg(COLOR_INACTIVE))
    };
    let style = if focused {
        style.add_modifier(Modifier::REVERSED)
    } else {
        style
    };

    let lines = vec![
        Line::from(Span::styled(format!("[ {} ]", label), style)),
        Line::from(Span::styled(
            format!("Button State: {}", if state { "TRUE" } else { "FALSE" }),
            Style::default().fg(COLOR_DIM),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(panel("Client Control", focused)),
        area,
    );
}

pub(super) fn render_debug(frame: &mut Frame, area: Rect, app: &App) {
    let session = &app.session;
    let snapshot = session.snapshot();
    let controls = session.controls();
    let connection = if session.is_connected() {
        "✓ Connected"
    } else {
        "✗ Disconnected"
    };
    let datetime = if controls.datetime_value.is_empty() {
        "Not selected"
    } else {
        controls.datetime_value.as_str()
    };

    let rows = [
        ("Connection", connection.to_string()),
        ("Random", format_random(snapshot.random_number)),
        ("Server Boolean", snapshot.boolean_value.to_string()),
        ("Client Button", controls.button_state.to_string()),
        ("DateTime", datetime.to_string()),
        ("Client ID", session.client_id().to_string()),
        ("Transport", TRANSPORT_LABEL.to_string()),
        ("Endpoint", app.endpoint.clone()),
    ];
    let lines: Vec<Line> = rows
        .into_iter()
        .map(|(name, value)| {
            Line::from(vec![
                Span::styled(format!("{}: ", name), Style::default().fg(COLOR_DIM)),
                Span::raw(value),
            ])
        })
        .collect();

    frame.render_widget(
        Paragraph::new(lines).block(panel("Debug Info", false)),
        area,
    );
}

pub(super) fn render_hints(frame: &mut Frame, area: Rect, app: &App) {
    let action = match app.focus {
        Focus::Button => "space toggle",
        Focus::Datetime => "enter commit · del clear",
    };
    let hints = format!("tab switch · {} · esc quit", action);
    frame.render_widget(
        Paragraph::new(Span::styled(hints, Style::default().fg(COLOR_DIM))),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_random_six_decimals() {
        assert_eq!(format_random(0.0), "0.000000");
        assert_eq!(format_random(1.23456), "1.234560");
        assert_eq!(format_random(0.1234567), "0.123457");
    }

    #[test]
    fn test_indicator_label() {
        assert_eq!(indicator_label(true), "ON");
        assert_eq!(indicator_label(false), "OFF");
    }
}
