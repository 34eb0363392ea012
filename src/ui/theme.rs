//! Color theme constants for the sockview UI.

use ratatui::style::Color;

/// Border color for panels
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Border color for the focused control
pub const COLOR_FOCUS: Color = Color::White;

/// Title text
pub const COLOR_HEADER: Color = Color::White;

/// Connected badge, active indicator, "ON"
pub const COLOR_ACTIVE: Color = Color::LightGreen;

/// Disconnected badge, validation errors
pub const COLOR_ERROR: Color = Color::LightRed;

/// Inactive indicator
pub const COLOR_INACTIVE: Color = Color::Gray;

/// Disabled controls and secondary text
pub const COLOR_DIM: Color = Color::DarkGray;

/// Live random number value
pub const COLOR_VALUE: Color = Color::Rgb(0, 122, 204);
