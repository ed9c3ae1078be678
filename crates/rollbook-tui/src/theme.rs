//! Colours for the rollbook screens, named by what they mark.

use ratatui::style::{Color, Modifier, Style};

pub const ACCENT: Color = Color::Rgb(225, 53, 255);
pub const HEADING: Color = Color::Rgb(128, 255, 234);
pub const LABEL: Color = Color::Rgb(255, 106, 193);
pub const OK: Color = Color::Rgb(80, 250, 123);
pub const TEXT: Color = Color::Rgb(189, 193, 207);
pub const BACKDROP: Color = Color::Rgb(30, 31, 41);

const FAILURE: Color = Color::Rgb(255, 99, 99);
const MUTED: Color = Color::Rgb(98, 114, 164);
const SELECTED_BG: Color = Color::Rgb(40, 42, 54);

pub fn heading() -> Style {
    Style::default().fg(HEADING).add_modifier(Modifier::BOLD)
}

/// Active input or the panel that owns the cursor.
pub fn focused_border() -> Style {
    Style::default().fg(ACCENT)
}

pub fn border() -> Style {
    Style::default().fg(MUTED)
}

/// Subject table header.
pub fn column_header() -> Style {
    Style::default()
        .fg(HEADING)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

pub fn text() -> Style {
    Style::default().fg(TEXT)
}

/// Session under the cursor.
pub fn selected() -> Style {
    Style::default()
        .fg(ACCENT)
        .bg(SELECTED_BG)
        .add_modifier(Modifier::BOLD)
}

pub fn label() -> Style {
    Style::default().fg(LABEL)
}

/// The portal's one error line.
pub fn error() -> Style {
    Style::default().fg(FAILURE)
}

pub fn hint() -> Style {
    Style::default().fg(MUTED)
}
