//! Theme and Styling
//!
//! Fixed palette for the inspector.

use crate::presenter::Tier;
use crate::schema::Health;
use ratatui::style::{Color, Modifier, Style};

pub struct Theme;

impl Theme {
    // === Primary Colors ===

    pub const ACCENT: Color = Color::Rgb(0, 212, 255);
    pub const SUCCESS: Color = Color::Rgb(34, 197, 94);
    pub const WARNING: Color = Color::Rgb(251, 191, 36);
    pub const ERROR: Color = Color::Rgb(239, 68, 68);

    /// Mid-band relevance (between success and warning)
    pub const INFO: Color = Color::Rgb(59, 130, 246);

    // === Text Colors ===

    pub const TEXT_PRIMARY: Color = Color::Rgb(229, 229, 229);
    pub const TEXT_SECONDARY: Color = Color::Rgb(161, 161, 161);
    pub const TEXT_DIM: Color = Color::Rgb(82, 82, 82);

    // === Background Colors ===

    pub const BG_HIGHLIGHT: Color = Color::Rgb(38, 38, 38);

    // === Border Colors ===

    pub const BORDER: Color = Color::Rgb(51, 51, 51);
    pub const BORDER_FOCUSED: Color = Color::Rgb(59, 130, 246);

    // === Styles ===

    pub fn text() -> Style {
        Style::default().fg(Self::TEXT_PRIMARY)
    }

    pub fn text_secondary() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    pub fn text_dim() -> Style {
        Style::default().fg(Self::TEXT_DIM)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn heading() -> Style {
        Style::default()
            .fg(Self::TEXT_PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error() -> Style {
        Style::default().fg(Self::ERROR)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(Self::BORDER_FOCUSED)
    }

    /// Border style depending on focus
    pub fn border_for(focused: bool) -> Style {
        if focused {
            Self::border_focused()
        } else {
            Self::border()
        }
    }

    /// Selected row / list item
    pub fn selected() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .bg(Self::BG_HIGHLIGHT)
            .add_modifier(Modifier::BOLD)
    }

    /// Open collection in the sidebar
    pub fn active() -> Style {
        Style::default()
            .fg(Self::WARNING)
            .add_modifier(Modifier::BOLD)
    }

    /// Table header row
    pub fn table_header() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    /// Inline tags of array cells
    pub fn tag() -> Style {
        Style::default().fg(Self::ACCENT)
    }

    pub fn shortcut_key() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn shortcut_desc() -> Style {
        Style::default().fg(Self::TEXT_SECONDARY)
    }

    /// Mode badge in the search bar
    pub fn badge_primary() -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    /// Relevance band colour
    pub fn tier(tier: Tier) -> Style {
        let color = match tier {
            Tier::Top => Self::SUCCESS,
            Tier::High => Self::INFO,
            Tier::Medium => Self::WARNING,
            Tier::Low => Self::ERROR,
        };
        Style::default().fg(color)
    }

    pub fn health(health: Health) -> Style {
        let color = match health {
            Health::Connected => Self::SUCCESS,
            Health::Disconnected => Self::ERROR,
            Health::Unknown => Self::TEXT_DIM,
        };
        Style::default().fg(color)
    }
}

pub struct Icons;

impl Icons {
    pub const DOT: &'static str = "●";
    pub const SELECTED: &'static str = "▶ ";
    pub const SPINNER: [&'static str; 4] = ["◐", "◓", "◑", "◒"];
}
