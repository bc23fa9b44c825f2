//! Color palettes for the dark and light themes

use crate::config::ThemeName;
use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub name: ThemeName,
    pub bg: Color,
    pub fg: Color,
    pub muted_fg: Color,
    pub primary: Color,
    pub border: Color,
    pub panel_bg: Color,
    pub error_fg: Color,
    pub toast_bg: Color,
    pub toast_fg: Color,
    pub selected_tab_bg: Color,
}

impl Theme {
    pub fn for_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Dark => Self::dark(),
            ThemeName::Light => Self::light(),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: ThemeName::Dark,
            bg: Color::Rgb(9, 9, 11),
            fg: Color::Rgb(250, 250, 250),
            muted_fg: Color::Rgb(161, 161, 170),
            primary: Color::Rgb(96, 165, 250),
            border: Color::Rgb(39, 39, 42),
            panel_bg: Color::Rgb(24, 24, 27),
            error_fg: Color::Rgb(248, 113, 113),
            toast_bg: Color::Rgb(39, 39, 42),
            toast_fg: Color::Rgb(250, 250, 250),
            selected_tab_bg: Color::Rgb(63, 63, 70),
        }
    }

    pub fn light() -> Self {
        Self {
            name: ThemeName::Light,
            bg: Color::Rgb(255, 255, 255),
            fg: Color::Rgb(9, 9, 11),
            muted_fg: Color::Rgb(113, 113, 122),
            primary: Color::Rgb(37, 99, 235),
            border: Color::Rgb(228, 228, 231),
            panel_bg: Color::Rgb(244, 244, 245),
            error_fg: Color::Rgb(220, 38, 38),
            toast_bg: Color::Rgb(24, 24, 27),
            toast_fg: Color::Rgb(250, 250, 250),
            selected_tab_bg: Color::Rgb(212, 212, 216),
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted_fg)
    }

    pub fn heading(&self) -> Style {
        Style::default().fg(self.fg).add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.primary)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
