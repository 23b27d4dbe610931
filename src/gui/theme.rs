use iced::Color;

use crate::config::ThemeChoice;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl From<ThemeChoice> for Theme {
    fn from(choice: ThemeChoice) -> Self {
        match choice {
            ThemeChoice::Light => Theme::Light,
            ThemeChoice::Dark => Theme::Dark,
        }
    }
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(&self) -> bool {
        *self == Theme::Dark
    }

    pub fn background(&self) -> Color {
        match self {
            Theme::Light => Color::from_rgb(0.94, 0.95, 0.97),
            Theme::Dark => Color::from_rgb(0.09, 0.10, 0.12),
        }
    }

    /// Panels and the output area.
    pub fn surface(&self) -> Color {
        match self {
            Theme::Light => Color::from_rgb(1.0, 1.0, 1.0),
            Theme::Dark => Color::from_rgb(0.15, 0.16, 0.19),
        }
    }

    pub fn input_background(&self) -> Color {
        match self {
            Theme::Light => Color::from_rgb(0.98, 0.98, 0.99),
            Theme::Dark => Color::from_rgb(0.12, 0.13, 0.15),
        }
    }

    pub fn text(&self) -> Color {
        match self {
            Theme::Light => Color::from_rgb(0.06, 0.06, 0.08),
            Theme::Dark => Color::from_rgb(0.95, 0.95, 0.96),
        }
    }

    pub fn secondary_text(&self) -> Color {
        match self {
            Theme::Light => Color::from_rgb(0.35, 0.36, 0.42),
            Theme::Dark => Color::from_rgb(0.70, 0.72, 0.78),
        }
    }

    pub fn accent(&self) -> Color {
        match self {
            Theme::Light => Color::from_rgb(0.0, 0.40, 0.75),
            Theme::Dark => Color::from_rgb(0.30, 0.62, 0.98),
        }
    }

    pub fn danger(&self) -> Color {
        match self {
            Theme::Light => Color::from_rgb(0.80, 0.15, 0.15),
            Theme::Dark => Color::from_rgb(1.0, 0.40, 0.40),
        }
    }

    /// Tinted background behind the alert body.
    pub fn danger_surface(&self) -> Color {
        match self {
            Theme::Light => Color::from_rgb(0.99, 0.92, 0.92),
            Theme::Dark => Color::from_rgb(0.28, 0.10, 0.11),
        }
    }
}
