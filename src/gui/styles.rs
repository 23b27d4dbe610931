use iced::widget::button::{Appearance as ButtonAppearance, StyleSheet as ButtonStyleSheet};
use iced::widget::container::{Appearance as ContainerAppearance, StyleSheet as ContainerStyleSheet};
use iced::widget::scrollable::{Appearance as ScrollableAppearance, StyleSheet as ScrollableStyleSheet};
use iced::widget::text_input::{Appearance as TextInputAppearance, StyleSheet as TextInputStyleSheet};
use iced::{Background, Border, Color, Shadow, Vector};

fn scale(color: Color, factor: f32) -> Color {
    Color {
        r: (color.r * factor).clamp(0.0, 1.0),
        g: (color.g * factor).clamp(0.0, 1.0),
        b: (color.b * factor).clamp(0.0, 1.0),
        a: color.a,
    }
}

fn with_alpha(color: Color, a: f32) -> Color {
    Color { a, ..color }
}

pub struct ActionButtonStyle {
    pub is_primary: bool,
    pub radius: f32,
    pub accent: Color,
    pub text_color: Color,
}

impl ButtonStyleSheet for ActionButtonStyle {
    type Style = iced::Theme;

    fn active(&self, _style: &Self::Style) -> ButtonAppearance {
        let background = if self.is_primary {
            self.accent
        } else {
            Color::from_rgba(0.55, 0.57, 0.62, 0.25)
        };

        ButtonAppearance {
            background: Some(Background::Color(background)),
            border: Border {
                radius: self.radius.into(),
                width: if self.is_primary { 0.0 } else { 1.0 },
                color: with_alpha(self.accent, 0.6),
            },
            text_color: self.text_color,
            shadow: Shadow {
                color: Color::from_rgba(0.0, 0.0, 0.0, 0.35),
                offset: Vector::new(0.0, 3.0),
                blur_radius: 8.0,
            },
            shadow_offset: Vector::default(),
        }
    }

    fn hovered(&self, style: &Self::Style) -> ButtonAppearance {
        let mut appearance = self.active(style);
        if self.is_primary {
            appearance.background = Some(Background::Color(scale(self.accent, 1.15)));
        } else {
            appearance.background = Some(Background::Color(Color::from_rgba(0.55, 0.57, 0.62, 0.4)));
            appearance.border.color = self.accent;
        }
        appearance.shadow.blur_radius = 12.0;
        appearance
    }

    fn pressed(&self, style: &Self::Style) -> ButtonAppearance {
        let mut appearance = self.active(style);
        if self.is_primary {
            appearance.background = Some(Background::Color(scale(self.accent, 0.85)));
        }
        appearance.shadow = Shadow {
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.2),
            offset: Vector::new(0.0, 1.0),
            blur_radius: 2.0,
        };
        appearance
    }

    // Buttons are disabled while a command runs
    fn disabled(&self, style: &Self::Style) -> ButtonAppearance {
        let mut appearance = self.active(style);
        appearance.background = Some(Background::Color(Color::from_rgba(0.5, 0.5, 0.5, 0.12)));
        appearance.text_color = with_alpha(self.text_color, 0.4);
        appearance.shadow = Shadow::default();
        appearance
    }
}

pub struct PanelStyle {
    pub radius: f32,
    pub background: Color,
    pub border_color: Option<Color>,
    pub elevated: bool,
}

impl ContainerStyleSheet for PanelStyle {
    type Style = iced::Theme;

    fn appearance(&self, _style: &Self::Style) -> ContainerAppearance {
        ContainerAppearance {
            background: Some(Background::Color(self.background)),
            border: Border {
                radius: self.radius.into(),
                width: if self.border_color.is_some() { 1.5 } else { 0.0 },
                color: self.border_color.unwrap_or(Color::TRANSPARENT),
            },
            shadow: if self.elevated {
                Shadow {
                    color: Color::from_rgba(0.0, 0.0, 0.0, 0.45),
                    offset: Vector::new(0.0, 6.0),
                    blur_radius: 18.0,
                }
            } else {
                Shadow::default()
            },
            text_color: None,
        }
    }
}

pub struct OutputScrollStyle {
    pub accent: Color,
    pub radius: f32,
}

impl ScrollableStyleSheet for OutputScrollStyle {
    type Style = iced::Theme;

    fn active(&self, _style: &Self::Style) -> ScrollableAppearance {
        ScrollableAppearance {
            container: ContainerAppearance::default(),
            scrollbar: iced::widget::scrollable::Scrollbar {
                background: Some(Background::Color(Color::TRANSPARENT)),
                border: Border::default(),
                scroller: iced::widget::scrollable::Scroller {
                    color: with_alpha(self.accent, 0.45),
                    border: Border {
                        radius: (self.radius * 0.5).into(),
                        width: 0.0,
                        color: Color::TRANSPARENT,
                    },
                },
            },
            gap: None,
        }
    }

    fn hovered(&self, style: &Self::Style, is_mouse_over_scrollbar: bool) -> ScrollableAppearance {
        let mut appearance = self.active(style);
        if is_mouse_over_scrollbar {
            appearance.scrollbar.scroller.color = with_alpha(self.accent, 0.7);
        }
        appearance
    }

    fn dragging(&self, style: &Self::Style) -> ScrollableAppearance {
        let mut appearance = self.active(style);
        appearance.scrollbar.scroller.color = with_alpha(self.accent, 0.9);
        appearance
    }
}

pub struct InputStyle {
    pub radius: f32,
    pub accent: Color,
    pub background: Color,
    pub text_color: Color,
}

impl TextInputStyleSheet for InputStyle {
    type Style = iced::Theme;

    fn active(&self, _style: &Self::Style) -> TextInputAppearance {
        TextInputAppearance {
            background: Background::Color(self.background),
            border: Border {
                radius: self.radius.into(),
                width: 1.0,
                color: with_alpha(self.accent, 0.6),
            },
            icon_color: self.text_color,
        }
    }

    fn focused(&self, style: &Self::Style) -> TextInputAppearance {
        let mut appearance = self.active(style);
        appearance.border.width = 2.0;
        appearance.border.color = self.accent;
        appearance
    }

    fn placeholder_color(&self, _style: &Self::Style) -> Color {
        with_alpha(self.text_color, 0.45)
    }

    fn value_color(&self, _style: &Self::Style) -> Color {
        self.text_color
    }

    fn disabled_color(&self, _style: &Self::Style) -> Color {
        with_alpha(self.text_color, 0.4)
    }

    fn selection_color(&self, _style: &Self::Style) -> Color {
        with_alpha(self.accent, 0.35)
    }

    fn disabled(&self, style: &Self::Style) -> TextInputAppearance {
        let mut appearance = self.active(style);
        appearance.background = Background::Color(with_alpha(self.background, 0.5));
        appearance
    }
}
