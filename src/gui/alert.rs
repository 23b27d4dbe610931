use iced::{
    alignment, Color,
    widget::{button, column, container, row, scrollable, text, Space},
    Element, Length, Padding,
};

use crate::gui::styles::{ActionButtonStyle, OutputScrollStyle, PanelStyle};
use crate::gui::theme::Theme as AppTheme;

/// A blocking message shown over the main window until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn view<'a, Message: Clone + 'a>(
        &'a self,
        theme: AppTheme,
        radius: f32,
        ok_label: &'a str,
        on_dismiss: Message,
    ) -> Element<'a, Message> {
        let card = container(
            column![
                text(&self.title)
                    .size(20)
                    .style(iced::theme::Text::Color(theme.danger())),
                container(
                    scrollable(
                        text(&self.message)
                            .size(13)
                            .font(iced::Font::MONOSPACE)
                            .style(iced::theme::Text::Color(theme.text())),
                    )
                    .style(iced::theme::Scrollable::Custom(Box::new(OutputScrollStyle {
                        accent: theme.accent(),
                        radius,
                    })))
                    .height(Length::Shrink),
                )
                .max_height(260.0)
                .width(Length::Fill)
                .padding(Padding::new(12.0))
                .style(iced::theme::Container::Custom(Box::new(PanelStyle {
                    radius,
                    background: theme.danger_surface(),
                    border_color: None,
                    elevated: false,
                }))),
                row![
                    Space::with_width(Length::Fill),
                    button(text(ok_label))
                        .on_press(on_dismiss)
                        .style(iced::theme::Button::Custom(Box::new(ActionButtonStyle {
                            is_primary: true,
                            radius,
                            accent: theme.accent(),
                            text_color: Color::WHITE,
                        })))
                        .padding(Padding::from([8.0, 24.0])),
                ]
                .align_items(alignment::Alignment::Center),
            ]
            .spacing(16)
            .padding(Padding::new(24.0)),
        )
        .max_width(560.0)
        .style(iced::theme::Container::Custom(Box::new(PanelStyle {
            radius,
            background: theme.surface(),
            border_color: Some(theme.danger()),
            elevated: true,
        })));

        container(card)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x()
            .center_y()
            .into()
    }
}
