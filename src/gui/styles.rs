/// Styles for the frameless overlay window
use iced::widget::container;
use iced::{application, theme, Background, Color, Theme};

/// Window backdrop that fades with the configured opacity
struct Backdrop {
    opacity: f32,
}

impl container::StyleSheet for Backdrop {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            background: Some(Background::Color(Color {
                a: self.opacity,
                ..Color::WHITE
            })),
            ..Default::default()
        }
    }
}

pub fn backdrop(opacity: f32) -> theme::Container {
    theme::Container::Custom(Box::new(Backdrop { opacity }))
}

/// Clears the window to transparent so only the backdrop shows
struct Transparent;

impl application::StyleSheet for Transparent {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> application::Appearance {
        application::Appearance {
            background_color: Color::TRANSPARENT,
            text_color: Color::BLACK,
        }
    }
}

pub fn transparent() -> theme::Application {
    theme::Application::Custom(Box::new(Transparent))
}
