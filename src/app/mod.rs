mod messages;
mod state;
mod update;
mod view;

pub use state::App;

use iced::{Size, Theme, window};
use vym_core::config::AppConfig;

/// Open the picker window with the loaded configuration.
pub fn run_app(config: AppConfig) -> iced::Result {
    let window_settings = window::Settings {
        size: Size::new(520.0, 260.0),
        resizable: false,
        ..window::Settings::default()
    };

    iced::application("VyM Extractor", App::update, App::view)
        .window(window_settings)
        .theme(|_: &App| Theme::Light)
        .run_with(move || (App::new(config), iced::Task::none()))
}
