use super::messages::Message;
use super::state::{App, Status};
use iced::widget::{button, column, container, pick_list, row, text};
use iced::{Element, Length};
use vym_core::config::OutputFormat;

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        let format_picker = pick_list(
            &OutputFormat::ALL[..],
            Some(self.config.output.format),
            Message::FormatSelected,
        );

        let controls = row![
            button("Select EPUB").on_press(Message::SelectEpub),
            text("Format:"),
            format_picker,
        ]
        .spacing(12)
        .align_y(iced::alignment::Vertical::Center);

        let input_line = match &self.last_input {
            Some(path) => text(format!("Input: {}", path.display())),
            None => text("Input: none"),
        };

        let status_line = match &self.status {
            Status::Failed(_) => text(self.status.label()).color([0.7, 0.1, 0.1]),
            _ => text(self.status.label()),
        };

        let content = column![
            text("Weekly meeting program extractor").size(22),
            controls,
            input_line.size(14),
            text(format!("Output: {}", self.config.output.path)).size(14),
            status_line.size(14),
        ]
        .spacing(14)
        .padding(20);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}
