use super::messages::Message;
use super::state::{App, Failure, Status};
use iced::Task;
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};
use std::path::PathBuf;
use tracing::{info, warn};

/// Describes work that must be performed outside the pure reducer.
#[derive(Debug, PartialEq)]
pub(super) enum Effect {
    PickEpub,
    Extract(PathBuf),
    Notify {
        level: Notice,
        title: &'static str,
        body: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Notice {
    Info,
    Error,
}

impl App {
    pub fn update(&mut self, message: Message) -> Task<Message> {
        let effects = self.reduce(message);
        if effects.is_empty() {
            Task::none()
        } else {
            Task::batch(effects.into_iter().map(|effect| self.run_effect(effect)))
        }
    }

    pub(super) fn reduce(&mut self, message: Message) -> Vec<Effect> {
        let mut effects = Vec::new();

        match message {
            Message::SelectEpub => effects.push(Effect::PickEpub),
            Message::EpubChosen(path) => {
                self.last_input = Some(path.clone());
                effects.push(Effect::Extract(path));
            }
            Message::FormatSelected(format) => {
                self.config.output.set_format(format);
                info!(format = ?format, path = %self.config.output.path, "Output format changed");
            }
            Message::ExtractionFinished(outcome) => {
                self.status = Status::from_outcome(outcome);
                match &self.status {
                    Status::Done(_) => effects.push(Effect::Notify {
                        level: Notice::Info,
                        title: "Extraction complete",
                        body: self.status.label(),
                    }),
                    Status::Failed(failure) => effects.push(Effect::Notify {
                        level: Notice::Error,
                        title: "Extraction failed",
                        body: format!("{}: {}", failure.kind, failure.message),
                    }),
                    Status::Idle => {}
                }
            }
        }

        effects
    }

    fn run_effect(&mut self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::PickEpub => {
                let picked = FileDialog::new()
                    .set_title("Select EPUB")
                    .add_filter("EPUB files", &["epub"])
                    .pick_file();
                match picked {
                    Some(path) => Task::done(Message::EpubChosen(path)),
                    None => {
                        info!("File selection cancelled");
                        Task::none()
                    }
                }
            }
            Effect::Extract(path) => {
                let outcome = vym_core::run(&path, &self.config).map_err(|err| {
                    warn!(input = %path.display(), "Extraction failed: {err}");
                    Failure::from(err)
                });
                Task::done(Message::ExtractionFinished(outcome))
            }
            Effect::Notify { level, title, body } => {
                MessageDialog::new()
                    .set_level(match level {
                        Notice::Info => MessageLevel::Info,
                        Notice::Error => MessageLevel::Error,
                    })
                    .set_title(title)
                    .set_description(body)
                    .set_buttons(MessageButtons::Ok)
                    .show();
                Task::none()
            }
        }
    }
}
