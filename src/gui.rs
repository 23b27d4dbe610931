use iced::{
    alignment, event, executor, window, Color,
    widget::{button, column, container, row, scrollable, text, text_input, Space},
    Application, Command, Element, Event, Length, Padding, Pixels, Settings, Subscription,
    Theme as IcedTheme,
};
use log::{debug, error, info};

use crate::command::{self, Operation};
use crate::config::Config;
use crate::error::DispatchError;
use crate::i18n::Language;
use crate::worker::{SystemRunner, TaskOutcome, Worker, WorkerState};

mod alert;
mod styles;
mod theme;

use alert::Alert;
use styles::{ActionButtonStyle, InputStyle, OutputScrollStyle, PanelStyle};
use theme::Theme as AppTheme;

pub fn run(config: Config) -> iced::Result {
    let window_settings = window::Settings {
        size: iced::Size::new(700.0, 500.0),
        min_size: Some(iced::Size::new(520.0, 360.0)),
        resizable: true,
        exit_on_close_request: false,
        ..Default::default()
    };

    let settings = Settings {
        window: window_settings,
        default_text_size: Pixels(14.0),
        antialiasing: true,
        ..Settings::with_flags(config)
    };

    info!("Starting window");
    PerchGui::run(settings)
}

#[derive(Debug, Clone)]
pub enum Message {
    InputChanged(String),
    Run(Operation),
    TaskFinished(TaskOutcome),
    DismissAlert,
    ThemeToggled,
    CloseRequested,
}

#[derive(Debug)]
pub struct PerchGui {
    tool: String,
    language: Language,
    theme: AppTheme,
    input: String,
    output: String,
    output_failed: bool,
    alert: Option<Alert>,
    worker: Option<Worker>,
    border_radius: f32,
}

impl PerchGui {
    fn with_worker(config: Config, worker: Option<Worker>) -> Self {
        let alert = if worker.is_none() {
            let (title, message) = config.language.dispatch_error(&DispatchError::WorkerStopped);
            Some(Alert::new(title, message))
        } else {
            None
        };

        Self {
            tool: config.tool,
            language: config.language,
            theme: config.theme.into(),
            input: String::new(),
            output: String::new(),
            output_failed: false,
            alert,
            worker,
            border_radius: 10.0,
        }
    }

    fn is_busy(&self) -> bool {
        self.worker
            .as_ref()
            .map_or(false, |worker| worker.state() == WorkerState::Running)
    }

    /// Validates the input, hands the command to the worker and returns the
    /// future that resolves with its outcome.
    fn dispatch(&mut self, operation: Operation) -> Result<Command<Message>, DispatchError> {
        let request = command::build(operation, &self.tool, &self.input)?;
        let worker = self.worker.as_ref().ok_or(DispatchError::WorkerStopped)?;
        if worker.state() == WorkerState::Running {
            return Err(DispatchError::Busy);
        }
        let receiver = worker.submit(request.command.clone())?;

        debug!("Dispatched {} as '{}'", operation, request.command);
        self.output = self.language.starting(&request);
        self.output_failed = false;

        let language = self.language;
        Ok(Command::perform(
            async move {
                receiver.await.unwrap_or_else(|_| {
                    let (_, message) = language.dispatch_error(&DispatchError::WorkerStopped);
                    TaskOutcome::failure(message)
                })
            },
            Message::TaskFinished,
        ))
    }

    fn finish(&mut self, outcome: TaskOutcome) {
        if outcome.succeeded {
            self.output = outcome.text;
            self.output_failed = false;
        } else {
            self.output = format!("{}\n\n{}", self.language.failure_prefix(), outcome.text);
            self.output_failed = true;
            self.alert = Some(Alert::new(self.language.failure_title(&self.tool), outcome.text));
        }
    }

    fn shutdown_worker(&mut self) {
        self.output = self.language.closing().to_string();
        self.output_failed = false;
        if let Some(mut worker) = self.worker.take() {
            worker.shutdown();
        }
    }
}

impl Application for PerchGui {
    type Message = Message;
    type Theme = IcedTheme;
    type Executor = executor::Default;
    type Flags = Config;

    fn new(config: Config) -> (PerchGui, Command<Message>) {
        let worker = match Worker::spawn(SystemRunner, config.language) {
            Ok(worker) => Some(worker),
            Err(e) => {
                error!("Could not start worker thread: {}", e);
                None
            }
        };
        (Self::with_worker(config, worker), Command::none())
    }

    fn title(&self) -> String {
        format!("{} - {}", self.language.window_title(), self.tool)
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::InputChanged(value) => {
                self.input = value;
                Command::none()
            }
            Message::Run(operation) => match self.dispatch(operation) {
                Ok(command) => command,
                Err(e) => {
                    debug!("Refused {}: {}", operation, e);
                    let (title, message) = self.language.dispatch_error(&e);
                    self.alert = Some(Alert::new(title, message));
                    Command::none()
                }
            },
            Message::TaskFinished(outcome) => {
                debug!("Task finished, succeeded: {}", outcome.succeeded);
                self.finish(outcome);
                Command::none()
            }
            Message::DismissAlert => {
                self.alert = None;
                Command::none()
            }
            Message::ThemeToggled => {
                self.theme = self.theme.toggled();
                Command::none()
            }
            Message::CloseRequested => {
                info!("Close requested, waiting for worker");
                self.shutdown_worker();
                window::close(window::Id::MAIN)
            }
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        event::listen_with(|event, _status| match event {
            Event::Window(_, window::Event::CloseRequested) => Some(Message::CloseRequested),
            _ => None,
        })
    }

    fn view(&self) -> Element<'_, Message> {
        let theme = self.theme;
        let content = match &self.alert {
            Some(alert) => alert.view(theme, self.border_radius, self.language.ok(), Message::DismissAlert),
            None => self.view_main(),
        };

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(Padding::new(16.0))
            .style(iced::theme::Container::Custom(Box::new(PanelStyle {
                radius: 0.0,
                background: theme.background(),
                border_color: None,
                elevated: false,
            })))
            .into()
    }

    fn theme(&self) -> IcedTheme {
        match self.theme {
            AppTheme::Light => IcedTheme::Light,
            AppTheme::Dark => IcedTheme::Dark,
        }
    }
}

impl PerchGui {
    fn view_main(&self) -> Element<'_, Message> {
        let theme = self.theme;
        let language = self.language;

        let header = row![
            text(language.input_label())
                .size(14)
                .style(iced::theme::Text::Color(theme.text())),
            Space::with_width(Length::Fill),
            button(text(language.theme_toggle(theme.is_dark())).size(12))
                .on_press(Message::ThemeToggled)
                .style(iced::theme::Button::Custom(Box::new(ActionButtonStyle {
                    is_primary: false,
                    radius: self.border_radius,
                    accent: theme.accent(),
                    text_color: theme.text(),
                })))
                .padding(Padding::from([4.0, 12.0])),
        ]
        .align_items(alignment::Alignment::Center);

        let input = text_input(language.input_placeholder(), &self.input)
            .on_input(Message::InputChanged)
            .on_submit(Message::Run(Operation::Search))
            .padding(Padding::new(10.0))
            .style(iced::theme::TextInput::Custom(Box::new(InputStyle {
                radius: self.border_radius,
                accent: theme.accent(),
                background: theme.input_background(),
                text_color: theme.text(),
            })));

        let buttons = column![
            row![
                self.action_button(Operation::Install, Length::FillPortion(1)),
                self.action_button(Operation::Uninstall, Length::FillPortion(1)),
                self.action_button(Operation::Search, Length::FillPortion(1)),
            ]
            .spacing(10),
            row![
                self.action_button(Operation::List, Length::FillPortion(1)),
                self.action_button(Operation::Upgrade, Length::FillPortion(2)),
            ]
            .spacing(10),
        ]
        .spacing(10);

        column![
            header,
            input,
            buttons,
            text(language.output_label())
                .size(14)
                .style(iced::theme::Text::Color(theme.secondary_text())),
            self.view_output(),
        ]
        .spacing(12)
        .into()
    }

    fn action_button(&self, operation: Operation, width: Length) -> Element<'_, Message> {
        let theme = self.theme;
        let is_primary = matches!(operation, Operation::Install | Operation::Upgrade);
        let label = text(self.language.button(operation))
            .horizontal_alignment(alignment::Horizontal::Center)
            .width(Length::Fill);

        let mut action = button(label)
            .width(width)
            .padding(Padding::new(10.0))
            .style(iced::theme::Button::Custom(Box::new(ActionButtonStyle {
                is_primary,
                radius: self.border_radius,
                accent: theme.accent(),
                text_color: if is_primary { Color::WHITE } else { theme.text() },
            })));
        if !self.is_busy() {
            action = action.on_press(Message::Run(operation));
        }
        action.into()
    }

    fn view_output(&self) -> Element<'_, Message> {
        let theme = self.theme;
        container(
            scrollable(
                text(&self.output)
                    .size(13)
                    .font(iced::Font::MONOSPACE)
                    .style(iced::theme::Text::Color(if self.output_failed {
                        theme.danger()
                    } else {
                        theme.text()
                    })),
            )
            .width(Length::Fill)
            .height(Length::Fill)
            .style(iced::theme::Scrollable::Custom(Box::new(OutputScrollStyle {
                accent: theme.accent(),
                radius: self.border_radius,
            }))),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(Padding::new(12.0))
        .style(iced::theme::Container::Custom(Box::new(PanelStyle {
            radius: self.border_radius,
            background: theme.surface(),
            border_color: None,
            elevated: true,
        })))
        .into()
    }
}
