/// ICED GUI shell for the clock overlay
///
/// Translates pointer, window and tray events into overlay transitions and
/// turns the resulting effects into window commands.
pub mod styles;

use crate::config::ConfigError;
use crate::geometry::Position;
use crate::layout::PADDING;
use crate::overlay::{Action, Effect, Overlay};
use crate::tray::TrayManager;
use chrono::Local;
use iced::widget::{Container, Text};
use iced::{
    alignment, event, executor, mouse, theme, window, Application, Color, Command, Element,
    Event, Font, Length, Point, Settings, Size, Subscription, Theme,
};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

const TRAY_POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone)]
pub enum Message {
    /// Refresh timer fired
    Tick,
    /// Check the tray menu channel
    PollTray,
    /// Pointer and window events from the platform
    Native(Event),
}

/// Outcome of the exit save, read back once the event loop returns
type ExitSlot = Arc<Mutex<Option<ConfigError>>>;

pub struct Flags {
    overlay: Overlay,
    exit: ExitSlot,
}

pub struct ClockApp {
    overlay: Overlay,
    tray: Option<TrayManager>,
    font: Font,
    cursor: Position,
    exit: ExitSlot,
}

impl ClockApp {
    fn dispatch(&mut self, action: Action) -> Command<Message> {
        let effects = self.overlay.dispatch(action);
        if action == Action::Exit {
            *self.exit.lock() = self.overlay.take_exit_error();
        }
        self.sync_tray();
        apply(effects)
    }

    fn handle_event(&mut self, event: Event) -> Command<Message> {
        match event {
            Event::Mouse(mouse::Event::CursorMoved { position }) => {
                self.cursor = Position::new(position.x.round() as i32, position.y.round() as i32);
                apply(self.overlay.pointer_moved(self.cursor))
            }

            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                let effects = self.overlay.pointer_pressed(self.cursor, Instant::now());
                self.sync_tray();
                apply(effects)
            }

            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                self.overlay.pointer_released();
                Command::none()
            }

            Event::Window(_, window::Event::Moved { x, y }) => {
                self.overlay.window_moved(Position::new(x, y));
                Command::none()
            }

            Event::Window(_, window::Event::CloseRequested) => self.dispatch(Action::Exit),

            _ => Command::none(),
        }
    }

    fn sync_tray(&self) {
        if let Some(ref tray) = self.tray {
            tray.set_status(self.overlay.is_locked(), self.overlay.is_exam_mode());
        }
    }
}

/// Map overlay effects onto window commands
fn apply(effects: Vec<Effect>) -> Command<Message> {
    Command::batch(effects.into_iter().map(|effect| match effect {
        Effect::Move(p) => window::move_to(window::Id::MAIN, Point::new(p.x as f32, p.y as f32)),
        Effect::Resize(d) => window::resize(
            window::Id::MAIN,
            Size::new(d.width as f32, d.height as f32),
        ),
        Effect::Close => window::close(window::Id::MAIN),
    }))
}

impl Application for ClockApp {
    type Executor = executor::Default;
    type Message = Message;
    type Theme = Theme;
    type Flags = Flags;

    fn new(Flags { overlay, exit }: Flags) -> (Self, Command<Message>) {
        let tray = match TrayManager::new(overlay.is_locked()) {
            Ok(tray) => Some(tray),
            Err(e) => {
                tracing::warn!("Running without tray icon: {}", e);
                None
            }
        };

        // iced fonts are looked up by 'static name; the family is fixed for the session
        let family: &'static str = Box::leak(overlay.config().font.family.clone().into_boxed_str());
        let command = apply(overlay.initial_effects());

        let app = ClockApp {
            overlay,
            tray,
            font: Font::with_name(family),
            cursor: Position::ORIGIN,
            exit,
        };
        (app, command)
    }

    fn title(&self) -> String {
        String::from("Wosea Clock")
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::Tick => apply(self.overlay.tick(&Local::now())),

            Message::PollTray => {
                let Some(action) = self.tray.as_ref().and_then(TrayManager::poll) else {
                    return Command::none();
                };
                tracing::info!("Tray action: {:?}", action);
                self.dispatch(action)
            }

            Message::Native(event) => self.handle_event(event),
        }
    }

    fn view(&self) -> Element<Message> {
        let config = self.overlay.config();
        let opacity = config.window.opacity as f32;
        let [r, g, b] = config.font.color.rgb();

        let label = Text::new(self.overlay.text())
            .size(config.font.size as f32)
            .font(self.font)
            .style(Color::from_rgba8(r, g, b, opacity))
            .horizontal_alignment(alignment::Horizontal::Center);

        Container::new(label)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(PADDING as u16)
            .center_x()
            .center_y()
            .style(styles::backdrop(opacity))
            .into()
    }

    fn style(&self) -> theme::Application {
        styles::transparent()
    }

    fn subscription(&self) -> Subscription<Message> {
        let frequency = Duration::from_millis(self.overlay.config().timer.frequency);

        Subscription::batch([
            iced::time::every(frequency).map(|_| Message::Tick),
            iced::time::every(TRAY_POLL_INTERVAL).map(|_| Message::PollTray),
            event::listen().map(Message::Native),
        ])
    }
}

/// Open the overlay window and run until Exit. Fails if the window
/// can't be created or the configuration couldn't be saved on exit.
pub fn run(overlay: Overlay) -> anyhow::Result<()> {
    let size = overlay.size();
    let position = overlay.position();
    let exit = ExitSlot::default();

    let mut settings = Settings::with_flags(Flags {
        overlay,
        exit: Arc::clone(&exit),
    });
    settings.window = window::Settings {
        size: Size::new(size.width as f32, size.height as f32),
        position: window::Position::Specific(Point::new(position.x as f32, position.y as f32)),
        resizable: false,
        decorations: false,
        transparent: true,
        level: window::Level::AlwaysOnTop,
        exit_on_close_request: false,
        ..Default::default()
    };

    ClockApp::run(settings)?;

    let outcome = exit.lock().take();
    match outcome {
        Some(e) => Err(anyhow::Error::new(e).context("Failed to save config on exit")),
        None => Ok(()),
    }
}
