// SPDX-License-Identifier: MPL-2.0
//! Demo application showing the toast stack in an Iced window.
//!
//! The `App` struct owns a [`ToastManager`] built from the loaded
//! configuration, attaches it to the window once the window id is known,
//! and offers one button per kind of toast.

mod message;
mod subscription;

pub use message::{Flags, Message};

use crate::config::{self, Config};
use crate::notifications::{
    DeadlineScheduler, Expiry, MemoryRegistry, OneShotRegistry, PersistentRegistry, ToastKind,
    ToastManager, ToastRequest, WindowRoot,
};
use crate::ui::design_tokens::{spacing, typography};
use iced::widget::{button, Column, Container, Row, Stack, Text};
use iced::{window, Element, Length, Subscription, Task, Theme};
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// One-shot id of the tip toast.
pub const ONE_SHOT_TIP_ID: &str = "demo-welcome-tip";

/// Root Iced application state.
pub struct App {
    toasts: ToastManager,
    window_id: Option<window::Id>,
    /// Times the "Undo" action of a toast ran.
    undo_count: Rc<Cell<u32>>,
    /// Running number appended to demo toast titles.
    shown: u32,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("toasts", &self.toasts)
            .field("window_id", &self.window_id)
            .field("undo_count", &self.undo_count.get())
            .finish()
    }
}

pub const WINDOW_DEFAULT_HEIGHT: u32 = 480;
pub const WINDOW_DEFAULT_WIDTH: u32 = 720;
pub const MIN_WINDOW_HEIGHT: u32 = 320;
pub const MIN_WINDOW_WIDTH: u32 = 480;

/// Builds the window settings
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // iced requires an `Fn` boot function; the flags are consumed once.
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state.borrow_mut().take().unwrap_or_default();
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

/// Loads the configuration named on the command line, or the default one.
fn load_config(flags: &Flags) -> Config {
    let Some(path) = flags.config_path.as_deref() else {
        return config::load();
    };
    match config::load_from_path(path) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "failed to load config, using defaults");
            Config::default()
        }
    }
}

fn build_registry(config: &Config, flags: &Flags) -> Box<dyn OneShotRegistry> {
    if flags.persist_one_shot || config.persist_one_shot() {
        Box::new(PersistentRegistry::open())
    } else {
        Box::new(MemoryRegistry::new())
    }
}

impl App {
    /// Builds the toast manager from the configuration and `Flags`.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let config = load_config(&flags);
        let registry = build_registry(&config, &flags);
        let toasts = ToastManager::from_config(&config, DeadlineScheduler::new(), registry);
        tracing::info!(
            default_expiry = ?toasts.default_expiry(),
            placement = ?toasts.placement(),
            "toast manager ready"
        );

        let app = App {
            toasts,
            window_id: None,
            undo_count: Rc::new(Cell::new(0)),
            shown: 0,
        };
        (app, Task::none())
    }

    fn title(&self) -> String {
        match self.toasts.visible_count() {
            0 => "Iced Toast".to_string(),
            count => format!("Iced Toast ({count})"),
        }
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_window_subscription(),
            subscription::create_tick_subscription(self.toasts.has_notifications()),
        ])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::WindowOpened(id) => self.handle_window_opened(id),
            Message::Show(kind) => {
                self.shown += 1;
                let request = ToastRequest::new(kind, format!("{kind:?} toast #{}", self.shown))
                    .detail(demo_detail(kind));
                self.show(request);
            }
            Message::ShowWithAction => {
                let undo_count = Rc::clone(&self.undo_count);
                let request = ToastRequest::info("Item deleted")
                    .detail("The item was moved to the trash.")
                    .action("Undo", move || undo_count.set(undo_count.get() + 1));
                self.show(request);
            }
            Message::ShowIndefinite => {
                let request = ToastRequest::warning("Connection lost")
                    .detail("This toast stays until it is closed.")
                    .expiry(Expiry::Indefinite);
                self.show(request);
            }
            Message::ShowOneShot => {
                let request = ToastRequest::success("Tip: toasts close themselves")
                    .detail("This tip is only ever shown once.")
                    .unique_id(ONE_SHOT_TIP_ID);
                self.show(request);
            }
            Message::ClearAll => self.toasts.clear(),
            Message::Toast(toast_message) => self.toasts.handle_message(&toast_message),
        }
        Task::none()
    }

    fn handle_window_opened(&mut self, id: window::Id) {
        if self.window_id.is_some() {
            return;
        }
        self.window_id = Some(id);
        let default_expiry = self.toasts.default_expiry();
        self.toasts
            .configure(default_expiry, Some(Box::new(WindowRoot::new(Some(id)))));
        tracing::debug!(?id, "window root configured");
    }

    fn show(&mut self, request: ToastRequest) {
        match self.toasts.show(request) {
            Ok(outcome) if outcome.is_suppressed() => {
                tracing::info!("one-shot toast was already shown");
            }
            Ok(_) => {}
            Err(err) => tracing::warn!(error = %err, "toast rejected"),
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let controls = Row::new()
            .spacing(spacing::XS)
            .push(button(Text::new("Info")).on_press(Message::Show(ToastKind::Info)))
            .push(button(Text::new("Success")).on_press(Message::Show(ToastKind::Success)))
            .push(button(Text::new("Warning")).on_press(Message::Show(ToastKind::Warning)))
            .push(button(Text::new("Error")).on_press(Message::Show(ToastKind::Error)));

        let extras = Row::new()
            .spacing(spacing::XS)
            .push(button(Text::new("With action")).on_press(Message::ShowWithAction))
            .push(button(Text::new("Indefinite")).on_press(Message::ShowIndefinite))
            .push(button(Text::new("One-shot tip")).on_press(Message::ShowOneShot))
            .push(button(Text::new("Clear all")).on_press(Message::ClearAll));

        let status = Text::new(format!(
            "Visible: {}  Pending timers: {}  Undo pressed: {}",
            self.toasts.visible_count(),
            self.toasts.pending_timers(),
            self.undo_count.get()
        ))
        .size(typography::CAPTION);

        let content = Container::new(
            Column::new()
                .spacing(spacing::MD)
                .push(controls)
                .push(extras)
                .push(status),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(spacing::LG);

        let overlay = crate::ui::toast::view_overlay(&self.toasts).map(Message::Toast);

        Stack::new()
            .width(Length::Fill)
            .height(Length::Fill)
            .push(content)
            .push(overlay)
            .into()
    }
}

fn demo_detail(kind: ToastKind) -> &'static str {
    match kind {
        ToastKind::Info => "Something happened that you may want to know about.",
        ToastKind::Success => "The operation completed.",
        ToastKind::Warning => "Something might need your attention.",
        ToastKind::Error => "The operation failed.",
    }
}
