// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the demo application.

use super::Message;
use crate::config::TICK_INTERVAL_MS;
use crate::notifications::ToastMessage;
use iced::{event, time, window, Subscription};
use std::time::Duration;

/// Reports the id of the host window once it exists.
pub fn create_window_subscription() -> Subscription<Message> {
    event::listen_with(|event, _status, window_id| match event {
        event::Event::Window(window::Event::Opened { .. } | window::Event::Resized(_)) => {
            Some(Message::WindowOpened(window_id))
        }
        _ => None,
    })
}

/// Creates the periodic tick that collects fired expiry timers.
///
/// Idle when no toast is visible.
pub fn create_tick_subscription(has_notifications: bool) -> Subscription<Message> {
    if has_notifications {
        time::every(Duration::from_millis(TICK_INTERVAL_MS))
            .map(|now| Message::Toast(ToastMessage::Tick(now)))
    } else {
        Subscription::none()
    }
}
