// SPDX-License-Identifier: MPL-2.0
//! Display root abstraction.
//!
//! The manager never draws anything itself. It asks a [`DisplayRoot`] to
//! host the stack container once, then forwards insertions and removals.
//! Retained-mode hosts mirror those calls into their view tree; Elm-style
//! hosts such as iced only need to report whether a window is present and
//! render straight from [`ToastManager::visible`](super::ToastManager::visible).

use super::toast::{Toast, ToastId};
use serde::{Deserialize, Serialize};

/// Default distance between the stack and the window edges, in logical pixels.
pub const DEFAULT_MARGIN: f32 = 10.0;

/// Window corner the stack is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
}

impl Corner {
    #[must_use]
    pub fn is_top(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::TopRight)
    }

    #[must_use]
    pub fn is_left(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::BottomLeft)
    }
}

/// Where the stack container sits inside the display root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub corner: Corner,
    pub margin: f32,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            corner: Corner::default(),
            margin: DEFAULT_MARGIN,
        }
    }
}

/// The host window's content area.
pub trait DisplayRoot {
    /// Attaches the stack container at `placement`.
    ///
    /// Returns `false` when no host window is available; the manager keeps
    /// the toast logically visible and retries on the next `show`.
    fn attach(&mut self, placement: Placement) -> bool;

    /// Appends a toast at the growing end of the stack.
    fn insert(&mut self, _toast: &Toast) {}

    /// Removes a toast's visible representation.
    fn remove(&mut self, _id: ToastId) {}
}

/// Display root for processes without any window. Never attaches.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadlessRoot;

impl DisplayRoot for HeadlessRoot {
    fn attach(&mut self, _placement: Placement) -> bool {
        false
    }
}

/// Display root backed by an iced window.
///
/// iced rebuilds the view from application state on every frame, so only
/// window presence matters here.
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowRoot {
    window: Option<iced::window::Id>,
}

impl WindowRoot {
    #[must_use]
    pub fn new(window: Option<iced::window::Id>) -> Self {
        Self { window }
    }

    #[must_use]
    pub fn window(&self) -> Option<iced::window::Id> {
        self.window
    }
}

impl DisplayRoot for WindowRoot {
    fn attach(&mut self, placement: Placement) -> bool {
        match self.window {
            Some(id) => {
                tracing::debug!(window = ?id, ?placement, "toast stack attached");
                true
            }
            None => false,
        }
    }
}
