// SPDX-License-Identifier: MPL-2.0
//! Toast lifecycle management.
//!
//! The `ToastManager` owns the ordered stack of visible toasts, arms and
//! cancels their expiry timers, gates one-shot toasts through the registry,
//! and attaches the stack to the host's display root on first use.

use super::registry::{MemoryRegistry, OneShotRegistry};
use super::scheduler::{DeadlineScheduler, Scheduler};
use super::surface::{DisplayRoot, Placement};
use super::toast::{Expiry, Toast, ToastId, ToastKind, ToastRequest};
use crate::config::Config;
use crate::error::Result;
use std::fmt;
use std::time::Instant;

/// Messages for toast state changes.
#[derive(Debug, Clone)]
pub enum Message {
    /// The user closed a toast.
    Dismiss(ToastId),
    /// The user activated a toast's action button.
    Action(ToastId),
    /// Periodic tick for collecting fired expiry timers.
    Tick(Instant),
}

/// Result of [`ToastManager::show`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowOutcome {
    /// A toast was created and is now visible.
    Shown(ToastId),
    /// The toast's `unique_id` was already used; nothing happened.
    Suppressed,
}

impl ShowOutcome {
    /// Returns the handle of the created toast.
    #[must_use]
    pub fn id(self) -> Option<ToastId> {
        match self {
            ShowOutcome::Shown(id) => Some(id),
            ShowOutcome::Suppressed => None,
        }
    }

    #[must_use]
    pub fn is_suppressed(self) -> bool {
        matches!(self, ShowOutcome::Suppressed)
    }
}

/// Lifecycle state of a toast handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastStatus {
    Visible,
    Dismissed,
}

/// Owns the toast stack and everything needed to show and expire toasts.
pub struct ToastManager<S: Scheduler = DeadlineScheduler> {
    /// Visible toasts, oldest first.
    stack: Vec<Toast>,
    registry: Box<dyn OneShotRegistry>,
    default_expiry: Expiry,
    root: Option<Box<dyn DisplayRoot>>,
    placement: Placement,
    surface_attached: bool,
    scheduler: S,
}

impl Default for ToastManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ToastManager {
    /// Creates a manager with an in-memory registry, a polled scheduler,
    /// the default expiry and no display root.
    #[must_use]
    pub fn new() -> Self {
        Self::with_parts(DeadlineScheduler::new(), Box::new(MemoryRegistry::new()))
    }
}

impl<S: Scheduler> ToastManager<S> {
    /// Creates a manager from explicit collaborators.
    pub fn with_parts(scheduler: S, registry: Box<dyn OneShotRegistry>) -> Self {
        Self {
            stack: Vec::new(),
            registry,
            default_expiry: Expiry::default(),
            root: None,
            placement: Placement::default(),
            surface_attached: false,
            scheduler,
        }
    }

    /// Creates a manager whose defaults come from the loaded configuration.
    pub fn from_config(config: &Config, scheduler: S, registry: Box<dyn OneShotRegistry>) -> Self {
        let mut manager = Self::with_parts(scheduler, registry);
        manager.default_expiry = config.default_expiry();
        manager.placement = config.placement();
        manager
    }

    /// Sets the process-wide default expiry and the display root.
    ///
    /// A new root is attached lazily on the next `show`, at which point the
    /// toasts already on the stack are replayed into it.
    pub fn configure(&mut self, default_expiry: Expiry, root: Option<Box<dyn DisplayRoot>>) {
        self.default_expiry = default_expiry;
        self.root = root;
        self.surface_attached = false;
    }

    /// Changes where the stack is anchored. Takes effect on the next attach.
    pub fn set_placement(&mut self, placement: Placement) {
        self.placement = placement;
    }

    /// Shows a toast.
    ///
    /// Returns [`ShowOutcome::Suppressed`] without side effects when the
    /// request's `unique_id` was already used. The id is reserved before the
    /// toast is inserted, so it stays reserved even after dismissal.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyTitle`](crate::error::Error::EmptyTitle) when the
    /// title is empty or whitespace.
    pub fn show(&mut self, request: ToastRequest) -> Result<ShowOutcome> {
        request.validate()?;

        if let Some(unique_id) = request.requested_unique_id() {
            if !self.registry.mark_seen(unique_id) {
                tracing::debug!(unique_id, "one-shot toast already shown, suppressing");
                return Ok(ShowOutcome::Suppressed);
            }
        }

        let toast = request.into_toast(self.default_expiry);
        let id = toast.id();
        log_shown(&toast);

        self.ensure_attached();
        if self.surface_attached {
            if let Some(root) = self.root.as_mut() {
                root.insert(&toast);
            }
        }

        if let Expiry::Timed(after) = toast.expiry() {
            self.scheduler.schedule(id, after);
        }
        self.stack.push(toast);

        Ok(ShowOutcome::Shown(id))
    }

    pub fn info(&mut self, title: impl Into<String>) -> Result<ShowOutcome> {
        self.show(ToastRequest::new(ToastKind::Info, title))
    }

    pub fn success(&mut self, title: impl Into<String>) -> Result<ShowOutcome> {
        self.show(ToastRequest::new(ToastKind::Success, title))
    }

    pub fn warning(&mut self, title: impl Into<String>) -> Result<ShowOutcome> {
        self.show(ToastRequest::new(ToastKind::Warning, title))
    }

    pub fn error(&mut self, title: impl Into<String>) -> Result<ShowOutcome> {
        self.show(ToastRequest::new(ToastKind::Error, title))
    }

    /// Dismisses a toast by its ID.
    ///
    /// Cancels its timer and drops its action callback. Returns `true` if
    /// the toast was visible; dismissing again is a no-op.
    pub fn dismiss(&mut self, id: ToastId) -> bool {
        let Some(pos) = self.stack.iter().position(|toast| toast.id() == id) else {
            return false;
        };

        let toast = self.stack.remove(pos);
        self.scheduler.cancel(id);
        if self.surface_attached {
            if let Some(root) = self.root.as_mut() {
                root.remove(id);
            }
        }
        tracing::debug!(%id, title = toast.title(), "toast dismissed");
        true
    }

    /// Runs the action callback of a visible toast. The toast stays visible.
    ///
    /// Returns `false` when the toast is gone or has no callback.
    pub fn activate_action(&mut self, id: ToastId) -> bool {
        match self.stack.iter_mut().find(|toast| toast.id() == id) {
            Some(toast) => toast.activate(),
            None => false,
        }
    }

    /// Handles a fired expiry timer.
    ///
    /// Only dismisses the toast if it is still visible.
    pub fn expire(&mut self, id: ToastId) {
        if self.dismiss(id) {
            tracing::debug!(%id, "toast expired");
        }
    }

    /// Expires every toast whose timer fired at or before `now`.
    pub fn tick(&mut self, now: Instant) {
        for id in self.scheduler.take_due(now) {
            self.expire(id);
        }
    }

    /// Handles a toast message.
    pub fn handle_message(&mut self, message: &Message) {
        match message {
            Message::Dismiss(id) => {
                self.dismiss(*id);
            }
            Message::Action(id) => {
                self.activate_action(*id);
            }
            Message::Tick(now) => {
                self.tick(*now);
            }
        }
    }

    /// Dismisses every visible toast. One-shot ids stay reserved.
    pub fn clear(&mut self) {
        let ids: Vec<ToastId> = self.stack.iter().map(Toast::id).collect();
        for id in ids {
            self.dismiss(id);
        }
    }

    /// Returns the visible toasts in display order (oldest first).
    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        self.stack.iter()
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.stack.len()
    }

    #[must_use]
    pub fn has_notifications(&self) -> bool {
        !self.stack.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: ToastId) -> Option<&Toast> {
        self.stack.iter().find(|toast| toast.id() == id)
    }

    /// Returns the lifecycle state of a handle.
    ///
    /// Handles not on the stack are reported as dismissed.
    #[must_use]
    pub fn status(&self, id: ToastId) -> ToastStatus {
        if self.get(id).is_some() {
            ToastStatus::Visible
        } else {
            ToastStatus::Dismissed
        }
    }

    /// Returns whether a one-shot id has already been used.
    #[must_use]
    pub fn has_shown(&self, unique_id: &str) -> bool {
        self.registry.contains(unique_id)
    }

    #[must_use]
    pub fn is_surface_attached(&self) -> bool {
        self.surface_attached
    }

    #[must_use]
    pub fn default_expiry(&self) -> Expiry {
        self.default_expiry
    }

    #[must_use]
    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Number of armed expiry timers.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }

    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Attaches the stack to the root if that has not happened yet.
    fn ensure_attached(&mut self) {
        if self.surface_attached {
            return;
        }
        let Some(root) = self.root.as_mut() else {
            return;
        };
        if !root.attach(self.placement) {
            tracing::trace!("no host window, toast stays off-screen");
            return;
        }

        // Toasts shown while detached become visible now.
        for toast in &self.stack {
            root.insert(toast);
        }
        self.surface_attached = true;
    }
}

fn log_shown(toast: &Toast) {
    let id = toast.id();
    match toast.kind() {
        ToastKind::Warning => {
            tracing::warn!(%id, title = toast.title(), detail = ?toast.detail(), "warning toast shown");
        }
        ToastKind::Error => {
            tracing::error!(%id, title = toast.title(), detail = ?toast.detail(), "error toast shown");
        }
        ToastKind::Info | ToastKind::Success => {
            tracing::debug!(%id, kind = ?toast.kind(), title = toast.title(), "toast shown");
        }
    }
}

impl<S: Scheduler + fmt::Debug> fmt::Debug for ToastManager<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastManager")
            .field("stack", &self.stack)
            .field("default_expiry", &self.default_expiry)
            .field("placement", &self.placement)
            .field("surface_attached", &self.surface_attached)
            .field("scheduler", &self.scheduler)
            .finish_non_exhaustive()
    }
}
