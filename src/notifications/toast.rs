// SPDX-License-Identifier: MPL-2.0
//! Core toast data structures.
//!
//! This module defines the `Toast` record created by the manager, the
//! `ToastRequest` builder callers use to describe one, and the small value
//! types (`ToastKind`, `Expiry`, `ToastId`) shared across the system.

use crate::config::DEFAULT_EXPIRY_MS;
use crate::error::{Error, Result};
use crate::ui::design_tokens::palette;
use iced::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};

/// Unique identifier for a toast.
///
/// Identifiers are never reused within a process, so a timer that outlives
/// its toast can never match a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

impl ToastId {
    /// Creates a new unique toast ID.
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for ToastId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "toast#{}", self.0)
    }
}

/// Kind of toast; determines the accent color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    /// Informational message (gray accent).
    #[default]
    Info,
    /// Operation completed successfully (green accent).
    Success,
    /// Warning that doesn't block operation (orange accent).
    Warning,
    /// Error requiring attention (red accent).
    Error,
}

impl ToastKind {
    /// Returns the accent color for this kind.
    #[must_use]
    pub fn accent(&self) -> Color {
        match self {
            ToastKind::Info => palette::INFO_500,
            ToastKind::Success => palette::SUCCESS_500,
            ToastKind::Warning => palette::WARNING_500,
            ToastKind::Error => palette::ERROR_500,
        }
    }
}

/// How a toast leaves the screen on its own, if at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expiry {
    /// Removed automatically once the duration has elapsed.
    Timed(Duration),
    /// Removed only when the user (or the host) dismisses it.
    Indefinite,
}

impl Expiry {
    /// Returns the auto-dismiss duration, `None` for indefinite toasts.
    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        match self {
            Expiry::Timed(duration) => Some(*duration),
            Expiry::Indefinite => None,
        }
    }
}

impl Default for Expiry {
    fn default() -> Self {
        Expiry::Timed(Duration::from_millis(DEFAULT_EXPIRY_MS))
    }
}

/// Optional action button attached to a toast.
pub struct ToastAction {
    label: String,
    callback: Option<Box<dyn FnMut()>>,
}

impl ToastAction {
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Runs the callback, if any. Returns whether a callback ran.
    fn invoke(&mut self) -> bool {
        match self.callback.as_mut() {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for ToastAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastAction")
            .field("label", &self.label)
            .field("has_callback", &self.callback.is_some())
            .finish()
    }
}

/// Description of a toast to show.
///
/// Fields left unset fall back to the manager's defaults when the request
/// is handed to [`ToastManager::show`](super::ToastManager::show).
pub struct ToastRequest {
    kind: ToastKind,
    title: String,
    detail: Option<String>,
    action_label: Option<String>,
    on_action: Option<Box<dyn FnMut()>>,
    unique_id: Option<String>,
    expiry: Option<Expiry>,
}

impl fmt::Debug for ToastRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToastRequest")
            .field("kind", &self.kind)
            .field("title", &self.title)
            .field("detail", &self.detail)
            .field("action_label", &self.action_label)
            .field("unique_id", &self.unique_id)
            .field("expiry", &self.expiry)
            .finish_non_exhaustive()
    }
}

impl ToastRequest {
    /// Creates a request with the given kind and title.
    pub fn new(kind: ToastKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            detail: None,
            action_label: None,
            on_action: None,
            unique_id: None,
            expiry: None,
        }
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self::new(ToastKind::Info, title)
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self::new(ToastKind::Success, title)
    }

    pub fn warning(title: impl Into<String>) -> Self {
        Self::new(ToastKind::Warning, title)
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(ToastKind::Error, title)
    }

    /// Sets the secondary text shown under the title.
    #[must_use]
    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Sets the primary action label and the callback run when it is activated.
    #[must_use]
    pub fn action(mut self, label: impl Into<String>, on_action: impl FnMut() + 'static) -> Self {
        self.action_label = Some(label.into());
        self.on_action = Some(Box::new(on_action));
        self
    }

    /// Sets only the action label; activating it runs nothing.
    #[must_use]
    pub fn action_label(mut self, label: impl Into<String>) -> Self {
        self.action_label = Some(label.into());
        self
    }

    /// Gates the toast so it is shown at most once per registry.
    #[must_use]
    pub fn unique_id(mut self, unique_id: impl Into<String>) -> Self {
        self.unique_id = Some(unique_id.into());
        self
    }

    /// Overrides the manager's default expiry.
    #[must_use]
    pub fn expiry(mut self, expiry: Expiry) -> Self {
        self.expiry = Some(expiry);
        self
    }

    #[must_use]
    pub fn kind(&self) -> ToastKind {
        self.kind
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    pub(crate) fn requested_unique_id(&self) -> Option<&str> {
        self.unique_id.as_deref()
    }

    /// Rejects requests whose title is empty or whitespace.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::EmptyTitle);
        }
        Ok(())
    }

    /// Builds the toast record, resolving the expiry against `default_expiry`.
    pub(crate) fn into_toast(self, default_expiry: Expiry) -> Toast {
        // A callback without a label has no control to trigger it.
        let on_action = self.on_action;
        let action = self.action_label.map(|label| ToastAction {
            label,
            callback: on_action,
        });

        Toast {
            id: ToastId::new(),
            kind: self.kind,
            title: self.title,
            detail: normalize_detail(self.detail),
            action,
            expiry: self.expiry.unwrap_or(default_expiry),
            unique_id: self.unique_id,
            created_at: Instant::now(),
        }
    }
}

/// Trims the detail text and drops it when nothing is left.
pub(crate) fn normalize_detail(detail: Option<String>) -> Option<String> {
    detail
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

/// A toast currently owned by the manager.
#[derive(Debug)]
pub struct Toast {
    id: ToastId,
    kind: ToastKind,
    title: String,
    detail: Option<String>,
    action: Option<ToastAction>,
    expiry: Expiry,
    unique_id: Option<String>,
    created_at: Instant,
}

impl Toast {
    #[must_use]
    pub fn id(&self) -> ToastId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> ToastKind {
        self.kind
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Returns the action button label, if the toast has one.
    #[must_use]
    pub fn action_label(&self) -> Option<&str> {
        self.action.as_ref().map(ToastAction::label)
    }

    #[must_use]
    pub fn expiry(&self) -> Expiry {
        self.expiry
    }

    #[must_use]
    pub fn unique_id(&self) -> Option<&str> {
        self.unique_id.as_deref()
    }

    #[must_use]
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    #[must_use]
    pub fn age(&self) -> Duration {
        self.created_at.elapsed()
    }

    /// Runs the action callback. Returns `false` when there is nothing to run.
    pub(crate) fn activate(&mut self) -> bool {
        self.action.as_mut().is_some_and(ToastAction::invoke)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn toast_ids_are_unique() {
        assert_ne!(ToastId::new(), ToastId::new());
    }

    #[test]
    fn kind_accents_are_distinct() {
        let accents = [
            ToastKind::Info.accent(),
            ToastKind::Success.accent(),
            ToastKind::Warning.accent(),
            ToastKind::Error.accent(),
        ];
        for (i, a) in accents.iter().enumerate() {
            for b in &accents[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn default_expiry_is_four_seconds() {
        assert_eq!(
            Expiry::default(),
            Expiry::Timed(Duration::from_millis(DEFAULT_EXPIRY_MS))
        );
        assert_eq!(Expiry::default().duration(), Some(Duration::from_secs(4)));
        assert_eq!(Expiry::Indefinite.duration(), None);
    }

    #[test]
    fn whitespace_only_detail_is_dropped() {
        assert_eq!(normalize_detail(Some("   ".to_string())), None);
        assert_eq!(normalize_detail(Some("\n\t".to_string())), None);
        assert_eq!(normalize_detail(None), None);
    }

    #[test]
    fn detail_is_trimmed() {
        assert_eq!(
            normalize_detail(Some("  hi  ".to_string())),
            Some("hi".to_string())
        );
    }

    #[test]
    fn empty_title_is_rejected() {
        assert!(matches!(
            ToastRequest::info("").validate(),
            Err(Error::EmptyTitle)
        ));
        assert!(matches!(
            ToastRequest::info("   ").validate(),
            Err(Error::EmptyTitle)
        ));
        assert!(ToastRequest::info("Saved").validate().is_ok());
    }

    #[test]
    fn request_falls_back_to_default_expiry() {
        let toast = ToastRequest::info("Saved").into_toast(Expiry::Indefinite);
        assert_eq!(toast.expiry(), Expiry::Indefinite);

        let toast = ToastRequest::info("Saved")
            .expiry(Expiry::Timed(Duration::from_secs(1)))
            .into_toast(Expiry::Indefinite);
        assert_eq!(toast.expiry(), Expiry::Timed(Duration::from_secs(1)));
    }

    #[test]
    fn request_constructors_set_correct_kind() {
        assert_eq!(ToastRequest::info("t").kind(), ToastKind::Info);
        assert_eq!(ToastRequest::success("t").kind(), ToastKind::Success);
        assert_eq!(ToastRequest::warning("t").kind(), ToastKind::Warning);
        assert_eq!(ToastRequest::error("t").kind(), ToastKind::Error);
    }

    #[test]
    fn action_callback_runs_on_activate() {
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let mut toast = ToastRequest::success("Done")
            .action("Undo", move || counter.set(counter.get() + 1))
            .into_toast(Expiry::Indefinite);

        assert_eq!(toast.action_label(), Some("Undo"));
        assert!(toast.activate());
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn toast_without_action_ignores_activate() {
        let mut toast = ToastRequest::info("Saved").into_toast(Expiry::Indefinite);
        assert_eq!(toast.action_label(), None);
        assert!(!toast.activate());
    }

    #[test]
    fn label_only_action_is_a_noop() {
        let mut toast = ToastRequest::info("Saved")
            .action_label("Open")
            .into_toast(Expiry::Indefinite);
        assert_eq!(toast.action_label(), Some("Open"));
        assert!(!toast.activate());
    }
}
