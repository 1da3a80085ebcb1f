// SPDX-License-Identifier: MPL-2.0
//! `iced_toast` shows transient status messages ("toasts") stacked in a
//! corner of an Iced window.
//!
//! The [`notifications`] module owns the toast lifecycle: showing, stacking,
//! timed expiry, dismissal and one-shot de-duplication. The [`ui`] module
//! renders the stack with Iced widgets, and [`app`] is a small demo
//! application wiring both together.

#![doc(html_root_url = "https://docs.rs/iced_toast/0.1.0")]

pub mod app;
pub mod config;
pub mod error;
pub mod notifications;
pub mod paths;
pub mod ui;
