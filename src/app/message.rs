// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the demo application.

use crate::notifications::{ToastKind, ToastMessage};
use iced::window;
use std::path::PathBuf;

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    /// Show a plain toast of the given kind.
    Show(ToastKind),
    /// Show a toast carrying an "Undo" action.
    ShowWithAction,
    /// Show a toast that stays until closed.
    ShowIndefinite,
    /// Show the one-shot tip; only the first press has an effect.
    ShowOneShot,
    /// Dismiss every visible toast.
    ClearAll,
    /// Forwarded toast messages (close, action, tick).
    Toast(ToastMessage),
    /// The host window became known.
    WindowOpened(window::Id),
}

/// Runtime flags passed in from the CLI.
#[derive(Debug, Default)]
pub struct Flags {
    /// Explicit `settings.toml` to load instead of the default location.
    pub config_path: Option<PathBuf>,
    /// Optional data directory override (for the one-shot registry).
    /// Takes precedence over `ICED_TOAST_DATA_DIR` environment variable.
    pub data_dir: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `ICED_TOAST_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
    /// Keep one-shot ids on disk regardless of the config file.
    pub persist_one_shot: bool,
}

impl Flags {
    /// Reads the flags from parsed command-line arguments.
    ///
    /// Leftover arguments are logged and ignored.
    pub fn from_args(mut args: pico_args::Arguments) -> Result<Self, pico_args::Error> {
        let flags = Flags {
            config_path: args.opt_value_from_str::<_, PathBuf>("--config")?,
            data_dir: args.opt_value_from_str("--data-dir")?,
            config_dir: args.opt_value_from_str("--config-dir")?,
            persist_one_shot: args.contains("--persist-one-shot"),
        };

        let remaining = args.finish();
        if !remaining.is_empty() {
            tracing::warn!(?remaining, "ignoring unexpected arguments");
        }
        Ok(flags)
    }
}
