// SPDX-License-Identifier: MPL-2.0
//! Toast notification lifecycle.
//!
//! Toasts are short, non-blocking status messages stacked in a window
//! corner. This module owns everything except drawing them.
//!
//! # Components
//!
//! - [`toast`] - `Toast` record, `ToastRequest` builder, kinds and expiry
//! - [`manager`] - `ToastManager` for stacking, dismissal and expiry
//! - [`scheduler`] - expiry timers (polled deadlines or tokio tasks)
//! - [`registry`] - one-shot id store (in memory or on disk)
//! - [`surface`] - display root the stack is attached to
//!
//! # Usage
//!
//! ```
//! use iced_toast::notifications::{Expiry, ShowOutcome, ToastManager, ToastRequest};
//! use std::time::Duration;
//!
//! let mut manager = ToastManager::new();
//!
//! manager.success("Image saved").unwrap();
//!
//! let first = manager
//!     .show(ToastRequest::error("Sync failed").unique_id("sync-err"))
//!     .unwrap();
//! let second = manager
//!     .show(ToastRequest::error("Sync failed").unique_id("sync-err"))
//!     .unwrap();
//! assert!(matches!(first, ShowOutcome::Shown(_)));
//! assert_eq!(second, ShowOutcome::Suppressed);
//!
//! manager
//!     .show(ToastRequest::warning("Update available").expiry(Expiry::Timed(Duration::from_secs(1))))
//!     .unwrap();
//! assert_eq!(manager.visible_count(), 3);
//! ```
//!
//! # Design Considerations
//!
//! - Default expiry: 4s; `Expiry::Indefinite` waits for the close button
//! - The stack is unbounded, newest toast last
//! - Position: bottom-right corner, 10px margin by default

pub mod manager;
pub mod registry;
pub mod scheduler;
pub mod surface;
pub mod toast;

pub use manager::{Message as ToastMessage, ShowOutcome, ToastManager, ToastStatus};
pub use registry::{MemoryRegistry, OneShotRegistry, PersistentRegistry};
pub use scheduler::{DeadlineScheduler, Scheduler, TokioScheduler};
pub use surface::{Corner, DisplayRoot, HeadlessRoot, Placement, WindowRoot};
pub use toast::{Expiry, Toast, ToastAction, ToastId, ToastKind, ToastRequest};
