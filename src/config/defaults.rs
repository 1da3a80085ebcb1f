// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.

// ==========================================================================
// Expiry Defaults
// ==========================================================================

/// Default lifetime of a timed toast (in milliseconds).
pub const DEFAULT_EXPIRY_MS: u64 = 4_000;

/// Shortest accepted timed expiry (in milliseconds). Shorter values are clamped.
pub const MIN_EXPIRY_MS: u64 = 100;

// ==========================================================================
// Placement Defaults
// ==========================================================================

/// Largest accepted margin between the stack and the window edge.
pub const MAX_MARGIN: f32 = 200.0;

// ==========================================================================
// Tick Defaults
// ==========================================================================

/// Interval of the host tick that collects fired expiry timers (in milliseconds).
pub const TICK_INTERVAL_MS: u64 = 100;
