// SPDX-License-Identifier: MPL-2.0
//! Iced rendering of the toast stack.

pub mod design_tokens;
pub mod toast;
