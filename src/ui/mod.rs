// SPDX-License-Identifier: MPL-2.0
//! Presentation-side modules: snackbar queue, presenter and color checks.

pub mod color;
pub mod notifications;
