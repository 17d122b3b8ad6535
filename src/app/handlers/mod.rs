// SPDX-License-Identifier: GPL-3.0-only

//! Message handler modules
//!
//! Handlers are grouped by functional domain, keeping related
//! functionality together.

pub mod capture;
pub mod gallery;
pub mod permissions;
pub mod ui;
