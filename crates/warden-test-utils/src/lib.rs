// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Warden catalog tests.
//!
//! Provides a mock plugin that implements every capability trait and records
//! its lifecycle calls, so tests can assert on instantiation, configuration
//! and shutdown without real plugins.
//!
//! # Components
//!
//! - [`MockPlugin`] - configurable plugin with failure injection
//! - [`CallLog`] - shared, ordered record of lifecycle events

pub mod mock_plugin;

pub use mock_plugin::{CallLog, LifecycleEvent, MockPlugin};
