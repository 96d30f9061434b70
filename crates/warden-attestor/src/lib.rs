// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in attestor plugins.
//!
//! - [`JoinTokenAttestor`] proves node identity with a pre-shared token.
//! - [`UnixAttestor`] describes a workload process by its user and group.

pub mod join_token;
pub mod unix;

pub use join_token::JoinTokenAttestor;
pub use unix::UnixAttestor;
