// SPDX-FileCopyrightText: 2026 Warden Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in key manager plugins.
//!
//! Both implementations hold a single ECDSA P-256 private key in PKCS#8
//! form. `memory` keeps it in process memory and loses it on restart;
//! `disk` persists it under a configured directory.

pub mod crypto;
pub mod disk;
pub mod memory;

pub use disk::DiskKeyManager;
pub use memory::MemoryKeyManager;
