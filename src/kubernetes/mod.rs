// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Watch-maintained object caches and read access to them.

pub mod informers;
pub mod lister;

pub use informers::Informers;
pub use lister::Lister;
