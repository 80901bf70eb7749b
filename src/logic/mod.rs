// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Business logic: the record registry, acceptance checks, and the
//! downloadable artifact.

pub mod artifact;
pub mod registry;
pub mod validate;
