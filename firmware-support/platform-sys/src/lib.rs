// SPDX-FileCopyrightText: 2025 Google LLC
//
// SPDX-License-Identifier: Apache-2.0

#![no_std]

pub mod stdio;
pub mod uart;

pub use stdio::Stdio;
