// SPDX-FileCopyrightText: 2025 Google LLC
//
// SPDX-License-Identifier: Apache-2.0

#![no_std]

pub mod serial;
pub mod soc;
pub mod uart;

pub use serial::SerialDevice;
pub use soc::DeviceInstances;
pub use uart::Uart;
