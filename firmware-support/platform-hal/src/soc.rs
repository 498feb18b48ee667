// SPDX-FileCopyrightText: 2025 Google LLC
//
// SPDX-License-Identifier: Apache-2.0

use crate::uart::Uart;

/// Physical base address of the only UART on the SoC.
pub const UART0_BASE: usize = 0x0100_0000;

/// Handles to every peripheral on the SoC.
pub struct DeviceInstances {
    pub uart0: Uart,
}

impl DeviceInstances {
    /// # Safety
    ///
    /// Must only be used on the SoC this memory map describes; every handle
    /// points at a fixed physical address.
    pub const unsafe fn new() -> DeviceInstances {
        DeviceInstances {
            uart0: Uart::new(UART0_BASE as *const ()),
        }
    }

    /// The UART wired up as the console.
    pub fn stdout_uart(&self) -> &Uart {
        &self.uart0
    }
}
