#![no_std]
#![cfg_attr(not(test), no_main)]
// SPDX-FileCopyrightText: 2025 Google LLC
//
// SPDX-License-Identifier: Apache-2.0

//! Prints a greeting by poking the UART registers directly, without going
//! through the driver.

use core::ptr::{addr_of, addr_of_mut};

use platform_hal::soc::{DeviceInstances, UART0_BASE};
use platform_hal::uart::UartRegisters;
use ufmt::uwriteln;

#[cfg(not(test))]
use riscv_rt::entry;

const INSTANCES: DeviceInstances = unsafe { DeviceInstances::new() };

const UART0: *mut UartRegisters = UART0_BASE as *mut UartRegisters;

const HELLO: &str = "Hello, World!\n";

#[cfg_attr(not(test), entry)]
fn main() -> ! {
    for b in HELLO.bytes() {
        // bit 0 of TX_FULL
        while unsafe { addr_of!((*UART0).tx_full).read_volatile() } & 1 != 0 {}
        unsafe { addr_of_mut!((*UART0).tx_data).write_volatile(u32::from(b)) };
    }

    loop {
        continue;
    }
}

#[panic_handler]
fn panic_handler(info: &core::panic::PanicInfo) -> ! {
    let mut uart = INSTANCES.uart0;
    match info.location() {
        Some(loc) => {
            uwriteln!(uart, "A panic happened {}:{}", loc.file(), loc.line()).ok();
        }
        None => {
            uwriteln!(uart, "A panic without location information happened").ok();
        }
    }
    loop {
        continue;
    }
}
