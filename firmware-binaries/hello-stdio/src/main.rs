#![no_std]
#![cfg_attr(not(test), no_main)]
// SPDX-FileCopyrightText: 2025 Google LLC
//
// SPDX-License-Identifier: Apache-2.0

use log::LevelFilter;
use platform_hal::soc::{DeviceInstances, UART0_BASE};
use platform_hal::Uart;
use platform_sys::uart::log::UartLogger;
use platform_sys::Stdio;
use ufmt::uwriteln;

#[cfg(not(test))]
use riscv_rt::entry;

const INSTANCES: DeviceInstances = unsafe { DeviceInstances::new() };

static LOGGER: UartLogger = UartLogger::new(unsafe { Uart::new(UART0_BASE as *const ()) })
    .with_display_source(LevelFilter::Debug);

#[cfg_attr(not(test), entry)]
fn main() -> ! {
    let soc = INSTANCES;
    let uart = soc.stdout_uart();
    uart.init();

    unsafe {
        LOGGER.install(LevelFilter::Info).ok();
    }

    let mut stdio = Stdio::new(uart);
    stdio.puts("Hello, World!\n");

    log::info!("greeting sent");

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
