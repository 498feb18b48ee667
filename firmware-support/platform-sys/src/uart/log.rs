// SPDX-FileCopyrightText: 2025 Google LLC
//
// SPDX-License-Identifier: Apache-2.0
use platform_hal::Uart;

// The logger utilizes core::fmt to format the log messages because ufmt formatting is not
// compatible with (dependencies of) the log crate.
use core::fmt::Write;
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

/// `log` backend writing to a [`Uart`].
///
/// The logger has to outlive every log call, so firmware keeps it in a
/// `static`:
///
/// ```rust,ignore
/// static LOGGER: UartLogger =
///     UartLogger::new(unsafe { Uart::new(UART0_BASE as *const ()) });
///
/// unsafe { LOGGER.install(LevelFilter::Info).ok() };
/// ```
///
/// # Safety
/// Using this logger is only safe if there is only one thread of execution.
/// Even though `UartLogger` is `Send` and `Sync`, The underlying `Uart` is not `Send` or `Sync`.
pub struct UartLogger {
    uart: Uart,
    /// Records at or below this level are prefixed with their level.
    pub display_level: LevelFilter,
    /// Records at or below this level are prefixed with `file:line`.
    pub display_source: LevelFilter,
}

impl UartLogger {
    pub const fn new(uart: Uart) -> UartLogger {
        UartLogger {
            uart,
            display_level: LevelFilter::Trace,
            display_source: LevelFilter::Trace,
        }
    }

    pub const fn with_display_level(mut self, level: LevelFilter) -> UartLogger {
        self.display_level = level;
        self
    }

    pub const fn with_display_source(mut self, level: LevelFilter) -> UartLogger {
        self.display_source = level;
        self
    }

    /// Register this logger with the `log` crate and set the maximum level.
    ///
    /// # Safety
    /// Uses the racy `log` setters since the target has no atomics. Must be
    /// called before any other thread of execution (there should be none)
    /// touches the `log` crate.
    pub unsafe fn install(&'static self, max_level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_logger_racy(self)?;
        log::set_max_level_racy(max_level);
        Ok(())
    }
}

/// Format `record` the way [`UartLogger`] prints it.
pub fn write_record<W: Write>(
    w: &mut W,
    record: &Record,
    display_level: LevelFilter,
    display_source: LevelFilter,
) -> core::fmt::Result {
    if record.level() <= display_level {
        write!(w, "{} | ", record.level())?;
    }
    if record.level() <= display_source {
        write!(
            w,
            "{}:{} - ",
            record.file().unwrap_or("<unknown>"),
            record.line().unwrap_or(0)
        )?;
    }
    writeln!(w, "{}", record.args())
}

impl Log for UartLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let mut uart = self.uart.clone();
            let _ = write_record(&mut uart, record, self.display_level, self.display_source);
        }
    }

    fn flush(&self) {}
}

unsafe impl core::marker::Send for UartLogger {}
unsafe impl core::marker::Sync for UartLogger {}
