// SPDX-FileCopyrightText: 2025 Google LLC
//
// SPDX-License-Identifier: Apache-2.0
/*! Simple UART TX/RX peripheral.

Register map, all registers 32 bits wide:

| offset | name       | access | description                 |
| ------ | ---------- | ------ | --------------------------- |
| `0x00` | `RX_VALID` | RO     | bit 0: receive data valid   |
| `0x04` | `RX_DATA`  | RO     | received byte (bits 7:0)    |
| `0x08` | `TX_FULL`  | RO     | bit 0: transmit buffer full |
| `0x0C` | `TX_DATA`  | RW     | byte to transmit            |
*/

use core::convert::Infallible;
use core::ptr::{addr_of, addr_of_mut};

use crate::serial::SerialDevice;

pub const RX_VALID_OFFSET: usize = 0x00;
pub const RX_DATA_OFFSET: usize = 0x04;
pub const TX_FULL_OFFSET: usize = 0x08;
pub const TX_DATA_OFFSET: usize = 0x0C;

const FLAG_MASK: u32 = 0b1;
const DATA_MASK: u32 = 0xFF;

/// Memory layout of the UART register block.
#[repr(C)]
#[derive(Debug, Default)]
pub struct UartRegisters {
    pub rx_valid: u32,
    pub rx_data: u32,
    pub tx_full: u32,
    pub tx_data: u32,
}

pub struct UartStatus {
    pub receive_data_valid: bool,
    pub transmit_buffer_full: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransmitBufferFull;
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiveBufferEmpty;

/// Upper bound on the number of status polls a bounded operation performs
/// before giving up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpinLimit(u32);

impl SpinLimit {
    pub const fn polls(polls: u32) -> SpinLimit {
        SpinLimit(polls)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

#[derive(Clone)]
/// `Uart` is a handle to a memory mapped universal asynchronous
/// receiver-transmitter.
pub struct Uart {
    regs: *mut UartRegisters,
}

impl Uart {
    /// Create a new [`Uart`] instance given a base address.
    ///
    /// # Safety
    ///
    /// The `base_addr` pointer MUST BE a valid pointer that is backed
    /// by a memory mapped UART instance.
    pub const unsafe fn new(base_addr: *const ()) -> Uart {
        Uart {
            regs: base_addr.cast::<UartRegisters>().cast_mut(),
        }
    }

    /// The peripheral has no configuration registers, so there is nothing to
    /// set up. Kept so that board bring-up code has a uniform entry point.
    pub fn init(&self) {}

    fn rx_valid(&self) -> u32 {
        unsafe { addr_of!((*self.regs).rx_valid).read_volatile() }
    }

    fn rx_data(&self) -> u32 {
        unsafe { addr_of!((*self.regs).rx_data).read_volatile() }
    }

    fn tx_full(&self) -> u32 {
        unsafe { addr_of!((*self.regs).tx_full).read_volatile() }
    }

    fn set_tx_data(&self, data: u8) {
        unsafe { addr_of_mut!((*self.regs).tx_data).write_volatile(u32::from(data)) }
    }

    /// UART status register output
    pub fn read_status(&self) -> UartStatus {
        UartStatus {
            receive_data_valid: self.is_rx_valid(),
            transmit_buffer_full: self.is_tx_full(),
        }
    }

    pub fn is_tx_full(&self) -> bool {
        self.tx_full() & FLAG_MASK != 0
    }

    pub fn is_rx_valid(&self) -> bool {
        self.rx_valid() & FLAG_MASK != 0
    }

    /// The `receive` function attempts to receive data from the UART. If no
    /// data is available, it keeps looping until data is available.
    pub fn receive(&self) -> u8 {
        loop {
            if let Ok(val) = self.try_receive() {
                return val;
            }
        }
    }

    /// The `try_receive` function attempts to receive data from the UART. If no
    /// data is available, it returns an error and leaves `RX_DATA` untouched.
    pub fn try_receive(&self) -> Result<u8, ReceiveBufferEmpty> {
        if self.is_rx_valid() {
            Ok((self.rx_data() & DATA_MASK) as u8)
        } else {
            Err(ReceiveBufferEmpty)
        }
    }

    /// Like [`Uart::receive`], but polls at most `limit` times.
    pub fn receive_bounded(&self, limit: SpinLimit) -> Result<u8, ReceiveBufferEmpty> {
        for _ in 0..limit.get() {
            if let Ok(val) = self.try_receive() {
                return Ok(val);
            }
        }
        Err(ReceiveBufferEmpty)
    }

    /// The `send` function sends the given data to the UART. If the UART is
    /// unable to accept the data, it keeps looping until it can send the data.
    pub fn send(&self, data: u8) {
        loop {
            if let Ok(()) = self.try_send(data) {
                return;
            }
        }
    }

    /// The `try_send` function attempts to send the given data to the UART. If
    /// the UART is unable to accept the data, it returns an error.
    pub fn try_send(&self, data: u8) -> Result<(), TransmitBufferFull> {
        if self.is_tx_full() {
            Err(TransmitBufferFull)
        } else {
            self.set_tx_data(data);
            Ok(())
        }
    }

    /// Like [`Uart::send`], but polls at most `limit` times.
    pub fn send_bounded(&self, data: u8, limit: SpinLimit) -> Result<(), TransmitBufferFull> {
        for _ in 0..limit.get() {
            if let Ok(()) = self.try_send(data) {
                return Ok(());
            }
        }
        Err(TransmitBufferFull)
    }
}

impl SerialDevice for Uart {
    type Error = Infallible;

    fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
        SerialDevice::read_byte(&mut &*self)
    }

    fn write_byte(&mut self, byte: u8) -> nb::Result<(), Self::Error> {
        SerialDevice::write_byte(&mut &*self, byte)
    }
}

// All register accesses go through `&self`, so a shared reference is as good
// as an owned handle.
impl SerialDevice for &Uart {
    type Error = Infallible;

    fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
        self.try_receive().map_err(|ReceiveBufferEmpty| nb::Error::WouldBlock)
    }

    fn write_byte(&mut self, byte: u8) -> nb::Result<(), Self::Error> {
        self.try_send(byte)
            .map_err(|TransmitBufferFull| nb::Error::WouldBlock)
    }
}

impl ufmt::uWrite for Uart {
    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        for b in s.bytes() {
            self.send(b);
        }
        Ok(())
    }

    type Error = ();
}

impl core::fmt::Write for Uart {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        for b in s.bytes() {
            self.send(b);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::offset_of;

    /// Runs `f` against a UART backed by an ordinary register block in host
    /// memory. The raw pointer is handed out so the test can play hardware.
    fn with_uart(f: impl FnOnce(&Uart, *mut UartRegisters)) {
        let mut regs = UartRegisters::default();
        let ptr: *mut UartRegisters = &mut regs;
        let uart = unsafe { Uart::new(ptr as *const ()) };
        f(&uart, ptr);
    }

    #[test]
    fn register_layout_matches_memory_map() {
        assert_eq!(offset_of!(UartRegisters, rx_valid), RX_VALID_OFFSET);
        assert_eq!(offset_of!(UartRegisters, rx_data), RX_DATA_OFFSET);
        assert_eq!(offset_of!(UartRegisters, tx_full), TX_FULL_OFFSET);
        assert_eq!(offset_of!(UartRegisters, tx_data), TX_DATA_OFFSET);
        assert_eq!(core::mem::size_of::<UartRegisters>(), 16);
    }

    #[test]
    fn try_send_does_not_write_while_full() {
        with_uart(|uart, regs| {
            unsafe {
                (*regs).tx_full = 1;
                (*regs).tx_data = 0xAA;
            }
            assert!(uart.is_tx_full());
            assert_eq!(uart.try_send(0x55), Err(TransmitBufferFull));
            assert_eq!(unsafe { (*regs).tx_data }, 0xAA);
        });
    }

    #[test]
    fn try_send_writes_when_space_available() {
        with_uart(|uart, regs| {
            assert_eq!(uart.try_send(b'x'), Ok(()));
            assert_eq!(unsafe { (*regs).tx_data }, u32::from(b'x'));
        });
    }

    #[test]
    fn only_bit_zero_of_tx_full_counts() {
        with_uart(|uart, regs| {
            unsafe { (*regs).tx_full = 0b10 };
            assert!(!uart.is_tx_full());
            assert_eq!(uart.try_send(7), Ok(()));
            assert_eq!(unsafe { (*regs).tx_data }, 7);
        });
    }

    #[test]
    fn try_receive_reports_empty_when_not_valid() {
        with_uart(|uart, regs| {
            unsafe { (*regs).rx_data = u32::from(b'A') };
            assert!(!uart.is_rx_valid());
            assert_eq!(uart.try_receive(), Err(ReceiveBufferEmpty));
        });
    }

    #[test]
    fn try_receive_returns_low_byte() {
        with_uart(|uart, regs| {
            unsafe {
                (*regs).rx_valid = 1;
                (*regs).rx_data = 0x1234_5641;
            }
            assert_eq!(uart.try_receive(), Ok(0x41));
            assert_eq!(uart.receive(), 0x41);
        });
    }

    #[test]
    fn read_status_reflects_both_flags() {
        with_uart(|uart, regs| {
            unsafe {
                (*regs).rx_valid = 1;
                (*regs).tx_full = 1;
            }
            let status = uart.read_status();
            assert!(status.receive_data_valid);
            assert!(status.transmit_buffer_full);
        });
    }

    #[test]
    fn bounded_send_gives_up_when_never_ready() {
        with_uart(|uart, regs| {
            unsafe { (*regs).tx_full = 1 };
            assert_eq!(
                uart.send_bounded(b'z', SpinLimit::polls(1000)),
                Err(TransmitBufferFull)
            );
            assert_eq!(unsafe { (*regs).tx_data }, 0);

            unsafe { (*regs).tx_full = 0 };
            assert_eq!(uart.send_bounded(b'z', SpinLimit::polls(1)), Ok(()));
            assert_eq!(unsafe { (*regs).tx_data }, u32::from(b'z'));
        });
    }

    #[test]
    fn bounded_receive_with_zero_polls_never_touches_hardware() {
        with_uart(|uart, regs| {
            unsafe {
                (*regs).rx_valid = 1;
                (*regs).rx_data = 3;
            }
            assert_eq!(
                uart.receive_bounded(SpinLimit::polls(0)),
                Err(ReceiveBufferEmpty)
            );
            assert_eq!(uart.receive_bounded(SpinLimit::polls(1)), Ok(3));
        });
    }

    #[test]
    fn serial_device_maps_not_ready_to_would_block() {
        with_uart(|uart, regs| {
            let mut dev = uart;
            assert_eq!(dev.read_byte(), Err(nb::Error::WouldBlock));

            unsafe { (*regs).tx_full = 1 };
            assert_eq!(dev.write_byte(1), Err(nb::Error::WouldBlock));

            unsafe { (*regs).tx_full = 0 };
            assert_eq!(dev.write_byte(1), Ok(()));
        });
    }

    #[test]
    fn formatted_writes_go_out_byte_by_byte() {
        with_uart(|uart, regs| {
            let mut uart = uart.clone();
            core::fmt::Write::write_str(&mut uart, "ok").unwrap();
            assert_eq!(unsafe { (*regs).tx_data }, u32::from(b'k'));

            ufmt::uwrite!(uart, "{}", 42u8).unwrap();
            assert_eq!(unsafe { (*regs).tx_data }, u32::from(b'2'));
        });
    }
}
