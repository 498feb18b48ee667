// SPDX-FileCopyrightText: 2025 Google LLC
//
// SPDX-License-Identifier: Apache-2.0

/// Byte-at-a-time access to a serial device.
///
/// Both methods return `nb::Error::WouldBlock` when the device is not ready,
/// so callers decide themselves whether to spin (`nb::block!`), give up, or
/// do something else in the meantime.
pub trait SerialDevice {
    type Error: core::fmt::Debug;

    /// Attempt to read a single byte from the device.
    fn read_byte(&mut self) -> nb::Result<u8, Self::Error>;

    /// Attempt to write a single byte to the device.
    fn write_byte(&mut self, byte: u8) -> nb::Result<(), Self::Error>;
}

impl<D: SerialDevice + ?Sized> SerialDevice for &mut D {
    type Error = D::Error;

    fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
        (**self).read_byte()
    }

    fn write_byte(&mut self, byte: u8) -> nb::Result<(), Self::Error> {
        (**self).write_byte(byte)
    }
}
