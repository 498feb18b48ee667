// SPDX-FileCopyrightText: 2025 Google LLC
//
// SPDX-License-Identifier: Apache-2.0
/*! Blocking console I/O.

[`Stdio`] owns a [`SerialDevice`] and turns its non-blocking byte interface
into blocking character and line operations. Every operation spins on the
device until it is ready; there is no timeout.
*/

use core::convert::Infallible;

use heapless::Vec;
use platform_hal::SerialDevice;

/// Returned by [`Stdio::read_line`] when the line did not fit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineOverflow<const N: usize> {
    /// The first `N` bytes of the line. The rest is still pending on the
    /// device.
    pub partial: Vec<u8, N>,
}

pub struct Stdio<D> {
    device: D,
}

fn unwrap_infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(val) => val,
        Err(never) => match never {},
    }
}

impl<D> Stdio<D>
where
    D: SerialDevice<Error = Infallible>,
{
    pub fn new(device: D) -> Stdio<D> {
        Stdio { device }
    }

    pub fn device(&mut self) -> &mut D {
        &mut self.device
    }

    pub fn into_inner(self) -> D {
        self.device
    }

    /// Send a single byte, waiting for room in the transmit buffer.
    pub fn putc(&mut self, c: u8) {
        unwrap_infallible(nb::block!(self.device.write_byte(c)))
    }

    /// Send every byte of `s`.
    pub fn puts(&mut self, s: &str) {
        self.puts_bytes(s.as_bytes());
    }

    /// Send `s` up to, but not including, the first NUL byte.
    pub fn puts_bytes(&mut self, s: &[u8]) {
        for &c in s.iter().take_while(|&&c| c != 0) {
            self.putc(c);
        }
    }

    /// Receive a single byte, waiting until one is available.
    pub fn getc(&mut self) -> u8 {
        unwrap_infallible(nb::block!(self.device.read_byte()))
    }

    /// Read a line into `buf` as a NUL-terminated string.
    ///
    /// Reads until a `'\n'` arrives or `buf.len() - 1` bytes have been
    /// stored, whichever comes first, and always NUL-terminates. The newline
    /// itself is replaced by the terminator. Returns `true` if the newline
    /// was seen, `false` if the buffer filled up first. On overflow the rest
    /// of the line is left unread.
    ///
    /// An empty buffer has no room for the terminator; nothing is read and
    /// `false` is returned.
    pub fn gets(&mut self, buf: &mut [u8]) -> bool {
        let Some(last) = buf.len().checked_sub(1) else {
            return false;
        };

        for slot in buf[..last].iter_mut() {
            let c = self.getc();
            if c == b'\n' {
                *slot = 0;
                return true;
            }
            *slot = c;
        }

        // overflow
        buf[last] = 0;
        false
    }

    /// Read a line of at most `N` bytes, without the trailing newline.
    ///
    /// Follows the same discipline as [`Stdio::gets`] with a buffer of
    /// `N + 1` bytes: once `N` bytes are stored without a newline, reading
    /// stops and the partial line is returned as an error.
    pub fn read_line<const N: usize>(&mut self) -> Result<Vec<u8, N>, LineOverflow<N>> {
        let mut line = Vec::new();
        while !line.is_full() {
            let c = self.getc();
            if c == b'\n' {
                return Ok(line);
            }
            if line.push(c).is_err() {
                break;
            }
        }
        Err(LineOverflow { partial: line })
    }
}

impl<D> ufmt::uWrite for Stdio<D>
where
    D: SerialDevice<Error = Infallible>,
{
    type Error = Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        self.puts(s);
        Ok(())
    }
}

impl<D> core::fmt::Write for Stdio<D>
where
    D: SerialDevice<Error = Infallible>,
{
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        self.puts(s);
        Ok(())
    }
}
