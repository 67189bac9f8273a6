// SPDX-License-Identifier: JOSSL-1.0
// Copyright (C) 2025 The Jotunheim Project
use core::fmt::Write;
use spin::{Mutex, Once};
use uart_16550::SerialPort;

pub const COM1_BASE: u16 = 0x3F8;

static COM1: Once<Mutex<SerialPort>> = Once::new();

/// Brings up COM1. Later calls are no-ops, so any core may race here.
///
/// # Safety
/// Port 0x3F8 must be a 16550-compatible UART (or absent, in which case the
/// writes go nowhere).
pub unsafe fn init_com1() {
    COM1.call_once(|| {
        let mut port = unsafe { SerialPort::new(COM1_BASE) };
        port.init();
        Mutex::new(port)
    });
}

pub fn is_ready() -> bool {
    COM1.is_completed()
}

// Output before init_com1() is dropped.
fn _write_str(s: &str) {
    if let Some(port) = COM1.get() {
        let mut port = port.lock();
        for &b in s.as_bytes() {
            let _ = port.send(b);
        }
    }
}

pub struct Serial;
impl Write for Serial {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        _write_str(s);
        Ok(())
    }
}

#[macro_export]
macro_rules! print {
    ($($arg:tt)*) => {{
        use core::fmt::Write;
        let _ = write!(&mut $crate::arch::x86_64::serial::Serial, $($arg)*);
    }};
}

#[macro_export]
macro_rules! println {
    () => { $crate::print!("\n") };
    ($fmt:literal $(, $($arg:tt)+)?) => {{
        $crate::print!(concat!($fmt, "\n") $(, $($arg)+)?);
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_before_init_is_dropped() {
        assert!(!is_ready());
        crate::println!("[TEST] goes nowhere {}", 42);
        assert!(!is_ready());
    }
}
