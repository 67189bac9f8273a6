// SPDX-License-Identifier: JOSSL-1.0
// Copyright (C) 2025 The Jotunheim Project
use core::arch::x86_64::__cpuid;

use x86_64::instructions::{self, interrupts};

/// Initial Local APIC id of the running core (CPUID.01H:EBX[31:24]).
#[inline]
pub fn apic_id() -> u32 {
    let leaf1 = unsafe { __cpuid(1) };
    leaf1.ebx >> 24
}

/// Parks the core for good.
pub fn idle() -> ! {
    interrupts::disable();
    loop {
        instructions::hlt();
    }
}
