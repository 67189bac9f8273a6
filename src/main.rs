// SPDX-License-Identifier: JOSSL-1.0
// Copyright (C) 2025 The Jotunheim Project
#![no_std]
#![no_main]

use core::panic::PanicInfo;

use mykernel::arch::x86_64::{cpu, serial};
use mykernel::bootinfo::{BOOTBOOT_FB, BootInfo};
use mykernel::env::Environment;
use mykernel::{println, report, screen};

/// Entry point, called by the BOOTBOOT loader on every core in parallel.
#[unsafe(no_mangle)]
#[unsafe(link_section = ".text._start")]
pub extern "C" fn _start() -> ! {
    let boot = unsafe { BootInfo::get() };

    let bsp = cpu::apic_id() == boot.bspid as u32;
    if bsp {
        unsafe {
            serial::init_com1();
        }
        println!("[MYKERNEL] Kernel starts.");
        let env = unsafe { Environment::get() };
        unsafe { report::boot_summary(boot, &env) };
    }

    // Every core writes the same pixels.
    let drawn = unsafe { screen::show(boot, BOOTBOOT_FB as *mut u8) };
    if bsp && drawn {
        println!("[MYKERNEL] Test screen drawn.");
    }

    cpu::idle()
}

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    println!("\n*** KERNEL PANIC ***\n{}", info);
    cpu::idle()
}
