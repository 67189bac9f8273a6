// SPDX-License-Identifier: JOSSL-1.0
// Copyright (C) 2025 The Jotunheim Project

//! Boot summary written to the serial log by the boot processor.

use crate::bootinfo::{BootInfo, MMapType};
use crate::env::Environment;
use crate::fb::Geometry;
use crate::println;

/// # Safety
/// `boot` must be the loader's block, followed by its memory map.
pub unsafe fn boot_summary(boot: &BootInfo, env: &Environment<'_>) {
    if let Err(e) = boot.validate() {
        println!("[BOOT] warning: {}", e);
    }
    println!(
        "[BOOT] protocol level {} ({}), {} core(s), BSP APIC id {}",
        boot.loader_level(),
        if boot.is_big_endian() { "big endian" } else { "little endian" },
        boot.numcores,
        boot.bspid
    );
    println!(
        "[BOOT] loader time {} (tz {:+} min)",
        boot.datetime(),
        boot.timezone
    );
    if boot.initrd_size != 0 {
        println!(
            "[BOOT] initrd {:#x} ({} bytes)",
            boot.initrd_ptr, boot.initrd_size
        );
    }

    match boot.fb_type() {
        Some(t) => println!(
            "[FB] {}x{} pitch {} type {:?} phys {:#x}",
            boot.fb_width, boot.fb_height, boot.fb_scanline, t, boot.fb_ptr
        ),
        None => println!(
            "[FB] {}x{} pitch {} unknown type {} phys {:#x}",
            boot.fb_width, boot.fb_height, boot.fb_scanline, boot.fb_type, boot.fb_ptr
        ),
    }
    if Geometry::from_boot(boot).is_none() {
        println!("[FB] scanline unusable, skipping draw");
    }

    unsafe { mmap_summary(boot) };

    for var in env.vars() {
        println!("[ENV] {} = {}", var.key, var.value);
    }
    if env.dropped() != 0 {
        println!("[ENV] {} line(s) dropped", env.dropped());
    }
}

unsafe fn mmap_summary(boot: &BootInfo) {
    if boot.validate().is_err() {
        return;
    }
    let mmap = unsafe { boot.mmap() };
    let mut free = 0u64;
    for e in mmap {
        if e.kind() == MMapType::Free {
            free += e.len();
        }
    }
    println!(
        "[MMAP] {} entries, {} KiB free",
        mmap.len(),
        free / 1024
    );
}
