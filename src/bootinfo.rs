// SPDX-License-Identifier: JOSSL-1.0
// Copyright (C) 2025 The Jotunheim Project

//! BOOTBOOT information block, as populated by the loader before `_start`.

use core::fmt;
use core::mem::{offset_of, size_of};

/// Memory mapped IO virtual address.
pub const BOOTBOOT_MMIO: u64 = 0xffff_ffff_f800_0000;
/// Frame buffer virtual address.
pub const BOOTBOOT_FB: u64 = 0xffff_ffff_fc00_0000;
/// Boot information block virtual address.
pub const BOOTBOOT_INFO: u64 = 0xffff_ffff_ffe0_0000;
/// Environment string virtual address.
pub const BOOTBOOT_ENV: u64 = 0xffff_ffff_ffe0_1000;
/// Start of the core loadable segment.
pub const BOOTBOOT_CORE: u64 = 0xffff_ffff_ffe0_2000;

pub const BOOTBOOT_MAGIC: [u8; 4] = *b"BOOT";

#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FbType {
    Argb = 0,
    Rgba = 1,
    Abgr = 2,
    Bgra = 3,
}

impl FbType {
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::Argb),
            1 => Some(Self::Rgba),
            2 => Some(Self::Abgr),
            3 => Some(Self::Bgra),
            _ => None,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct ArchX86_64 {
    pub acpi_ptr: u64,
    pub smbi_ptr: u64,
    pub efi_ptr: u64,
    pub mp_ptr: u64,
    pub unused: [u64; 4],
}

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct BootInfo {
    pub magic: [u8; 4],
    pub size: u32, // header plus memory map, in bytes
    pub protocol: u8,
    pub fb_type: u8,
    pub numcores: u16,
    pub bspid: u16,
    pub timezone: i16,
    pub datetime: [u8; 8], // BCD
    pub initrd_ptr: u64,
    pub initrd_size: u64,
    pub fb_ptr: u64,
    pub fb_size: u32,
    pub fb_width: u32,
    pub fb_height: u32,
    pub fb_scanline: u32,
    pub arch: ArchX86_64,
}

const _: () = {
    assert!(offset_of!(BootInfo, fb_ptr) == 0x28);
    assert!(offset_of!(BootInfo, fb_width) == 0x34);
    assert!(offset_of!(BootInfo, fb_height) == 0x38);
    assert!(offset_of!(BootInfo, fb_scanline) == 0x3c);
    assert!(offset_of!(BootInfo, arch) == 0x40);
    assert!(size_of::<BootInfo>() == 0x80);
    assert!(size_of::<MMapEnt>() == 16);
};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BootError {
    BadMagic([u8; 4]),
    BadSize(u32),
}

impl fmt::Display for BootError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootError::BadMagic(m) => write!(
                f,
                "bad magic {:02x} {:02x} {:02x} {:02x}",
                m[0], m[1], m[2], m[3]
            ),
            BootError::BadSize(s) => write!(f, "bad block size {:#x}", s),
        }
    }
}

impl BootInfo {
    /// The block the loader mapped at [`BOOTBOOT_INFO`].
    ///
    /// # Safety
    /// Only valid when running under a BOOTBOOT loader.
    pub unsafe fn get() -> &'static BootInfo {
        unsafe { &*(BOOTBOOT_INFO as *const BootInfo) }
    }

    pub fn validate(&self) -> Result<(), BootError> {
        if self.magic != BOOTBOOT_MAGIC {
            return Err(BootError::BadMagic(self.magic));
        }
        let size = self.size as usize;
        if size < size_of::<BootInfo>() || (size - size_of::<BootInfo>()) % size_of::<MMapEnt>() != 0
        {
            return Err(BootError::BadSize(self.size));
        }
        Ok(())
    }

    /// Loader level: 1 = static mappings, 2 = dynamic.
    pub fn loader_level(&self) -> u8 {
        self.protocol & 0x03
    }

    pub fn is_big_endian(&self) -> bool {
        self.protocol & 0x80 != 0
    }

    pub fn fb_type(&self) -> Option<FbType> {
        FbType::from_raw(self.fb_type)
    }

    pub fn datetime(&self) -> DateTime {
        DateTime(self.datetime)
    }

    pub fn mmap_len(&self) -> usize {
        (self.size as usize).saturating_sub(size_of::<BootInfo>()) / size_of::<MMapEnt>()
    }

    /// Memory map entries following the header.
    ///
    /// # Safety
    /// `self` must be followed in memory by `mmap_len()` entries, as it is in the
    /// loader-provided page.
    pub unsafe fn mmap(&self) -> &[MMapEnt] {
        let first = unsafe { (self as *const BootInfo).add(1) as *const MMapEnt };
        unsafe { core::slice::from_raw_parts(first, self.mmap_len()) }
    }
}

#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MMapType {
    Used = 0,
    Free = 1,
    Acpi = 2,
    Mmio = 3,
    Unknown = 0xff,
}

#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct MMapEnt {
    pub ptr: u64,
    pub size: u64, // low 4 bits hold the type
}

impl MMapEnt {
    pub fn base(&self) -> u64 {
        self.ptr
    }

    pub fn len(&self) -> u64 {
        self.size & !0xf
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn kind(&self) -> MMapType {
        match self.size & 0xf {
            0 => MMapType::Used,
            1 => MMapType::Free,
            2 => MMapType::Acpi,
            3 => MMapType::Mmio,
            _ => MMapType::Unknown,
        }
    }

    pub fn is_free(&self) -> bool {
        self.kind() == MMapType::Free
    }
}

/// Loader timestamp, packed BCD `YYYYMMDDhhmmss`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DateTime(pub [u8; 8]);

fn bcd(b: u8) -> u32 {
    ((b >> 4) as u32) * 10 + (b & 0x0f) as u32
}

impl DateTime {
    pub fn year(&self) -> u32 {
        bcd(self.0[0]) * 100 + bcd(self.0[1])
    }
    pub fn month(&self) -> u32 {
        bcd(self.0[2])
    }
    pub fn day(&self) -> u32 {
        bcd(self.0[3])
    }
    pub fn hour(&self) -> u32 {
        bcd(self.0[4])
    }
    pub fn minute(&self) -> u32 {
        bcd(self.0[5])
    }
    pub fn second(&self) -> u32 {
        bcd(self.0[6])
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year(),
            self.month(),
            self.day(),
            self.hour(),
            self.minute(),
            self.second()
        )
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[repr(C)]
    #[allow(dead_code)]
    struct Block {
        info: BootInfo,
        mmap: [MMapEnt; 3],
    }

    pub(crate) fn sample(width: u32, height: u32, scanline: u32) -> BootInfo {
        BootInfo {
            magic: BOOTBOOT_MAGIC,
            size: 0x80,
            protocol: 0x02,
            fb_type: 0,
            numcores: 4,
            bspid: 0,
            timezone: 0,
            datetime: [0x20, 0x26, 0x10, 0x19, 0x13, 0x05, 0x42, 0x00],
            initrd_ptr: 0,
            initrd_size: 0,
            fb_ptr: 0xe000_0000,
            fb_size: scanline * height,
            fb_width: width,
            fb_height: height,
            fb_scanline: scanline,
            arch: ArchX86_64 {
                acpi_ptr: 0,
                smbi_ptr: 0,
                efi_ptr: 0,
                mp_ptr: 0,
                unused: [0; 4],
            },
        }
    }

    #[test]
    fn geometry_fields_sit_at_protocol_offsets() {
        let info = sample(800, 600, 3200);
        let base = &info as *const BootInfo as *const u8;
        let read = |off: usize| unsafe { (base.add(off) as *const u32).read_unaligned() };
        assert_eq!(read(0x34), 800);
        assert_eq!(read(0x38), 600);
        assert_eq!(read(0x3c), 3200);
    }

    #[test]
    fn validate_rejects_bad_magic_and_size() {
        let mut info = sample(640, 480, 2560);
        assert_eq!(info.validate(), Ok(()));

        info.size = 0x88;
        assert_eq!(info.validate(), Err(BootError::BadSize(0x88)));

        info.size = 0x80;
        info.magic = *b"BOOM";
        assert_eq!(info.validate(), Err(BootError::BadMagic(*b"BOOM")));
    }

    #[test]
    fn memory_map_entries_follow_header() {
        let mut info = sample(640, 480, 2560);
        info.size = 0x80 + 3 * 16;
        let block = Block {
            info,
            mmap: [
                MMapEnt { ptr: 0, size: 0x9_f000 | 1 },
                MMapEnt { ptr: 0x9_f000, size: 0x1000 | 2 },
                MMapEnt { ptr: 0x10_0000, size: 0x7ff_0000 | 1 },
            ],
        };
        // Borrow through the whole block so the entries stay in bounds.
        let info = unsafe { &*(&block as *const Block as *const BootInfo) };
        let mmap = unsafe { info.mmap() };
        assert_eq!(mmap.len(), 3);
        assert_eq!(mmap[1].kind(), MMapType::Acpi);
        assert_eq!(mmap[1].len(), 0x1000);
        let free: u64 = mmap.iter().filter(|e| e.is_free()).map(|e| e.len()).sum();
        assert_eq!(free, 0x9_f000 + 0x7ff_0000);
    }

    #[test]
    fn datetime_decodes_bcd() {
        let info = sample(640, 480, 2560);
        assert_eq!(info.datetime().to_string(), "2026-10-19 13:05:42");
    }

    #[test]
    fn protocol_bits() {
        let mut info = sample(640, 480, 2560);
        assert_eq!(info.loader_level(), 2);
        assert!(!info.is_big_endian());
        info.protocol = 0x81;
        assert_eq!(info.loader_level(), 1);
        assert!(info.is_big_endian());
        assert_eq!(info.fb_type(), Some(FbType::Argb));
    }
}
