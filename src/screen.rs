// SPDX-License-Identifier: JOSSL-1.0
// Copyright (C) 2025 The Jotunheim Project

//! The one-shot test screen every core draws on entry.

use core::ptr::NonNull;

use crate::bootinfo::BootInfo;
use crate::fb::{FrameBuffer, Geometry};
use crate::{pattern, text};

pub const GREETING: &str = "Hello from a simple BOOTBOOT kernel";

/// Cross-hair and boxes first, then the greeting on top.
pub fn draw(fb: &mut FrameBuffer) {
    pattern::draw(fb);
    text::puts(fb, GREETING);
}

/// Draws the test screen into the framebuffer at `base` using the geometry in
/// `boot`. Returns `false`, without touching memory, when the scanline is
/// unusable.
///
/// # Safety
/// `base` must be 4-byte aligned and writable for `fb_scanline * fb_height`
/// bytes.
pub unsafe fn show(boot: &BootInfo, base: *mut u8) -> bool {
    let Some(geo) = Geometry::from_boot(boot) else {
        return false;
    };
    let Some(base) = NonNull::new(base) else {
        return false;
    };
    let mut fb = unsafe { FrameBuffer::new(base, geo) };
    draw(&mut fb);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootinfo::tests::sample;
    use crate::fb::tests::TestScreen;
    use crate::font;
    use crate::text::CELL_WIDTH;

    #[test]
    fn zero_scanline_skips_all_writes() {
        let mut s = TestScreen::new(320, 200, 320 * 4);
        let boot = sample(320, 200, 0);
        let drawn = unsafe { show(&boot, s.mem.as_mut_ptr().cast()) };
        assert!(!drawn);
        assert!(s.mem.iter().all(|&p| p == 0xdead_beef));
    }

    #[test]
    fn full_screen_matches_layout() {
        let (w, h, pitch) = (640u32, 480u32, 704u32 * 4);
        let mut s = TestScreen::new(w, h, pitch);
        let boot = sample(w, h, pitch);
        assert!(unsafe { show(&boot, s.mem.as_mut_ptr().cast()) });

        // Cross-hair below the text band.
        assert_eq!(s.at(320, 100), 0x00ff_ffff);
        assert_eq!(s.at(500, 240), 0x00ff_ffff);
        // Boxes.
        assert_eq!(s.at(25, 25), 0x00ff_0000);
        assert_eq!(s.at(60, 30), 0x0000_ff00);
        assert_eq!(s.at(99, 39), 0x0000_00ff);
        assert_eq!(s.at(45, 30), 0xdead_beef);

        // Greeting: 'o' is the fifth character.
        let o = font::glyph(b'o');
        let x0 = 4 * CELL_WIDTH;
        for (y, bits) in o.iter().enumerate() {
            for x in 0..8 {
                let want = if bits & (0x80 >> x) != 0 { 0x00ff_ffff } else { 0 };
                assert_eq!(s.at(x0 + x, y), want);
            }
        }
        // Text band ends after the last cell's spacer column.
        let end = GREETING.len() * CELL_WIDTH;
        assert_eq!(s.at(end - 1, 0), 0);
        assert_eq!(s.at(end, 0), 0xdead_beef);
    }
}
