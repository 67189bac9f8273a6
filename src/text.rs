// SPDX-License-Identifier: JOSSL-1.0
// Copyright (C) 2025 The Jotunheim Project

use crate::fb::{FrameBuffer, Rgb};
use crate::font::{self, GLYPH_WIDTH, Glyph};

/// Glyph plus one blank spacer column.
pub const CELL_WIDTH: usize = GLYPH_WIDTH + 1;

/// Draws one glyph with its top-left corner at `(x0, y0)`. Set bits are
/// white, clear bits black; the spacer column to the right is black.
pub fn draw_glyph(fb: &mut FrameBuffer, x0: usize, y0: usize, glyph: &Glyph) {
    for (row, bits) in glyph.iter().copied().enumerate() {
        let mut mask = 0x80u8;
        for col in 0..GLYPH_WIDTH {
            let color = if bits & mask != 0 { Rgb::WHITE } else { Rgb::BLACK };
            fb.plot(x0 + col, y0 + row, color);
            mask >>= 1;
        }
        fb.plot(x0 + GLYPH_WIDTH, y0 + row, Rgb::BLACK);
    }
}

/// Renders `s` byte by byte along the top edge, starting at the left.
/// No wrapping; anything past the right edge is dropped.
pub fn puts(fb: &mut FrameBuffer, s: &str) {
    for (k, ch) in s.bytes().enumerate() {
        draw_glyph(fb, k * CELL_WIDTH, 0, font::glyph(ch));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fb::tests::TestScreen;
    use crate::font::GLYPH_HEIGHT;

    fn cell_bits(s: &TestScreen, x0: usize) -> [u8; GLYPH_HEIGHT] {
        let mut rows = [0u8; GLYPH_HEIGHT];
        for (y, row) in rows.iter_mut().enumerate() {
            for x in 0..GLYPH_WIDTH {
                match s.at(x0 + x, y) {
                    0x00ff_ffff => *row |= 0x80 >> x,
                    0 => {}
                    other => panic!("unexpected pixel {other:#x} at ({}, {y})", x0 + x),
                }
            }
        }
        rows
    }

    #[test]
    fn renders_letter_a_exactly() {
        let mut s = TestScreen::new(64, 32, 64 * 4);
        puts(&mut s.fb(), "A");

        let expected = [
            0x00, 0x00, 0x10, 0x38, 0x6c, 0xc6, 0xc6, 0xfe, 0xc6, 0xc6, 0xc6, 0xc6, 0x00, 0x00,
            0x00, 0x00,
        ];
        assert_eq!(cell_bits(&s, 0), expected);
        for y in 0..GLYPH_HEIGHT {
            assert_eq!(s.at(8, y), 0, "spacer column row {y}");
            assert_eq!(s.at(9, y), 0xdead_beef, "past the cell row {y}");
        }
        assert_eq!(s.at(0, 16), 0xdead_beef);
    }

    #[test]
    fn cells_advance_nine_pixels() {
        let mut s = TestScreen::new(64, 32, 64 * 4);
        puts(&mut s.fb(), "Hi");
        assert_eq!(cell_bits(&s, 0), *font::glyph(b'H'));
        assert_eq!(cell_bits(&s, 9), *font::glyph(b'i'));
        assert_eq!(s.at(17, 5), 0);
        assert_eq!(s.at(18, 5), 0xdead_beef);
    }

    #[test]
    fn high_bytes_render_blank() {
        let mut s = TestScreen::new(32, 16, 32 * 4);
        draw_glyph(&mut s.fb(), 0, 0, font::glyph(0xc4));
        assert_eq!(cell_bits(&s, 0), [0; GLYPH_HEIGHT]);
    }

    #[test]
    fn text_past_right_edge_is_dropped() {
        let mut s = TestScreen::new(12, 16, 16 * 4);
        puts(&mut s.fb(), "MM");
        // Second cell starts at column 9; columns 12.. are padding.
        for y in 0..16 {
            for x in 12..16 {
                assert_eq!(s.mem[y * 16 + x], 0xdead_beef);
            }
        }
    }
}
