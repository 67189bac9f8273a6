// SPDX-License-Identifier: JOSSL-1.0
// Copyright (C) 2025 The Jotunheim Project

//! Calibration pattern: cross-hair through the screen centre plus RGB boxes.

use crate::fb::{FrameBuffer, Rgb};

pub const BOX_SIZE: usize = 20;
pub const BOX_TOP: usize = 20;

/// Left edge and color of each box, drawn in this order.
pub const BOXES: [(usize, Rgb); 3] = [(20, Rgb::RED), (50, Rgb::GREEN), (80, Rgb::BLUE)];

/// One-pixel white lines at `width/2` and `height/2`, spanning the screen.
pub fn crosshair(fb: &mut FrameBuffer) {
    let (w, h) = (fb.width(), fb.height());
    fb.vline(w / 2, Rgb::WHITE);
    fb.hline(h / 2, Rgb::WHITE);
}

pub fn boxes(fb: &mut FrameBuffer) {
    for (left, color) in BOXES {
        fb.fill_rect(left, BOX_TOP, BOX_SIZE, BOX_SIZE, color);
    }
}

pub fn draw(fb: &mut FrameBuffer) {
    crosshair(fb);
    boxes(fb);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fb::tests::TestScreen;

    const UNTOUCHED: u32 = 0xdead_beef;

    #[test]
    fn crosshair_lands_on_centre_lines() {
        let mut s = TestScreen::new(200, 120, 224 * 4);
        crosshair(&mut s.fb());

        for y in 0..120 {
            assert_eq!(s.at(100, y), 0x00ff_ffff, "column 100, row {y}");
        }
        for x in 0..200 {
            assert_eq!(s.at(x, 60), 0x00ff_ffff, "row 60, column {x}");
        }
        assert_eq!(s.at(99, 10), UNTOUCHED);
        assert_eq!(s.at(10, 59), UNTOUCHED);
        assert_eq!(s.at(10, 61), UNTOUCHED);
        // Padding past the visible width stays untouched.
        assert_eq!(s.mem[60 * 224 + 210], UNTOUCHED);
    }

    #[test]
    fn boxes_occupy_expected_cells() {
        let mut s = TestScreen::new(160, 60, 160 * 4);
        boxes(&mut s.fb());

        for y in 0..60 {
            for x in 0..160 {
                let want = if !(20..40).contains(&y) {
                    UNTOUCHED
                } else if (20..40).contains(&x) {
                    0x00ff_0000
                } else if (50..70).contains(&x) {
                    0x0000_ff00
                } else if (80..100).contains(&x) {
                    0x0000_00ff
                } else {
                    UNTOUCHED
                };
                assert_eq!(s.at(x, y), want, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn boxes_paint_over_crosshair() {
        // Centre column 30 runs through the red box.
        let mut s = TestScreen::new(60, 100, 60 * 4);
        draw(&mut s.fb());
        assert_eq!(s.at(30, 25), 0x00ff_0000);
        assert_eq!(s.at(30, 45), 0x00ff_ffff);
        assert_eq!(s.at(55, 50), 0x00ff_ffff);
    }
}
