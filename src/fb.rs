// SPDX-License-Identifier: JOSSL-1.0
// Copyright (C) 2025 The Jotunheim Project

//! Linear 32bpp framebuffer, 0x00RRGGBB.

use core::ptr::NonNull;
use volatile::VolatilePtr;

use crate::bootinfo::BootInfo;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Rgb(pub u32);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0x0000_0000);
    pub const WHITE: Rgb = Rgb(0x00ff_ffff);
    pub const RED: Rgb = Rgb(0x00ff_0000);
    pub const GREEN: Rgb = Rgb(0x0000_ff00);
    pub const BLUE: Rgb = Rgb(0x0000_00ff);
}

/// Width, height and scanline pitch as reported by the loader.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Geometry {
    pub width: usize,
    pub height: usize,
    pub stride: usize, // bytes per scanline
}

impl Geometry {
    /// `None` when the scanline can't address 32-bit pixels: zero, or not a
    /// multiple of four.
    pub fn new(width: u32, height: u32, stride: u32) -> Option<Self> {
        if stride == 0 || stride % 4 != 0 {
            return None;
        }
        Some(Self {
            width: width as usize,
            height: height as usize,
            stride: stride as usize,
        })
    }

    pub fn from_boot(boot: &BootInfo) -> Option<Self> {
        Self::new(boot.fb_width, boot.fb_height, boot.fb_scanline)
    }

    /// Bytes spanned by all scanlines.
    pub fn size(&self) -> usize {
        self.stride * self.height
    }

    #[inline]
    pub fn offset(&self, x: usize, y: usize) -> usize {
        y * self.stride + x * 4
    }
}

pub struct FrameBuffer {
    base: NonNull<u8>,
    geo: Geometry,
}

impl FrameBuffer {
    /// # Safety
    /// `base` must be 4-byte aligned and valid for writes of `geo.size()` bytes
    /// for as long as the framebuffer is used.
    pub unsafe fn new(base: NonNull<u8>, geo: Geometry) -> Self {
        Self { base, geo }
    }

    pub fn geometry(&self) -> Geometry {
        self.geo
    }

    pub fn width(&self) -> usize {
        self.geo.width
    }

    pub fn height(&self) -> usize {
        self.geo.height
    }

    /// Unchecked store at `base + y*stride + x*4`.
    ///
    /// # Safety
    /// `(x, y)` must address a pixel inside the mapped buffer.
    #[inline]
    pub unsafe fn put_pixel(&mut self, x: usize, y: usize, c: Rgb) {
        let off = self.geo.offset(x, y);
        unsafe {
            let px = NonNull::new_unchecked(self.base.as_ptr().add(off).cast::<u32>());
            VolatilePtr::new(px).write(c.0);
        }
    }

    /// Store that drops pixels outside the visible area.
    #[inline]
    pub fn plot(&mut self, x: usize, y: usize, c: Rgb) {
        if x >= self.geo.width || y >= self.geo.height {
            return;
        }
        if self.geo.offset(x, y) + 4 > self.geo.size() {
            return;
        }
        unsafe { self.put_pixel(x, y, c) }
    }

    pub fn hline(&mut self, y: usize, c: Rgb) {
        for x in 0..self.geo.width {
            self.plot(x, y, c);
        }
    }

    pub fn vline(&mut self, x: usize, c: Rgb) {
        for y in 0..self.geo.height {
            self.plot(x, y, c);
        }
    }

    pub fn fill_rect(&mut self, x0: usize, y0: usize, w: usize, h: usize, c: Rgb) {
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                self.plot(x, y, c);
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Host-side framebuffer backed by a `Vec<u32>`.
    pub(crate) struct TestScreen {
        pub geo: Geometry,
        pub mem: Vec<u32>,
    }

    impl TestScreen {
        pub fn new(width: u32, height: u32, stride: u32) -> Self {
            let geo = Geometry::new(width, height, stride).expect("usable geometry");
            let mem = vec![0xdead_beef; geo.size() / 4];
            Self { geo, mem }
        }

        pub fn fb(&mut self) -> FrameBuffer {
            let base = NonNull::new(self.mem.as_mut_ptr().cast::<u8>()).unwrap();
            unsafe { FrameBuffer::new(base, self.geo) }
        }

        pub fn at(&self, x: usize, y: usize) -> u32 {
            self.mem[self.geo.offset(x, y) / 4]
        }
    }

    #[test]
    fn geometry_rejects_unusable_scanline() {
        assert_eq!(Geometry::new(640, 480, 0), None);
        assert_eq!(Geometry::new(640, 480, 2562), None);
        assert!(Geometry::new(640, 480, 2560).is_some());
    }

    #[test]
    fn put_pixel_honours_stride_padding() {
        // 10 visible pixels, 16 pixel pitch.
        let mut s = TestScreen::new(10, 4, 64);
        let mut fb = s.fb();
        unsafe { fb.put_pixel(3, 2, Rgb::GREEN) };
        assert_eq!(s.mem[2 * 16 + 3], 0x0000_ff00);
    }

    #[test]
    fn plot_drops_out_of_range_pixels() {
        let mut s = TestScreen::new(10, 4, 64);
        let mut fb = s.fb();
        fb.plot(10, 0, Rgb::WHITE);
        fb.plot(0, 4, Rgb::WHITE);
        fb.plot(12, 1, Rgb::WHITE);
        assert!(s.mem.iter().all(|&p| p == 0xdead_beef));
    }

    #[test]
    fn fill_rect_covers_exact_area() {
        let mut s = TestScreen::new(8, 8, 32);
        let mut fb = s.fb();
        fb.fill_rect(2, 3, 3, 2, Rgb::RED);
        for y in 0..8 {
            for x in 0..8 {
                let inside = (2..5).contains(&x) && (3..5).contains(&y);
                let want = if inside { 0x00ff_0000 } else { 0xdead_beef };
                assert_eq!(s.at(x, y), want, "pixel ({x}, {y})");
            }
        }
    }
}
