//! 24-bit RGB pixel surface with clipped pixel access and Bresenham lines
use crate::error::{Error, Result};

/// Bytes per pixel (R, G, B)
pub const BYTES_PER_PIXEL: usize = 3;

/// Split a packed `0xRRGGBB` color into its channel bytes.
#[inline]
pub fn unpack_rgb(color: u32) -> [u8; 3] {
    [
        ((color >> 16) & 0xFF) as u8,
        ((color >> 8) & 0xFF) as u8,
        (color & 0xFF) as u8,
    ]
}

/// Join channel bytes into a packed `0xRRGGBB` color.
#[inline]
pub fn pack_rgb(rgb: [u8; 3]) -> u32 {
    (u32::from(rgb[0]) << 16) | (u32::from(rgb[1]) << 8) | u32::from(rgb[2])
}

/// Row-major RGB framebuffer, origin at the top-left corner.
///
/// The buffer is either owned (`Vec<u8>`, the default) or borrowed from a
/// frame host (`&mut [u8]`). Its size is fixed at construction. Writes
/// outside the surface are dropped and reads outside it return 0.
#[derive(Debug, Clone)]
pub struct PixelSurface<B = Vec<u8>> {
    buffer: B,
    width: u32,
    height: u32,
}

impl PixelSurface<Vec<u8>> {
    /// Allocate a black surface
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            buffer: vec![0; width as usize * height as usize * BYTES_PER_PIXEL],
            width,
            height,
        }
    }
}

impl<B: AsRef<[u8]> + AsMut<[u8]>> PixelSurface<B> {
    /// Wrap an existing framebuffer of exactly `width * height * 3` bytes.
    pub fn from_buffer(buffer: B, width: u32, height: u32) -> Result<Self> {
        let expected = width as usize * height as usize * BYTES_PER_PIXEL;
        let actual = buffer.as_ref().len();
        if actual != expected {
            return Err(Error::BufferSize { expected, actual });
        }

        Ok(Self {
            buffer,
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGB bytes, row-major
    pub fn as_bytes(&self) -> &[u8] {
        self.buffer.as_ref()
    }

    pub fn into_inner(self) -> B {
        self.buffer
    }

    /// Fill every pixel with `color`.
    pub fn clear(&mut self, color: u32) {
        let rgb = unpack_rgb(color);
        for pixel in self.buffer.as_mut().chunks_exact_mut(BYTES_PER_PIXEL) {
            pixel.copy_from_slice(&rgb);
        }
    }

    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL)
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if let Some(ofs) = self.offset(x, y) {
            self.buffer.as_mut()[ofs..ofs + BYTES_PER_PIXEL].copy_from_slice(&unpack_rgb(color));
        }
    }

    pub fn get_pixel(&self, x: i32, y: i32) -> u32 {
        match self.offset(x, y) {
            Some(ofs) => {
                let bytes = self.buffer.as_ref();
                pack_rgb([bytes[ofs], bytes[ofs + 1], bytes[ofs + 2]])
            }
            None => 0,
        }
    }

    /// Bresenham line from `(x0, y0)` to `(x1, y1)`, both endpoints included.
    ///
    /// The error term starts at `(dx > dy ? dx : -dy) / 2` and the x step is
    /// tested before the y step. Output must stay pixel-identical to this
    /// variant.
    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
        // i64 so that endpoints far outside the surface cannot overflow
        let (x0, y0, x1, y1) = (i64::from(x0), i64::from(y0), i64::from(x1), i64::from(y1));
        let (mut x, mut y) = (x0, y0);
        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = (if dx > dy { dx } else { -dy }) / 2;

        loop {
            self.plot(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = err;
            if e2 > -dx {
                err -= dy;
                x += sx;
            }
            if e2 < dy {
                err += dx;
                y += sy;
            }
        }
    }

    fn plot(&mut self, x: i64, y: i64, color: u32) {
        if let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) {
            self.set_pixel(x, y, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    const RED: u32 = 0xFF0000;

    fn lit(surface: &PixelSurface) -> BTreeSet<(i32, i32)> {
        let mut set = BTreeSet::new();
        for y in 0..surface.height() as i32 {
            for x in 0..surface.width() as i32 {
                if surface.get_pixel(x, y) != 0 {
                    set.insert((x, y));
                }
            }
        }
        set
    }

    fn line_pixels(x0: i32, y0: i32, x1: i32, y1: i32) -> BTreeSet<(i32, i32)> {
        let mut surface = PixelSurface::new(16, 16);
        surface.line(x0, y0, x1, y1, RED);
        lit(&surface)
    }

    #[test]
    fn test_color_packing() {
        assert_eq!(unpack_rgb(0x123456), [0x12, 0x34, 0x56]);
        assert_eq!(pack_rgb([0xAB, 0xCD, 0xEF]), 0xABCDEF);
        // alpha bits are ignored
        assert_eq!(unpack_rgb(0xFF00_00FF), [0x00, 0x00, 0xFF]);
    }

    #[test]
    fn test_pixel_layout_is_rgb_row_major() {
        let mut surface = PixelSurface::new(4, 3);
        surface.set_pixel(1, 2, 0x102030);
        let ofs = (2 * 4 + 1) * 3;
        assert_eq!(&surface.as_bytes()[ofs..ofs + 3], &[0x10, 0x20, 0x30]);
        assert_eq!(surface.get_pixel(1, 2), 0x102030);
    }

    #[test]
    fn test_out_of_bounds_is_clipped() {
        let mut surface = PixelSurface::new(5, 4);
        surface.clear(0x0000FF);
        let before = surface.as_bytes().to_vec();

        for (x, y) in [(-1, 0), (5, 0), (0, -1), (0, 4), (-1, -1), (5, 4)] {
            surface.set_pixel(x, y, RED);
            assert_eq!(surface.get_pixel(x, y), 0);
        }
        assert_eq!(surface.as_bytes(), before.as_slice());
    }

    #[test]
    fn test_clear_fills_every_pixel() {
        let mut surface = PixelSurface::new(7, 3);
        surface.clear(0xAAAAAA);
        for y in 0..3 {
            for x in 0..7 {
                assert_eq!(surface.get_pixel(x, y), 0xAAAAAA);
            }
        }
    }

    #[test]
    fn test_wraps_host_buffer() {
        let mut fb = vec![0xFFu8; 2 * 2 * 3];
        {
            let mut surface = PixelSurface::from_buffer(fb.as_mut_slice(), 2, 2).unwrap();
            surface.set_pixel(1, 1, 0x000000);
            assert_eq!(surface.get_pixel(0, 0), 0xFFFFFF);
        }
        assert_eq!(&fb[9..12], &[0, 0, 0]);
    }

    #[test]
    fn test_rejects_wrong_buffer_size() {
        let err = PixelSurface::from_buffer(vec![0u8; 11], 2, 2).unwrap_err();
        assert!(matches!(
            err,
            Error::BufferSize {
                expected: 12,
                actual: 11
            }
        ));
    }

    #[test]
    fn test_degenerate_line_is_one_pixel() {
        let pixels = line_pixels(3, 4, 3, 4);
        assert_eq!(pixels.into_iter().collect::<Vec<_>>(), vec![(3, 4)]);
    }

    #[test]
    fn test_line_matches_reference_path() {
        // exact tie in the error term: the x step wins first
        let pixels = line_pixels(0, 0, 6, 3);
        let expected: BTreeSet<_> = [(0, 0), (1, 0), (2, 1), (3, 1), (4, 2), (5, 2), (6, 3)]
            .into_iter()
            .collect();
        assert_eq!(pixels, expected);
    }

    #[test]
    fn test_line_is_inclusive_and_connected() {
        let ends = [(0, 0), (7, 2), (2, 9), (11, 11), (15, 0), (4, 4), (0, 13)];
        for &(x0, y0) in &ends {
            for &(x1, y1) in &ends {
                let pixels = line_pixels(x0, y0, x1, y1);
                assert!(pixels.contains(&(x0, y0)));
                assert!(pixels.contains(&(x1, y1)));

                // one pixel per step along the major axis
                let major = (x1 - x0).abs().max((y1 - y0).abs());
                assert_eq!(pixels.len() as i32, major + 1);

                for &(x, y) in &pixels {
                    if (x, y) == (x0, y0) || (x, y) == (x1, y1) {
                        continue;
                    }
                    let neighbours = pixels
                        .iter()
                        .filter(|&&(nx, ny)| {
                            (nx, ny) != (x, y) && (nx - x).abs() <= 1 && (ny - y).abs() <= 1
                        })
                        .count();
                    assert!(neighbours >= 2, "gap near ({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn test_line_reverse_covers_same_pixels() {
        for (a, b) in [
            ((0, 0), (9, 0)),
            ((2, 1), (2, 12)),
            ((0, 0), (8, 8)),
            ((8, 0), (0, 8)),
            ((0, 0), (5, 2)),
            ((0, 0), (2, 5)),
            ((1, 1), (8, 5)),
            ((0, 0), (3, 1)),
        ] {
            assert_eq!(line_pixels(a.0, a.1, b.0, b.1), line_pixels(b.0, b.1, a.0, a.1));
        }
    }

    #[test]
    fn test_line_clips_offscreen_segments() {
        let mut surface = PixelSurface::new(4, 4);
        surface.line(-3, 1, 6, 1, RED);
        let pixels = lit(&surface);
        assert_eq!(pixels.len(), 4);
        assert!(pixels.iter().all(|&(_, y)| y == 1));
    }
}
